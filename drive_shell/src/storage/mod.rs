mod errors;
mod memory;
mod types;

pub use errors::StorageError;
pub use memory::InMemoryStorage;
pub use types::{PersistentStorage, get_json, put_json};
