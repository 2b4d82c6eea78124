mod errors;
mod memory;
mod types;

pub use errors::{FailureClass, ProviderError};
pub use memory::{FetchScript, ScriptedIdentityProvider};
pub use types::{IdentityProvider, Subscription};
