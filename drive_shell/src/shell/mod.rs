mod core;
mod errors;
mod types;

pub use core::Shell;
pub use errors::ShellError;
pub use types::{ShellEvent, ShellHandle};
