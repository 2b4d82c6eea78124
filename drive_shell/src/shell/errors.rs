use thiserror::Error;

use crate::bypass::BypassError;
use crate::navigation::NavigationError;
use crate::provider::ProviderError;
use crate::session::SessionError;
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Bypass error: {0}")]
    Bypass(#[from] BypassError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// The shell was dropped; its inbox no longer accepts events.
    #[error("Shell has shut down")]
    ShutDown,
}
