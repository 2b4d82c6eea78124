use thiserror::Error;

use crate::navigation::NavigationError;
use crate::storage::StorageError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BypassError {
    #[error("Invalid provider URL: {0}")]
    InvalidProviderUrl(String),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),
}
