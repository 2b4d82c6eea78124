use thiserror::Error;

use crate::navigation::NavigationError;
use crate::provider::ProviderError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SessionError {
    /// Error while applying a redirect to the page state or history
    #[error("Navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// Error from the identity provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),
}
