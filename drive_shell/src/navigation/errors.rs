use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum NavigationError {
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("Payload error: {0}")]
    Payload(String),

    #[error("History error: {0}")]
    History(String),
}

impl From<url::ParseError> for NavigationError {
    fn from(err: url::ParseError) -> Self {
        Self::InvalidUrl(err.to_string())
    }
}

impl From<serde_json::Error> for NavigationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Payload(err.to_string())
    }
}
