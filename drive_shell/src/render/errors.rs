use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum RenderError {
    #[error("Screen '{page}' failed to render: {message}")]
    ScreenFailed { page: String, message: String },

    #[error("No screen for page '{0}'")]
    UnknownScreen(String),
}

impl RenderError {
    /// Message shown on the recovery view.
    pub fn message(&self) -> &str {
        match self {
            Self::ScreenFailed { message, .. } => message,
            Self::UnknownScreen(_) => "Unknown screen",
        }
    }
}
