use thiserror::Error;

/// Message fragments that identify a network-class rejection, lowercase.
const NETWORK_FAILURE_PATTERNS: &[&str] = &["fetch", "network"];

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Subscription closed")]
    SubscriptionClosed,
}

/// How a rejection is recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureClass {
    /// Route to the diagnostics screen with a retry.
    TransientNetwork,
    /// Continue as anonymous without navigating.
    Provider,
}

impl ProviderError {
    pub fn class(&self) -> FailureClass {
        match self {
            Self::Network(_) => FailureClass::TransientNetwork,
            Self::Provider(message) if is_network_message(message) => {
                FailureClass::TransientNetwork
            }
            Self::Provider(_) | Self::SubscriptionClosed => FailureClass::Provider,
        }
    }
}

fn is_network_message(message: &str) -> bool {
    let message = message.to_lowercase();
    NETWORK_FAILURE_PATTERNS
        .iter()
        .any(|pattern| message.contains(pattern))
}
