use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;

use crate::provider::errors::ProviderError;
use crate::session::{AuthEvent, Session};

/// The identity provider as consumed by the shell.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// One-shot lookup of the current session.
    async fn get_current_session(&self) -> Result<Option<Session>, ProviderError>;

    /// Open the session event stream. It may start with an `InitialSession` event.
    async fn subscribe(&self) -> Result<Subscription, ProviderError>;
}

/// Cancellable stream of session events.
#[derive(Debug)]
pub struct Subscription {
    receiver: mpsc::UnboundedReceiver<AuthEvent>,
    active: bool,
}

impl Subscription {
    pub fn new(receiver: mpsc::UnboundedReceiver<AuthEvent>) -> Self {
        Self {
            receiver,
            active: true,
        }
    }

    /// Next event, or `None` once unsubscribed or the provider hangs up.
    pub async fn next(&mut self) -> Option<AuthEvent> {
        if !self.active {
            return None;
        }
        self.receiver.recv().await
    }

    /// Next event if one is already queued.
    pub fn try_next(&mut self) -> Result<Option<AuthEvent>, ProviderError> {
        if !self.active {
            return Err(ProviderError::SubscriptionClosed);
        }
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(ProviderError::SubscriptionClosed),
        }
    }

    /// Stop receiving. Events already queued are dropped.
    pub fn unsubscribe(&mut self) {
        if self.active {
            tracing::debug!("Unsubscribing from session events");
        }
        self.active = false;
        self.receiver.close();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.receiver.close();
    }
}
