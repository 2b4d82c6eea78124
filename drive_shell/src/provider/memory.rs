use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{Mutex, mpsc};
use uuid::Uuid;

use crate::provider::errors::ProviderError;
use crate::provider::types::{IdentityProvider, Subscription};
use crate::session::{AuthEvent, Session};

/// What the next `get_current_session` call returns, and after how long.
#[derive(Debug, Clone)]
pub struct FetchScript {
    pub delay: Duration,
    pub response: Result<Option<Session>, ProviderError>,
}

impl FetchScript {
    pub fn session(session: Session) -> Self {
        Self {
            delay: Duration::ZERO,
            response: Ok(Some(session)),
        }
    }

    pub fn empty() -> Self {
        Self {
            delay: Duration::ZERO,
            response: Ok(None),
        }
    }

    pub fn failing(error: ProviderError) -> Self {
        Self {
            delay: Duration::ZERO,
            response: Err(error),
        }
    }

    pub fn after(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

impl Default for FetchScript {
    fn default() -> Self {
        Self::empty()
    }
}

/// In-process identity provider driven by the host or a test.
#[derive(Debug, Default)]
pub struct ScriptedIdentityProvider {
    fetch: Mutex<FetchScript>,
    subscribers: Mutex<Vec<(Uuid, mpsc::UnboundedSender<AuthEvent>)>>,
    subscribe_error: Mutex<Option<ProviderError>>,
    on_subscribe: Mutex<Option<AuthEvent>>,
    fetch_calls: AtomicUsize,
}

impl ScriptedIdentityProvider {
    pub fn new() -> Self {
        tracing::debug!("Creating scripted identity provider");
        Self::default()
    }

    pub async fn set_fetch(&self, script: FetchScript) {
        *self.fetch.lock().await = script;
    }

    /// Make the next `subscribe` calls fail.
    pub async fn fail_subscribe(&self, error: ProviderError) {
        *self.subscribe_error.lock().await = Some(error);
    }

    pub async fn restore_subscribe(&self) {
        *self.subscribe_error.lock().await = None;
    }

    /// Deliver `event` to each new subscriber as soon as it subscribes.
    pub async fn emit_on_subscribe(&self, event: AuthEvent) {
        *self.on_subscribe.lock().await = Some(event);
    }

    /// Send `event` to every live subscriber. Returns how many received it.
    pub async fn emit(&self, event: AuthEvent) -> usize {
        let mut subscribers = self.subscribers.lock().await;
        subscribers.retain(|(id, tx)| {
            let delivered = tx.send(event.clone()).is_ok();
            if !delivered {
                tracing::debug!(%id, "Pruning closed session subscriber");
            }
            delivered
        });
        tracing::debug!(event = %event.kind, receivers = subscribers.len(), "Emitted auth event");
        subscribers.len()
    }

    pub async fn subscriber_count(&self) -> usize {
        self.subscribers
            .lock()
            .await
            .iter()
            .filter(|(_, tx)| !tx.is_closed())
            .count()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for ScriptedIdentityProvider {
    async fn get_current_session(&self) -> Result<Option<Session>, ProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.fetch.lock().await.clone();
        if !script.delay.is_zero() {
            tokio::time::sleep(script.delay).await;
        }
        script.response
    }

    async fn subscribe(&self) -> Result<Subscription, ProviderError> {
        if let Some(error) = self.subscribe_error.lock().await.clone() {
            return Err(error);
        }

        let (tx, rx) = mpsc::unbounded_channel();
        if let Some(event) = self.on_subscribe.lock().await.clone() {
            tx.send(event)
                .map_err(|_| ProviderError::SubscriptionClosed)?;
        }

        let id = Uuid::new_v4();
        tracing::debug!(%id, "Session subscriber registered");
        self.subscribers.lock().await.push((id, tx));
        Ok(Subscription::new(rx))
    }
}
