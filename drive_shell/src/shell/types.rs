use tokio::sync::mpsc;

use crate::provider::ProviderError;
use crate::session::{AuthEvent, FetchTicket, Session};
use crate::shell::errors::ShellError;

/// Everything the main loop reacts to. Processed strictly one at a time.
#[derive(Debug)]
pub enum ShellEvent {
    Auth(AuthEvent),
    FetchResolved {
        ticket: FetchTicket,
        result: Result<Option<Session>, ProviderError>,
    },
    /// The host's history moved; read the new location from the browser.
    PopState,
    /// A loading debounce timer fired for the navigation with this epoch.
    LoadingElapsed(u64),
    SubscriptionClosed,
    /// Unsubscribe and unmount; [`Shell::run`](crate::Shell::run) returns after this.
    Shutdown,
}

/// Sending half of the shell's inbox, for hosts delivering events from elsewhere.
#[derive(Debug, Clone)]
pub struct ShellHandle {
    tx: mpsc::UnboundedSender<ShellEvent>,
}

impl ShellHandle {
    pub(crate) fn new(tx: mpsc::UnboundedSender<ShellEvent>) -> Self {
        Self { tx }
    }

    pub fn send(&self, event: ShellEvent) -> Result<(), ShellError> {
        self.tx.send(event).map_err(|_| ShellError::ShutDown)
    }

    pub fn pop_state(&self) -> Result<(), ShellError> {
        self.send(ShellEvent::PopState)
    }

    pub fn shutdown(&self) -> Result<(), ShellError> {
        self.send(ShellEvent::Shutdown)
    }
}
