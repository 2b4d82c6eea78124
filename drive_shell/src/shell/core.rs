use std::sync::Arc;

use chrono::Utc;
use serde_json::{Map, Value};
use tokio::sync::mpsc;

use crate::bypass::{BypassGrant, TestBypassProvider};
use crate::config::ShellConfig;
use crate::navigation::{Browser, Location, NavigationOutcome, NavigationState, Navigator, Page};
use crate::provider::{IdentityProvider, Subscription};
use crate::render::{PageCatalog, RenderBoundary, ScreenResolver, View};
use crate::session::{FetchTicket, SessionController, SessionState, Transition};
use crate::shell::errors::ShellError;
use crate::shell::types::{ShellEvent, ShellHandle};
use crate::storage::PersistentStorage;

/// The application shell: one current page, one session, one event loop.
///
/// Subscription events and everything spawned by the shell (the one-shot
/// session fetch, loading timers, host popstate) are funnelled through a
/// single inbox and applied one at a time, so [`NavigationState`] and
/// [`SessionState`] only ever have one writer.
pub struct Shell<B: Browser, P: IdentityProvider, S: PersistentStorage> {
    config: ShellConfig,
    navigator: Navigator<B>,
    session: SessionController,
    provider: Arc<P>,
    storage: S,
    resolver: Box<dyn ScreenResolver>,
    inbox_tx: mpsc::UnboundedSender<ShellEvent>,
    inbox_rx: mpsc::UnboundedReceiver<ShellEvent>,
    subscription: Option<Subscription>,
    pending_fetches: usize,
    bypass: Option<BypassGrant>,
}

impl<B: Browser, P: IdentityProvider, S: PersistentStorage> Shell<B, P, S> {
    pub fn new(config: ShellConfig, browser: B, provider: Arc<P>, storage: S) -> Self {
        let (inbox_tx, inbox_rx) = mpsc::unbounded_channel();
        let navigator = Navigator::new(browser, config.routes.clone());
        let session = SessionController::new(config.routes.clone());
        Self {
            config,
            navigator,
            session,
            provider,
            storage,
            resolver: Box::new(PageCatalog::new()),
            inbox_tx,
            inbox_rx,
            subscription: None,
            pending_fetches: 0,
            bypass: None,
        }
    }

    /// Replace the screen resolver used by [`Shell::view`].
    pub fn with_resolver(mut self, resolver: impl ScreenResolver) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn handle(&self) -> ShellHandle {
        ShellHandle::new(self.inbox_tx.clone())
    }

    /// Start the shell against the current URL.
    ///
    /// With the test bypass active the session is synthesized locally and the
    /// identity provider is never contacted. Otherwise the event subscription
    /// is opened and the one-shot fetch is started, unless the URL carries an
    /// OAuth fragment, in which case only the subscription decides.
    pub async fn mount(&mut self) -> Result<(), ShellError> {
        let location = self.navigator.location();
        if let Some(signal) =
            TestBypassProvider::resolve_signal(&self.config, &location, &self.storage)?
        {
            let grant = TestBypassProvider::new(self.config.provider_url.as_str()).activate(
                signal,
                &mut self.storage,
                Utc::now(),
            )?;
            self.session.apply_bypass(grant.profile.clone());
            self.navigator.redirect(self.config.routes.home)?;
            // Keep the other query parameters the user arrived with.
            let landed = Location {
                pathname: self.navigator.location().pathname,
                ..location
            };
            if let Some(url) = TestBypassProvider::stripped_url(&landed) {
                self.navigator.replace_url(&url)?;
            }
            self.bypass = Some(grant);
            return Ok(());
        }

        self.navigator.mirror()?;
        let ticket = self.session.init(self.navigator.fragment());
        tracing::info!(
            page = %self.navigator.current_page(),
            awaiting_oauth = self.session.awaiting_oauth(),
            "Shell mounted"
        );

        self.subscribe().await?;
        if let Some(ticket) = ticket {
            self.spawn_fetch(ticket);
        }
        Ok(())
    }

    async fn subscribe(&mut self) -> Result<(), ShellError> {
        match self.provider.subscribe().await {
            Ok(subscription) => self.subscription = Some(subscription),
            Err(e) => {
                self.session.handle_failure(&e, &mut self.navigator)?;
            }
        }
        Ok(())
    }

    fn spawn_fetch(&mut self, ticket: FetchTicket) {
        let provider = Arc::clone(&self.provider);
        let tx = self.inbox_tx.clone();
        self.pending_fetches += 1;
        tokio::spawn(async move {
            let result = provider.get_current_session().await;
            if tx.send(ShellEvent::FetchResolved { ticket, result }).is_err() {
                tracing::debug!("Shell dropped before the session fetch resolved");
            }
        });
    }

    /// User navigation from a screen. Raises the loading indicator for the
    /// configured debounce.
    pub fn navigate(
        &mut self,
        page: &str,
        payload: Option<Map<String, Value>>,
    ) -> Result<NavigationOutcome, ShellError> {
        let outcome = self.navigator.navigate(page, payload)?;
        if let NavigationOutcome::Navigated(_) = outcome {
            let epoch = self.navigator.store_mut().begin_loading();
            let delay = self.config.loading_debounce;
            let tx = self.inbox_tx.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                // The shell may be gone; nothing left to clear then.
                let _ = tx.send(ShellEvent::LoadingElapsed(epoch));
            });
        }
        Ok(outcome)
    }

    /// Apply a back/forward traversal the host has already performed.
    pub fn pop_state(&mut self) -> Option<Page> {
        if !self.session.is_mounted() {
            return None;
        }
        self.navigator.pop_state()
    }

    pub fn dispatch(&mut self, event: ShellEvent) -> Result<(), ShellError> {
        match event {
            ShellEvent::Auth(event) => {
                self.session.handle_event(event, &mut self.navigator)?;
            }
            ShellEvent::FetchResolved { ticket, result } => {
                self.pending_fetches = self.pending_fetches.saturating_sub(1);
                let transition = self
                    .session
                    .handle_fetch(ticket, result, &mut self.navigator)?;
                if let Transition::Ignored(reason) = transition {
                    tracing::debug!(?reason, "Session fetch result ignored");
                }
            }
            ShellEvent::PopState => {
                self.pop_state();
            }
            ShellEvent::LoadingElapsed(epoch) => {
                self.navigator.store_mut().finish_loading(epoch);
            }
            ShellEvent::SubscriptionClosed => {
                if self.session.is_mounted() {
                    tracing::warn!("Session event stream closed");
                }
                self.subscription = None;
            }
            ShellEvent::Shutdown => self.shutdown(),
        }
        Ok(())
    }

    /// Wait for the next event and apply it. Subscription events take
    /// precedence over the inbox when both are ready.
    pub async fn step(&mut self) -> Result<(), ShellError> {
        let event = match self.subscription.as_mut() {
            Some(subscription) => tokio::select! {
                biased;
                auth = subscription.next() => match auth {
                    Some(event) => ShellEvent::Auth(event),
                    None => ShellEvent::SubscriptionClosed,
                },
                event = self.inbox_rx.recv() => event.ok_or(ShellError::ShutDown)?,
            },
            None => self.inbox_rx.recv().await.ok_or(ShellError::ShutDown)?,
        };
        self.dispatch(event)
    }

    fn try_next_event(&mut self) -> Option<ShellEvent> {
        if let Some(subscription) = self.subscription.as_mut() {
            match subscription.try_next() {
                Ok(Some(event)) => return Some(ShellEvent::Auth(event)),
                Ok(None) => {}
                Err(_) => return Some(ShellEvent::SubscriptionClosed),
            }
        }
        self.inbox_rx.try_recv().ok()
    }

    /// Apply every queued event and wait for outstanding session fetches.
    /// Loading timers are not waited for. Returns how many events were applied.
    pub async fn run_until_idle(&mut self) -> Result<usize, ShellError> {
        let mut applied = 0;
        loop {
            if let Some(event) = self.try_next_event() {
                self.dispatch(event)?;
                applied += 1;
            } else if self.pending_fetches > 0 {
                self.step().await?;
                applied += 1;
            } else {
                return Ok(applied);
            }
        }
    }

    /// Process events until a [`ShellEvent::Shutdown`] arrives, e.g. from
    /// [`ShellHandle::shutdown`].
    pub async fn run(&mut self) -> Result<(), ShellError> {
        while self.session.is_mounted() {
            self.step().await?;
        }
        Ok(())
    }

    /// Unsubscribe and unmount. Results arriving afterwards are dropped.
    pub fn shutdown(&mut self) {
        if let Some(subscription) = self.subscription.as_mut() {
            subscription.unsubscribe();
        }
        self.session.shutdown();
        tracing::info!("Shell shut down");
    }

    /// Diagnostics retry: clear the error and check the session again.
    pub async fn retry(&mut self) -> Result<(), ShellError> {
        self.navigator.store_mut().clear_app_error();
        if !self.session.is_mounted() || self.bypass.is_some() {
            return Ok(());
        }
        if self.subscription.is_none() {
            self.subscribe().await?;
        }
        let ticket = self.session.issue_fetch();
        tracing::info!(revision = ticket.issued_at().value(), "Retrying session check");
        self.spawn_fetch(ticket);
        Ok(())
    }

    /// Recovery action: clear the error and go back to welcome.
    pub fn reset_to_welcome(&mut self) -> Result<(), ShellError> {
        self.navigator.store_mut().clear_app_error();
        self.navigator.navigate(self.config.routes.welcome, None)?;
        Ok(())
    }

    pub fn close_create_post(&mut self) {
        self.navigator.store_mut().close_create_post();
    }

    pub fn view(&self) -> View {
        RenderBoundary::render(
            self.resolver.as_ref(),
            self.navigator.state(),
            self.session.state(),
            self.session.awaiting_oauth(),
        )
    }

    pub fn navigation(&self) -> &NavigationState {
        self.navigator.state()
    }

    pub fn current_page(&self) -> &Page {
        self.navigator.current_page()
    }

    pub fn session_state(&self) -> &SessionState {
        self.session.state()
    }

    pub fn is_mounted(&self) -> bool {
        self.session.is_mounted()
    }

    pub fn awaiting_oauth(&self) -> bool {
        self.session.awaiting_oauth()
    }

    pub fn browser(&self) -> &B {
        self.navigator.browser()
    }

    /// For hosts that drive history themselves, e.g. simulating back/forward.
    pub fn browser_mut(&mut self) -> &mut B {
        self.navigator.browser_mut()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn bypass(&self) -> Option<&BypassGrant> {
        self.bypass.as_ref()
    }

    pub fn is_subscribed(&self) -> bool {
        self.subscription.as_ref().is_some_and(Subscription::is_active)
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }
}
