use crate::config::RouteTable;
use crate::navigation::{Browser, FragmentKind, Navigator, Page};
use crate::provider::{FailureClass, ProviderError};
use crate::session::errors::SessionError;
use crate::session::main::guard::{self, Decision, GuardInput, StatusChange};
use crate::session::main::revision::{FetchTicket, Latch, LatchKind, Revision};
use crate::session::types::{AuthEvent, Session, SessionState, SessionStatus, UserProfile};

const NETWORK_FAILURE_MESSAGE: &str =
    "Failed to connect to the identity provider. Running diagnostics...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    /// Arrived after shutdown.
    Unmounted,
    /// A subscription event decided state after the fetch was issued.
    StaleFetch,
    /// An empty fetch result while a redirect fragment is being consumed.
    AwaitingOAuth,
    /// A repeated empty `InitialSession` while already anonymous.
    Replayed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Ignored(IgnoreReason),
    Applied {
        status: SessionStatus,
        redirected_to: Option<Page>,
        fragment_stripped: bool,
    },
}

impl Transition {
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn redirected_to(&self) -> Option<&Page> {
        match self {
            Self::Applied { redirected_to, .. } => redirected_to.as_ref(),
            Self::Ignored(_) => None,
        }
    }
}

/// Owns [`SessionState`] and reconciles the one-shot fetch with the event stream.
///
/// Lifecycle: created unmounted, [`init`](Self::init) mounts it, and
/// [`shutdown`](Self::shutdown) unmounts it for good. Every handler checks
/// `mounted` first, so results that resolve after shutdown are dropped.
///
/// Once the subscription has delivered an event it is authoritative: each
/// processed event advances the [`Revision`], and a fetch result whose
/// [`FetchTicket`] predates the current revision is discarded.
#[derive(Debug)]
pub struct SessionController {
    state: SessionState,
    routes: RouteTable,
    mounted: bool,
    revision: Revision,
    awaiting_oauth: bool,
    initial_session: Latch,
    initial_anonymous: Latch,
}

impl SessionController {
    pub fn new(routes: RouteTable) -> Self {
        Self {
            state: SessionState::default(),
            routes,
            mounted: false,
            revision: Revision::default(),
            awaiting_oauth: false,
            initial_session: Latch::default(),
            initial_anonymous: Latch::default(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// True from a mount with an OAuth fragment until the status resolves.
    pub fn awaiting_oauth(&self) -> bool {
        self.awaiting_oauth
    }

    /// Mount the controller.
    ///
    /// Returns the ticket for the one-shot fetch, or `None` when the URL carries
    /// an OAuth redirect and only the event stream may decide.
    pub fn init(&mut self, fragment: FragmentKind) -> Option<FetchTicket> {
        self.mounted = true;
        self.awaiting_oauth = fragment.is_oauth();
        if self.awaiting_oauth {
            tracing::info!("OAuth callback detected, waiting for the session event stream");
            return None;
        }
        Some(self.issue_fetch())
    }

    pub fn issue_fetch(&self) -> FetchTicket {
        FetchTicket::new(self.revision)
    }

    pub fn shutdown(&mut self) {
        if self.mounted {
            tracing::debug!(revision = self.revision.value(), "Session controller unmounted");
        }
        self.mounted = false;
    }

    pub fn handle_event<B: Browser>(
        &mut self,
        event: AuthEvent,
        nav: &mut Navigator<B>,
    ) -> Result<Transition, SessionError> {
        if !self.mounted {
            tracing::debug!(event = %event.kind, "Dropping auth event after unmount");
            return Ok(Transition::Ignored(IgnoreReason::Unmounted));
        }
        let decision = guard::decide(
            &self.routes,
            &GuardInput {
                kind: event.kind,
                has_session: event.session.is_some(),
                current_page: nav.current_page(),
                fragment: nav.fragment(),
                handled_initial: self.state.handled_initial,
            },
        );
        if decision.latch == Some(LatchKind::InitialAnonymous)
            && self.initial_anonymous.is_tripped()
            && self.state.status == SessionStatus::Anonymous
        {
            tracing::debug!(event = %event.kind, "Initial anonymous session already applied");
            return Ok(Transition::Ignored(IgnoreReason::Replayed));
        }
        // Only an event that decides the session makes an earlier fetch stale.
        if decision.status != StatusChange::Keep {
            self.revision = self.revision.next();
        }

        tracing::info!(
            event = %event.kind,
            user = event.session.as_ref().and_then(|s| s.user.email.as_deref()).unwrap_or("no session"),
            page = %nav.current_page(),
            revision = self.revision.value(),
            "Auth state change"
        );
        self.apply(decision, event.session.as_ref(), nav)
    }

    pub fn handle_fetch<B: Browser>(
        &mut self,
        ticket: FetchTicket,
        result: Result<Option<Session>, ProviderError>,
        nav: &mut Navigator<B>,
    ) -> Result<Transition, SessionError> {
        if !self.mounted {
            tracing::debug!("Dropping session fetch result after unmount");
            return Ok(Transition::Ignored(IgnoreReason::Unmounted));
        }
        if !ticket.is_current(self.revision) {
            tracing::warn!(
                issued_at = ticket.issued_at().value(),
                current = self.revision.value(),
                "Discarding stale session fetch"
            );
            return Ok(Transition::Ignored(IgnoreReason::StaleFetch));
        }

        match result {
            Ok(None) if self.awaiting_oauth => {
                tracing::debug!("Empty session while OAuth redirect is in flight");
                Ok(Transition::Ignored(IgnoreReason::AwaitingOAuth))
            }
            Ok(session) => {
                match &session {
                    Some(s) => tracing::info!(user = ?s.user.email, "User is authenticated"),
                    None => tracing::info!("No active session"),
                }
                let decision =
                    guard::decide_fetch(&self.routes, session.is_some(), nav.current_page());
                self.apply(decision, session.as_ref(), nav)
            }
            Err(e) => self.handle_failure(&e, nav),
        }
    }

    /// Apply a rejected fetch or subscription.
    pub fn handle_failure<B: Browser>(
        &mut self,
        error: &ProviderError,
        nav: &mut Navigator<B>,
    ) -> Result<Transition, SessionError> {
        if !self.mounted {
            return Ok(Transition::Ignored(IgnoreReason::Unmounted));
        }
        let class = error.class();
        match class {
            FailureClass::TransientNetwork => {
                tracing::error!(error = %error, "Identity provider unreachable, running diagnostics");
                nav.store_mut().set_app_error(NETWORK_FAILURE_MESSAGE);
            }
            FailureClass::Provider => {
                tracing::warn!(error = %error, "Session check failed, continuing as anonymous");
            }
        }
        let decision = guard::decide_failure(&self.routes, class);
        self.apply(decision, None, nav)
    }

    /// Authenticate with a locally synthesized session; the provider is never consulted.
    pub fn apply_bypass(&mut self, profile: UserProfile) {
        self.mounted = true;
        self.awaiting_oauth = false;
        self.initial_session.trip();
        self.state.handled_initial = true;
        self.state.status = SessionStatus::Authenticated;
        self.state.profile = Some(profile);
    }

    fn apply<B: Browser>(
        &mut self,
        decision: Decision,
        session: Option<&Session>,
        nav: &mut Navigator<B>,
    ) -> Result<Transition, SessionError> {
        if let Some(kind) = decision.latch {
            let first = match kind {
                LatchKind::InitialSession => {
                    self.state.handled_initial = true;
                    self.initial_session.trip()
                }
                LatchKind::InitialAnonymous => self.initial_anonymous.trip(),
            };
            if !first {
                tracing::debug!(?kind, "Initial session already handled");
            }
        }

        match decision.status {
            StatusChange::Authenticated => {
                self.state.status = SessionStatus::Authenticated;
                if let Some(session) = session {
                    self.state.profile = Some(UserProfile::from(&session.user));
                }
            }
            StatusChange::Anonymous => {
                if self.state.status != SessionStatus::Anonymous {
                    tracing::info!("Session is anonymous");
                }
                self.state.status = SessionStatus::Anonymous;
                self.state.profile = None;
            }
            StatusChange::Keep => {
                tracing::debug!("Waiting for the session to be established");
            }
        }
        if self.state.status != SessionStatus::Unknown {
            self.awaiting_oauth = false;
        }

        let mut fragment_stripped = false;
        let mut redirected_to = None;
        if let Some(target) = decision.target {
            if decision.strip_fragment {
                fragment_stripped = nav.strip_fragment(target)?;
            }
            if nav.redirect(target)? {
                redirected_to = Some(Page::new(target));
            }
        }

        Ok(Transition::Applied {
            status: self.state.status,
            redirected_to,
            fragment_stripped,
        })
    }
}
