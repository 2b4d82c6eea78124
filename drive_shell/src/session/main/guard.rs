//! Redirect policy for session events.
//!
//! Pure: given an event and where the user is, say what the session status
//! becomes and where (if anywhere) to send them. The controller owns the
//! latches and performs the navigation.

use crate::config::RouteTable;
use crate::navigation::{FragmentKind, Page};
use crate::provider::FailureClass;
use crate::session::main::revision::LatchKind;
use crate::session::types::AuthEventKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusChange {
    Keep,
    Authenticated,
    Anonymous,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub status: StatusChange,
    pub target: Option<&'static str>,
    /// Drop the URL fragment before landing on `target`.
    pub strip_fragment: bool,
    pub latch: Option<LatchKind>,
}

impl Decision {
    fn keep() -> Self {
        Self::status(StatusChange::Keep)
    }

    fn status(status: StatusChange) -> Self {
        Self {
            status,
            target: None,
            strip_fragment: false,
            latch: None,
        }
    }

    fn to(mut self, target: &'static str) -> Self {
        self.target = Some(target);
        self
    }

    fn stripping(mut self, strip: bool) -> Self {
        self.strip_fragment = strip;
        self
    }

    fn latching(mut self, latch: LatchKind) -> Self {
        self.latch = Some(latch);
        self
    }
}

#[derive(Debug, Clone, Copy)]
pub struct GuardInput<'a> {
    pub kind: AuthEventKind,
    pub has_session: bool,
    pub current_page: &'a Page,
    pub fragment: FragmentKind,
    pub handled_initial: bool,
}

/// Decide the outcome of a subscription event.
pub fn decide(routes: &RouteTable, input: &GuardInput<'_>) -> Decision {
    use AuthEventKind::*;

    let page = input.current_page.as_str();
    let on_landing = routes.is_oauth_landing(page);

    match (input.kind, input.has_session) {
        // The provider may still be parsing the redirect
        (InitialSession, false) if on_landing => Decision::keep(),
        (InitialSession, false) => {
            Decision::status(StatusChange::Anonymous).latching(LatchKind::InitialAnonymous)
        }
        (InitialSession, true) => {
            let decision = Decision::status(StatusChange::Authenticated);
            if input.handled_initial {
                return decision;
            }
            let decision = decision.latching(LatchKind::InitialSession);
            if on_landing {
                decision
                    .to(routes.home)
                    .stripping(input.fragment.is_present())
            } else {
                decision
            }
        }
        (SignedIn | SignedUp, true) => {
            let decision = Decision::status(StatusChange::Authenticated);
            let from_redirect = input.fragment.is_oauth()
                || (on_landing && input.fragment.is_present())
                || input.kind == SignedUp;
            if from_redirect {
                decision
                    .to(routes.home)
                    .stripping(input.fragment.is_present())
            } else if routes.is_entry(page) {
                decision.to(routes.home)
            } else {
                decision
            }
        }
        (TokenRefreshed, true) => Decision::status(StatusChange::Authenticated),
        (SignedOut, _) => {
            let decision = Decision::status(StatusChange::Anonymous);
            if routes.keeps_on_sign_out(page) {
                decision
            } else {
                decision.to(routes.welcome)
            }
        }
        (_, false) => Decision::status(StatusChange::Anonymous),
    }
}

/// Decide the outcome of the one-shot session fetch.
pub fn decide_fetch(routes: &RouteTable, has_session: bool, current_page: &Page) -> Decision {
    let page = current_page.as_str();
    if has_session {
        let decision = Decision::status(StatusChange::Authenticated);
        if page == routes.welcome {
            decision.to(routes.home)
        } else {
            decision
        }
    } else {
        let decision = Decision::status(StatusChange::Anonymous);
        if routes.is_auth_page(page) || page == routes.home {
            decision
        } else {
            decision.to(routes.welcome)
        }
    }
}

/// Decide the outcome of a rejected fetch or subscription.
pub fn decide_failure(routes: &RouteTable, class: FailureClass) -> Decision {
    match class {
        FailureClass::TransientNetwork => {
            Decision::status(StatusChange::Anonymous).to(routes.diagnostics)
        }
        FailureClass::Provider => Decision::status(StatusChange::Anonymous),
    }
}
