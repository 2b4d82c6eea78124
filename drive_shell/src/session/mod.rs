mod errors;
mod main;
mod types;

pub use errors::SessionError;
pub use main::{
    Decision, FetchTicket, GuardInput, IgnoreReason, Latch, LatchKind, Revision,
    SessionController, StatusChange, Transition, decide, decide_failure, decide_fetch,
};
pub use types::{
    AuthEvent, AuthEventKind, Session, SessionState, SessionStatus, SessionUser, UserProfile,
};
