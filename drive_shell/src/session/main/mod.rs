mod controller;
mod guard;
mod revision;

pub use controller::{IgnoreReason, SessionController, Transition};
pub use guard::{Decision, GuardInput, StatusChange, decide, decide_failure, decide_fetch};
pub use revision::{FetchTicket, Latch, LatchKind, Revision};
