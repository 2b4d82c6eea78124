//! drive_shell - navigation and session shell for the Sublimes Drive client
//!
//! This crate owns the part of the single-page client that maps the current
//! screen to the address bar and reconciles it against an asynchronously
//! arriving authentication session. Screens themselves live elsewhere; they
//! only see the `navigate(page, payload)` entry point and the session state.

mod bypass;
mod config;
mod navigation;
mod provider;
mod render;
mod session;
mod shell;
mod storage;

#[cfg(test)]
mod test_utils;

pub use config::{
    BuildMode, DRIVE_SHELL_BUILD_MODE, DRIVE_SHELL_LOADING_DEBOUNCE_MS, DRIVE_SHELL_PROVIDER_URL,
    DRIVE_SHELL_TEST_BYPASS, DEFAULT_ROUTES, RouteTable, ShellConfig,
};

pub use navigation::{
    Browser, FragmentKind, InMemoryBrowser, ListingType, Location, Modal, NavigationError,
    NavigationOutcome, NavigationState, Navigator, Page, PageStateStore, PaymentPayload,
    ScreenPayload, SyncOutcome, UrlSynchronizer,
};

pub use session::{
    AuthEvent, AuthEventKind, Decision, FetchTicket, GuardInput, IgnoreReason, Latch, LatchKind,
    Revision, Session, SessionController, SessionError, SessionState, SessionStatus, SessionUser,
    StatusChange, Transition, UserProfile, decide, decide_failure, decide_fetch,
};

pub use provider::{
    FailureClass, FetchScript, IdentityProvider, ProviderError, ScriptedIdentityProvider,
    Subscription,
};

pub use bypass::{BypassError, BypassGrant, BypassSignal, MOCK_PROFILE_KEY, TestBypassProvider};

pub use storage::{InMemoryStorage, PersistentStorage, StorageError, get_json, put_json};

pub use render::{
    Layout, PageCatalog, RenderBoundary, RenderError, Restriction, ScreenDescriptor,
    ScreenResolver, View,
};

pub use shell::{Shell, ShellError, ShellEvent, ShellHandle};
