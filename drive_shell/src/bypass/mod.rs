mod config;
mod errors;
mod grant;

pub use config::MOCK_PROFILE_KEY;
pub use errors::BypassError;
pub use grant::{BypassGrant, BypassSignal, TestBypassProvider};
