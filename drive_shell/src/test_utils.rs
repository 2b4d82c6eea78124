//! Shared helpers for unit tests across the crate.

use std::sync::{Arc, Once};

use crate::config::{RouteTable, ShellConfig};
use crate::navigation::{InMemoryBrowser, Navigator};
use crate::provider::ScriptedIdentityProvider;
use crate::session::{Session, SessionUser};
use crate::shell::Shell;
use crate::storage::InMemoryStorage;

pub(crate) type TestShell = Shell<InMemoryBrowser, ScriptedIdentityProvider, InMemoryStorage>;

/// Load `.env_test` (falling back to `.env`) once per test binary.
///
/// Tests pass configuration explicitly through [`ShellConfig`]; the files only
/// matter for tests that read the environment-backed statics.
pub(crate) fn init_test_environment() {
    static ENV_INIT: Once = Once::new();
    ENV_INIT.call_once(|| {
        if dotenvy::from_filename(".env_test").is_err() {
            dotenvy::dotenv().ok();
        }
    });
}

pub(crate) fn test_session(id: &str) -> Session {
    let user = SessionUser::new(id, format!("{id}@example.com"));
    Session::new(format!("token-{id}"), user, 3600)
}

pub(crate) fn navigator_at(url: &str) -> Navigator<InMemoryBrowser> {
    let browser = InMemoryBrowser::new(url).expect("valid test url");
    Navigator::new(browser, RouteTable::default())
}

pub(crate) fn shell_at(url: &str, provider: Arc<ScriptedIdentityProvider>) -> TestShell {
    shell_with(url, provider, ShellConfig::default(), InMemoryStorage::new())
}

pub(crate) fn shell_with(
    url: &str,
    provider: Arc<ScriptedIdentityProvider>,
    config: ShellConfig,
    storage: InMemoryStorage,
) -> TestShell {
    init_test_environment();
    let browser = InMemoryBrowser::new(url).expect("valid test url");
    Shell::new(config, browser, provider, storage)
}
