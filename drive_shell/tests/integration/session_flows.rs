use std::time::Duration;

use drive_shell::{AuthEventKind, FetchScript, ProviderError, SessionStatus, View};

use crate::common::{TestShell, TestUsers, event};

/// Session reconciliation between the one-shot fetch and the event stream.
///
/// Scenario A: a returning user on /home with a stored session
#[tokio::test]
async fn test_returning_user_stays_on_home() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/home")?;
    t.provider
        .set_fetch(FetchScript::session(TestUsers::car_owner()))
        .await;

    t.mount().await?;

    assert_eq!(t.page(), "home");
    assert_eq!(t.shell.session_state().status(), SessionStatus::Authenticated);
    assert_eq!(t.shell.browser().replace_count(), 0);
    assert_eq!(t.shell.browser().history_len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_logged_out_landing_load_resolves_anonymous() -> Result<(), Box<dyn std::error::Error>>
{
    // Given a logged-out load of /home whose stream first reports "still establishing"
    let mut t = TestShell::at("/home")?;
    t.provider.set_fetch(FetchScript::empty()).await;
    t.provider
        .emit_on_subscribe(event(AuthEventKind::InitialSession, None))
        .await;

    // When the shell mounts and both sources have answered
    t.mount().await?;

    // Then the empty fetch decides the session
    assert_eq!(t.shell.session_state().status(), SessionStatus::Anonymous);
    assert_eq!(t.page(), "home");
    assert_eq!(t.provider.fetch_calls(), 1);
    Ok(())
}

/// Scenario C: signing out on the login screen does not interrupt it
#[tokio::test]
async fn test_signed_out_on_login_keeps_page() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/login")?;
    t.mount().await?;

    t.provider.emit(event(AuthEventKind::SignedOut, None)).await;
    t.settle().await?;

    assert_eq!(t.page(), "login");
    assert_eq!(t.shell.session_state().status(), SessionStatus::Anonymous);
    Ok(())
}

/// Scenario D: signing in from welcome moves to home
#[tokio::test]
async fn test_signed_in_on_welcome_goes_home() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/welcome")?;
    t.mount().await?;
    assert_eq!(t.shell.session_state().status(), SessionStatus::Anonymous);

    t.provider
        .emit(event(AuthEventKind::SignedIn, Some(TestUsers::car_owner())))
        .await;
    t.settle().await?;

    assert_eq!(t.page(), "home");
    assert_eq!(t.url(), "/home");
    assert!(t.shell.session_state().is_authenticated());
    Ok(())
}

#[tokio::test]
async fn test_slow_fetch_loses_to_subscription() -> Result<(), Box<dyn std::error::Error>> {
    // Given a fetch that resolves with a session only after a while
    let mut t = TestShell::at("/wallet")?;
    t.provider
        .set_fetch(FetchScript::session(TestUsers::car_owner()).after(Duration::from_millis(200)))
        .await;
    t.shell.mount().await?;

    // When the subscription reports a sign-out first
    t.provider.emit(event(AuthEventKind::SignedOut, None)).await;
    t.settle().await?;

    // Then the late fetch result is discarded
    assert_eq!(t.shell.session_state().status(), SessionStatus::Anonymous);
    assert_eq!(t.page(), "welcome");
    assert_eq!(t.provider.fetch_calls(), 1);
    Ok(())
}

#[tokio::test]
async fn test_status_follows_latest_event() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/home")?;
    t.mount().await?;

    let sequence = [
        (AuthEventKind::SignedIn, Some(TestUsers::car_owner())),
        (AuthEventKind::TokenRefreshed, Some(TestUsers::car_owner())),
        (AuthEventKind::SignedOut, None),
        (AuthEventKind::SignedIn, Some(TestUsers::garage_owner())),
    ];
    for (kind, session) in sequence {
        let expected = if session.is_some() {
            SessionStatus::Authenticated
        } else {
            SessionStatus::Anonymous
        };
        t.provider.emit(event(kind, session)).await;
        t.settle().await?;
        assert_eq!(t.shell.session_state().status(), expected, "after {kind}");
    }

    let profile = t.shell.session_state().profile().ok_or("missing profile")?;
    assert_eq!(profile.role, "garage_owner");
    Ok(())
}

#[tokio::test]
async fn test_network_failure_shows_diagnostics() -> Result<(), Box<dyn std::error::Error>> {
    // Given a provider whose fetch fails with a network error
    let mut t = TestShell::at("/marketplace")?;
    t.provider
        .set_fetch(FetchScript::failing(ProviderError::Provider(
            "NetworkError when attempting to fetch resource.".to_string(),
        )))
        .await;

    // When mounting
    t.mount().await?;

    // Then the diagnostics screen carries the error
    assert_eq!(t.page(), "diagnostics");
    match t.shell.view() {
        View::Diagnostics { error: Some(message) } => {
            assert!(message.contains("identity provider"));
        }
        other => return Err(format!("unexpected view {other:?}").into()),
    }

    // When the provider recovers and the user retries
    t.provider
        .set_fetch(FetchScript::session(TestUsers::car_owner()))
        .await;
    t.shell.retry().await?;
    t.settle().await?;

    // Then the session is established
    assert!(t.shell.session_state().is_authenticated());
    assert_eq!(t.shell.navigation().app_error(), None);
    Ok(())
}

#[tokio::test]
async fn test_provider_failure_degrades_to_anonymous() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/home")?;
    t.provider
        .set_fetch(FetchScript::failing(ProviderError::Provider(
            "Invalid Refresh Token".to_string(),
        )))
        .await;

    t.mount().await?;

    assert_eq!(t.page(), "home");
    assert_eq!(t.shell.session_state().status(), SessionStatus::Anonymous);
    assert_eq!(t.shell.navigation().app_error(), None);
    Ok(())
}

#[tokio::test]
async fn test_nothing_changes_after_shutdown() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/wallet")?;
    t.provider
        .set_fetch(FetchScript::session(TestUsers::car_owner()).after(Duration::from_millis(50)))
        .await;
    t.shell.mount().await?;

    t.shell.shutdown();
    t.provider.emit(event(AuthEventKind::SignedOut, None)).await;
    t.settle().await?;

    assert_eq!(t.shell.session_state().status(), SessionStatus::Unknown);
    assert_eq!(t.page(), "wallet");
    assert_eq!(t.provider.subscriber_count().await, 0);
    Ok(())
}
