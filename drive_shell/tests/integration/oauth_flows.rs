use drive_shell::{AuthEventKind, FetchScript, SessionStatus, View};

use crate::common::{OAUTH_CALLBACK_URL, TestShell, TestUsers, event};

/// Flows that start with the provider redirecting back with a token fragment.
///
/// Scenario B: the root URL with an access token, then SignedIn
#[tokio::test]
async fn test_oauth_redirect_lands_on_home() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/#access_token=abc&token_type=bearer")?;
    t.mount().await?;

    // Nothing is decided while the provider parses the fragment
    assert_eq!(t.provider.fetch_calls(), 0);
    assert_eq!(t.shell.session_state().status(), SessionStatus::Unknown);
    assert_eq!(t.shell.view(), View::Spinner);

    t.provider
        .emit(event(AuthEventKind::SignedIn, Some(TestUsers::car_owner())))
        .await;
    t.settle().await?;

    assert_eq!(t.page(), "home");
    assert_eq!(t.url(), "/home");
    assert!(t.shell.session_state().is_authenticated());
    assert!(!t.shell.awaiting_oauth());
    Ok(())
}

#[tokio::test]
async fn test_no_anonymous_flash_on_landing() -> Result<(), Box<dyn std::error::Error>> {
    // Given the provider's callback URL, with an empty initial event
    let mut t = TestShell::at(OAUTH_CALLBACK_URL)?;
    t.provider
        .emit_on_subscribe(event(AuthEventKind::InitialSession, None))
        .await;

    // When the shell mounts
    t.mount().await?;

    // Then the session is still being established
    assert_eq!(t.shell.session_state().status(), SessionStatus::Unknown);
    assert!(t.url().contains("access_token"));

    // When the provider finishes with the session
    t.provider
        .emit(event(
            AuthEventKind::InitialSession,
            Some(TestUsers::car_owner()),
        ))
        .await;
    t.settle().await?;

    // Then the fragment is gone and the user is home
    assert!(t.shell.session_state().is_authenticated());
    assert_eq!(t.url(), "/home");
    Ok(())
}

#[tokio::test]
async fn test_retried_empty_fetch_is_ignored_during_oauth() -> Result<(), Box<dyn std::error::Error>>
{
    let mut t = TestShell::at(OAUTH_CALLBACK_URL)?;
    t.provider.set_fetch(FetchScript::empty()).await;
    t.mount().await?;

    t.shell.retry().await?;
    t.settle().await?;

    assert_eq!(t.provider.fetch_calls(), 1);
    assert_eq!(t.shell.session_state().status(), SessionStatus::Unknown);
    Ok(())
}

#[tokio::test]
async fn test_replayed_initial_session_redirects_once() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at(OAUTH_CALLBACK_URL)?;
    t.mount().await?;

    for _ in 0..2 {
        t.provider
            .emit(event(
                AuthEventKind::InitialSession,
                Some(TestUsers::car_owner()),
            ))
            .await;
        t.settle().await?;
    }

    // One replace for the fragment strip; home was already the page
    assert_eq!(t.shell.browser().replace_count(), 1);
    assert_eq!(t.url(), "/home");
    Ok(())
}

#[tokio::test]
async fn test_signed_up_always_lands_home() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/verify-email")?;
    t.mount().await?;

    t.provider
        .emit(event(AuthEventKind::SignedUp, Some(TestUsers::car_owner())))
        .await;
    t.settle().await?;

    assert_eq!(t.page(), "home");
    Ok(())
}
