use drive_shell::{
    AuthEventKind, Browser, FetchScript, InMemoryBrowser, NavigationOutcome, Page, PageCatalog,
    RouteTable, ScreenPayload, SessionStatus, UrlSynchronizer, View,
};
use proptest::prelude::*;
use serde_json::json;

use crate::common::{TestShell, TestUsers, event};

#[tokio::test]
async fn test_navigation_replaces_history() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/home")?;
    t.provider
        .set_fetch(FetchScript::session(TestUsers::car_owner()))
        .await;
    t.mount().await?;

    t.shell.navigate("marketplace", None)?;
    t.shell.navigate("wallet", None)?;

    assert_eq!(t.url(), "/wallet");
    assert_eq!(t.shell.browser().history_len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_popstate_bypasses_redirect_policy() -> Result<(), Box<dyn std::error::Error>> {
    // Given a signed-in user who followed a link to the welcome screen
    let mut t = TestShell::at("/home")?;
    t.provider
        .set_fetch(FetchScript::session(TestUsers::car_owner()))
        .await;
    t.mount().await?;
    t.shell.browser_mut().push_entry("/wallet")?;
    t.shell.browser_mut().push_entry("/welcome")?;

    // When the host delivers the popstate for that entry
    t.shell.handle().pop_state()?;
    t.settle().await?;

    // Then the page follows the URL, although the fetch policy would send them home
    assert_eq!(t.page(), "welcome");
    assert_eq!(t.shell.session_state().status(), SessionStatus::Authenticated);

    // And going back lands on the previous entry
    assert!(t.shell.browser_mut().back());
    assert_eq!(t.shell.pop_state(), Some(Page::new("wallet")));
    assert_eq!(t.url(), "/wallet");
    assert_eq!(t.shell.browser().replace_count(), 0);
    Ok(())
}

#[tokio::test]
async fn test_create_post_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/home")?;
    t.mount().await?;
    let before = t.url();

    let outcome = t.shell.navigate("create-post", None)?;

    assert!(matches!(outcome, NavigationOutcome::ModalOpened(_)));
    assert_eq!(t.url(), before);
    match t.shell.view() {
        View::Screen {
            create_post_open, ..
        } => assert!(create_post_open),
        other => return Err(format!("unexpected view {other:?}").into()),
    }

    t.shell.close_create_post();
    assert!(!t.shell.navigation().create_post_open());
    Ok(())
}

fn round_trip(page: &Page) -> Result<Page, drive_shell::NavigationError> {
    let sync = UrlSynchronizer::new(RouteTable::default());
    let mut browser = InMemoryBrowser::new("/home")?;
    sync.on_navigation_change(&mut browser, page)?;
    Ok(sync.initial(&browser.location()))
}

#[test]
fn test_url_round_trip_for_every_screen() -> Result<(), Box<dyn std::error::Error>> {
    for screen in PageCatalog::screens() {
        let page = Page::new(screen.screen);
        assert_eq!(round_trip(&page)?, page);
    }
    for token in ["café", "my page", "a?b", "100%", "tag#1"] {
        let page = Page::new(token);
        assert_eq!(round_trip(&page)?, page, "token {token}");
    }
    // A leading slash is not part of the token
    assert_eq!(round_trip(&Page::new("/home"))?, Page::new("home"));
    Ok(())
}

proptest! {
    #[test]
    fn test_url_round_trip_for_arbitrary_tokens(
        token in "[a-zA-Z0-9é ?#%&_-]{1,12}(/[a-z0-9_-]{1,8}){0,2}"
    ) {
        let page = Page::new(token);
        let back = round_trip(&page).map_err(|e| TestCaseError::fail(e.to_string()))?;
        prop_assert_eq!(back, page);
    }
}

#[tokio::test]
async fn test_payment_payload_reaches_screen() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/marketplace")?;
    t.mount().await?;

    t.shell.navigate(
        "stripe-payment",
        json!({"amount": 99.5, "itemType": "boost", "listingId": "lst-9"})
            .as_object()
            .cloned(),
    )?;

    match t.shell.navigation().pending_payload() {
        Some(ScreenPayload::Payment(payment)) => {
            assert_eq!(payment.amount, 99.5);
            assert_eq!(payment.item_type, "boost");
            assert_eq!(payment.extra.get("listingId"), Some(&json!("lst-9")));
        }
        other => return Err(format!("unexpected payload {other:?}").into()),
    }
    Ok(())
}

#[tokio::test]
async fn test_meetup_restricted_for_garage_owner() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/home")?;
    t.mount().await?;
    t.provider
        .emit(event(AuthEventKind::SignedIn, Some(TestUsers::garage_owner())))
        .await;
    t.settle().await?;

    t.shell.navigate("meetup", None)?;
    // Resolve past the loading indicator
    t.shell.step().await?;

    match t.shell.view() {
        View::Screen { descriptor, .. } => {
            assert!(descriptor.is_restricted());
            assert_eq!(descriptor.screen, "access-restricted");
        }
        other => return Err(format!("unexpected view {other:?}").into()),
    }
    Ok(())
}

#[tokio::test]
async fn test_unknown_page_renders_welcome() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/home")?;
    t.provider
        .set_fetch(FetchScript::session(TestUsers::car_owner()))
        .await;
    t.mount().await?;

    t.shell.navigate("does-not-exist", None)?;

    // The token is kept; only the screen falls back
    assert_eq!(t.page(), "does-not-exist");
    match t.shell.view() {
        View::Screen { descriptor, .. } => assert_eq!(descriptor.screen, "welcome"),
        other => return Err(format!("unexpected view {other:?}").into()),
    }
    Ok(())
}
