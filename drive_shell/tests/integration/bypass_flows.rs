use drive_shell::{
    BuildMode, InMemoryStorage, MOCK_PROFILE_KEY, PersistentStorage, Session, SessionStatus,
    ShellConfig, UserProfile, get_json,
};

use crate::common::TestShell;

/// Scenario E: bypass via query parameter
#[tokio::test]
async fn test_bypass_via_query_parameter() -> Result<(), Box<dyn std::error::Error>> {
    let mut t = TestShell::at("/welcome?ref=promo&testBypass=true")?;

    t.mount().await?;

    assert_eq!(t.shell.session_state().status(), SessionStatus::Authenticated);
    assert_eq!(t.page(), "home");
    assert_eq!(t.url(), "/home?ref=promo");
    assert_eq!(t.provider.fetch_calls(), 0);

    let profile = t.shell.session_state().profile().ok_or("missing profile")?;
    assert_eq!(profile.display_name, "Test Car Owner");
    assert_eq!(profile.username.as_deref(), Some("testcarowner"));
    assert_eq!(profile.wallet_balance, 1000);

    // The provider's own client would find a consistent record
    let session: Session = get_json(t.shell.storage(), "sb-localhost-auth-token")?
        .ok_or("missing provider record")?;
    assert_eq!(session.access_token, "test-bypass-token");
    assert_eq!(session.token_type, "bearer");
    let side_channel: Option<UserProfile> = get_json(t.shell.storage(), MOCK_PROFILE_KEY)?;
    assert!(side_channel.is_some());
    Ok(())
}

#[tokio::test]
async fn test_bypass_via_persisted_flag() -> Result<(), Box<dyn std::error::Error>> {
    let mut storage = InMemoryStorage::new();
    storage.set_item("testBypass", "true")?;
    let config = ShellConfig {
        provider_url: "https://abcd1234.supabase.co".to_string(),
        ..ShellConfig::default()
    };
    let mut t = TestShell::with_config("/login", config, storage)?;

    t.mount().await?;

    assert!(t.shell.session_state().is_authenticated());
    assert_eq!(t.url(), "/home");
    assert!(t.shell.storage().get_item("sb-abcd1234-auth-token")?.is_some());
    Ok(())
}

#[tokio::test]
async fn test_bypass_never_in_production() -> Result<(), Box<dyn std::error::Error>> {
    let config = ShellConfig {
        build_mode: BuildMode::Production,
        test_bypass_flag: true,
        ..ShellConfig::default()
    };
    let mut t = TestShell::with_config("/home?testBypass=true", config, InMemoryStorage::new())?;

    t.mount().await?;

    assert!(t.shell.bypass().is_none());
    assert_eq!(t.provider.fetch_calls(), 1);
    assert!(t.shell.storage().get_item(MOCK_PROFILE_KEY)?.is_none());
    Ok(())
}
