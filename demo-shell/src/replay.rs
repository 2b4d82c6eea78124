use std::time::Duration;

use serde_json::json;

use drive_shell::{
    AuthEvent, AuthEventKind, FetchScript, InMemoryBrowser, InMemoryStorage,
    ScriptedIdentityProvider, Session, SessionUser, Shell, ShellError, View,
};

/// The provider's OAuth callback, as it arrives after a Google sign-in.
pub(crate) const DEFAULT_START_URL: &str =
    "/home#access_token=demo-token&expires_in=3600&token_type=bearer";

type DemoShell = Shell<InMemoryBrowser, ScriptedIdentityProvider, InMemoryStorage>;

fn demo_session() -> Session {
    let mut user = SessionUser::new("demo-user", "demo@sublimesdrive.com");
    user.user_metadata
        .insert("full_name".to_string(), json!("Demo Driver"));
    Session::new("demo-token", user, 3600)
}

fn print_view(step: &str, shell: &DemoShell) {
    let view = match shell.view() {
        View::Spinner => "spinner".to_string(),
        View::Diagnostics { error } => format!("diagnostics ({})", error.unwrap_or_default()),
        View::Recovery { page, message } => format!("recovery for {page}: {message}"),
        View::Screen {
            descriptor,
            create_post_open,
            ..
        } => format!(
            "{} [{:?}]{}",
            descriptor.title,
            descriptor.layout,
            if create_post_open { " + create post" } else { "" }
        ),
    };
    println!(
        "{step:<24} url={:<48} status={:?} view={view}",
        shell.browser().current_url(),
        shell.session_state().status(),
    );
}

async fn settle_loading(shell: &mut DemoShell) -> Result<(), ShellError> {
    tokio::time::sleep(shell.config().loading_debounce + Duration::from_millis(10)).await;
    shell.run_until_idle().await?;
    Ok(())
}

/// Walk the shell through a sign-in, some browsing and a sign-out.
pub(crate) async fn replay(
    shell: &mut DemoShell,
    provider: &ScriptedIdentityProvider,
) -> Result<(), ShellError> {
    provider.set_fetch(FetchScript::empty()).await;
    provider
        .emit_on_subscribe(AuthEvent::new(AuthEventKind::InitialSession, None))
        .await;

    shell.mount().await?;
    shell.run_until_idle().await?;
    print_view("mounted", shell);

    provider
        .emit(AuthEvent::new(AuthEventKind::SignedIn, Some(demo_session())))
        .await;
    shell.run_until_idle().await?;
    print_view("signed in", shell);

    shell.navigate("marketplace", None)?;
    print_view("navigate marketplace", shell);
    settle_loading(shell).await?;
    print_view("loaded", shell);

    shell.navigate(
        "listing-payment",
        json!({"listingData": {"id": "lst-42"}, "listingType": "garage"})
            .as_object()
            .cloned(),
    )?;
    settle_loading(shell).await?;
    print_view("listing payment", shell);
    shell.navigate("create-post", None)?;
    print_view("create post", shell);
    shell.close_create_post();

    provider
        .emit(AuthEvent::new(AuthEventKind::SignedOut, None))
        .await;
    shell.run_until_idle().await?;
    print_view("signed out", shell);

    Ok(())
}
