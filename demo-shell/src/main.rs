use std::sync::Arc;

use dotenvy::dotenv;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use drive_shell::{InMemoryBrowser, InMemoryStorage, ScriptedIdentityProvider, Shell, ShellConfig};

mod replay;

use crate::replay::{DEFAULT_START_URL, replay};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("{}=debug,drive_shell=debug", env!("CARGO_CRATE_NAME")).into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let start_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_START_URL.to_string());
    let config = ShellConfig::from_env();
    tracing::info!(
        %start_url,
        provider_url = %config.provider_url,
        build_mode = ?config.build_mode,
        "Starting shell replay"
    );

    let provider = Arc::new(ScriptedIdentityProvider::new());
    let browser = InMemoryBrowser::new(&start_url)?;
    let mut shell = Shell::new(config, browser, Arc::clone(&provider), InMemoryStorage::new());

    replay(&mut shell, &provider).await?;

    shell.shutdown();
    Ok(())
}
