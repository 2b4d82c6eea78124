use std::sync::Arc;

use drive_shell::{
    InMemoryBrowser, InMemoryStorage, ScriptedIdentityProvider, Shell, ShellConfig, ShellError,
};

/// A shell wired to in-memory collaborators, plus the provider that feeds it.
pub struct TestShell {
    pub shell: Shell<InMemoryBrowser, ScriptedIdentityProvider, InMemoryStorage>,
    pub provider: Arc<ScriptedIdentityProvider>,
}

impl TestShell {
    pub fn at(url: &str) -> Result<Self, ShellError> {
        Self::with_config(url, ShellConfig::default(), InMemoryStorage::new())
    }

    pub fn with_config(
        url: &str,
        config: ShellConfig,
        storage: InMemoryStorage,
    ) -> Result<Self, ShellError> {
        let provider = Arc::new(ScriptedIdentityProvider::new());
        let browser = InMemoryBrowser::new(url)?;
        let shell = Shell::new(config, browser, Arc::clone(&provider), storage);
        Ok(Self { shell, provider })
    }

    /// Mount and apply whatever the provider answers straight away.
    pub async fn mount(&mut self) -> Result<(), ShellError> {
        self.shell.mount().await?;
        self.shell.run_until_idle().await?;
        Ok(())
    }

    pub async fn settle(&mut self) -> Result<usize, ShellError> {
        self.shell.run_until_idle().await
    }

    pub fn page(&self) -> &str {
        self.shell.current_page().as_str()
    }

    pub fn url(&self) -> String {
        self.shell.browser().current_url()
    }
}
