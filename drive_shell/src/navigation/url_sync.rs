use crate::config::RouteTable;
use crate::navigation::browser::{Browser, Location};
use crate::navigation::errors::NavigationError;
use crate::navigation::types::{FragmentKind, Page, SyncOutcome};

/// Two-way mapping between the current page and the address bar.
#[derive(Debug, Clone)]
pub struct UrlSynchronizer {
    routes: RouteTable,
}

impl UrlSynchronizer {
    pub fn new(routes: RouteTable) -> Self {
        Self { routes }
    }

    pub fn initial(&self, location: &Location) -> Page {
        Page::from_path(&location.pathname)
    }

    pub fn fragment(&self, location: &Location) -> FragmentKind {
        if self.routes.has_oauth_fragment(&location.hash) {
            FragmentKind::OAuth
        } else if location.hash.is_empty() || location.hash == "#" {
            FragmentKind::None
        } else {
            FragmentKind::Other
        }
    }

    /// Mirror `page` into history with a replace, never a push.
    pub fn on_navigation_change<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        page: &Page,
    ) -> Result<SyncOutcome, NavigationError> {
        let location = browser.location();
        if self.fragment(&location).is_oauth() {
            tracing::debug!(page = %page, "OAuth fragment present, leaving history alone");
            return Ok(SyncOutcome::DeferredForOAuth);
        }

        let path = page.path();
        if location.pathname == path {
            return Ok(SyncOutcome::Unchanged);
        }
        browser.replace_state(&path)?;
        Ok(SyncOutcome::Replaced(path))
    }

    /// Page for a back/forward traversal, or `None` while an OAuth fragment is present.
    pub fn on_pop_state(&self, location: &Location) -> Option<Page> {
        if self.fragment(location).is_oauth() {
            tracing::debug!("Ignoring popstate during OAuth callback");
            return None;
        }
        Some(Page::from_path(&location.pathname))
    }

    /// Drop whatever fragment the URL carries, landing on `page`.
    pub fn strip_fragment<B: Browser + ?Sized>(
        &self,
        browser: &mut B,
        page: &Page,
    ) -> Result<bool, NavigationError> {
        if !self.fragment(&browser.location()).is_present() {
            return Ok(false);
        }
        browser.replace_state(&page.path())?;
        Ok(true)
    }
}
