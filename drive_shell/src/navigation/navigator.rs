use serde_json::{Map, Value};

use crate::config::RouteTable;
use crate::navigation::browser::{Browser, Location};
use crate::navigation::errors::NavigationError;
use crate::navigation::store::PageStateStore;
use crate::navigation::types::{FragmentKind, NavigationOutcome, NavigationState, Page};
use crate::navigation::url_sync::UrlSynchronizer;

/// Page state, its history mirror and the browser they mirror into.
///
/// Every change to the current page goes through here so the address bar
/// follows it: user navigation via [`Navigator::navigate`], redirect policy
/// via [`Navigator::redirect`], and back/forward via [`Navigator::pop_state`].
pub struct Navigator<B: Browser> {
    store: PageStateStore,
    sync: UrlSynchronizer,
    browser: B,
}

impl<B: Browser> Navigator<B> {
    pub fn new(browser: B, routes: RouteTable) -> Self {
        let sync = UrlSynchronizer::new(routes.clone());
        let initial = sync.initial(&browser.location());
        tracing::debug!(page = %initial, "Initial page from URL");
        Self {
            store: PageStateStore::new(initial, routes),
            sync,
            browser,
        }
    }

    pub fn state(&self) -> &NavigationState {
        self.store.state()
    }

    pub fn current_page(&self) -> &Page {
        self.store.current_page()
    }

    pub fn location(&self) -> Location {
        self.browser.location()
    }

    pub fn fragment(&self) -> FragmentKind {
        self.sync.fragment(&self.browser.location())
    }

    pub fn browser(&self) -> &B {
        &self.browser
    }

    pub fn browser_mut(&mut self) -> &mut B {
        &mut self.browser
    }

    /// Bring the address bar in line with the current page.
    pub fn mirror(&mut self) -> Result<(), NavigationError> {
        self.sync
            .on_navigation_change(&mut self.browser, self.store.current_page())?;
        Ok(())
    }

    /// User-driven navigation.
    pub fn navigate(
        &mut self,
        page: &str,
        payload: Option<Map<String, Value>>,
    ) -> Result<NavigationOutcome, NavigationError> {
        let outcome = self.store.set(page, payload);
        if let NavigationOutcome::Navigated(_) = outcome {
            self.mirror()?;
        }
        Ok(outcome)
    }

    /// Policy-driven navigation. Returns whether the page changed.
    pub(crate) fn redirect(&mut self, page: &str) -> Result<bool, NavigationError> {
        let changed = self.store.assign(Page::new(page));
        if changed {
            tracing::debug!(page, "Redirecting");
            self.mirror()?;
        }
        Ok(changed)
    }

    pub(crate) fn strip_fragment(&mut self, landing: &str) -> Result<bool, NavigationError> {
        let stripped = self
            .sync
            .strip_fragment(&mut self.browser, &Page::new(landing))?;
        if stripped {
            tracing::debug!(landing, "Stripped redirect fragment");
        }
        Ok(stripped)
    }

    /// Replace the whole URL, e.g. to drop a query parameter.
    pub(crate) fn replace_url(&mut self, url: &str) -> Result<(), NavigationError> {
        self.browser.replace_state(url)
    }

    /// Apply a back/forward traversal straight to the page state.
    pub fn pop_state(&mut self) -> Option<Page> {
        let page = self.sync.on_pop_state(&self.browser.location())?;
        tracing::debug!(page = %page, "popstate");
        self.store.assign(page.clone());
        Some(page)
    }

    pub(crate) fn store_mut(&mut self) -> &mut PageStateStore {
        &mut self.store
    }
}
