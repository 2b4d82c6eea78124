use serde_json::{Map, Value};

use crate::config::RouteTable;
use crate::navigation::types::{Modal, NavigationOutcome, NavigationState, Page, ScreenPayload};

/// Sole writer of [`NavigationState`].
#[derive(Debug, Clone)]
pub struct PageStateStore {
    state: NavigationState,
    routes: RouteTable,
    loading_epoch: u64,
}

impl PageStateStore {
    pub fn new(initial: Page, routes: RouteTable) -> Self {
        Self {
            state: NavigationState::new(initial),
            routes,
            loading_epoch: 0,
        }
    }

    pub fn state(&self) -> &NavigationState {
        &self.state
    }

    pub fn current_page(&self) -> &Page {
        &self.state.current_page
    }

    /// Navigate to `page`, attaching a payload shaped for it.
    ///
    /// Modal pseudo-pages open their modal and leave `current_page` alone.
    pub fn set(&mut self, page: &str, payload: Option<Map<String, Value>>) -> NavigationOutcome {
        if self.routes.is_modal(page) {
            tracing::debug!(page, "Opening modal instead of navigating");
            self.state.create_post_open = true;
            return NavigationOutcome::ModalOpened(Modal::CreatePost);
        }

        let page = Page::new(page);
        tracing::debug!(from = %self.state.current_page, to = %page, "Page change");
        self.state.pending_payload = payload.map(|raw| ScreenPayload::shape(page.as_str(), raw));
        self.state.current_page = page.clone();
        NavigationOutcome::Navigated(page)
    }

    /// Assign the page without touching the payload. Returns whether it changed.
    pub(crate) fn assign(&mut self, page: Page) -> bool {
        if self.state.current_page == page {
            return false;
        }
        self.state.current_page = page;
        true
    }

    pub fn close_create_post(&mut self) {
        self.state.create_post_open = false;
    }

    /// Raise the loading indicator; the returned epoch identifies this navigation.
    pub(crate) fn begin_loading(&mut self) -> u64 {
        self.loading_epoch += 1;
        self.state.is_loading = true;
        self.loading_epoch
    }

    /// Clear the indicator if `epoch` is still the latest navigation.
    pub(crate) fn finish_loading(&mut self, epoch: u64) -> bool {
        if epoch != self.loading_epoch {
            return false;
        }
        self.state.is_loading = false;
        true
    }

    pub(crate) fn set_app_error(&mut self, message: impl Into<String>) {
        self.state.app_error = Some(message.into());
    }

    pub(crate) fn clear_app_error(&mut self) {
        self.state.app_error = None;
    }
}
