use crate::navigation::{Page, ScreenPayload};
use crate::render::errors::RenderError;
use crate::session::UserProfile;

/// Chrome drawn around a screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// No chrome: entry and verification flows.
    Auth,
    /// Full-screen enterprise settings and maintenance.
    FullPage,
    /// Dedicated admin interface.
    Admin,
    /// Header, sidebar and bottom navigation.
    Main,
}

/// Why a screen was replaced by an access notice, and where its action leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
    pub message: &'static str,
    pub action_page: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenDescriptor {
    /// Canonical screen name; aliases resolve to the same name.
    pub screen: &'static str,
    pub title: &'static str,
    pub layout: Layout,
    pub restriction: Option<Restriction>,
}

impl ScreenDescriptor {
    pub(crate) const fn new(screen: &'static str, title: &'static str, layout: Layout) -> Self {
        Self {
            screen,
            title,
            layout,
            restriction: None,
        }
    }

    pub fn is_restricted(&self) -> bool {
        self.restriction.is_some()
    }
}

/// Maps a page token to the screen drawn for it.
///
/// Failures should come back as [`RenderError`]; a panic is also caught by
/// [`RenderBoundary`](crate::RenderBoundary) and shown as recovery.
pub trait ScreenResolver: Send + 'static {
    fn resolve(
        &self,
        page: &Page,
        profile: Option<&UserProfile>,
    ) -> Result<ScreenDescriptor, RenderError>;
}

/// What the shell shows right now. Exactly one at a time.
#[derive(Debug, Clone, PartialEq)]
pub enum View {
    Spinner,
    Diagnostics {
        error: Option<String>,
    },
    /// A screen failed to render; the only action is going back to welcome.
    Recovery {
        page: Page,
        message: String,
    },
    Screen {
        descriptor: ScreenDescriptor,
        payload: Option<ScreenPayload>,
        create_post_open: bool,
    },
}
