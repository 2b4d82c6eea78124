use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::navigation::errors::NavigationError;

/// Screen identifier. Never empty: an unset page resolves to `welcome`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Page(String);

impl Page {
    pub const WELCOME: &'static str = "welcome";

    /// Leading slashes are dropped; an empty name is `welcome`.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let trimmed = name.trim_start_matches('/');
        if trimmed.is_empty() {
            Self::welcome()
        } else if trimmed.len() == name.len() {
            Self(name)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn welcome() -> Self {
        Self(Self::WELCOME.to_string())
    }

    /// Page for a `location.pathname`: segments are percent-decoded, `/` is welcome.
    pub fn from_path(pathname: &str) -> Self {
        let raw = pathname.trim_start_matches('/');
        match urlencoding::decode(raw) {
            Ok(decoded) => Self::new(decoded.into_owned()),
            Err(e) => {
                tracing::warn!(pathname, error = %e, "Path is not valid UTF-8 once decoded");
                Self::new(raw)
            }
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// URL path for this page. Each `/`-separated segment is percent-encoded.
    pub fn path(&self) -> String {
        let segments: Vec<_> = self.0.split('/').map(urlencoding::encode).collect();
        format!("/{}", segments.join("/"))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Page {
    fn from(name: String) -> Self {
        Self::new(name)
    }
}

impl From<Page> for String {
    fn from(page: Page) -> Self {
        page.0
    }
}

impl PartialEq<str> for Page {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Page {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// What the current `location.hash` carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentKind {
    None,
    /// A fragment unrelated to the identity provider.
    Other,
    /// An access token or recovery flow the provider is still consuming.
    OAuth,
}

impl FragmentKind {
    pub fn is_present(self) -> bool {
        self != Self::None
    }

    pub fn is_oauth(self) -> bool {
        self == Self::OAuth
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListingType {
    #[default]
    Marketplace,
    Garage,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentPayload {
    pub amount: f64,
    pub item_type: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListingEnvelope {
    listing_data: Value,
    #[serde(default)]
    listing_type: ListingType,
}

/// Transient data handed to the next screen, shaped for that screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ScreenPayload {
    Listing {
        listing_data: Value,
        listing_type: ListingType,
    },
    Payment(PaymentPayload),
    VerifyEmail {
        email: String,
    },
    Other(Map<String, Value>),
}

impl ScreenPayload {
    /// Shape a raw payload for `page`. A payload that does not fit is kept as `Other`.
    pub fn shape(page: &str, raw: Map<String, Value>) -> Self {
        match Self::try_shape(page, &raw) {
            Ok(Some(payload)) => payload,
            Ok(None) => Self::Other(raw),
            Err(e) => {
                tracing::warn!(page, error = %e, "Payload does not match target screen");
                Self::Other(raw)
            }
        }
    }

    fn try_shape(page: &str, raw: &Map<String, Value>) -> Result<Option<Self>, NavigationError> {
        match page {
            "listing-payment" => {
                let envelope: ListingEnvelope =
                    serde_json::from_value(Value::Object(raw.clone()))?;
                Ok(Some(Self::Listing {
                    listing_data: envelope.listing_data,
                    listing_type: envelope.listing_type,
                }))
            }
            "stripe-payment" | "payment-success" => Ok(Some(Self::Payment(
                serde_json::from_value(Value::Object(raw.clone()))?,
            ))),
            "verify-email" => Ok(raw.get("email").and_then(Value::as_str).map(|email| {
                Self::VerifyEmail {
                    email: email.to_string(),
                }
            })),
            _ => Ok(None),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Modal {
    CreatePost,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationOutcome {
    Navigated(Page),
    /// The token opened a modal; neither `current_page` nor history changed.
    ModalOpened(Modal),
}

/// Result of mirroring the current page into history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Replaced(String),
    Unchanged,
    /// The provider is still consuming a redirect fragment.
    DeferredForOAuth,
}

/// Current screen plus its transient payload.
#[derive(Debug, Clone, PartialEq)]
pub struct NavigationState {
    pub(crate) current_page: Page,
    pub(crate) pending_payload: Option<ScreenPayload>,
    pub(crate) is_loading: bool,
    pub(crate) create_post_open: bool,
    pub(crate) app_error: Option<String>,
}

impl NavigationState {
    pub(crate) fn new(current_page: Page) -> Self {
        Self {
            current_page,
            pending_payload: None,
            is_loading: false,
            create_post_open: false,
            app_error: None,
        }
    }

    pub fn current_page(&self) -> &Page {
        &self.current_page
    }

    pub fn pending_payload(&self) -> Option<&ScreenPayload> {
        self.pending_payload.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn create_post_open(&self) -> bool {
        self.create_post_open
    }

    /// Recoverable error shown on the diagnostics screen.
    pub fn app_error(&self) -> Option<&str> {
        self.app_error.as_deref()
    }
}
