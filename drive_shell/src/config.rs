//! Central configuration for the drive_shell crate

use std::sync::LazyLock;
use std::time::Duration;

/// Identity provider base URL.
///
/// The provider's client keeps its session record under a storage key derived
/// from the project reference in this URL (`sb-<project-ref>-auth-token`).
/// Default: "https://localhost.supabase.co"
pub static DRIVE_SHELL_PROVIDER_URL: LazyLock<String> = LazyLock::new(|| {
    std::env::var("DRIVE_SHELL_PROVIDER_URL")
        .unwrap_or_else(|_| "https://localhost.supabase.co".to_string())
});

/// Build-time test bypass flag. Ignored in production builds.
pub static DRIVE_SHELL_TEST_BYPASS: LazyLock<bool> = LazyLock::new(|| {
    std::env::var("DRIVE_SHELL_TEST_BYPASS")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
});

pub static DRIVE_SHELL_BUILD_MODE: LazyLock<BuildMode> = LazyLock::new(|| {
    std::env::var("DRIVE_SHELL_BUILD_MODE")
        .ok()
        .and_then(|v| BuildMode::parse(&v))
        .unwrap_or_else(BuildMode::compiled)
});

/// How long the loading indicator stays up after a navigation.
pub static DRIVE_SHELL_LOADING_DEBOUNCE_MS: LazyLock<u64> = LazyLock::new(|| {
    std::env::var("DRIVE_SHELL_LOADING_DEBOUNCE_MS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(100) // Default to 100ms if not set or invalid
});

pub(crate) fn parse_flag(value: &str) -> bool {
    value.trim().eq_ignore_ascii_case("true")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildMode {
    Development,
    Production,
}

impl BuildMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "development" | "dev" => Some(Self::Development),
            "production" | "prod" => Some(Self::Production),
            _ => None,
        }
    }

    /// The mode implied by the compiler profile.
    pub fn compiled() -> Self {
        if cfg!(debug_assertions) {
            Self::Development
        } else {
            Self::Production
        }
    }

    pub fn is_production(self) -> bool {
        self == Self::Production
    }
}

/// Every route name the redirect policy keys on, in one place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteTable {
    pub welcome: &'static str,
    pub home: &'static str,
    pub login: &'static str,
    pub signup: &'static str,
    pub diagnostics: &'static str,
    /// Post-redirect destination registered with the identity provider.
    pub oauth_landing: &'static str,
    /// Screens an authenticated user is moved off after signing in.
    pub entry_pages: &'static [&'static str],
    /// Screens left alone when a sign-out arrives.
    pub sign_out_keep_pages: &'static [&'static str],
    /// Screens an anonymous user may stay on after the initial fetch.
    pub auth_pages: &'static [&'static str],
    /// Pseudo-pages that open a modal instead of navigating.
    pub modal_pages: &'static [&'static str],
    /// Fragment substrings the identity provider leaves after a redirect.
    pub oauth_fragment_markers: &'static [&'static str],
}

pub const DEFAULT_ROUTES: RouteTable = RouteTable {
    welcome: "welcome",
    home: "home",
    login: "login",
    signup: "signup",
    diagnostics: "diagnostics",
    oauth_landing: "home",
    entry_pages: &["welcome", "login", "signup"],
    sign_out_keep_pages: &["login", "signup", "home"],
    auth_pages: &[
        "welcome",
        "login",
        "signup",
        "forgot-password",
        "verify-email",
        "role-selection",
    ],
    modal_pages: &["create-post"],
    oauth_fragment_markers: &["access_token", "type=recovery"],
};

impl Default for RouteTable {
    fn default() -> Self {
        DEFAULT_ROUTES
    }
}

impl RouteTable {
    pub fn is_entry(&self, page: &str) -> bool {
        self.entry_pages.contains(&page)
    }

    pub fn keeps_on_sign_out(&self, page: &str) -> bool {
        self.sign_out_keep_pages.contains(&page)
    }

    pub fn is_auth_page(&self, page: &str) -> bool {
        self.auth_pages.contains(&page)
    }

    pub fn is_modal(&self, page: &str) -> bool {
        self.modal_pages.contains(&page)
    }

    pub fn is_oauth_landing(&self, page: &str) -> bool {
        self.oauth_landing == page
    }

    /// Whether a `location.hash` value still carries an identity-provider redirect.
    pub fn has_oauth_fragment(&self, hash: &str) -> bool {
        if hash.is_empty() {
            return false;
        }
        let decoded = urlencoding::decode(hash)
            .map(|d| d.into_owned())
            .unwrap_or_else(|_| hash.to_string());
        self.oauth_fragment_markers
            .iter()
            .any(|marker| decoded.contains(marker))
    }
}

/// Shell settings gathered from the environment, or injected directly in tests.
#[derive(Debug, Clone)]
pub struct ShellConfig {
    pub provider_url: String,
    pub build_mode: BuildMode,
    pub test_bypass_flag: bool,
    pub loading_debounce: Duration,
    pub routes: RouteTable,
}

impl ShellConfig {
    pub fn from_env() -> Self {
        Self {
            provider_url: DRIVE_SHELL_PROVIDER_URL.clone(),
            build_mode: *DRIVE_SHELL_BUILD_MODE,
            test_bypass_flag: *DRIVE_SHELL_TEST_BYPASS,
            loading_debounce: Duration::from_millis(*DRIVE_SHELL_LOADING_DEBOUNCE_MS),
            routes: RouteTable::default(),
        }
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            provider_url: "https://localhost.supabase.co".to_string(),
            build_mode: BuildMode::Development,
            test_bypass_flag: false,
            loading_debounce: Duration::from_millis(100),
            routes: RouteTable::default(),
        }
    }
}
