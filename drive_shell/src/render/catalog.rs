use crate::navigation::Page;
use crate::render::errors::RenderError;
use crate::render::types::{Layout, Restriction, ScreenDescriptor, ScreenResolver};
use crate::session::UserProfile;

const GARAGE_OWNER_ROLE: &str = "garage_owner";

const MEETUP_RESTRICTION: Restriction = Restriction {
    message: "Instant Meetup is not available for Garage Owner accounts.",
    action_page: "home",
};

/// Alternative tokens that render an existing screen.
const ALIASES: &[(&str, &str)] = &[
    ("diagnostic", "diagnostics"),
    ("settings/security/mfa", "mfa-setup"),
    ("settings/security/devices", "device-management"),
    ("settings/notifications", "notification-preferences"),
    ("settings/privacy/data", "data-export"),
];

const SCREENS: &[ScreenDescriptor] = &[
    // Authentication
    ScreenDescriptor::new("welcome", "Welcome", Layout::Auth),
    ScreenDescriptor::new("login", "Sign In", Layout::Auth),
    ScreenDescriptor::new("signup", "Create Account", Layout::Auth),
    ScreenDescriptor::new("forgot-password", "Reset Password", Layout::Auth),
    ScreenDescriptor::new("verify-email", "Verify Email", Layout::Auth),
    ScreenDescriptor::new("role-selection", "Choose Your Role", Layout::Auth),
    ScreenDescriptor::new("verify-car-owner", "Car Owner Verification", Layout::Auth),
    ScreenDescriptor::new("verify-garage-owner", "Garage Owner Verification", Layout::Auth),
    ScreenDescriptor::new("onboarding", "Onboarding", Layout::Auth),
    ScreenDescriptor::new("verify-vendor", "Vendor Verification", Layout::Main),
    // Profile
    ScreenDescriptor::new("profile", "Profile", Layout::Main),
    ScreenDescriptor::new("profile-settings", "Profile Settings", Layout::Main),
    ScreenDescriptor::new("saved", "Saved", Layout::Main),
    ScreenDescriptor::new("my-orders", "My Orders", Layout::Main),
    ScreenDescriptor::new("my-packages", "My Packages", Layout::Main),
    ScreenDescriptor::new("my-boosts", "My Boosts", Layout::Main),
    ScreenDescriptor::new("my-listings", "My Listings", Layout::Main),
    ScreenDescriptor::new("notifications", "Notifications", Layout::Main),
    // Messaging
    ScreenDescriptor::new("conversations", "Conversations", Layout::Main),
    ScreenDescriptor::new("chat", "Chat", Layout::Main),
    ScreenDescriptor::new("ai-chat-assistant", "AI Assistant", Layout::Main),
    // Community
    ScreenDescriptor::new("home", "Home", Layout::Main),
    ScreenDescriptor::new("communities", "Communities", Layout::Main),
    ScreenDescriptor::new("my-posts", "My Posts", Layout::Main),
    ScreenDescriptor::new("my-comments", "My Comments", Layout::Main),
    ScreenDescriptor::new("leaderboard", "Leaderboard", Layout::Main),
    ScreenDescriptor::new("service-log", "Service Log", Layout::Main),
    ScreenDescriptor::new("meetup", "Instant Meetup", Layout::Main),
    ScreenDescriptor::new("events", "Events", Layout::Main),
    ScreenDescriptor::new("challenges", "Daily Challenges", Layout::Main),
    ScreenDescriptor::new("search", "Search", Layout::Main),
    // Marketplace and payments
    ScreenDescriptor::new("marketplace", "Marketplace", Layout::Main),
    ScreenDescriptor::new("offers", "Offers", Layout::Main),
    ScreenDescriptor::new("place-ad", "Place an Ad", Layout::Main),
    ScreenDescriptor::new("create-car-listing", "Create Car Listing", Layout::Main),
    ScreenDescriptor::new("listing-payment", "Listing Payment", Layout::Main),
    ScreenDescriptor::new("stripe-payment", "Payment", Layout::Main),
    ScreenDescriptor::new("payment-success", "Payment Successful", Layout::Main),
    ScreenDescriptor::new("wallet", "Wallet", Layout::Main),
    ScreenDescriptor::new("garage-hub", "Garage Hub", Layout::Main),
    ScreenDescriptor::new("repair-bid", "Repair Bid", Layout::Main),
    ScreenDescriptor::new("import-car", "Import a Car", Layout::Main),
    // Legal
    ScreenDescriptor::new("legal-hub", "Legal Hub", Layout::Main),
    ScreenDescriptor::new("terms-of-service", "Terms of Service", Layout::Main),
    ScreenDescriptor::new("privacy-policy", "Privacy Policy", Layout::Main),
    ScreenDescriptor::new("refund-policy", "Refund Policy", Layout::Main),
    ScreenDescriptor::new("about-us", "About Us", Layout::Main),
    ScreenDescriptor::new("faq-knowledge-base", "FAQ", Layout::Main),
    // Tooling
    ScreenDescriptor::new("admin", "Admin Dashboard", Layout::Admin),
    ScreenDescriptor::new("debug", "Debug", Layout::Main),
    ScreenDescriptor::new("community-debug", "Community Debug", Layout::Main),
    ScreenDescriptor::new("diagnostics", "Diagnostics", Layout::Main),
    // Enterprise settings
    ScreenDescriptor::new("mfa-setup", "Two-Factor Authentication", Layout::FullPage),
    ScreenDescriptor::new("device-management", "Devices", Layout::FullPage),
    ScreenDescriptor::new(
        "notification-preferences",
        "Notification Preferences",
        Layout::FullPage,
    ),
    ScreenDescriptor::new("data-export", "Export Your Data", Layout::FullPage),
    ScreenDescriptor::new("maintenance", "Maintenance", Layout::FullPage),
];

/// The application's screen set.
///
/// Page tokens are open-ended; anything without a screen falls back to
/// welcome here rather than being rejected when it is navigated to.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageCatalog;

impl PageCatalog {
    pub fn new() -> Self {
        Self
    }

    /// Canonical screen name for `page`, following aliases.
    pub fn canonical(page: &str) -> &str {
        ALIASES
            .iter()
            .find(|(alias, _)| *alias == page)
            .map(|(_, screen)| *screen)
            .unwrap_or(page)
    }

    pub fn lookup(page: &str) -> Option<&'static ScreenDescriptor> {
        let screen = Self::canonical(page);
        SCREENS.iter().find(|d| d.screen == screen)
    }

    pub fn screens() -> impl Iterator<Item = &'static ScreenDescriptor> {
        SCREENS.iter()
    }

    fn welcome() -> Result<ScreenDescriptor, RenderError> {
        Self::lookup(Page::WELCOME)
            .cloned()
            .ok_or_else(|| RenderError::UnknownScreen(Page::WELCOME.to_string()))
    }
}

impl ScreenResolver for PageCatalog {
    fn resolve(
        &self,
        page: &Page,
        profile: Option<&UserProfile>,
    ) -> Result<ScreenDescriptor, RenderError> {
        let Some(descriptor) = Self::lookup(page.as_str()) else {
            tracing::debug!(page = %page, "No screen for page, showing welcome");
            return Self::welcome();
        };

        if descriptor.screen == "meetup"
            && profile.is_some_and(|p| p.role == GARAGE_OWNER_ROLE)
        {
            tracing::info!(page = %page, "Screen restricted for role");
            return Ok(ScreenDescriptor {
                screen: "access-restricted",
                title: "Access Restricted",
                layout: Layout::Main,
                restriction: Some(MEETUP_RESTRICTION),
            });
        }

        Ok(descriptor.clone())
    }
}
