/// Query parameter that opts into the bypass: `?testBypass=true`.
pub(super) const BYPASS_QUERY_PARAM: &str = "testBypass";

/// Persisted flag that opts into the bypass: `localStorage.testBypass = "true"`.
pub(super) const BYPASS_STORAGE_FLAG: &str = "testBypass";

/// Side channel other code reads to recognize a bypass session.
pub const MOCK_PROFILE_KEY: &str = "__MOCK_PROFILE__";

pub(super) const BYPASS_USER_ID: &str = "test-bypass-car-owner-id";
pub(super) const BYPASS_EMAIL: &str = "test-car-owner@sublimesdrive.com";
pub(super) const BYPASS_NAME: &str = "Test Car Owner";
pub(super) const BYPASS_USERNAME: &str = "testcarowner";
pub(super) const BYPASS_ROLE: &str = "user";
pub(super) const BYPASS_PROVIDER: &str = "test-bypass";
pub(super) const BYPASS_ACCESS_TOKEN: &str = "test-bypass-token";
pub(super) const BYPASS_REFRESH_TOKEN: &str = "test-bypass-refresh";
pub(super) const BYPASS_EXPIRES_IN: u64 = 3600;
pub(super) const BYPASS_WALLET_BALANCE: i64 = 1000;
pub(super) const BYPASS_XP_POINTS: i64 = 500;
pub(super) const BYPASS_LEVEL: u32 = 5;
