use drive_shell::{AuthEvent, AuthEventKind, Session, SessionUser};
use serde_json::json;

/// Test user fixtures for integration testing
pub struct TestUsers;

impl TestUsers {
    /// A regular car owner with a provider session
    pub fn car_owner() -> Session {
        let mut user = SessionUser::new("car-owner-1", "owner@example.com");
        user.user_metadata
            .insert("full_name".to_string(), json!("Car Owner"));
        user.user_metadata.insert("role".to_string(), json!("car_owner"));
        Session::new("car-owner-token", user, 3600)
    }

    /// A garage owner, who may not use Instant Meetup
    pub fn garage_owner() -> Session {
        let mut user = SessionUser::new("garage-owner-1", "garage@example.com");
        user.user_metadata
            .insert("role".to_string(), json!("garage_owner"));
        Session::new("garage-owner-token", user, 3600)
    }
}

pub fn event(kind: AuthEventKind, session: Option<Session>) -> AuthEvent {
    AuthEvent::new(kind, session)
}

/// URL the provider redirects back to after an OAuth sign-in.
pub const OAUTH_CALLBACK_URL: &str =
    "/home#access_token=eyJhbGciOi&expires_in=3600&refresh_token=r1&token_type=bearer";
