use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEventKind {
    InitialSession,
    SignedIn,
    SignedUp,
    SignedOut,
    TokenRefreshed,
}

impl AuthEventKind {
    /// Event name as the identity provider emits it.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InitialSession => "INITIAL_SESSION",
            Self::SignedIn => "SIGNED_IN",
            Self::SignedUp => "SIGNED_UP",
            Self::SignedOut => "SIGNED_OUT",
            Self::TokenRefreshed => "TOKEN_REFRESHED",
        }
    }
}

impl fmt::Display for AuthEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AuthEventKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "INITIAL_SESSION" => Ok(Self::InitialSession),
            "SIGNED_IN" => Ok(Self::SignedIn),
            "SIGNED_UP" => Ok(Self::SignedUp),
            "SIGNED_OUT" => Ok(Self::SignedOut),
            "TOKEN_REFRESHED" => Ok(Self::TokenRefreshed),
            other => Err(format!("Unknown auth event: {other}")),
        }
    }
}

/// User record attached to a provider session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Map<String, Value>,
    #[serde(default)]
    pub app_metadata: Map<String, Value>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl SessionUser {
    pub fn new(id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            email: Some(email.into()),
            user_metadata: Map::new(),
            app_metadata: Map::new(),
            created_at: None,
        }
    }

    fn metadata_str(&self, key: &str) -> Option<String> {
        self.user_metadata
            .get(key)
            .or_else(|| self.app_metadata.get(key))
            .and_then(Value::as_str)
            .map(str::to_string)
    }
}

/// Provider session record, in the shape the provider's client persists it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub expires_at: DateTime<Utc>,
    pub expires_in: u64,
    pub token_type: String,
    pub user: SessionUser,
}

impl Session {
    pub fn new(access_token: impl Into<String>, user: SessionUser, expires_in: u64) -> Self {
        Self {
            access_token: access_token.into(),
            refresh_token: String::new(),
            expires_at: Utc::now() + Duration::seconds(expires_in as i64),
            expires_in,
            token_type: "bearer".to_string(),
            user,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: Option<String>,
    pub display_name: String,
    pub full_name: String,
    pub role: String,
    pub username: Option<String>,
    pub avatar_url: Option<String>,
    pub wallet_balance: i64,
    pub xp_points: i64,
    pub level: u32,
    pub created_at: DateTime<Utc>,
}

impl From<&SessionUser> for UserProfile {
    fn from(user: &SessionUser) -> Self {
        let full_name = user.metadata_str("full_name").unwrap_or_default();
        let display_name = user
            .metadata_str("display_name")
            .or_else(|| (!full_name.is_empty()).then(|| full_name.clone()))
            .or_else(|| {
                user.email
                    .as_deref()
                    .and_then(|e| e.split('@').next())
                    .map(str::to_string)
            })
            .unwrap_or_default();

        Self {
            id: user.id.clone(),
            email: user.email.clone(),
            display_name,
            full_name,
            role: user.metadata_str("role").unwrap_or_else(|| "user".to_string()),
            username: user.metadata_str("username"),
            avatar_url: user.metadata_str("avatar_url"),
            wallet_balance: 0,
            xp_points: 0,
            level: 1,
            created_at: user.created_at.unwrap_or_else(Utc::now),
        }
    }
}

/// A session event from the provider's subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthEvent {
    pub kind: AuthEventKind,
    pub session: Option<Session>,
}

impl AuthEvent {
    pub fn new(kind: AuthEventKind, session: Option<Session>) -> Self {
        Self { kind, session }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    Unknown,
    Anonymous,
    Authenticated,
}

/// Authoritative session state. Written only by the session controller.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    pub(crate) status: SessionStatus,
    pub(crate) profile: Option<UserProfile>,
    pub(crate) handled_initial: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            status: SessionStatus::Unknown,
            profile: None,
            handled_initial: false,
        }
    }
}

impl SessionState {
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.profile.as_ref()
    }

    /// Whether an `InitialSession` carrying a session has been processed.
    pub fn handled_initial(&self) -> bool {
        self.handled_initial
    }
}
