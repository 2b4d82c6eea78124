use chrono::{DateTime, Duration, Utc};
use serde_json::{Map, Value, json};
use url::Url;

use crate::bypass::config::*;
use crate::bypass::errors::BypassError;
use crate::config::{ShellConfig, parse_flag};
use crate::navigation::Location;
use crate::session::{Session, SessionUser, UserProfile};
use crate::storage::{PersistentStorage, put_json};

/// Which opt-in enabled the bypass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BypassSignal {
    QueryParameter,
    BuildFlag,
    PersistedFlag,
}

/// A synthesized, already-persisted bypass session.
#[derive(Debug, Clone, PartialEq)]
pub struct BypassGrant {
    pub signal: BypassSignal,
    pub session: Session,
    pub profile: UserProfile,
    pub storage_key: String,
}

/// Stands in for the identity provider in non-production builds.
#[derive(Debug, Clone)]
pub struct TestBypassProvider {
    provider_url: String,
}

impl TestBypassProvider {
    pub fn new(provider_url: impl Into<String>) -> Self {
        Self {
            provider_url: provider_url.into(),
        }
    }

    /// The enabling signal in priority order: query parameter, build flag,
    /// persisted flag. Always `None` in production builds.
    pub fn resolve_signal(
        config: &ShellConfig,
        location: &Location,
        storage: &dyn PersistentStorage,
    ) -> Result<Option<BypassSignal>, BypassError> {
        if config.build_mode.is_production() {
            return Ok(None);
        }
        if location
            .query_param(BYPASS_QUERY_PARAM)
            .is_some_and(|v| parse_flag(&v))
        {
            return Ok(Some(BypassSignal::QueryParameter));
        }
        if config.test_bypass_flag {
            return Ok(Some(BypassSignal::BuildFlag));
        }
        if storage
            .get_item(BYPASS_STORAGE_FLAG)?
            .is_some_and(|v| parse_flag(&v))
        {
            return Ok(Some(BypassSignal::PersistedFlag));
        }
        Ok(None)
    }

    /// URL with the opt-in query parameter removed, if it was there.
    pub fn stripped_url(location: &Location) -> Option<String> {
        location.query_param(BYPASS_QUERY_PARAM)?;
        Some(location.without_query_param(BYPASS_QUERY_PARAM))
    }

    /// Key the provider's own client reads its session from: `sb-<project-ref>-auth-token`.
    pub fn storage_key(&self) -> Result<String, BypassError> {
        let url = Url::parse(&self.provider_url)
            .map_err(|e| BypassError::InvalidProviderUrl(e.to_string()))?;
        let host = url
            .host_str()
            .ok_or_else(|| BypassError::InvalidProviderUrl(self.provider_url.clone()))?;
        let project_ref = host.split('.').next().unwrap_or(host);
        Ok(format!("sb-{project_ref}-auth-token"))
    }

    pub fn session(now: DateTime<Utc>) -> Session {
        let mut user_metadata = Map::new();
        user_metadata.insert("display_name".to_string(), json!(BYPASS_NAME));
        user_metadata.insert("full_name".to_string(), json!(BYPASS_NAME));
        let mut app_metadata = Map::new();
        app_metadata.insert("provider".to_string(), Value::from(BYPASS_PROVIDER));

        Session {
            access_token: BYPASS_ACCESS_TOKEN.to_string(),
            refresh_token: BYPASS_REFRESH_TOKEN.to_string(),
            expires_at: now + Duration::seconds(BYPASS_EXPIRES_IN as i64),
            expires_in: BYPASS_EXPIRES_IN,
            token_type: "bearer".to_string(),
            user: SessionUser {
                id: BYPASS_USER_ID.to_string(),
                email: Some(BYPASS_EMAIL.to_string()),
                user_metadata,
                app_metadata,
                created_at: Some(now),
            },
        }
    }

    pub fn profile(now: DateTime<Utc>) -> UserProfile {
        UserProfile {
            id: BYPASS_USER_ID.to_string(),
            email: Some(BYPASS_EMAIL.to_string()),
            display_name: BYPASS_NAME.to_string(),
            full_name: BYPASS_NAME.to_string(),
            role: BYPASS_ROLE.to_string(),
            username: Some(BYPASS_USERNAME.to_string()),
            avatar_url: None,
            wallet_balance: BYPASS_WALLET_BALANCE,
            xp_points: BYPASS_XP_POINTS,
            level: BYPASS_LEVEL,
            created_at: now,
        }
    }

    /// Synthesize the fixed session and persist it where the provider's client
    /// and the rest of the app expect to find it. No network involved.
    pub fn activate(
        &self,
        signal: BypassSignal,
        storage: &mut dyn PersistentStorage,
        now: DateTime<Utc>,
    ) -> Result<BypassGrant, BypassError> {
        let session = Self::session(now);
        let profile = Self::profile(now);
        let storage_key = self.storage_key()?;

        put_json(storage, &storage_key, &session)?;
        put_json(storage, MOCK_PROFILE_KEY, &profile)?;

        tracing::info!(
            ?signal,
            user_id = BYPASS_USER_ID,
            email = BYPASS_EMAIL,
            role = BYPASS_ROLE,
            "Test bypass: mock car owner session created"
        );

        Ok(BypassGrant {
            signal,
            session,
            profile,
            storage_key,
        })
    }
}
