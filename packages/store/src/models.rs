//! # Persisted auth session
//!
//! A [`Session`] is what the auth service hands back after sign-in or refresh.
//! It is stored as JSON by a [`crate::SessionStore`] so the app can skip the
//! login screen on the next start.
//!
//! The token response carries `expires_in` (seconds); [`Session::from_token_response`]
//! turns that into an absolute `expires_at` at the moment it is received.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Refresh this long before the access token actually expires.
pub const EXPIRY_MARGIN_SECS: i64 = 60;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: Uuid,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

/// Body of `POST /auth/v1/token`.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

impl Session {
    pub fn from_token_response(response: TokenResponse, now: DateTime<Utc>) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
            token_type: response.token_type,
            expires_at: now + Duration::seconds(response.expires_in),
            user: response.user,
        }
    }

    /// True once the token is within [`EXPIRY_MARGIN_SECS`] of expiry.
    pub fn needs_refresh(&self, now: DateTime<Utc>) -> bool {
        now + Duration::seconds(EXPIRY_MARGIN_SECS) >= self.expires_at
    }

    pub fn user_id(&self) -> Uuid {
        self.user.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_expiry_from_token_response() {
        let json = r#"{
            "access_token": "at",
            "refresh_token": "rt",
            "token_type": "bearer",
            "expires_in": 3600,
            "user": {"id": "0b8e8a2c-1f57-4e0c-9a1a-9f1d2c3b4a5e", "email": "a@b.c"}
        }"#;
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap();
        let session = Session::from_token_response(serde_json::from_str(json).unwrap(), now);
        assert_eq!(session.expires_at, Utc.with_ymd_and_hms(2026, 1, 1, 13, 0, 0).unwrap());
        assert!(!session.needs_refresh(now));
        assert!(session.needs_refresh(now + Duration::minutes(59)));
        assert_eq!(session.user.email.as_deref(), Some("a@b.c"));
    }
}
