//! Fixtures shared by the wiremock tests.

use chrono::{Duration, Utc};
use serde_json::json;
use store::{MemorySessionStore, Session, SessionUser};
use wiremock::MockServer;

use crate::client::Backend;
use crate::config::BackendConfig;

pub const USER_ID: &str = "0b8e8a2c-1f57-4e0c-9a1a-9f1d2c3b4a5e";

pub fn backend(server: &MockServer, store: MemorySessionStore) -> Backend<MemorySessionStore> {
    Backend::new(BackendConfig::new(server.uri(), "anon"), store)
}

fn user() -> SessionUser {
    SessionUser {
        id: USER_ID.parse().unwrap(),
        email: Some("anna@example.com".to_string()),
    }
}

/// Valid for another hour; refresh token is `refresh-<access>`.
pub fn session(access: &str) -> Session {
    Session {
        access_token: access.to_string(),
        refresh_token: format!("refresh-{access}"),
        token_type: "bearer".to_string(),
        expires_at: Utc::now() + Duration::hours(1),
        user: user(),
    }
}

pub fn expired_session(access: &str) -> Session {
    Session {
        expires_at: Utc::now() - Duration::minutes(5),
        ..session(access)
    }
}

pub fn token_body(access: &str) -> serde_json::Value {
    json!({
        "access_token": access,
        "refresh_token": format!("refresh-{access}"),
        "token_type": "bearer",
        "expires_in": 3600,
        "user": {"id": USER_ID, "email": "anna@example.com"}
    })
}

/// Backend with a live session already restored.
pub async fn signed_in(server: &MockServer) -> Backend<MemorySessionStore> {
    let backend = backend(server, MemorySessionStore::with_session(session("live")));
    backend.restore_session().await.unwrap();
    backend
}
