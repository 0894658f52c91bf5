//! # Email/password authentication
//!
//! | Method | Endpoint | Event |
//! |--------|----------|-------|
//! | [`restore_session`](Backend::restore_session) | `POST /auth/v1/token?grant_type=refresh_token` when the stored token is stale | `INITIAL_SESSION` |
//! | [`sign_in_with_password`](Backend::sign_in_with_password) | `POST /auth/v1/token?grant_type=password` | `SIGNED_IN` |
//! | [`refresh_session`](Backend::refresh_session) | `POST /auth/v1/token?grant_type=refresh_token` | `TOKEN_REFRESHED`, or `SIGNED_OUT` when the token is rejected |
//! | [`sign_out`](Backend::sign_out) | `POST /auth/v1/logout` | `SIGNED_OUT` |
//!
//! Every successful token response is persisted through the [`SessionStore`].

use chrono::Utc;
use fitness::AuthEvent;
use reqwest::Method;
use serde_json::json;
use store::{Session, SessionStore, TokenResponse};

use crate::client::Backend;
use crate::error::ApiError;

impl<S: SessionStore> Backend<S> {
    /// Load the persisted session, refreshing it when it has expired. A
    /// rejected refresh token drops the session; when the auth server cannot
    /// be reached the stale session is kept and refreshed on the next
    /// request. Always emits `INITIAL_SESSION`.
    pub async fn restore_session(&self) -> Result<Option<Session>, ApiError> {
        let stored = self.store.load().await?;
        let session = match stored {
            Some(session) if session.needs_refresh(Utc::now()) => {
                match self.exchange_refresh_token(&session.refresh_token).await {
                    Ok(fresh) => Some(fresh),
                    Err(e) if e.rejects_session() => {
                        tracing::warn!("stored session was rejected: {e}");
                        self.store.clear().await?;
                        None
                    }
                    Err(e) => {
                        tracing::warn!("stored session could not be refreshed yet: {e}");
                        Some(session)
                    }
                }
            }
            other => other,
        };
        self.set_session(session.clone());
        self.emit(AuthEvent::InitialSession);
        Ok(session)
    }

    pub async fn sign_in_with_password(&self, email: &str, password: &str) -> Result<Session, ApiError> {
        let request = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "password")])
            .json(&json!({ "email": email.trim(), "password": password }));
        let session = self.accept_token_response(request).await?;
        tracing::info!(user_id = %session.user.id, "signed in");
        self.emit(AuthEvent::SignedIn);
        Ok(session)
    }

    /// Exchange the refresh token for a new session. If the auth server
    /// rejects the token the session is dropped and `SIGNED_OUT` is emitted;
    /// any other failure is returned with the session left in place.
    pub async fn refresh_session(&self) -> Result<Session, ApiError> {
        let refresh_token = self
            .session()
            .map(|s| s.refresh_token)
            .ok_or(ApiError::NotAuthenticated)?;
        match self.exchange_refresh_token(&refresh_token).await {
            Ok(session) => {
                self.emit(AuthEvent::TokenRefreshed);
                Ok(session)
            }
            Err(e) if e.rejects_session() => {
                tracing::error!("refresh token rejected: {e}");
                self.forget_session().await?;
                Err(ApiError::NotAuthenticated)
            }
            Err(e) => {
                tracing::warn!("token refresh failed, keeping session: {e}");
                Err(e)
            }
        }
    }

    /// Revoke the session on the server and forget it locally.
    ///
    /// A 401/403 from the logout endpoint means the token is already dead,
    /// which counts as signed out.
    pub async fn sign_out(&self) -> Result<(), ApiError> {
        if let Some(session) = self.session() {
            let request = self
                .request(Method::POST, "/auth/v1/logout")
                .bearer_auth(&session.access_token);
            match self.send(request).await {
                Ok(_) => {}
                Err(ApiError::Backend { status: 401 | 403, .. }) => {
                    tracing::warn!("logout with an expired token");
                }
                Err(e) => return Err(e),
            }
        }
        self.forget_session().await
    }

    async fn forget_session(&self) -> Result<(), ApiError> {
        self.set_session(None);
        self.store.clear().await?;
        self.emit(AuthEvent::SignedOut);
        Ok(())
    }

    async fn exchange_refresh_token(&self, refresh_token: &str) -> Result<Session, ApiError> {
        let request = self
            .request(Method::POST, "/auth/v1/token")
            .query(&[("grant_type", "refresh_token")])
            .json(&json!({ "refresh_token": refresh_token }));
        self.accept_token_response(request).await
    }

    async fn accept_token_response(&self, request: reqwest::RequestBuilder) -> Result<Session, ApiError> {
        let response = self.send(request).await?;
        let body = response.text().await?;
        let token: TokenResponse = serde_json::from_str(&body)?;
        let session = Session::from_token_response(token, Utc::now());
        self.store.save(&session).await?;
        self.set_session(Some(session.clone()));
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BackendConfig;
    use crate::test_support::{backend, expired_session, session, token_body, USER_ID};
    use store::MemorySessionStore;
    use tokio::sync::broadcast::error::TryRecvError;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_sign_in_persists_and_emits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "password"))
            .and(header("apikey", "anon"))
            .and(body_json(json!({"email": "anna@example.com", "password": "secret"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("fresh")))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemorySessionStore::new();
        let backend = backend(&server, store.clone());
        let mut events = backend.subscribe();

        let session = backend
            .sign_in_with_password(" anna@example.com ", "secret")
            .await
            .unwrap();
        assert_eq!(session.access_token, "fresh");
        assert_eq!(backend.user_id().unwrap().to_string(), USER_ID);
        assert_eq!(store.load().await.unwrap(), Some(session));
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedIn);
    }

    #[tokio::test]
    async fn test_sign_in_error_message_comes_from_backend() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "error": "invalid_grant",
                "error_description": "Invalid login credentials"
            })))
            .mount(&server)
            .await;

        let backend = backend(&server, MemorySessionStore::new());
        let err = backend.sign_in_with_password("a@b.c", "nope").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid login credentials");
        assert!(backend.session().is_none());
    }

    #[tokio::test]
    async fn test_restore_valid_session_skips_network() {
        let server = MockServer::start().await;
        let store = MemorySessionStore::with_session(session("stored"));
        let backend = backend(&server, store);
        let mut events = backend.subscribe();

        let restored = backend.restore_session().await.unwrap();
        assert_eq!(restored.unwrap().access_token, "stored");
        assert_eq!(events.recv().await.unwrap(), AuthEvent::InitialSession);
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_restore_refreshes_expired_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .and(query_param("grant_type", "refresh_token"))
            .and(body_json(json!({"refresh_token": "refresh-old"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(token_body("renewed")))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemorySessionStore::with_session(expired_session("old"));
        let backend = backend(&server, store.clone());
        let restored = backend.restore_session().await.unwrap().unwrap();
        assert_eq!(restored.access_token, "renewed");
        assert_eq!(store.load().await.unwrap().unwrap().access_token, "renewed");
    }

    #[tokio::test]
    async fn test_restore_drops_unrefreshable_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({"error_description": "Invalid Refresh Token"})))
            .mount(&server)
            .await;

        let store = MemorySessionStore::with_session(expired_session("old"));
        let backend = backend(&server, store.clone());
        assert!(backend.restore_session().await.unwrap().is_none());
        assert!(store.load().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_sign_out_clears_and_emits() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("authorization", "Bearer live"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let store = MemorySessionStore::with_session(session("live"));
        let backend = backend(&server, store.clone());
        backend.restore_session().await.unwrap();
        let mut events = backend.subscribe();

        backend.sign_out().await.unwrap();
        assert!(backend.session().is_none());
        assert!(store.load().await.unwrap().is_none());
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
    }

    #[tokio::test]
    async fn test_sign_out_server_error_keeps_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let backend = backend(&server, MemorySessionStore::with_session(session("live")));
        backend.restore_session().await.unwrap();
        assert!(backend.sign_out().await.is_err());
        assert!(backend.session().is_some());
    }

    #[tokio::test]
    async fn test_failed_refresh_signs_out() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let backend = backend(&server, MemorySessionStore::with_session(session("live")));
        backend.restore_session().await.unwrap();
        let mut events = backend.subscribe();
        assert!(matches!(backend.refresh_session().await, Err(ApiError::NotAuthenticated)));
        assert!(backend.session().is_none());
        assert_eq!(events.recv().await.unwrap(), AuthEvent::SignedOut);
    }

    /// Nothing listens on the discard port, so every request fails to connect.
    fn offline_backend(store: MemorySessionStore) -> Backend<MemorySessionStore> {
        Backend::new(BackendConfig::new("http://127.0.0.1:9", "anon"), store)
    }

    #[tokio::test]
    async fn test_offline_refresh_keeps_session() {
        let store = MemorySessionStore::with_session(expired_session("old"));
        let backend = offline_backend(store.clone());
        backend.set_session(Some(expired_session("old")));
        let mut events = backend.subscribe();

        let err = backend.latest_weight().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)), "unexpected error: {err:?}");
        assert_eq!(backend.session().unwrap().access_token, "old");
        assert_eq!(store.load().await.unwrap().unwrap().access_token, "old");
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }

    #[tokio::test]
    async fn test_offline_restore_keeps_stored_session() {
        let store = MemorySessionStore::with_session(expired_session("old"));
        let backend = offline_backend(store.clone());

        let restored = backend.restore_session().await.unwrap().unwrap();
        assert_eq!(restored.access_token, "old");
        assert!(store.load().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_refresh_server_error_keeps_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let store = MemorySessionStore::with_session(session("live"));
        let backend = backend(&server, store.clone());
        backend.restore_session().await.unwrap();
        let mut events = backend.subscribe();

        let err = backend.refresh_session().await.unwrap_err();
        assert!(matches!(err, ApiError::Backend { status: 503, .. }));
        assert!(backend.session().is_some());
        assert!(store.load().await.unwrap().is_some());
        assert!(matches!(events.try_recv(), Err(TryRecvError::Empty)));
    }
}
