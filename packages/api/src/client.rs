//! # Backend client
//!
//! [`Backend`] owns the HTTP client, the endpoint configuration, the current
//! session and the broadcast channel auth events go out on. It is cheap to
//! clone: every clone shares the same session slot and channel, so the UI can
//! keep one in a context and hand copies to spawned tasks.
//!
//! Requests go through [`Backend::authed`], which attaches the `apikey` header
//! and a bearer token (the session's access token, refreshed first when it is
//! about to expire, or the anon key when signed out), and [`Backend::send`],
//! which turns non-2xx responses into [`ApiError::Backend`].

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use fitness::AuthEvent;
use reqwest::{Method, RequestBuilder, Response};
use store::{AppConfig, Session, SessionStore};
use tokio::sync::broadcast;
use uuid::Uuid;

use crate::config::BackendConfig;
use crate::error::ApiError;

const EVENT_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct Backend<S> {
    pub(crate) http: reqwest::Client,
    pub(crate) config: BackendConfig,
    pub(crate) app: AppConfig,
    pub(crate) store: S,
    session: Arc<Mutex<Option<Session>>>,
    events: broadcast::Sender<AuthEvent>,
}

impl<S> std::fmt::Debug for Backend<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Backend")
            .field("url", &self.config.url)
            .field("signed_in", &self.session().is_some())
            .finish()
    }
}

impl<S> Backend<S> {
    pub fn new(config: BackendConfig, store: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            http: reqwest::Client::new(),
            config,
            app: AppConfig::default(),
            store,
            session: Arc::new(Mutex::new(None)),
            events,
        }
    }

    /// Builder method to set bucket names and photo settings.
    pub fn with_app_config(mut self, app: AppConfig) -> Self {
        self.app = app;
        self
    }

    pub fn app_config(&self) -> &AppConfig {
        &self.app
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Receive every auth event emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }

    pub(crate) fn emit(&self, event: AuthEvent) {
        tracing::info!(?event, "auth event");
        // No subscribers is fine.
        let _ = self.events.send(event);
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn session(&self) -> Option<Session> {
        self.slot().clone()
    }

    pub(crate) fn set_session(&self, session: Option<Session>) {
        *self.slot() = session;
    }

    /// The signed-in user's id.
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        self.slot()
            .as_ref()
            .map(Session::user_id)
            .ok_or(ApiError::NotAuthenticated)
    }

    /// Request with only the `apikey` header.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http
            .request(method, self.config.endpoint(path))
            .header("apikey", &self.config.anon_key)
    }

    /// Send and map error statuses to [`ApiError::Backend`].
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let err = ApiError::from_body(status.as_u16(), &body);
        tracing::debug!(status = status.as_u16(), "backend error: {err}");
        Err(err)
    }
}

impl<S: SessionStore> Backend<S> {
    /// Request carrying the user's bearer token.
    pub(crate) async fn authed(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let token = self.bearer().await?;
        Ok(self.request(method, path).bearer_auth(token))
    }

    async fn bearer(&self) -> Result<String, ApiError> {
        let Some(session) = self.session() else {
            return Ok(self.config.anon_key.clone());
        };
        if session.needs_refresh(Utc::now()) {
            let refreshed = self.refresh_session().await?;
            return Ok(refreshed.access_token);
        }
        Ok(session.access_token)
    }
}
