//! Authentication context and hooks for the UI.
//!
//! [`AuthProvider`] owns two context signals: the [`AuthState`] (signed-in
//! user and profile) and the [`Navigator`]. On mount it restores the stored
//! session, settles the first screen and then follows the backend's auth
//! events for the rest of the app's life.

use dioxus::prelude::*;
use fitness::{AuthEvent, Navigator, Profile, SessionCheck};
use store::SessionUser;
use tokio::sync::broadcast::error::RecvError;

use crate::backend::{use_backend, AppBackend};

/// Authentication state for the application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AuthState {
    pub user: Option<SessionUser>,
    /// `None` until the profile row exists.
    pub profile: Option<Profile>,
}

impl AuthState {
    pub fn profile_complete(&self) -> bool {
        self.profile.as_ref().is_some_and(Profile::is_complete)
    }

    /// Load the profile for whoever the backend session belongs to.
    pub async fn fetch(backend: &AppBackend) -> Result<Self, api::ApiError> {
        let Some(session) = backend.session() else {
            return Ok(Self::default());
        };
        let profile = backend.load_profile().await?;
        Ok(Self {
            user: Some(session.user),
            profile,
        })
    }
}

/// Get the current authentication state.
pub fn use_auth() -> Signal<AuthState> {
    use_context::<Signal<AuthState>>()
}

/// Get the app navigator. Screens dispatch [`fitness::NavEvent`]s on it.
pub fn use_nav() -> Signal<Navigator> {
    use_context::<Signal<Navigator>>()
}

async fn check_session(backend: &AppBackend) -> (SessionCheck, AuthState) {
    match backend.restore_session().await {
        Ok(None) => (SessionCheck::NoSession, AuthState::default()),
        Ok(Some(_)) => match AuthState::fetch(backend).await {
            Ok(state) => (
                SessionCheck::Active {
                    profile_complete: state.profile_complete(),
                },
                state,
            ),
            Err(e) => {
                tracing::error!("loading profile failed: {e}");
                (SessionCheck::Failed, AuthState::default())
            }
        },
        Err(e) => {
            tracing::error!("session check failed: {e}");
            (SessionCheck::Failed, AuthState::default())
        }
    }
}

/// Provider component that manages authentication state and navigation.
#[component]
pub fn AuthProvider(children: Element) -> Element {
    let backend = use_backend();
    let mut auth = use_context_provider(|| Signal::new(AuthState::default()));
    let mut nav = use_context_provider(|| Signal::new(Navigator::new()));

    use_future(move || {
        let backend = backend.clone();
        async move {
            // Subscribe before restoring so INITIAL_SESSION is seen too.
            let mut events = backend.subscribe();
            let (outcome, state) = check_session(&backend).await;
            auth.set(state);
            nav.write().finish_session_check(outcome);

            loop {
                let event = match events.recv().await {
                    Ok(event) => event,
                    Err(RecvError::Lagged(skipped)) => {
                        tracing::warn!(skipped, "auth events dropped");
                        continue;
                    }
                    Err(RecvError::Closed) => break,
                };
                match event {
                    AuthEvent::SignedIn => {
                        let known = auth.read().user.as_ref().map(|u| u.id);
                        if known != backend.session().map(|s| s.user_id()) {
                            match AuthState::fetch(&backend).await {
                                Ok(state) => auth.set(state),
                                Err(e) => tracing::error!("loading profile after sign-in failed: {e}"),
                            }
                        }
                    }
                    AuthEvent::SignedOut => auth.set(AuthState::default()),
                    AuthEvent::InitialSession | AuthEvent::TokenRefreshed => {}
                }
                let profile_complete = auth.read().profile_complete();
                nav.write().on_auth_event(event, profile_complete);
            }
        }
    });

    rsx! {
        {children}
    }
}
