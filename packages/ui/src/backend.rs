//! Shared backend constructor and context hook.
//!
//! The app keeps one [`AppBackend`] in a Dioxus context. Sessions persist to
//! `<data_dir>/fittrack/session.json` and the optional `fittrack.toml` in the
//! same directory overrides bucket names and photo settings.

use dioxus::prelude::*;

/// The backend client as used by the app: file-backed session persistence.
pub type AppBackend = api::Backend<store::FileSessionStore>;

/// Build the backend from `SUPABASE_URL` / `SUPABASE_ANON_KEY` and the local
/// data directory.
pub fn make_backend() -> Result<AppBackend, api::ApiError> {
    let config = api::BackendConfig::from_env()?;
    let dir = store::default_data_dir();
    let app = store::AppConfig::load_or_default(&dir);
    tracing::info!(url = %config.url, data_dir = %dir.display(), "backend configured");
    Ok(api::Backend::new(config, store::FileSessionStore::new(dir)).with_app_config(app))
}

pub fn use_backend() -> AppBackend {
    use_context::<AppBackend>()
}
