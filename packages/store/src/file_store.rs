//! # Filesystem-backed session store
//!
//! [`FileSessionStore`] keeps the session as JSON under the app's data
//! directory so it survives restarts on desktop and mobile.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! ├── session.json       # current session, absent when signed out
//! └── fittrack.toml      # app config, see crate::config
//! ```
//!
//! ## Platform data directories
//!
//! [`default_data_dir`] uses [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/fittrack/` |
//! | Linux | `~/.local/share/fittrack/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\fittrack\` |
//! | Android | App-internal storage (via `dirs`) |

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::error::StoreError;
use crate::models::Session;
use crate::session::SessionStore;

/// `<data_dir>/fittrack`, or `./fittrack` when the platform has none.
pub fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("fittrack")
}

/// Filesystem-backed SessionStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileSessionStore {
    base: PathBuf,
}

impl FileSessionStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn session_path(&self) -> PathBuf {
        self.base.join("session.json")
    }
}

impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        let path = self.session_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        };
        Ok(Some(serde_json::from_str(&content)?))
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        std::fs::create_dir_all(&self.base).map_err(|e| StoreError::io(&self.base, e))?;
        let path = self.session_path();
        let json = serde_json::to_string_pretty(session)?;
        std::fs::write(&path, json).map_err(|e| StoreError::io(path, e))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let path = self.session_path();
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            access_token: "access".to_string(),
            refresh_token: "refresh".to_string(),
            token_type: "bearer".to_string(),
            expires_at: Utc.with_ymd_and_hms(2026, 5, 1, 10, 0, 0).unwrap(),
            user: SessionUser {
                id: Uuid::new_v4(),
                email: Some("user@example.com".to_string()),
            },
        }
    }

    #[tokio::test]
    async fn test_file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("nested");

        let store = FileSessionStore::new(base.clone());
        assert!(store.load().await.unwrap().is_none());

        let s = session();
        store.save(&s).await.unwrap();

        // Re-open from same directory
        let reopened = FileSessionStore::new(base);
        assert_eq!(reopened.load().await.unwrap(), Some(s));

        reopened.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
        // Clearing twice is fine.
        reopened.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("session.json"), "{not json").unwrap();
        let store = FileSessionStore::new(dir.path().to_path_buf());
        assert!(matches!(store.load().await, Err(StoreError::Session(_))));
    }
}
