use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::StoreError;
use crate::models::Session;
use crate::session::SessionStore;

/// In-memory SessionStore for tests and previews.
#[derive(Clone, Debug, Default)]
pub struct MemorySessionStore {
    session: Arc<Mutex<Option<Session>>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_session(session: Session) -> Self {
        Self {
            session: Arc::new(Mutex::new(Some(session))),
        }
    }

    fn slot(&self) -> MutexGuard<'_, Option<Session>> {
        self.session.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<Session>, StoreError> {
        Ok(self.slot().clone())
    }

    async fn save(&self, session: &Session) -> Result<(), StoreError> {
        *self.slot() = Some(session.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.slot() = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SessionUser;
    use chrono::Utc;
    use uuid::Uuid;

    fn session() -> Session {
        Session {
            access_token: "at".to_string(),
            refresh_token: "rt".to_string(),
            token_type: "bearer".to_string(),
            expires_at: Utc::now(),
            user: SessionUser {
                id: Uuid::new_v4(),
                email: None,
            },
        }
    }

    #[tokio::test]
    async fn test_save_load_clear() {
        let store = MemorySessionStore::new();
        assert!(store.load().await.unwrap().is_none());

        let s = session();
        store.save(&s).await.unwrap();
        assert_eq!(store.load().await.unwrap(), Some(s.clone()));

        // Clones share the slot.
        let other = store.clone();
        other.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_none());
    }
}
