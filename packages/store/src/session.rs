//! # Session persistence
//!
//! [`SessionStore`] is the seam between the backend client and wherever the
//! session lives between app starts. The client only ever holds one session,
//! so the interface is three calls:
//!
//! | Method | Description |
//! |--------|-------------|
//! | `load` | The stored session, or `None` when signed out. |
//! | `save` | Replace the stored session (sign-in, refresh). |
//! | `clear` | Forget the session (sign-out, failed refresh). |
//!
//! Implementations: [`crate::MemorySessionStore`] for tests and
//! [`crate::FileSessionStore`] for devices.

use crate::error::StoreError;
use crate::models::Session;

/// Async trait for storing the current auth session.
pub trait SessionStore {
    fn load(&self) -> impl std::future::Future<Output = Result<Option<Session>, StoreError>>;
    fn save(&self, session: &Session) -> impl std::future::Future<Output = Result<(), StoreError>>;
    fn clear(&self) -> impl std::future::Future<Output = Result<(), StoreError>>;
}
