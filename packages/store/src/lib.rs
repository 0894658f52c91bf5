pub mod config;
pub mod error;
pub mod models;
pub mod session;

mod file_store;
mod memory;
pub use file_store::{default_data_dir, FileSessionStore};
pub use memory::MemorySessionStore;

pub use config::AppConfig;
pub use error::StoreError;
pub use models::{Session, SessionUser, TokenResponse};
pub use session::SessionStore;
