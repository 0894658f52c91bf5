//! # API crate — backend client for FitTrack
//!
//! Everything the app reads or writes goes through [`Backend`], a thin client
//! over the hosted backend's REST surface: the auth service, PostgREST tables
//! and object storage. The UI keeps one `Backend` in a Dioxus context.
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | `SUPABASE_URL` / `SUPABASE_ANON_KEY` from the environment (`.env` via `dotenvy`) |
//! | [`error`] | [`ApiError`] and the alert text derived from it |
//! | [`client`] | [`Backend`]: HTTP client, session slot, auth event channel |
//! | [`auth`] | Restore, sign in, refresh, sign out |
//! | [`rest`] | [`Query`] builder plus select / single / insert / update |
//! | [`storage`] | Upload, remove, public and signed URLs |
//!
//! Table-specific calls (`profiles`, `diary`, `measurements`, `notifications`,
//! `courses`, `avatar`) are further `impl Backend` blocks.

pub mod auth;
pub mod avatar;
pub mod client;
pub mod config;
pub mod courses;
pub mod diary;
pub mod error;
pub mod measurements;
pub mod notifications;
pub mod profiles;
pub mod rest;
pub mod storage;

#[cfg(test)]
mod test_support;

pub use client::Backend;
pub use config::BackendConfig;
pub use error::ApiError;
pub use rest::Query;
