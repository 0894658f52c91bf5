//! This crate contains all shared UI for the FitTrack app: the screen views,
//! the auth provider that drives navigation, alerts and the tab bar.

use dioxus::prelude::*;

// Re-export icon library
pub use dioxus_free_icons::Icon;
pub mod icons {
    pub use dioxus_free_icons::icons::fa_solid_icons::*;
}

mod backend;
pub use backend::{make_backend, use_backend, AppBackend};

pub mod views;

pub const FITTRACK_CSS: Asset = asset!("/assets/fittrack.css");

mod app;
pub use app::{AppShell, StartupError, StartupFailed};

mod auth;
pub use auth::{use_auth, use_nav, AuthProvider, AuthState};

pub mod alerts;
pub use alerts::{show_alert, show_error, use_alerts, AlertHost, AlertLevel, Alerts};

mod tab_bar;
pub use tab_bar::TabBar;

mod timers;
