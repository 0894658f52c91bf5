//! User-facing alerts. Failures surfaced to the user are queued here and shown
//! one at a time in a modal by [`AlertHost`].

use std::collections::VecDeque;

use dioxus::prelude::*;

use crate::views::ModalOverlay;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AlertLevel {
    Info,
    Success,
    Error,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Alert {
    pub timestamp: String,
    pub level: AlertLevel,
    pub title: String,
    pub message: String,
}

#[derive(Clone, Debug, Default)]
pub struct Alerts {
    pending: VecDeque<Alert>,
}

impl Alerts {
    pub fn push(&mut self, level: AlertLevel, title: &str, message: &str) {
        self.pending.push_back(Alert {
            timestamp: chrono::Local::now().format("%H:%M:%S").to_string(),
            level,
            title: title.to_string(),
            message: message.to_string(),
        });
    }

    /// The alert currently on screen.
    pub fn current(&self) -> Option<&Alert> {
        self.pending.front()
    }

    pub fn dismiss(&mut self) {
        self.pending.pop_front();
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

pub fn use_alerts() -> Signal<Alerts> {
    use_context::<Signal<Alerts>>()
}

pub fn show_alert(alerts: &mut Signal<Alerts>, level: AlertLevel, title: &str, message: &str) {
    match level {
        AlertLevel::Error => tracing::error!(title, "{message}"),
        AlertLevel::Info | AlertLevel::Success => tracing::info!(title, "{message}"),
    }
    alerts.write().push(level, title, message);
}

/// Surface an API failure with its user-facing text.
pub fn show_error(alerts: &mut Signal<Alerts>, title: &str, err: &api::ApiError) {
    show_alert(alerts, AlertLevel::Error, title, &err.user_message());
}

#[component]
pub fn AlertHost() -> Element {
    let mut alerts = use_alerts();
    let Some(alert) = alerts.read().current().cloned() else {
        return rsx! {};
    };

    rsx! {
        ModalOverlay {
            on_close: move |_| alerts.write().dismiss(),
            div {
                class: match alert.level {
                    AlertLevel::Error => "alert alert-error",
                    AlertLevel::Success => "alert alert-success",
                    AlertLevel::Info => "alert alert-info",
                },
                h2 { "{alert.title}" }
                p { "{alert.message}" }
                p { class: "muted", "{alert.timestamp}" }
                div {
                    class: "modal-actions",
                    button {
                        class: "btn btn-primary",
                        onclick: move |_| alerts.write().dismiss(),
                        "OK"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alerts_show_in_order() {
        let mut alerts = Alerts::default();
        assert!(alerts.current().is_none());
        alerts.push(AlertLevel::Error, "Save failed", "Network error");
        alerts.push(AlertLevel::Success, "Saved", "Entry saved");
        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts.current().unwrap().title, "Save failed");
        alerts.dismiss();
        assert_eq!(alerts.current().unwrap().level, AlertLevel::Success);
        alerts.dismiss();
        assert!(alerts.is_empty());
        alerts.dismiss();
        assert!(alerts.is_empty());
    }
}
