//! Reminder settings stored in `notification_settings`.
//!
//! Only the preferences are kept here; delivering reminders is left to the
//! operating system.

use std::fmt;

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReminderFrequency {
    #[default]
    Daily,
    Weekly,
}

impl ReminderFrequency {
    pub const ALL: [ReminderFrequency; 2] = [ReminderFrequency::Daily, ReminderFrequency::Weekly];

    pub fn label(&self) -> &'static str {
        match self {
            ReminderFrequency::Daily => "Daily",
            ReminderFrequency::Weekly => "Weekly",
        }
    }
}

impl fmt::Display for ReminderFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A user's reminder preferences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationSettings {
    pub reminder_time: NaiveTime,
    pub frequency: ReminderFrequency,
    pub notifications_enabled: bool,
    pub send_diary_enabled: bool,
}

impl Default for NotificationSettings {
    fn default() -> Self {
        Self {
            reminder_time: NaiveTime::from_hms_opt(9, 0, 0).unwrap_or(NaiveTime::MIN),
            frequency: ReminderFrequency::Daily,
            notifications_enabled: true,
            send_diary_enabled: false,
        }
    }
}

/// The row as stored; every column but the key may be null.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationSettingsRow {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<Uuid>,
    #[serde(default)]
    pub reminder_time: Option<String>,
    #[serde(default)]
    pub reminder_frequency: Option<ReminderFrequency>,
    #[serde(default)]
    pub notifications_enabled: Option<bool>,
    #[serde(default)]
    pub send_diary_enabled: Option<bool>,
}

impl NotificationSettings {
    /// Fill missing or malformed columns with the defaults.
    pub fn from_row(row: &NotificationSettingsRow) -> Self {
        let defaults = Self::default();
        Self {
            reminder_time: row
                .reminder_time
                .as_deref()
                .and_then(parse_reminder_time)
                .unwrap_or(defaults.reminder_time),
            frequency: row.reminder_frequency.unwrap_or(defaults.frequency),
            notifications_enabled: row
                .notifications_enabled
                .unwrap_or(defaults.notifications_enabled),
            send_diary_enabled: row.send_diary_enabled.unwrap_or(defaults.send_diary_enabled),
        }
    }

    pub fn to_row(&self, user_id: Option<Uuid>) -> NotificationSettingsRow {
        NotificationSettingsRow {
            user_id,
            reminder_time: Some(format_reminder_time(self.reminder_time)),
            reminder_frequency: Some(self.frequency),
            notifications_enabled: Some(self.notifications_enabled),
            send_diary_enabled: Some(self.send_diary_enabled),
        }
    }
}

/// `HH:MM:00`; seconds are always dropped.
pub fn format_reminder_time(time: NaiveTime) -> String {
    format!("{:02}:{:02}:00", time.hour(), time.minute())
}

/// Accepts `HH:MM` or `HH:MM:SS`.
pub fn parse_reminder_time(raw: &str) -> Option<NaiveTime> {
    let mut parts = raw.trim().split(':');
    let hour = parts.next()?.parse().ok()?;
    let minute = parts.next()?.parse().ok()?;
    NaiveTime::from_hms_opt(hour, minute, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = NotificationSettings::default();
        assert_eq!(format_reminder_time(s.reminder_time), "09:00:00");
        assert_eq!(s.frequency, ReminderFrequency::Daily);
        assert!(s.notifications_enabled);
        assert!(!s.send_diary_enabled);
        assert_eq!(NotificationSettings::from_row(&NotificationSettingsRow::default()), s);
    }

    #[test]
    fn test_row_round_trip_drops_seconds() {
        let row: NotificationSettingsRow = serde_json::from_str(
            r#"{"reminder_time":"07:05:42","reminder_frequency":"weekly","notifications_enabled":false,"send_diary_enabled":null}"#,
        )
        .unwrap();
        let s = NotificationSettings::from_row(&row);
        assert_eq!(s.reminder_time, NaiveTime::from_hms_opt(7, 5, 0).unwrap());
        assert_eq!(s.frequency, ReminderFrequency::Weekly);
        assert!(!s.notifications_enabled);
        assert!(!s.send_diary_enabled);

        let out = serde_json::to_value(s.to_row(None)).unwrap();
        assert_eq!(out["reminder_time"], "07:05:00");
        assert_eq!(out["reminder_frequency"], "weekly");
        assert!(out.get("user_id").is_none());
    }

    #[test]
    fn test_parse_reminder_time() {
        assert_eq!(parse_reminder_time("21:30"), NaiveTime::from_hms_opt(21, 30, 0));
        assert_eq!(parse_reminder_time("25:00:00"), None);
        assert_eq!(parse_reminder_time("noon"), None);
    }
}
