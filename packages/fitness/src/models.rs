//! # Domain models shared by the backend client and the UI
//!
//! Every struct here mirrors a row (or a write payload) of one of the backend
//! tables, so they derive `Serialize + Deserialize` with the column names used
//! by the database. Optional columns stay `Option` so a half-filled profile
//! deserializes cleanly.
//!
//! | Type | Table |
//! |------|-------|
//! | [`Profile`] / [`ProfileChanges`] / [`NewProfile`] | `user_profiles` |
//! | [`DiaryEntry`] / [`DiaryEntryWrite`] | `diary_entries` |
//! | [`BodyMeasurement`] / [`NewMeasurement`] | `body_measurements` |
//! | [`LessonProgress`] | `lesson_progress` |
//!
//! Notification settings live in [`crate::notifications`] because their row
//! needs defaulting logic.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// What the user is working towards. Selects the progress branch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Goal {
    WeightLoss,
    Maintenance,
    Gain,
}

impl Goal {
    pub const ALL: [Goal; 3] = [Goal::WeightLoss, Goal::Maintenance, Goal::Gain];

    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "weight_loss",
            Goal::Maintenance => "maintenance",
            Goal::Gain => "gain",
        }
    }

    /// Human label shown in goal pickers.
    pub fn label(&self) -> &'static str {
        match self {
            Goal::WeightLoss => "Lose weight",
            Goal::Maintenance => "Maintain weight",
            Goal::Gain => "Gain mass",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "weight_loss" => Ok(Goal::WeightLoss),
            "maintenance" => Ok(Goal::Maintenance),
            "gain" => Ok(Goal::Gain),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// Returned when parsing an enum from an unexpected string.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("unknown value: {0}")]
pub struct UnknownVariant(pub String);

/// A row of `user_profiles`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: Uuid,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub goal: Option<Goal>,
    #[serde(default)]
    pub initial_weight: Option<f64>,
    #[serde(default)]
    pub target_weight: Option<f64>,
}

impl Profile {
    /// A profile counts as complete once the user has given a name.
    /// Incomplete profiles send the user back to the completion form.
    pub fn is_complete(&self) -> bool {
        self.name
            .as_deref()
            .map(|n| !n.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Update payload for `user_profiles`. `None` clears the column.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileChanges {
    pub name: Option<String>,
    pub goal: Option<Goal>,
    pub initial_weight: Option<f64>,
    pub target_weight: Option<f64>,
}

/// Insert payload for `user_profiles`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewProfile {
    pub user_id: Uuid,
    #[serde(flatten)]
    pub changes: ProfileChanges,
}

/// A row of `diary_entries`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default)]
    pub photo_url: Option<String>,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Columns written when creating or editing a diary entry.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DiaryEntryWrite {
    pub note: Option<String>,
    pub tags: Vec<String>,
    pub photo_url: Option<String>,
}

/// Kinds of body measurement the user can track.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MeasurementType {
    #[default]
    Weight,
    Waist,
    Chest,
    Hips,
    Arm,
    Thigh,
}

impl MeasurementType {
    pub const ALL: [MeasurementType; 6] = [
        MeasurementType::Weight,
        MeasurementType::Waist,
        MeasurementType::Chest,
        MeasurementType::Hips,
        MeasurementType::Arm,
        MeasurementType::Thigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MeasurementType::Weight => "weight",
            MeasurementType::Waist => "waist",
            MeasurementType::Chest => "chest",
            MeasurementType::Hips => "hips",
            MeasurementType::Arm => "arm",
            MeasurementType::Thigh => "thigh",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            MeasurementType::Weight => "Weight",
            MeasurementType::Waist => "Waist",
            MeasurementType::Chest => "Chest",
            MeasurementType::Hips => "Hips",
            MeasurementType::Arm => "Arm",
            MeasurementType::Thigh => "Thigh",
        }
    }

    /// Unit stored alongside the value.
    pub fn unit(&self) -> &'static str {
        match self {
            MeasurementType::Weight => "kg",
            _ => "cm",
        }
    }
}

impl fmt::Display for MeasurementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MeasurementType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MeasurementType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

/// A row of `body_measurements`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BodyMeasurement {
    pub id: Uuid,
    pub user_id: Uuid,
    pub measurement_type: MeasurementType,
    pub value: f64,
    pub unit: String,
    pub created_at: DateTime<Utc>,
}

/// Insert payload for `body_measurements`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewMeasurement {
    pub user_id: Uuid,
    pub measurement_type: MeasurementType,
    pub value: f64,
    pub unit: String,
}

impl NewMeasurement {
    pub fn new(user_id: Uuid, measurement_type: MeasurementType, value: f64) -> Self {
        Self {
            user_id,
            measurement_type,
            value,
            unit: measurement_type.unit().to_string(),
        }
    }
}

/// A row of `lesson_progress`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LessonProgress {
    pub user_id: Uuid,
    pub module_id: String,
    pub lesson_id: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Session lifecycle notifications emitted by the auth client.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuthEvent {
    InitialSession,
    SignedIn,
    SignedOut,
    TokenRefreshed,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}
