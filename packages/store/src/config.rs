//! # App configuration — `fittrack.toml`
//!
//! Optional TOML file in the app's data directory (filename:
//! [`AppConfig::filename`] = `"fittrack.toml"`). Backend credentials are not
//! kept here; they come from the environment.
//!
//! ## Structure
//!
//! ```toml
//! [storage]
//! photo_bucket = "diary-photos"
//! avatar_bucket = "avatar"
//!
//! [onboarding]
//! registration_fallback_ms = 2500
//!
//! [diary]
//! photo_max_width = 800
//! photo_quality = 70
//! ```
//!
//! Every field has a default, so a missing or empty file is equivalent to
//! [`AppConfig::default`].

use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Top-level configuration stored in `fittrack.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub onboarding: OnboardingConfig,
    #[serde(default)]
    pub diary: DiaryConfig,
}

/// Object storage bucket names.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    #[serde(default = "default_photo_bucket")]
    pub photo_bucket: String,
    #[serde(default = "default_avatar_bucket")]
    pub avatar_bucket: String,
}

fn default_photo_bucket() -> String {
    "diary-photos".to_string()
}

fn default_avatar_bucket() -> String {
    "avatar".to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            photo_bucket: default_photo_bucket(),
            avatar_bucket: default_avatar_bucket(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OnboardingConfig {
    /// How long the registration screen may stay up before the app moves on
    /// by itself.
    #[serde(default = "default_registration_fallback")]
    pub registration_fallback_ms: u64,
}

fn default_registration_fallback() -> u64 {
    2500
}

impl Default for OnboardingConfig {
    fn default() -> Self {
        Self {
            registration_fallback_ms: default_registration_fallback(),
        }
    }
}

/// Diary photo re-encoding.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DiaryConfig {
    #[serde(default = "default_photo_max_width")]
    pub photo_max_width: u32,
    /// JPEG quality, 1-100.
    #[serde(default = "default_photo_quality")]
    pub photo_quality: u8,
}

fn default_photo_max_width() -> u32 {
    800
}

fn default_photo_quality() -> u8 {
    70
}

impl Default for DiaryConfig {
    fn default() -> Self {
        Self {
            photo_max_width: default_photo_max_width(),
            photo_quality: default_photo_quality(),
        }
    }
}

impl AppConfig {
    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "fittrack.toml"
    }

    /// Parse from TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }

    /// Serialize to TOML string.
    pub fn to_toml(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    /// Read `fittrack.toml` from `dir`; a missing file yields the defaults.
    pub fn load_from(dir: &Path) -> Result<Self, StoreError> {
        let path = dir.join(Self::filename());
        match std::fs::read_to_string(&path) {
            Ok(content) => Ok(Self::from_toml(&content)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(StoreError::io(path, e)),
        }
    }

    /// Like [`AppConfig::load_from`], but falls back to the defaults (with a
    /// warning) when the file cannot be read or parsed.
    pub fn load_or_default(dir: &Path) -> Self {
        Self::load_from(dir).unwrap_or_else(|e| {
            tracing::warn!("using default config: {e}");
            Self::default()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_is_default() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.storage.photo_bucket, "diary-photos");
        assert_eq!(config.storage.avatar_bucket, "avatar");
        assert_eq!(config.onboarding.registration_fallback_ms, 2500);
        assert_eq!(config.diary.photo_max_width, 800);
        assert_eq!(config.diary.photo_quality, 70);
    }

    #[test]
    fn test_partial_sections() {
        let config = AppConfig::from_toml("[diary]\nphoto_quality = 55\n").unwrap();
        assert_eq!(config.diary.photo_quality, 55);
        assert_eq!(config.diary.photo_max_width, 800);
        assert_eq!(config.storage, StorageConfig::default());
    }

    #[test]
    fn test_toml_roundtrip() {
        let mut config = AppConfig::default();
        config.storage.photo_bucket = "photos-staging".to_string();
        let parsed = AppConfig::from_toml(&config.to_toml().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_load_from_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(AppConfig::load_from(dir.path()).unwrap(), AppConfig::default());

        std::fs::write(
            dir.path().join(AppConfig::filename()),
            "[onboarding]\nregistration_fallback_ms = 4000\n",
        )
        .unwrap();
        let config = AppConfig::load_from(dir.path()).unwrap();
        assert_eq!(config.onboarding.registration_fallback_ms, 4000);

        std::fs::write(dir.path().join(AppConfig::filename()), "storage = 3").unwrap();
        assert!(AppConfig::load_from(dir.path()).is_err());
        assert_eq!(AppConfig::load_or_default(dir.path()), AppConfig::default());
    }
}
