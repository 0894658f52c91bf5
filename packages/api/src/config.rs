//! Backend endpoint configuration from environment variables.

use crate::error::ApiError;

/// Where the backend lives and the public key every request carries.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendConfig {
    pub url: String,
    pub anon_key: String,
}

impl BackendConfig {
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        let url: String = url.into();
        Self {
            url: url.trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
        }
    }

    /// Read `SUPABASE_URL` and `SUPABASE_ANON_KEY`, loading `.env` first.
    pub fn from_env() -> Result<Self, ApiError> {
        dotenvy::dotenv().ok();

        let url = std::env::var("SUPABASE_URL")
            .map_err(|_| ApiError::Config("SUPABASE_URL not set".to_string()))?;
        let anon_key = std::env::var("SUPABASE_ANON_KEY")
            .map_err(|_| ApiError::Config("SUPABASE_ANON_KEY not set".to_string()))?;
        if url.trim().is_empty() || anon_key.trim().is_empty() {
            return Err(ApiError::Config(
                "SUPABASE_URL and SUPABASE_ANON_KEY must not be empty".to_string(),
            ));
        }

        Ok(Self::new(url.trim(), anon_key.trim()))
    }

    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = BackendConfig::new("https://example.supabase.co/", "key");
        assert_eq!(config.url, "https://example.supabase.co");
        assert_eq!(
            config.endpoint("/rest/v1/user_profiles"),
            "https://example.supabase.co/rest/v1/user_profiles"
        );
    }
}
