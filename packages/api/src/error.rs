use serde::Deserialize;

/// PostgREST code for "single row requested, none found".
pub const NO_ROWS: &str = "PGRST116";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("configuration error: {0}")]
    Config(String),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("backend returned {status}: {message}")]
    Backend {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("not signed in")]
    NotAuthenticated,
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error(transparent)]
    Store(#[from] store::StoreError),
    #[error(transparent)]
    Photo(#[from] fitness::PhotoError),
    #[error(transparent)]
    Validation(#[from] fitness::ValidationError),
}

impl ApiError {
    /// Text for the alert shown to the user.
    pub fn user_message(&self) -> String {
        match self {
            ApiError::Backend { message, .. } if !message.trim().is_empty() => message.clone(),
            ApiError::NotAuthenticated => "Your session has ended. Please sign in again.".to_string(),
            ApiError::Http(_) => "Network error. Check your connection and try again.".to_string(),
            ApiError::Photo(_) => "Could not read the selected image.".to_string(),
            ApiError::Validation(e) => e.to_string(),
            _ => "Something went wrong. Please try again.".to_string(),
        }
    }

    pub fn is_no_rows(&self) -> bool {
        matches!(self, ApiError::Backend { code: Some(code), .. } if code == NO_ROWS)
    }

    /// The auth server turned the refresh token down. Network failures and
    /// 5xx responses leave the session usable.
    pub fn rejects_session(&self) -> bool {
        matches!(self, ApiError::Backend { status: 400 | 401 | 403, .. })
    }

    /// Build from a non-success response body. Auth, PostgREST and storage
    /// each word their errors differently; take whichever fields are present.
    pub(crate) fn from_body(status: u16, body: &str) -> Self {
        #[derive(Deserialize, Default)]
        struct ErrorBody {
            code: Option<serde_json::Value>,
            error_code: Option<String>,
            message: Option<String>,
            msg: Option<String>,
            error_description: Option<String>,
            error: Option<String>,
        }

        let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
        let code = parsed.error_code.or_else(|| {
            parsed.code.map(|c| match c {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
        });
        let message = parsed
            .error_description
            .or(parsed.message)
            .or(parsed.msg)
            .or(parsed.error)
            .unwrap_or_else(|| body.trim().to_string());

        ApiError::Backend {
            status,
            code,
            message,
        }
    }
}
