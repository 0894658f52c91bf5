use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("corrupt session file: {0}")]
    Session(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    ConfigParse(#[from] toml::de::Error),
    #[error("failed to write config: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
