use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("GitHub API error: {status} - {message}")]
    Github { status: u16, message: String },
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Not found: {0}")]
    NotFound(String),
}

impl FolioError {
    pub fn github(status: u16, message: impl Into<String>) -> Self {
        FolioError::Github {
            status,
            message: message.into(),
        }
    }

    /// Status code reported by GitHub, if this error came from an API response.
    pub fn upstream_status(&self) -> Option<u16> {
        match self {
            FolioError::Github { status, .. } => Some(*status),
            FolioError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
