use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum RefreshError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("{url} answered with status {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Could not replace output file: {0}")]
    Persist(#[from] tempfile::PersistError),
}

pub type RefreshResult<T> = Result<T, RefreshError>;
