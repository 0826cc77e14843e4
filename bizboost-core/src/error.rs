use std::time::Duration;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ThemeError {
    #[error("Session storage error: {0}")]
    Session(#[source] anyhow::Error),

    #[error("Session snapshot encoding error: {0}")]
    SessionEncoding(#[from] serde_json::Error),

    #[error("Remote config store error: {0}")]
    Remote(#[source] anyhow::Error),

    #[error("Remote config store timed out after {0:?}")]
    Timeout(Duration),

    #[error("Invalid remote endpoint: {0}")]
    InvalidEndpoint(String),
}

pub type Result<T> = std::result::Result<T, ThemeError>;
