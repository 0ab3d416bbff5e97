//! Error handling for htmlclip

use thiserror::Error;

/// Failure of a single page fetch
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Request failed with status {0}")]
    Status(u16),

    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

/// Failure of a single clipboard write
#[derive(Debug, Error)]
pub enum CopyError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Clipboard write rejected: {0}")]
    Rejected(String),

    #[error("Copy command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main error type for htmlclip
#[derive(Debug, Error)]
pub enum HtmlClipError {
    #[error("Fetch failed: {0}")]
    Fetch(#[from] FetchError),

    #[error("Copy failed: {0}")]
    Copy(#[from] CopyError),

    #[error("Button is busy")]
    Busy,

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
