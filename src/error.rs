//! Error handling and custom error types
//!
//! Provides unified error handling across the gateway and the studio client
//! using thiserror.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// The caller sent an unusable request.
    #[error("{0}")]
    Validation(String),

    /// The image provider failed or answered with something unusable. The
    /// message is passed through to the caller as-is.
    #[error("{0}")]
    Upstream(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The gateway answered a studio request with an `error` payload.
    #[error("{0}")]
    Gateway(String),

    #[error("Speech recognition error: {0}")]
    Speech(String),
}

impl Error {
    /// HTTP status reported to gateway callers for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::Validation(_) => 400,
            _ => 500,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
