//! Error types for the availability engine.

use std::path::PathBuf;

use thiserror::Error;

/// Failure to obtain the combination list.
///
/// The behavior never surfaces these to the shopper; a failed fetch degrades
/// to an empty combination list.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("network error: {0}")]
    Network(String),

    /// The combination endpoint answered with a non-success status.
    #[error("combination source returned HTTP {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// The payload was not a combination list.
    #[error("invalid combination payload: {0}")]
    Decode(String),

    /// Reading a local combination file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Whether the same request might succeed later.
    ///
    /// The behavior itself never retries; this only informs callers that do.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status } => *status >= 500 || *status == 429,
            Self::Decode(_) | Self::Io { .. } => false,
        }
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Self::Decode(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Status {
                status: status.as_u16(),
            }
        } else {
            Self::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}

/// Errors raised while preparing a behavior (settings, layouts).
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid settings: {0}")]
    Settings(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
