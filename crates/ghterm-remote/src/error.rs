//! Error types for remote operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while talking to the repository host.
#[derive(Debug, Error)]
pub enum FetchError {
    /// No repository has been configured.
    #[error("No repository configured")]
    NotConfigured,

    /// The server answered with a non-success status.
    #[error("GitHub API error: {status} {reason}")]
    Http { status: u16, reason: String },

    /// The request could not be sent or the response could not be read.
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response body was not the expected JSON.
    #[error("Unexpected response: {source}")]
    Decode {
        #[source]
        source: reqwest::Error,
    },

    /// Writing a downloaded file failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl FetchError {
    /// Create an HTTP status error.
    pub fn http(status: u16, reason: impl Into<String>) -> Self {
        Self::Http {
            status,
            reason: reason.into(),
        }
    }

    /// Create an I/O error with path context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// HTTP status code, when the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure points at bad or missing credentials.
    pub fn is_auth_failure(&self) -> bool {
        matches!(self.status(), Some(401 | 403))
    }
}
