//! Error types for the narrator crate.
//!
//! [`Error`] is the crate-wide error returned by fallible operations.
//! [`TtsError`] covers failures talking to a speech provider and is folded
//! into [`Error`] via `Error::Tts`.

use std::path::PathBuf;

/// Result type alias for narrator operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The main error type for the narrator crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum Error {
    /// Required configuration is missing or unusable.
    #[error("configuration error: {0}")]
    Config(String),

    /// A narration item cannot be rendered as an artifact.
    #[error("invalid narration item `{key}`: {reason}")]
    InvalidItem {
        /// The offending key.
        key: String,
        /// Why the item was rejected.
        reason: String,
    },

    /// Speech provider error.
    #[error("{0}")]
    Tts(#[from] TtsError),

    /// An artifact could not be written.
    #[error("failed to write {}: {source}", path.display())]
    Write {
        /// Destination path.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    /// Create a configuration error.
    #[must_use]
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an invalid item error.
    #[must_use]
    pub fn invalid_item(key: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidItem {
            key: key.into(),
            reason: reason.into(),
        }
    }

    /// Create an artifact write error.
    #[must_use]
    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }

    /// Returns `true` for errors raised before any work could start.
    #[must_use]
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}

/// Error type for speech provider operations.
///
/// Each variant represents a distinct failure mode so callers can tell a
/// rejected request apart from a transport problem.
#[derive(Debug, Clone, thiserror::Error)]
#[non_exhaustive]
pub enum TtsError {
    /// Authentication or authorization failure.
    #[error("[{provider}] {message}")]
    Auth {
        /// Provider name (e.g., "cartesia").
        provider: String,
        /// Error description.
        message: String,
    },

    /// Network or connection error.
    #[error("{0}")]
    Network(String),

    /// The provider answered with something other than audio.
    #[error("HTTP {status}: {body}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Response body.
        body: String,
    },

    /// Internal error.
    #[error("{0}")]
    Internal(String),
}

impl TtsError {
    /// Create an authentication error.
    #[must_use]
    pub fn auth(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Auth {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Create a network error.
    #[must_use]
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an HTTP status error.
    #[must_use]
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create an internal error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// HTTP status of a rejected request, if any.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for TtsError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::network("Request timed out")
        } else if err.is_connect() {
            Self::network(format!("Connection failed: {err}"))
        } else {
            Self::network(err.to_string())
        }
    }
}
