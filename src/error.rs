//! Error Types
//!
//! Error types for the host-API boundary and configuration loading.
//!
//! Per-item lookup failures during correlation are recoverable by design:
//! the correlation engine logs and skips them rather than aborting a batch.
//! These types exist so that a `HostApi` implementation can report *why* a
//! call failed without forcing callers to treat every failure as fatal.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur at the host-API capability boundary
#[derive(Debug, Error)]
pub enum ApiError {
    /// The requested entity does not exist on the host
    #[error("Not found: {0}")]
    NotFound(String),

    /// A transient transport-level failure (timeout, connection reset, 5xx)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The host returned a response the client could not interpret
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Wrapped errors from external `HostApi` implementations
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// Create a not-found error for a named entity
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    /// Create a transport error
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a malformed-response error
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedResponse(msg.into())
    }
}

/// Result type for host-API operations
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while loading the assumptions file
///
/// An *absent* file is not an error; `AssumptionsConfig::load` falls back
/// to built-in defaults in that case. These variants cover a file that
/// exists but cannot be read or parsed.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The assumptions file exists but could not be read
    #[error("Failed to read assumptions file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The assumptions file could not be parsed as YAML
    #[error("Failed to parse assumptions file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_formats_message() {
        let error = ApiError::not_found("merge request !42");
        assert_eq!(format!("{}", error), "Not found: merge request !42");
    }

    #[test]
    fn test_transport_formats_message() {
        let error = ApiError::transport("connection reset by peer");
        assert_eq!(format!("{}", error), "Transport error: connection reset by peer");
    }

    #[test]
    fn test_anyhow_errors_pass_through() {
        let error: ApiError = anyhow::anyhow!("TLS handshake failed").into();
        assert_eq!(format!("{}", error), "TLS handshake failed");
    }
}
