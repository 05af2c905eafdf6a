//! Error types for widestore operations

use thiserror::Error;

/// Vendor error codes that are conventionally safe to retry.
///
/// Classification only; this layer never retries on its own. Retry policy
/// belongs to the caller or to the client implementation.
pub const RETRYABLE_ERROR_CODES: &[&str] = &[
    "OTSInternalServerError",
    "OTSQuotaExhausted",
    "OTSServerBusy",
    "OTSPartitionUnavailable",
    "OTSTimeout",
    "OTSServerUnavailable",
    "OTSRowOperationConflict",
    "OTSTableNotReady",
    "OTSCapacityUnitExhausted",
];

/// An error reported by the remote store, passed through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("remote store error [{code}]: {message}")]
pub struct RemoteError {
    /// Vendor error code (e.g. "OTSServerBusy")
    pub code: String,
    /// Human-readable message from the server
    pub message: String,
}

impl RemoteError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    /// Whether this error's code is conventionally retryable.
    pub fn is_retryable(&self) -> bool {
        RETRYABLE_ERROR_CODES.contains(&self.code.as_str())
    }
}

/// Errors surfaced by store operations
#[derive(Debug, Error)]
pub enum StoreError {
    /// Fatal configuration error: missing/blank table or index name, illegal
    /// coercion pairing, bad schema. Never retryable.
    #[error("configuration error: {0}")]
    Config(String),

    /// Error passed through from the remote store client
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// JSON serialization error from the structured-value fallback
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StoreError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_codes() {
        for code in RETRYABLE_ERROR_CODES {
            assert!(
                RemoteError::new(*code, "x").is_retryable(),
                "{code} should be retryable"
            );
        }
    }

    #[test]
    fn test_non_retryable_codes() {
        assert!(!RemoteError::new("OTSParameterInvalid", "x").is_retryable());
        assert!(!RemoteError::new("OTSConditionCheckFail", "x").is_retryable());
        assert!(!RemoteError::new("", "x").is_retryable());
    }

    #[test]
    fn test_remote_error_display() {
        let err = RemoteError::new("OTSServerBusy", "too many requests");
        assert_eq!(
            err.to_string(),
            "remote store error [OTSServerBusy]: too many requests"
        );
    }

    #[test]
    fn test_config_error_display() {
        let err = StoreError::config("table name is blank");
        assert_eq!(err.to_string(), "configuration error: table name is blank");
    }

    #[test]
    fn test_remote_error_converts() {
        let err: StoreError = RemoteError::new("OTSTimeout", "deadline").into();
        match err {
            StoreError::Remote(inner) => assert!(inner.is_retryable()),
            _ => panic!("Expected Remote variant"),
        }
    }
}
