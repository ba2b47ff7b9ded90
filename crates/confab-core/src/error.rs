//! Unified error types for all layers of the application.

use std::fmt::Debug;
use thiserror::Error;

/// Unified error type for the Confab cache service.
///
/// Covers domain, cache, upstream-backend, and presentation layer errors.
/// Cache errors are deliberately separate from backend errors so that a
/// failing cache store never masks the authoritative backend's result.
#[derive(Error, Debug)]
pub enum ConfabError {
    /// Resource not found in the backend
    #[error("Resource not found: {resource_type} with id {id}")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Malformed or structurally invalid request
    #[error("Validation error: {0}")]
    Validation(String),

    /// Missing or unusable credentials
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The domain backend failed or was unreachable
    #[error("Backend error: {0}")]
    Backend(String),

    /// The cache store failed or was unreachable
    #[error("Cache error: {0}")]
    Cache(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Generic error wrapper
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ConfabError {
    /// Returns the HTTP status code for this error.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::NotFound { .. } => 404,
            Self::Validation(_) => 400,
            Self::Unauthorized(_) => 401,
            Self::Backend(_)
            | Self::Cache(_)
            | Self::Configuration(_)
            | Self::Internal(_)
            | Self::Other(_) => 500,
        }
    }

    /// Returns a machine-readable error code.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::Unauthorized(_) => "UNAUTHORIZED",
            Self::Backend(_) => "BACKEND_ERROR",
            Self::Cache(_) => "CACHE_ERROR",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) | Self::Other(_) => "INTERNAL_ERROR",
        }
    }

    /// Creates a not found error for a resource.
    #[must_use]
    pub fn not_found<T: ToString>(resource_type: &'static str, id: T) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Creates a validation error.
    #[must_use]
    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an unauthorized error.
    #[must_use]
    pub fn unauthorized<T: Into<String>>(message: T) -> Self {
        Self::Unauthorized(message.into())
    }

    /// Creates a backend error.
    #[must_use]
    pub fn backend<T: Into<String>>(message: T) -> Self {
        Self::Backend(message.into())
    }

    /// Creates a cache error.
    #[must_use]
    pub fn cache<T: Into<String>>(message: T) -> Self {
        Self::Cache(message.into())
    }

    /// Creates an internal error.
    #[must_use]
    pub fn internal<T: Into<String>>(message: T) -> Self {
        Self::Internal(message.into())
    }

    /// True for failures where retrying against the same dependency may
    /// succeed (cache or backend outages).
    #[must_use]
    pub const fn is_retriable(&self) -> bool {
        matches!(self, Self::Backend(_) | Self::Cache(_))
    }
}

impl From<serde_json::Error> for ConfabError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON serialization error: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(ConfabError::not_found("Room", "r1").status_code(), 404);
        assert_eq!(ConfabError::validation("missing field").status_code(), 400);
        assert_eq!(ConfabError::unauthorized("no token").status_code(), 401);
        assert_eq!(ConfabError::backend("unreachable").status_code(), 500);
        assert_eq!(ConfabError::cache("pool exhausted").status_code(), 500);
        assert_eq!(ConfabError::internal("oops").status_code(), 500);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ConfabError::not_found("User", "u1").error_code(), "NOT_FOUND");
        assert_eq!(ConfabError::validation("bad").error_code(), "VALIDATION_ERROR");
        assert_eq!(ConfabError::unauthorized("no").error_code(), "UNAUTHORIZED");
        assert_eq!(ConfabError::backend("down").error_code(), "BACKEND_ERROR");
        assert_eq!(ConfabError::cache("down").error_code(), "CACHE_ERROR");
    }

    #[test]
    fn test_retriable_errors() {
        assert!(ConfabError::backend("connection refused").is_retriable());
        assert!(ConfabError::cache("timeout").is_retriable());
        assert!(!ConfabError::not_found("User", "u1").is_retriable());
        assert!(!ConfabError::validation("bad input").is_retriable());
        assert!(!ConfabError::unauthorized("no auth").is_retriable());
    }

    #[test]
    fn test_error_display() {
        let err = ConfabError::not_found("Conversation", "c42");
        assert!(err.to_string().contains("Conversation"));
        assert!(err.to_string().contains("c42"));
    }
}
