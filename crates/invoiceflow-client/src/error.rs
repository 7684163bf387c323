//! # Client Error Types
//!
//! Error types for backend calls, session handling and configuration.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Client Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐  │
//! │  │  Session        │  │   Transport     │  │     Contract            │  │
//! │  │                 │  │                 │  │                         │  │
//! │  │ NotAuthenticated│  │  Transport      │  │  MissingField           │  │
//! │  │  Unauthorized   │  │  Http{status}   │  │  Rejected               │  │
//! │  │  TokenStore     │  │  InvalidUrl     │  │                         │  │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘  │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐                               │
//! │  │  Local input    │  │  Configuration  │                               │
//! │  │                 │  │                 │                               │
//! │  │  Validation     │  │  Config         │                               │
//! │  │  Core           │  │                 │                               │
//! │  └─────────────────┘  └─────────────────┘                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here is retried; every error goes straight back to the caller.

use invoiceflow_core::{CoreError, ValidationErrors};
use thiserror::Error;

/// Result type alias for client operations.
pub type ClientResult<T> = Result<T, ClientError>;

/// Everything that can go wrong talking to the invoice backend.
#[derive(Debug, Error)]
pub enum ClientError {
    // =========================================================================
    // Session Errors
    // =========================================================================
    /// No session, or the session token has expired.
    #[error("Not authenticated. Please log in.")]
    NotAuthenticated,

    /// The backend answered 401; the session has been cleared.
    #[error("Session expired or was rejected by the server. Please log in again.")]
    Unauthorized,

    /// Reading or writing the persisted session failed.
    #[error("Token store error: {0}")]
    TokenStore(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Non-success HTTP status with the server's message.
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// Connection, timeout or body read failure.
    #[error("Network error: {0}")]
    Transport(String),

    /// A URL could not be built or parsed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Contract Errors
    // =========================================================================
    /// A successful response lacked a value we need.
    #[error("Response is missing {0}")]
    MissingField(&'static str),

    /// The backend accepted the request but reported failure.
    #[error("Rejected by server: {0}")]
    Rejected(String),

    // =========================================================================
    // Local Errors
    // =========================================================================
    /// Form input failed validation; nothing was sent.
    #[error("{0}")]
    Validation(#[from] ValidationErrors),

    /// Draft or view state error.
    #[error(transparent)]
    Core(CoreError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl ClientError {
    /// Returns true if the user must log in (again) before retrying.
    pub fn requires_login(&self) -> bool {
        matches!(self, ClientError::NotAuthenticated | ClientError::Unauthorized)
    }
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<CoreError> for ClientError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::Validation(errors) => ClientError::Validation(errors),
            other => ClientError::Core(other),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Transport(format!("request timed out: {}", err))
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

// =============================================================================
// Configuration Error
// =============================================================================

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },

    #[error("Failed to load config: {0}")]
    LoadFailed(String),

    #[error("Could not determine a config directory for the session file")]
    NoConfigDir,
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::LoadFailed(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use invoiceflow_core::ValidationError;

    #[test]
    fn test_requires_login() {
        assert!(ClientError::NotAuthenticated.requires_login());
        assert!(ClientError::Unauthorized.requires_login());
        assert!(!ClientError::MissingField("invoice id").requires_login());
    }

    #[test]
    fn test_core_validation_is_flattened() {
        let errors: ValidationErrors = ValidationError::NoSubmittableItems.into();
        let err: ClientError = CoreError::Validation(errors).into();

        assert!(matches!(err, ClientError::Validation(_)));
        assert_eq!(
            err.to_string(),
            "at least one item with a description, quantity and unit price is required"
        );
    }

    #[test]
    fn test_http_error_display() {
        let err = ClientError::Http {
            status: 400,
            message: "Invalid phone".to_string(),
        };
        assert_eq!(err.to_string(), "Request failed (400): Invalid phone");
    }
}
