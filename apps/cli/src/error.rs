//! # CLI Error Type
//!
//! Unified error type for CLI commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in InvoiceFlow                            │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐   │
//! │  │  Command Function                                                │   │
//! │  │  Result<(), AppError>                                            │   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Invoice file? ──── InvoiceFileError ─────────────┐              │   │
//! │  │         │                                         │              │   │
//! │  │         ▼                                         ▼              │   │
//! │  │  Backend call? ──── ClientError ───────────────► AppError ──────►│   │
//! │  │         │                                                        │   │
//! │  │         ▼                                                        │   │
//! │  │  Success ───────────────────────────────────────────────────────►│   │
//! │  └──────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  stderr:  error: [NOT_AUTHENTICATED] Not authenticated. Please log in.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use invoiceflow_client::{ClientError, ConfigError};

use crate::invoice_file::InvoiceFileError;

/// Error returned from every command.
///
/// `message` is what the user sees; `code` is stable for scripts.
#[derive(Debug, Clone)]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Form or invoice failed validation (nothing was sent)
    ValidationError,

    /// No usable session; run `invoiceflow login`
    NotAuthenticated,

    /// Backend answered with a non-success status
    BackendError,

    /// Backend answered 2xx with an unexpected body
    BadResponse,

    /// Could not reach the backend
    NetworkError,

    /// Bad configuration value or file
    ConfigError,

    /// Invoice file could not be read or parsed
    InvoiceFile,

    /// Local file I/O failed
    IoError,

    /// Operation not allowed in the current state
    BusinessLogic,
}

impl ErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::NotAuthenticated => "NOT_AUTHENTICATED",
            ErrorCode::BackendError => "BACKEND_ERROR",
            ErrorCode::BadResponse => "BAD_RESPONSE",
            ErrorCode::NetworkError => "NETWORK_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::InvoiceFile => "INVOICE_FILE",
            ErrorCode::IoError => "IO_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
        }
    }

    /// Process exit status for this code.
    pub fn exit_code(self) -> i32 {
        match self {
            ErrorCode::ValidationError | ErrorCode::InvoiceFile => 65,
            ErrorCode::NotAuthenticated => 77,
            ErrorCode::ConfigError => 78,
            ErrorCode::NetworkError | ErrorCode::BackendError | ErrorCode::BadResponse => 69,
            ErrorCode::IoError => 74,
            ErrorCode::BusinessLogic => 1,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    pub fn io(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::IoError, message)
    }
}

impl From<ClientError> for AppError {
    fn from(err: ClientError) -> Self {
        let code = match &err {
            ClientError::NotAuthenticated | ClientError::Unauthorized => {
                ErrorCode::NotAuthenticated
            }
            ClientError::Validation(_) => ErrorCode::ValidationError,
            ClientError::Http { .. } | ClientError::Rejected(_) => ErrorCode::BackendError,
            ClientError::MissingField(_) => ErrorCode::BadResponse,
            ClientError::Transport(e) => {
                tracing::error!("Transport failure: {}", e);
                ErrorCode::NetworkError
            }
            ClientError::InvalidUrl(_) | ClientError::Config(_) => ErrorCode::ConfigError,
            ClientError::TokenStore(e) => {
                tracing::error!("Token store failure: {}", e);
                ErrorCode::IoError
            }
            ClientError::Core(_) => ErrorCode::BusinessLogic,
        };
        AppError::new(code, err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<InvoiceFileError> for AppError {
    fn from(err: InvoiceFileError) -> Self {
        AppError::new(ErrorCode::InvoiceFile, err.to_string())
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(test)]
mod tests {
    use super::*;
    use invoiceflow_core::{ValidationError, ValidationErrors};

    #[test]
    fn test_client_errors_map_to_codes() {
        let err: AppError = ClientError::NotAuthenticated.into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err: AppError = ClientError::Unauthorized.into();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);

        let err: AppError = ClientError::Http {
            status: 500,
            message: "Renderer crashed".to_string(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::BackendError);
        assert!(err.message.contains("Renderer crashed"));
    }

    #[test]
    fn test_validation_message_lists_every_reason() {
        let errors = ValidationErrors::from_vec(vec![
            ValidationError::Required {
                field: "customer name".to_string(),
            },
            ValidationError::Required {
                field: "due date".to_string(),
            },
        ])
        .unwrap();

        let err: AppError = ClientError::Validation(errors).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(err.message.contains("customer name"));
        assert!(err.message.contains("due date"));
    }

    #[test]
    fn test_display_shows_code() {
        let err = AppError::io("disk full");
        assert_eq!(err.to_string(), "[IO_ERROR] disk full");
        assert_eq!(err.code.exit_code(), 74);
    }
}
