//! # Error Types
//!
//! Domain-specific error types for invoiceflow-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoiceflow-core errors (this file)                                    │
//! │  ├── CoreError         - Draft / view state failures                    │
//! │  ├── ValidationError   - One failed field rule                          │
//! │  └── ValidationErrors  - Every failed rule of one form                  │
//! │                                                                         │
//! │  invoiceflow-client errors (separate crate)                             │
//! │  └── ClientError       - Backend call failures                          │
//! │                                                                         │
//! │  CLI errors (in app)                                                    │
//! │  └── AppError          - What the user sees                             │
//! │                                                                         │
//! │  Flow: ValidationError → ValidationErrors → ClientError → AppError      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::fmt;

use thiserror::Error;

use crate::types::LineItemId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A draft row with this identifier does not exist.
    ///
    /// ## When This Occurs
    /// - Editing a row that was already removed
    /// - Removing the same row twice
    #[error("Line item not found: {0}")]
    LineItemNotFound(LineItemId),

    /// The invoice view cannot perform the requested action in its current state.
    ///
    /// ## When This Occurs
    /// - Pressing "generate" while a generation is already running
    /// - Sending via WhatsApp from the details view
    /// - Opening the preview before any PDF exists
    #[error("Cannot {action} while {state}")]
    InvalidTransition { state: String, action: &'static str },

    /// Unknown form field name in a raw edit.
    #[error("Unknown line item field: {0}")]
    UnknownField(String),

    /// Validation error (wraps ValidationErrors).
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
}

// =============================================================================
// Validation Error
// =============================================================================

/// A single failed input rule.
///
/// The `Display` text is the human-readable reason shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Two fields that must agree do not.
    #[error("{field} does not match {other}")]
    Mismatch { field: String, other: String },

    /// A checkbox-style confirmation was not given.
    #[error("{field} must be accepted")]
    NotAccepted { field: String },

    /// No line item passes the submission rules.
    #[error("at least one item with a description, quantity and unit price is required")]
    NoSubmittableItems,
}

impl ValidationError {
    pub(crate) fn required(field: &str) -> Self {
        ValidationError::Required {
            field: field.to_string(),
        }
    }
}

// =============================================================================
// Validation Errors (list)
// =============================================================================

/// Every reason a form was rejected, in the order the checks ran.
///
/// Never empty: a form with no failures validates to `Ok`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    /// Wraps a list of failures, returning `None` when the list is empty.
    pub fn from_vec(errors: Vec<ValidationError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(ValidationErrors(errors))
        }
    }

    /// The individual failures.
    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    /// Human-readable reasons, one per failure.
    pub fn reasons(&self) -> Vec<String> {
        self.0.iter().map(ToString::to_string).collect()
    }

    pub fn contains(&self, error: &ValidationError) -> bool {
        self.0.contains(error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reasons().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationError> for ValidationErrors {
    fn from(err: ValidationError) -> Self {
        ValidationErrors(vec![err])
    }
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
