//! # Validation Module
//!
//! Input validation for invoices and authentication forms.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Form input                                                    │
//! │  └── Numeric fields parse leniently (garbage → 0)                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE (before any request is sent)                      │
//! │  ├── Required fields (customer, metadata, auth forms)                   │
//! │  ├── At least one submittable line item                                 │
//! │  └── Every failed rule is collected, not just the first                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Invoice backend                                               │
//! │  └── Whatever the server enforces                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use chrono::NaiveDate;
//! use invoiceflow_core::validation::validate_invoice;
//! use invoiceflow_core::{Customer, InvoiceMetadata, LineItem};
//!
//! let customer = Customer::new("A", "1");
//! let mut metadata = InvoiceMetadata::new();
//! metadata.due_date = NaiveDate::from_ymd_opt(2025, 1, 1);
//! metadata.payment_terms = "Net 7".to_string();
//! let items = vec![LineItem::new("X", 1.0, 5.0)];
//!
//! assert!(validate_invoice(&customer, &metadata, &items).is_ok());
//! ```

use crate::error::{ValidationError, ValidationErrors};
use crate::types::{Customer, InvoiceMetadata, LineItem, LoginForm, RegistrationForm};

/// Result of a single-field rule.
pub type FieldResult = Result<(), ValidationError>;

/// Result of validating a whole form.
pub type ValidationResult<T> = Result<T, ValidationErrors>;

// =============================================================================
// Field Validators
// =============================================================================

/// Fails when `value` is empty after trimming.
///
/// ## Example
/// ```rust
/// use invoiceflow_core::validation::validate_required;
///
/// assert!(validate_required("customer name", "Asha").is_ok());
/// assert!(validate_required("customer name", "   ").is_err());
/// ```
pub fn validate_required(field: &str, value: &str) -> FieldResult {
    if value.trim().is_empty() {
        return Err(ValidationError::required(field));
    }
    Ok(())
}

/// Loose email shape check: `local@domain.tld`, no spaces.
///
/// ## Rules
/// - Must be present
/// - Exactly one `@` with text on both sides
/// - Domain contains a dot that is not its first or last character
pub fn validate_email(field: &str, value: &str) -> FieldResult {
    validate_required(field, value)?;

    let value = value.trim();
    let invalid = || ValidationError::InvalidFormat {
        field: field.to_string(),
        reason: "must be an email address".to_string(),
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid());
    }

    let (local, domain) = value.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }

    match domain.find('.') {
        Some(dot) if dot > 0 && !domain.ends_with('.') => Ok(()),
        _ => Err(invalid()),
    }
}

// =============================================================================
// Line Items
// =============================================================================

/// The rows that will be sent, in insertion order.
///
/// Rows failing [`LineItem::is_submittable`] are dropped silently.
pub fn submittable_items<'a, I>(items: I) -> Vec<LineItem>
where
    I: IntoIterator<Item = &'a LineItem>,
{
    items
        .into_iter()
        .filter(|item| item.is_submittable())
        .cloned()
        .collect()
}

// =============================================================================
// Invoice
// =============================================================================

/// Validates everything needed before an invoice may be submitted.
///
/// ## Rules
/// - customer name and phone present
/// - due date present, payment terms present
/// - at least one submittable line item
///
/// Individual bad rows are not reported; only the absence of any good row is.
pub fn validate_invoice(
    customer: &Customer,
    metadata: &InvoiceMetadata,
    items: &[LineItem],
) -> ValidationResult<()> {
    let mut errors = Vec::new();

    errors.extend(validate_required("customer name", &customer.name).err());
    errors.extend(validate_required("customer phone", &customer.phone).err());

    if metadata.due_date.is_none() {
        errors.push(ValidationError::required("due date"));
    }
    errors.extend(validate_required("payment terms", &metadata.payment_terms).err());

    if !items.iter().any(LineItem::is_submittable) {
        errors.push(ValidationError::NoSubmittableItems);
    }

    into_result(errors)
}

// =============================================================================
// Authentication Forms
// =============================================================================

/// Login needs both fields.
pub fn validate_login(form: &LoginForm) -> ValidationResult<()> {
    let mut errors = Vec::new();

    errors.extend(validate_required("email", &form.email).err());
    errors.extend(validate_required("password", &form.password).err());

    into_result(errors)
}

/// Signup checks that run before the form is sent.
///
/// ## Rules
/// - username, email, password present
/// - email looks like an address
/// - confirmation matches password
/// - terms accepted
pub fn validate_registration(form: &RegistrationForm) -> ValidationResult<()> {
    let mut errors = Vec::new();

    errors.extend(validate_required("username", &form.username).err());
    errors.extend(validate_email("email", &form.email).err());
    errors.extend(validate_required("password", &form.password).err());

    if form.password != form.confirm_password {
        errors.push(ValidationError::Mismatch {
            field: "confirm password".to_string(),
            other: "password".to_string(),
        });
    }

    if !form.agree_to_terms {
        errors.push(ValidationError::NotAccepted {
            field: "terms of service and privacy policy".to_string(),
        });
    }

    into_result(errors)
}

fn into_result(errors: Vec<ValidationError>) -> ValidationResult<()> {
    match ValidationErrors::from_vec(errors) {
        Some(errors) => Err(errors),
        None => Ok(()),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn valid_metadata() -> InvoiceMetadata {
        let mut metadata = InvoiceMetadata::new();
        metadata.due_date = NaiveDate::from_ymd_opt(2025, 1, 1);
        metadata.payment_terms = "Net 7".to_string();
        metadata
    }

    fn valid_items() -> Vec<LineItem> {
        vec![LineItem::new("X", 1.0, 5.0)]
    }

    #[test]
    fn test_minimal_valid_invoice() {
        let customer = Customer::new("A", "1");
        assert!(validate_invoice(&customer, &valid_metadata(), &valid_items()).is_ok());
    }

    #[test]
    fn test_rejects_empty_customer_name() {
        let customer = Customer::new("", "1");
        let errors = validate_invoice(&customer, &valid_metadata(), &valid_items()).unwrap_err();

        assert_eq!(errors.errors(), &[ValidationError::required("customer name")]);
    }

    #[test]
    fn test_rejects_missing_phone() {
        let customer = Customer::new("A", " ");
        let errors = validate_invoice(&customer, &valid_metadata(), &valid_items()).unwrap_err();

        assert!(errors.contains(&ValidationError::required("customer phone")));
    }

    #[test]
    fn test_rejects_missing_due_date() {
        let mut metadata = valid_metadata();
        metadata.due_date = None;
        let errors =
            validate_invoice(&Customer::new("A", "1"), &metadata, &valid_items()).unwrap_err();

        assert_eq!(errors.errors(), &[ValidationError::required("due date")]);
    }

    #[test]
    fn test_rejects_empty_payment_terms() {
        let mut metadata = valid_metadata();
        metadata.payment_terms.clear();
        let errors =
            validate_invoice(&Customer::new("A", "1"), &metadata, &valid_items()).unwrap_err();

        assert!(errors.contains(&ValidationError::required("payment terms")));
    }

    #[test]
    fn test_rejects_when_no_item_has_quantity_and_price() {
        let items = vec![
            LineItem::new("zero qty", 0.0, 5.0),
            LineItem::new("zero price", 1.0, 0.0),
            LineItem::new("", 1.0, 5.0),
        ];
        let errors =
            validate_invoice(&Customer::new("A", "1"), &valid_metadata(), &items).unwrap_err();

        assert_eq!(errors.errors(), &[ValidationError::NoSubmittableItems]);
    }

    #[test]
    fn test_reports_every_failure() {
        let mut metadata = valid_metadata();
        metadata.due_date = None;
        let errors = validate_invoice(&Customer::default(), &metadata, &[]).unwrap_err();

        assert_eq!(errors.len(), 4);
        assert_eq!(
            errors.reasons(),
            vec![
                "customer name is required",
                "customer phone is required",
                "due date is required",
                "at least one item with a description, quantity and unit price is required",
            ]
        );
    }

    #[test]
    fn test_invalid_rows_do_not_block_when_one_is_valid() {
        let items = vec![
            LineItem::new("free sample", 3.0, 0.0),
            LineItem::new("Widget", 2.0, 10.0),
            LineItem::new("nothing", 0.0, 99.0),
        ];

        assert!(validate_invoice(&Customer::new("A", "1"), &valid_metadata(), &items).is_ok());

        let sent = submittable_items(&items);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].description, "Widget");
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("email", "asha@example.com").is_ok());
        assert!(validate_email("email", "a.b+c@mail.example.in").is_ok());

        assert!(validate_email("email", "").is_err());
        assert!(validate_email("email", "asha").is_err());
        assert!(validate_email("email", "@example.com").is_err());
        assert!(validate_email("email", "asha@example").is_err());
        assert!(validate_email("email", "asha@.com").is_err());
        assert!(validate_email("email", "as ha@example.com").is_err());
        assert!(validate_email("email", "a@b@example.com").is_err());
    }

    #[test]
    fn test_validate_login() {
        let form = LoginForm {
            email: "asha@example.com".to_string(),
            password: String::new(),
        };
        let errors = validate_login(&form).unwrap_err();
        assert_eq!(errors.errors(), &[ValidationError::required("password")]);
    }

    #[test]
    fn test_validate_registration() {
        let mut form = RegistrationForm {
            username: "asha".to_string(),
            email: "asha@example.com".to_string(),
            password: "s3cret".to_string(),
            confirm_password: "s3cret".to_string(),
            agree_to_terms: true,
        };
        assert!(validate_registration(&form).is_ok());

        form.confirm_password = "other".to_string();
        form.agree_to_terms = false;
        let errors = validate_registration(&form).unwrap_err();

        assert_eq!(errors.len(), 2);
        assert!(matches!(errors.errors()[0], ValidationError::Mismatch { .. }));
        assert!(matches!(errors.errors()[1], ValidationError::NotAccepted { .. }));
    }
}
