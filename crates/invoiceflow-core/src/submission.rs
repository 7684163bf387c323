//! # Invoice Submission
//!
//! The request body sent to `POST /api/invoices`, built only from input that
//! passed validation.
//!
//! ## Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  {                                                                      │
//! │    "customer": { name, phone, email, address },                         │
//! │    "metadata": { invoiceNo, issueDate, dueDate, paymentTerms },         │
//! │    "items":    [ submittable rows only, in form order ],                │
//! │    "totals":   { subtotal, totalTax, totalDiscount, grandTotal }        │
//! │  }                                                                      │
//! │                                                                         │
//! │  totals cover every row on the form, the same figures the user saw,    │
//! │  even when some rows are not sent.                                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::CurrencyFormat;
use crate::totals::{compute_totals, Totals};
use crate::types::{Customer, InvoiceMetadata, InvoiceNumber, LineItem};
use crate::validation::{submittable_items, validate_invoice, ValidationResult};

/// A validated invoice, ready to be posted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InvoiceSubmission {
    pub customer: Customer,
    pub metadata: InvoiceMetadata,
    pub items: Vec<LineItem>,
    pub totals: Totals,
}

impl InvoiceSubmission {
    /// Validates the form and builds the request body.
    ///
    /// ## Errors
    /// Every failed rule, see [`validate_invoice`].
    pub fn prepare(
        customer: &Customer,
        metadata: &InvoiceMetadata,
        items: &[LineItem],
    ) -> ValidationResult<Self> {
        validate_invoice(customer, metadata, items)?;

        Ok(InvoiceSubmission {
            customer: customer.clone(),
            metadata: metadata.clone(),
            items: submittable_items(items),
            totals: compute_totals(items),
        })
    }

    pub fn invoice_number(&self) -> &InvoiceNumber {
        &self.metadata.invoice_number
    }

    /// Message body that accompanies the PDF on WhatsApp.
    ///
    /// ```text
    /// Invoice INV-2025-1234 for ₹21.00 is ready. Due: 2025-01-01.
    /// ```
    pub fn whatsapp_caption(&self, currency: &CurrencyFormat) -> String {
        let due = self
            .metadata
            .due_date
            .map(|date| date.to_string())
            .unwrap_or_default();

        format!(
            "Invoice {} for {} is ready. Due: {}.",
            self.metadata.invoice_number,
            currency.format(self.totals.grand_total),
            due
        )
    }
}

/// File name for a downloaded invoice PDF.
pub fn pdf_file_name(number: &InvoiceNumber) -> String {
    format!("invoice-{}.pdf", number)
}

// =============================================================================
// Unit Tests
// =============================================================================
