//! # Domain Types
//!
//! Core domain types used throughout InvoiceFlow.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐        │
//! │  │    Customer     │   │ InvoiceMetadata │   │    LineItem     │        │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │        │
//! │  │  name           │   │  invoice_number │   │  description    │        │
//! │  │  phone          │   │  issue_date     │   │  quantity       │        │
//! │  │  email?         │   │  due_date?      │   │  unit_price     │        │
//! │  │  address?       │   │  payment_terms  │   │  tax_percent    │        │
//! │  └─────────────────┘   └─────────────────┘   │  discount_pct   │        │
//! │                                              └─────────────────┘        │
//! │  ┌─────────────────┐   ┌─────────────────┐                              │
//! │  │   LoginForm     │   │RegistrationForm │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! All types serialize in camelCase, matching the invoice backend. Line item
//! percentages travel as `tax` and `discount`.

use std::fmt;

use chrono::{Datelike, Local, NaiveDate};
use rand::Rng;
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::money::percent_of;
use crate::DEFAULT_PAYMENT_TERMS;

// =============================================================================
// Line Item
// =============================================================================

/// One billable row of an invoice.
///
/// Amounts are plain `f64`; see [`crate::money`] for where rounding happens.
/// Negative values are not rejected here, validation runs upstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,

    /// Tax as a percentage of the line total (18.0 = 18%).
    #[serde(rename = "tax", default)]
    pub tax_percent: f64,

    /// Discount as a percentage of the line total.
    #[serde(rename = "discount", default)]
    pub discount_percent: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        LineItem {
            description: description.into(),
            quantity,
            unit_price,
            tax_percent: 0.0,
            discount_percent: 0.0,
        }
    }

    pub fn with_tax(mut self, percent: f64) -> Self {
        self.tax_percent = percent;
        self
    }

    pub fn with_discount(mut self, percent: f64) -> Self {
        self.discount_percent = percent;
        self
    }

    /// quantity × unit price.
    #[inline]
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }

    #[inline]
    pub fn line_tax(&self) -> f64 {
        percent_of(self.line_total(), self.tax_percent)
    }

    #[inline]
    pub fn line_discount(&self) -> f64 {
        percent_of(self.line_total(), self.discount_percent)
    }

    /// Whether this row is sent to the backend.
    ///
    /// Rows with an empty description, zero quantity or zero price are
    /// dropped from the submission without being reported.
    pub fn is_submittable(&self) -> bool {
        !self.description.trim().is_empty() && self.quantity > 0.0 && self.unit_price > 0.0
    }
}

impl Default for LineItem {
    /// A fresh form row: one unit, no price yet.
    fn default() -> Self {
        LineItem::new("", 1.0, 0.0)
    }
}

/// Locally assigned identifier of a draft row.
///
/// Never sent to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItemId(#[ts(as = "String")] Uuid);

impl LineItemId {
    pub fn new() -> Self {
        LineItemId(Uuid::new_v4())
    }
}

impl Default for LineItemId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for LineItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

// =============================================================================
// Customer
// =============================================================================

/// Who the invoice is addressed to.
///
/// `email` and `address` are optional; absent values are empty strings so
/// they go over the wire as `""`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub name: String,

    /// WhatsApp number including country code (e.g. `+91...`).
    pub phone: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub address: String,
}

impl Customer {
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Customer {
            name: name.into(),
            phone: phone.into(),
            ..Default::default()
        }
    }

    pub fn email(&self) -> Option<&str> {
        non_blank(&self.email)
    }
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

// =============================================================================
// Invoice Number
// =============================================================================

/// Human-facing invoice number, `INV-<year>-<NNNN>`.
///
/// Generated once per draft; there is no setter.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(transparent)]
pub struct InvoiceNumber(String);

impl InvoiceNumber {
    /// Generates a number for the current local year.
    pub fn generate() -> Self {
        Self::generate_with(&mut rand::thread_rng(), Local::now().year())
    }

    /// Generates a number for `year` with a suffix in `1000..=9999`.
    pub fn generate_with<R: Rng + ?Sized>(rng: &mut R, year: i32) -> Self {
        let suffix: u16 = rng.gen_range(1000..=9999);
        InvoiceNumber(format!("INV-{}-{}", year, suffix))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvoiceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Invoice Metadata
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceMetadata {
    #[serde(rename = "invoiceNo")]
    pub invoice_number: InvoiceNumber,

    #[ts(as = "String")]
    pub issue_date: NaiveDate,

    /// Required before submission; empty on a new draft.
    #[ts(as = "Option<String>")]
    pub due_date: Option<NaiveDate>,

    pub payment_terms: String,
}

impl InvoiceMetadata {
    /// Metadata for a new draft: fresh number, issued today, net 7 days.
    pub fn new() -> Self {
        InvoiceMetadata {
            invoice_number: InvoiceNumber::generate(),
            issue_date: Local::now().date_naive(),
            due_date: None,
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
        }
    }

    /// Same as [`InvoiceMetadata::new`] with a caller-chosen number and issue date.
    pub fn with_number(invoice_number: InvoiceNumber, issue_date: NaiveDate) -> Self {
        InvoiceMetadata {
            invoice_number,
            issue_date,
            due_date: None,
            payment_terms: DEFAULT_PAYMENT_TERMS.to_string(),
        }
    }
}

impl Default for InvoiceMetadata {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Authentication Forms
// =============================================================================

/// Login form as submitted to `POST /api/auth/login`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Signup form.
///
/// `agree_to_terms` is checked locally and never sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
    #[serde(skip_serializing, default)]
    pub agree_to_terms: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================
