//! # Invoice Files
//!
//! The CLI reads a draft invoice from a TOML file.
//!
//! ## Format
//! ```toml
//! [customer]
//! name = "Asha Traders"
//! phone = "+919800000000"
//! email = "accounts@asha.example"   # optional
//! address = "12 MG Road, Pune"      # optional
//!
//! [metadata]
//! issue_date = "2025-01-01"         # optional, defaults to today
//! due_date = "2025-01-08"
//! payment_terms = "Net 7 days"      # optional
//!
//! [[items]]
//! description = "Design"
//! quantity = 2
//! unit_price = 10.0
//! tax = 10.0                        # percent, optional
//! discount = 5.0                    # percent, optional
//! ```
//!
//! Dates are quoted `YYYY-MM-DD` strings. The invoice number is always
//! generated.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use invoiceflow_core::{Customer, InvoiceDraft, InvoiceMetadata, LineItem};

#[derive(Debug, Error)]
pub enum InvoiceFileError {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid invoice file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{field} must be a date like 2025-01-31, got '{value}'")]
    InvalidDate { field: &'static str, value: String },
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct InvoiceFile {
    customer: CustomerSection,
    #[serde(default)]
    metadata: MetadataSection,
    #[serde(default)]
    items: Vec<ItemSection>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CustomerSection {
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    address: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct MetadataSection {
    issue_date: Option<String>,
    due_date: Option<String>,
    payment_terms: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ItemSection {
    #[serde(default)]
    description: String,
    #[serde(default = "one")]
    quantity: f64,
    #[serde(default)]
    unit_price: f64,
    #[serde(default)]
    tax: f64,
    #[serde(default)]
    discount: f64,
}

fn one() -> f64 {
    1.0
}

/// Reads and parses an invoice file into a draft.
pub fn load(path: &Path) -> Result<InvoiceDraft, InvoiceFileError> {
    let raw = std::fs::read_to_string(path).map_err(|source| InvoiceFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&raw)
}

/// Parses invoice file contents into a draft.
///
/// Missing values are left empty for validation to report; only malformed
/// dates fail here.
pub fn parse(raw: &str) -> Result<InvoiceDraft, InvoiceFileError> {
    let file: InvoiceFile = toml::from_str(raw)?;

    let customer = Customer {
        name: file.customer.name,
        phone: file.customer.phone,
        email: file.customer.email,
        address: file.customer.address,
    };

    let mut metadata = InvoiceMetadata::new();
    if let Some(issue) = parse_date("issue_date", file.metadata.issue_date)? {
        metadata.issue_date = issue;
    }
    metadata.due_date = parse_date("due_date", file.metadata.due_date)?;
    if let Some(terms) = file.metadata.payment_terms {
        metadata.payment_terms = terms;
    }

    let items = file.items.into_iter().map(|item| {
        LineItem::new(item.description, item.quantity, item.unit_price)
            .with_tax(item.tax)
            .with_discount(item.discount)
    });

    Ok(InvoiceDraft::from_parts(customer, metadata, items))
}

fn parse_date(
    field: &'static str,
    value: Option<String>,
) -> Result<Option<NaiveDate>, InvoiceFileError> {
    let Some(value) = value else {
        return Ok(None);
    };
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| InvoiceFileError::InvalidDate { field, value })
}
