//! # Invoice Draft
//!
//! In-memory form state for one invoice.
//!
//! ## Draft Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  Form Action              Draft Method            Row Change            │
//! │  ───────────              ────────────            ──────────            │
//! │                                                                         │
//! │  Click "Add item" ───────► add_item() ──────────► rows.push(default)    │
//! │                                                                         │
//! │  Type into a cell ───────► update_item() ───────► rows[id].field = v    │
//! │                                                                         │
//! │  Click remove ───────────► remove_item() ───────► rows.remove(id)       │
//! │                                                                         │
//! │  Summary panel ──────────► totals() ────────────► (read only)           │
//! │                                                                         │
//! │  Click "Generate" ───────► prepare_submission() ► (read only)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Rows keep their insertion order. Row ids are local and never sent.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::submission::InvoiceSubmission;
use crate::totals::{compute_totals_iter, Totals};
use crate::types::{Customer, InvoiceMetadata, LineItem, LineItemId};
use crate::validation::ValidationResult;

/// A line item plus its local row id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftRow {
    pub id: LineItemId,

    #[serde(flatten)]
    pub item: LineItem,
}

/// A single edit to one field of a row.
#[derive(Debug, Clone, PartialEq)]
pub enum LineItemEdit {
    Description(String),
    Quantity(f64),
    UnitPrice(f64),
    Tax(f64),
    Discount(f64),
}

impl LineItemEdit {
    /// Parses a raw `(field, text)` pair from the form.
    ///
    /// Field names are the wire names (`description`, `quantity`,
    /// `unitPrice`, `tax`, `discount`). Numeric text that does not parse
    /// becomes `0`.
    ///
    /// ## Example
    /// ```rust
    /// use invoiceflow_core::draft::LineItemEdit;
    ///
    /// assert_eq!(LineItemEdit::from_form("quantity", "3").unwrap(), LineItemEdit::Quantity(3.0));
    /// assert_eq!(LineItemEdit::from_form("tax", "abc").unwrap(), LineItemEdit::Tax(0.0));
    /// assert!(LineItemEdit::from_form("colour", "red").is_err());
    /// ```
    pub fn from_form(field: &str, raw: &str) -> CoreResult<Self> {
        let edit = match field {
            "description" => LineItemEdit::Description(raw.to_string()),
            "quantity" => LineItemEdit::Quantity(parse_lenient(raw)),
            "unitPrice" => LineItemEdit::UnitPrice(parse_lenient(raw)),
            "tax" => LineItemEdit::Tax(parse_lenient(raw)),
            "discount" => LineItemEdit::Discount(parse_lenient(raw)),
            other => return Err(CoreError::UnknownField(other.to_string())),
        };
        Ok(edit)
    }

    fn apply(self, item: &mut LineItem) {
        match self {
            LineItemEdit::Description(value) => item.description = value,
            LineItemEdit::Quantity(value) => item.quantity = value,
            LineItemEdit::UnitPrice(value) => item.unit_price = value,
            LineItemEdit::Tax(value) => item.tax_percent = value,
            LineItemEdit::Discount(value) => item.discount_percent = value,
        }
    }
}

fn parse_lenient(raw: &str) -> f64 {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .unwrap_or(0.0)
}

/// The invoice being edited.
///
/// A fresh draft has one empty row, a generated invoice number and default
/// payment terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDraft {
    pub customer: Customer,
    pub metadata: InvoiceMetadata,
    rows: Vec<DraftRow>,
}

impl InvoiceDraft {
    pub fn new() -> Self {
        Self::with_metadata(InvoiceMetadata::new())
    }

    /// A draft with caller-provided metadata and one empty row.
    pub fn with_metadata(metadata: InvoiceMetadata) -> Self {
        let mut draft = InvoiceDraft {
            customer: Customer::default(),
            metadata,
            rows: Vec::new(),
        };
        draft.add_item();
        draft
    }

    /// Builds a draft from already-known rows, e.g. loaded from a file.
    pub fn from_parts(
        customer: Customer,
        metadata: InvoiceMetadata,
        items: impl IntoIterator<Item = LineItem>,
    ) -> Self {
        let rows = items
            .into_iter()
            .map(|item| DraftRow {
                id: LineItemId::new(),
                item,
            })
            .collect();

        InvoiceDraft {
            customer,
            metadata,
            rows,
        }
    }

    /// Appends a default row (qty 1, price 0) and returns its id.
    pub fn add_item(&mut self) -> LineItemId {
        let id = LineItemId::new();
        self.rows.push(DraftRow {
            id,
            item: LineItem::default(),
        });
        id
    }

    /// Applies one field edit to the row `id`.
    pub fn update_item(&mut self, id: LineItemId, edit: LineItemEdit) -> CoreResult<()> {
        let row = self
            .rows
            .iter_mut()
            .find(|row| row.id == id)
            .ok_or(CoreError::LineItemNotFound(id))?;

        edit.apply(&mut row.item);
        Ok(())
    }

    /// [`update_item`](Self::update_item) with a raw form pair.
    pub fn update_item_from_form(
        &mut self,
        id: LineItemId,
        field: &str,
        raw: &str,
    ) -> CoreResult<()> {
        let edit = LineItemEdit::from_form(field, raw)?;
        self.update_item(id, edit)
    }

    pub fn remove_item(&mut self, id: LineItemId) -> CoreResult<LineItem> {
        let index = self
            .rows
            .iter()
            .position(|row| row.id == id)
            .ok_or(CoreError::LineItemNotFound(id))?;

        Ok(self.rows.remove(index).item)
    }

    pub fn get_item(&self, id: LineItemId) -> Option<&LineItem> {
        self.rows.iter().find(|row| row.id == id).map(|row| &row.item)
    }

    pub fn rows(&self) -> &[DraftRow] {
        &self.rows
    }

    /// Every row's item, in order.
    pub fn items(&self) -> Vec<LineItem> {
        self.rows.iter().map(|row| row.item.clone()).collect()
    }

    pub fn item_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Live totals over every row, as shown while editing.
    pub fn totals(&self) -> Totals {
        compute_totals_iter(self.rows.iter().map(|row| &row.item))
    }

    /// Validates the draft and builds the request body.
    pub fn prepare_submission(&self) -> ValidationResult<InvoiceSubmission> {
        InvoiceSubmission::prepare(&self.customer, &self.metadata, &self.items())
    }
}

impl Default for InvoiceDraft {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use chrono::NaiveDate;

    #[test]
    fn test_new_draft_has_one_empty_row() {
        let draft = InvoiceDraft::new();

        assert_eq!(draft.item_count(), 1);
        assert_eq!(draft.rows()[0].item, LineItem::default());
        assert_eq!(draft.metadata.payment_terms, "Net 7 days");
        assert_eq!(draft.totals(), Totals::zero());
    }

    #[test]
    fn test_add_and_update_item() {
        let mut draft = InvoiceDraft::new();
        let id = draft.add_item();

        draft
            .update_item(id, LineItemEdit::Description("Design".to_string()))
            .unwrap();
        draft.update_item_from_form(id, "quantity", "2").unwrap();
        draft.update_item_from_form(id, "unitPrice", "10").unwrap();
        draft.update_item_from_form(id, "tax", "10").unwrap();
        draft.update_item_from_form(id, "discount", "5").unwrap();

        let item = draft.get_item(id).unwrap();
        assert_eq!(item.description, "Design");
        assert_eq!(draft.totals().grand_total, 21.0);
    }

    #[test]
    fn test_unparseable_number_becomes_zero() {
        let mut draft = InvoiceDraft::new();
        let id = draft.rows()[0].id;

        draft.update_item_from_form(id, "quantity", "two").unwrap();
        assert_eq!(draft.get_item(id).unwrap().quantity, 0.0);

        draft.update_item_from_form(id, "unitPrice", "").unwrap();
        assert_eq!(draft.get_item(id).unwrap().unit_price, 0.0);

        draft.update_item_from_form(id, "tax", "NaN").unwrap();
        assert_eq!(draft.get_item(id).unwrap().tax_percent, 0.0);
    }

    #[test]
    fn test_unknown_field_is_rejected() {
        let mut draft = InvoiceDraft::new();
        let id = draft.rows()[0].id;

        let err = draft.update_item_from_form(id, "colour", "red").unwrap_err();
        assert!(matches!(err, CoreError::UnknownField(ref f) if f == "colour"));
    }

    #[test]
    fn test_remove_item() {
        let mut draft = InvoiceDraft::new();
        let first = draft.rows()[0].id;
        let second = draft.add_item();

        draft.remove_item(first).unwrap();
        assert_eq!(draft.item_count(), 1);
        assert_eq!(draft.rows()[0].id, second);

        let err = draft.remove_item(first).unwrap_err();
        assert!(matches!(err, CoreError::LineItemNotFound(id) if id == first));
    }

    #[test]
    fn test_update_unknown_row() {
        let mut draft = InvoiceDraft::new();
        let stranger = LineItemId::new();

        assert!(draft.update_item(stranger, LineItemEdit::Quantity(2.0)).is_err());
    }

    #[test]
    fn test_totals_include_unsubmittable_rows() {
        let mut draft = InvoiceDraft::from_parts(
            Customer::new("A", "1"),
            InvoiceMetadata::new(),
            vec![
                LineItem::new("Widget", 1.0, 10.0),
                LineItem::new("", 1.0, 5.0),
            ],
        );
        draft.metadata.due_date = NaiveDate::from_ymd_opt(2025, 1, 1);

        assert_eq!(draft.totals().subtotal, 15.0);

        let submission = draft.prepare_submission().unwrap();
        assert_eq!(submission.items.len(), 1);
        assert_eq!(submission.totals, draft.totals());
    }

    #[test]
    fn test_prepare_submission_reports_errors() {
        let draft = InvoiceDraft::new();
        let errors = draft.prepare_submission().unwrap_err();

        assert!(errors.contains(&ValidationError::NoSubmittableItems));
        assert!(errors.contains(&ValidationError::required("due date")));
    }
}
