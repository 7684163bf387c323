//! # Totals Engine
//!
//! Derives invoice totals from line items.
//!
//! ## Calculation
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  For every LineItem:                                                    │
//! │                                                                         │
//! │    line_total    = quantity × unit_price                                │
//! │    line_tax      = line_total × tax_percent / 100                       │
//! │    line_discount = line_total × discount_percent / 100                  │
//! │                                                                         │
//! │  Over all items:                                                        │
//! │                                                                         │
//! │    subtotal       = Σ line_total                                        │
//! │    total_tax      = Σ line_tax                                          │
//! │    total_discount = Σ line_discount                                     │
//! │    grand_total    = subtotal + total_tax − total_discount               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Totals are never stored; they are recomputed from the items on every
//! read. Nothing is rounded here, see [`crate::money`].
//!
//! ## Example
//! ```rust
//! use invoiceflow_core::{compute_totals, LineItem};
//!
//! let items = vec![LineItem::new("Design", 2.0, 10.0).with_tax(10.0).with_discount(5.0)];
//! let totals = compute_totals(&items);
//!
//! assert_eq!(totals.subtotal, 20.0);
//! assert_eq!(totals.grand_total, 21.0);
//! ```

use std::iter::Sum;
use std::ops::Add;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{round_to_cents, CurrencyFormat};
use crate::types::LineItem;

/// Derived invoice totals.
///
/// ## Invariant
/// `grand_total == subtotal + total_tax - total_discount`
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub subtotal: f64,
    pub total_tax: f64,
    pub total_discount: f64,
    pub grand_total: f64,
}

impl Totals {
    pub const fn zero() -> Self {
        Totals {
            subtotal: 0.0,
            total_tax: 0.0,
            total_discount: 0.0,
            grand_total: 0.0,
        }
    }

    /// Builds totals from the three sums, deriving the grand total.
    pub fn from_sums(subtotal: f64, total_tax: f64, total_discount: f64) -> Self {
        Totals {
            subtotal,
            total_tax,
            total_discount,
            grand_total: subtotal + total_tax - total_discount,
        }
    }

    /// Copy with every field rounded to cents, for display only.
    pub fn rounded(&self) -> Self {
        Totals {
            subtotal: round_to_cents(self.subtotal),
            total_tax: round_to_cents(self.total_tax),
            total_discount: round_to_cents(self.total_discount),
            grand_total: round_to_cents(self.grand_total),
        }
    }

    /// Display lines in the order the invoice summary shows them.
    pub fn summary_lines(&self, currency: &CurrencyFormat) -> Vec<(&'static str, String)> {
        vec![
            ("Subtotal", currency.format(self.subtotal)),
            ("Tax", currency.format(self.total_tax)),
            ("Discount", format!("-{}", currency.format(self.total_discount))),
            ("Grand Total", currency.format(self.grand_total)),
        ]
    }
}

/// Field-wise addition.
impl Add for Totals {
    type Output = Totals;

    fn add(self, other: Totals) -> Totals {
        Totals::from_sums(
            self.subtotal + other.subtotal,
            self.total_tax + other.total_tax,
            self.total_discount + other.total_discount,
        )
    }
}

impl Sum for Totals {
    fn sum<I: Iterator<Item = Totals>>(iter: I) -> Totals {
        iter.fold(Totals::zero(), Add::add)
    }
}

/// Computes totals over `items`.
///
/// Zero items give all-zero totals. Negative inputs are summed as given.
pub fn compute_totals(items: &[LineItem]) -> Totals {
    compute_totals_iter(items)
}

/// [`compute_totals`] over any iterator of item references.
pub fn compute_totals_iter<'a, I>(items: I) -> Totals
where
    I: IntoIterator<Item = &'a LineItem>,
{
    let (subtotal, total_tax, total_discount) =
        items
            .into_iter()
            .fold((0.0, 0.0, 0.0), |(subtotal, tax, discount), item| {
                (
                    subtotal + item.line_total(),
                    tax + item.line_tax(),
                    discount + item.line_discount(),
                )
            });

    Totals::from_sums(subtotal, total_tax, total_discount)
}

// =============================================================================
// Unit Tests
// =============================================================================
