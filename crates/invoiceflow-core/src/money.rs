//! # Money Module
//!
//! Presentation of monetary amounts.
//!
//! ## Where Rounding Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Amounts are f64 everywhere in the Totals Engine.                       │
//! │                                                                         │
//! │  LineItem ──► line total ──► Σ subtotal / tax / discount ──► grand total│
//! │     (no rounding anywhere on this path)                                 │
//! │                                                                         │
//! │  Only when a value is DISPLAYED (or put into a message for a human)     │
//! │  is it rounded to two decimal places:                                   │
//! │                                                                         │
//! │     20.0 + 1.125 ──► 21.125 ──► CurrencyFormat ──► "₹21.13"             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoiceflow_core::money::CurrencyFormat;
//!
//! let rupees = CurrencyFormat::default();
//! assert_eq!(rupees.format(1234.5), "₹1234.50");
//! assert_eq!(rupees.format(-0.125), "-₹0.13");
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Default currency symbol shown next to amounts.
pub const DEFAULT_CURRENCY_SYMBOL: &str = "₹";

/// Default number of decimal places for displayed amounts.
pub const DEFAULT_CURRENCY_DECIMALS: u8 = 2;

// =============================================================================
// Rounding
// =============================================================================

/// Rounds to `decimals` places, half away from zero.
///
/// ## Example
/// ```rust
/// use invoiceflow_core::money::round_to;
///
/// assert_eq!(round_to(2.675, 2), 2.68);
/// assert_eq!(round_to(0.125, 2), 0.13);
/// assert_eq!(round_to(-1.005, 0), -1.0);
/// ```
pub fn round_to(value: f64, decimals: u8) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    let scaled = value * factor;
    // Snap values like 267.49999999999997 (from 2.675 * 100) back onto the tie.
    let nudged = if (scaled - scaled.trunc()).abs() > 0.5 - 1e-9
        && (scaled - scaled.trunc()).abs() < 0.5 + 1e-9
    {
        scaled.trunc() + 0.5 * scaled.signum()
    } else {
        scaled
    };
    nudged.round() / factor
}

/// Rounds to whole cents for display.
#[inline]
pub fn round_to_cents(value: f64) -> f64 {
    round_to(value, DEFAULT_CURRENCY_DECIMALS)
}

/// Returns `percent`% of `amount`.
///
/// ```rust
/// use invoiceflow_core::money::percent_of;
///
/// assert_eq!(percent_of(20.0, 10.0), 2.0);
/// ```
#[inline]
pub fn percent_of(amount: f64, percent: f64) -> f64 {
    amount * percent / 100.0
}

// =============================================================================
// Currency Format
// =============================================================================

/// How amounts are rendered for people.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyFormat {
    /// Symbol placed before the amount.
    pub symbol: String,

    /// Number of decimal places.
    pub decimals: u8,
}

impl CurrencyFormat {
    pub fn new(symbol: impl Into<String>, decimals: u8) -> Self {
        CurrencyFormat {
            symbol: symbol.into(),
            decimals,
        }
    }

    /// Formats an amount, e.g. `₹21.00` or `-₹3.50`.
    ///
    /// Negative zero after rounding is printed without a sign.
    pub fn format(&self, amount: f64) -> String {
        let rounded = round_to(amount, self.decimals);
        let sign = if rounded < 0.0 { "-" } else { "" };
        format!(
            "{}{}{:.*}",
            sign,
            self.symbol,
            self.decimals as usize,
            rounded.abs()
        )
    }
}

impl Default for CurrencyFormat {
    fn default() -> Self {
        CurrencyFormat::new(DEFAULT_CURRENCY_SYMBOL, DEFAULT_CURRENCY_DECIMALS)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_positive() {
        let fmt = CurrencyFormat::default();
        assert_eq!(fmt.format(21.0), "₹21.00");
        assert_eq!(fmt.format(0.01), "₹0.01");
        assert_eq!(fmt.format(0.0), "₹0.00");
        assert_eq!(fmt.format(1234567.891), "₹1234567.89");
    }

    #[test]
    fn test_format_negative() {
        let fmt = CurrencyFormat::new("$", 2);
        assert_eq!(fmt.format(-12.345), "-$12.35");
        assert_eq!(fmt.format(-0.001), "$0.00");
    }

    #[test]
    fn test_format_without_decimals() {
        let fmt = CurrencyFormat::new("¥", 0);
        assert_eq!(fmt.format(1234.5), "¥1235");
    }

    #[test]
    fn test_round_half_away_from_zero() {
        assert_eq!(round_to_cents(1.125), 1.13);
        assert_eq!(round_to_cents(-1.125), -1.13);
        assert_eq!(round_to_cents(2.675), 2.68);
        assert_eq!(round_to_cents(0.1 + 0.2), 0.3);
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(20.0, 10.0), 2.0);
        assert_eq!(percent_of(20.0, 5.0), 1.0);
        assert_eq!(percent_of(0.0, 18.0), 0.0);
    }
}
