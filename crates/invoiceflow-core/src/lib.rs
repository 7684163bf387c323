//! # invoiceflow-core: Pure Invoice Logic for InvoiceFlow
//!
//! Everything InvoiceFlow knows about invoices that does not need a network:
//! the domain types, the totals engine, validation, the draft being edited
//! and the editor's view state.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       InvoiceFlow Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐    │
//! │  │                    invoiceflow CLI (apps/cli)                   │    │
//! │  │     login ──► totals ──► generate ──► send / download           │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │              invoiceflow-client (HTTP + session)                │    │
//! │  │     BackendClient, SessionContext, InvoiceWorkflow              │    │
//! │  └─────────────────────────────┬───────────────────────────────────┘    │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐    │
//! │  │             ★ invoiceflow-core (THIS CRATE) ★                   │    │
//! │  │                                                                 │    │
//! │  │   ┌──────────┐ ┌──────────┐ ┌────────────┐ ┌────────┐ ┌──────┐  │    │
//! │  │   │  types   │ │  totals  │ │ validation │ │ draft  │ │ view │  │    │
//! │  │   │ LineItem │ │  Totals  │ │   rules    │ │  rows  │ │ FSM  │  │    │
//! │  │   └──────────┘ └──────────┘ └────────────┘ └────────┘ └──────┘  │    │
//! │  │                                                                 │    │
//! │  │   NO I/O • NO NETWORK • NO CLOCK OUTSIDE DEFAULTS               │    │
//! │  └─────────────────────────────────────────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, Customer, InvoiceMetadata, forms)
//! - [`totals`] - Totals engine
//! - [`money`] - Rounding and currency display
//! - [`validation`] - Invoice and auth form rules
//! - [`submission`] - The validated request body
//! - [`draft`] - Editable invoice form state
//! - [`view`] - Details/preview state machine
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use invoiceflow_core::{compute_totals, LineItem};
//! use invoiceflow_core::money::CurrencyFormat;
//!
//! let items = vec![
//!     LineItem::new("Logo design", 1.0, 1500.0).with_tax(18.0),
//!     LineItem::new("Revisions", 2.0, 250.0).with_discount(10.0),
//! ];
//! let totals = compute_totals(&items);
//!
//! assert_eq!(CurrencyFormat::default().format(totals.grand_total), "₹2220.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod draft;
pub mod error;
pub mod money;
pub mod submission;
pub mod totals;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use draft::{InvoiceDraft, LineItemEdit};
pub use error::{CoreError, CoreResult, ValidationError, ValidationErrors};
pub use money::CurrencyFormat;
pub use submission::InvoiceSubmission;
pub use totals::{compute_totals, Totals};
pub use types::*;
pub use view::{DetailsMode, PreviewMode, ViewState};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Payment terms pre-filled on a new invoice.
pub const DEFAULT_PAYMENT_TERMS: &str = "Net 7 days";
