//! # invoiceflow-client: Backend Client for InvoiceFlow
//!
//! HTTP access to the invoice backend, the session that authorizes it, and
//! the generate → send → download workflow built on top.
//!
//! ## Module Organization
//! ```text
//! invoiceflow_client/
//! ├── lib.rs          ◄─── You are here (exports)
//! ├── config.rs       ◄─── ClientConfig (defaults + TOML + env)
//! ├── api.rs          ◄─── BackendClient, one method per endpoint
//! ├── contract.rs     ◄─── Response shape adapters
//! ├── session.rs      ◄─── Session + shared SessionContext
//! ├── token_store.rs  ◄─── Session persistence (file / memory)
//! ├── workflow.rs     ◄─── InvoiceWorkflow (draft + view state + calls)
//! └── error.rs        ◄─── ClientError, ConfigError
//! ```
//!
//! ## Example
//! ```rust,no_run
//! use std::sync::Arc;
//! use invoiceflow_client::{
//!     BackendClient, ClientConfig, FileTokenStore, InvoiceWorkflow, SessionContext,
//! };
//! use invoiceflow_core::InvoiceDraft;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::load(None)?;
//! let store = Arc::new(FileTokenStore::new(config.session_path()?));
//! let client = BackendClient::new(&config, SessionContext::with_store(store)?)?;
//!
//! let mut workflow = InvoiceWorkflow::new(client, InvoiceDraft::new(), config.currency());
//! // ... fill in the draft ...
//! let generated = workflow.generate().await?;
//! println!("PDF at {}", generated.pdf_url);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod config;
pub mod contract;
pub mod error;
pub mod session;
pub mod token_store;
pub mod workflow;

pub use api::{BackendClient, WhatsAppMessage};
pub use config::ClientConfig;
pub use contract::UserProfile;
pub use error::{ClientError, ClientResult, ConfigError};
pub use session::{Session, SessionContext};
pub use token_store::{FileTokenStore, MemoryTokenStore, TokenStore};
pub use workflow::{DownloadedPdf, GeneratedInvoice, InvoiceWorkflow};
