//! # InvoiceFlow CLI
//!
//! Terminal front end over `invoiceflow-core` and `invoiceflow-client`.
//!
//! ## Module Organization
//! ```text
//! invoiceflow_cli/
//! ├── lib.rs           ◄─── You are here (Cli, AppContext, run)
//! ├── error.rs         ◄─── AppError for every command
//! ├── invoice_file.rs  ◄─── TOML invoice file → InvoiceDraft
//! └── commands/
//!     ├── mod.rs       ◄─── Command dispatch
//!     ├── auth.rs      ◄─── login, signup, logout, whoami
//!     └── invoice.rs   ◄─── totals, generate
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap)                                              │
//! │  2. Initialize tracing (stderr, RUST_LOG)                               │
//! │  3. Load ClientConfig (defaults → invoiceflow.toml → INVOICEFLOW_*)     │
//! │  4. Open the file token store and restore any saved session             │
//! │     (skipped by `totals`, which never touches the network)              │
//! │  5. Run the command                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod error;
pub mod invoice_file;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use invoiceflow_client::{BackendClient, ClientConfig, FileTokenStore, SessionContext};

use crate::error::AppResult;

// =============================================================================
// Arguments
// =============================================================================

#[derive(Debug, Parser)]
#[command(name = "invoiceflow", version, about = "Create invoices and send them over WhatsApp")]
pub struct Cli {
    /// Config file (default: ./invoiceflow.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and save the session
    Login(LoginArgs),

    /// Create an account and save the session
    Signup(SignupArgs),

    /// Forget the saved session
    Logout,

    /// Show who is signed in
    Whoami,

    /// Print the totals of an invoice file without sending anything
    Totals {
        /// Invoice file (TOML)
        file: PathBuf,
    },

    /// Create the invoice, render its PDF and optionally send or download it
    Generate(GenerateArgs),
}

#[derive(Debug, Args)]
pub struct LoginArgs {
    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,
}

#[derive(Debug, Args)]
pub struct SignupArgs {
    #[arg(long)]
    pub username: String,

    #[arg(long)]
    pub email: String,

    #[arg(long)]
    pub password: String,

    #[arg(long)]
    pub confirm_password: String,

    /// Accept the terms of service and privacy policy
    #[arg(long)]
    pub agree_to_terms: bool,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Invoice file (TOML)
    pub file: PathBuf,

    /// Send the PDF to the customer's WhatsApp number
    #[arg(long)]
    pub send: bool,

    /// Save the PDF to this file or directory
    #[arg(long, value_name = "PATH")]
    pub download: Option<PathBuf>,
}

// =============================================================================
// Application Context
// =============================================================================

/// Configuration plus a client whose session is persisted to disk.
pub struct AppContext {
    pub config: ClientConfig,
    pub client: BackendClient,
}

impl AppContext {
    pub fn load(config_file: Option<&Path>) -> AppResult<Self> {
        let config = ClientConfig::load(config_file)?;
        Self::from_config(config)
    }

    pub fn from_config(config: ClientConfig) -> AppResult<Self> {
        let session_path = config.session_path()?;
        debug!(path = %session_path.display(), "Session file");

        let store = Arc::new(FileTokenStore::new(session_path));
        let session = SessionContext::with_store(store)?;
        let client = BackendClient::new(&config, session)?;

        Ok(AppContext { config, client })
    }
}

// =============================================================================
// Entry
// =============================================================================

/// Runs one CLI invocation.
///
/// Failures are returned, not logged; `main` prints them once.
pub async fn run(cli: Cli) -> AppResult<()> {
    init_tracing();
    execute(cli).await
}

async fn execute(cli: Cli) -> AppResult<()> {
    let config_file = cli.config.as_deref();

    match cli.command {
        // Offline: no session store is opened.
        Command::Totals { file } => {
            let config = ClientConfig::load(config_file)?;
            commands::invoice::totals(&config, &file)
        }
        command => {
            let ctx = AppContext::load(config_file)?;
            commands::dispatch(&ctx, command).await
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` overrides everything
/// - Default: `info,invoiceflow=debug`
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,invoiceflow=debug"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
