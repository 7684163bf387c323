//! # CLI Commands
//!
//! One function per subcommand. Each takes the shared [`AppContext`] and
//! prints its result to stdout.
//!
//! ## Command Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  auth.rs        login, signup, logout, whoami                           │
//! │  invoice.rs     totals (offline), generate [--send] [--download]        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod invoice;

use crate::error::AppResult;
use crate::{AppContext, Command};

pub async fn dispatch(ctx: &AppContext, command: Command) -> AppResult<()> {
    match command {
        Command::Login(args) => auth::login(ctx, args).await,
        Command::Signup(args) => auth::signup(ctx, args).await,
        Command::Logout => auth::logout(ctx).await,
        Command::Whoami => auth::whoami(ctx).await,
        Command::Totals { file } => invoice::totals(&ctx.config, &file),
        Command::Generate(args) => invoice::generate(ctx, args).await,
    }
}
