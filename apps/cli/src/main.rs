//! InvoiceFlow CLI entry point.
//!
//! All logic lives in the library crate (`invoiceflow_cli`).

use anyhow::Context;
use clap::Parser;
use invoiceflow_cli::Cli;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("failed to start async runtime")?;

    if let Err(e) = runtime.block_on(invoiceflow_cli::run(cli)) {
        eprintln!("error: {}", e);
        std::process::exit(e.code.exit_code());
    }

    Ok(())
}
