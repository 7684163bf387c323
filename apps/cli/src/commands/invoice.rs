//! # Invoice Commands
//!
//! ## Generate Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  invoice.toml ──► InvoiceDraft ──► InvoiceWorkflow::generate()          │
//! │                                          │                              │
//! │                                          ▼                              │
//! │                                   invoice id + PDF URL                  │
//! │                                          │                              │
//! │                     ┌────────────────────┼─────────────────────┐        │
//! │                     ▼ --send                                   ▼        │
//! │            send_via_whatsapp()                  --download <path>       │
//! │                                                 download_pdf() → file   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `totals` never touches the network.

use std::path::{Path, PathBuf};

use tracing::info;

use invoiceflow_client::{ClientConfig, DownloadedPdf, InvoiceWorkflow};
use invoiceflow_core::{CurrencyFormat, InvoiceDraft, Totals};

use crate::error::{AppError, AppResult};
use crate::invoice_file;
use crate::{AppContext, GenerateArgs};

pub fn totals(config: &ClientConfig, file: &Path) -> AppResult<()> {
    let draft = invoice_file::load(file)?;
    print!("{}", render_totals(&draft, &config.currency()));
    Ok(())
}

pub async fn generate(ctx: &AppContext, args: GenerateArgs) -> AppResult<()> {
    let draft = invoice_file::load(&args.file)?;
    let currency = ctx.config.currency();
    let mut workflow = InvoiceWorkflow::new(ctx.client.clone(), draft, currency.clone());

    let generated = workflow.generate().await?;
    println!(
        "Invoice {} created (id {})",
        generated.submission.invoice_number(),
        generated.invoice_id
    );
    println!("PDF: {}", generated.pdf_url);
    print!("{}", render_summary(&generated.submission.totals, &currency));

    if args.send {
        workflow.send_via_whatsapp().await?;
        println!("Sent to {} via WhatsApp", workflow.draft().customer.phone.trim());
    }

    if let Some(target) = args.download {
        let pdf = workflow.download_pdf().await?;
        let path = save_pdf(&target, &pdf)?;
        info!(path = %path.display(), bytes = pdf.bytes.len(), "PDF saved");
        println!("Saved {}", path.display());
    }

    Ok(())
}

/// Item table plus totals, as `totals` prints it.
///
/// Rows that will not be submitted are marked.
fn render_totals(draft: &InvoiceDraft, currency: &CurrencyFormat) -> String {
    let mut out = String::new();
    for row in draft.rows() {
        let item = &row.item;
        let marker = if item.is_submittable() { " " } else { "-" };
        let description = if item.description.trim().is_empty() {
            "(no description)"
        } else {
            item.description.trim()
        };
        out.push_str(&format!(
            "{} {:<30} {:>8} x {:>12} {:>14}\n",
            marker,
            description,
            item.quantity,
            currency.format(item.unit_price),
            currency.format(item.line_total()),
        ));
    }
    out.push('\n');
    out.push_str(&render_summary(&draft.totals(), currency));
    out
}

fn render_summary(totals: &Totals, currency: &CurrencyFormat) -> String {
    totals
        .summary_lines(currency)
        .into_iter()
        .map(|(label, value)| format!("{:<12} {:>14}\n", label, value))
        .collect()
}

/// Writes the PDF to `target`, or into it when `target` is a directory.
fn save_pdf(target: &Path, pdf: &DownloadedPdf) -> AppResult<PathBuf> {
    let path = if target.is_dir() {
        target.join(&pdf.file_name)
    } else {
        target.to_path_buf()
    };

    std::fs::write(&path, &pdf.bytes)
        .map_err(|e| AppError::io(format!("Cannot write {}: {}", path.display(), e)))?;
    Ok(path)
}
