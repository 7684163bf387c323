//! # Invoice Workflow
//!
//! One invoice from draft to delivery.
//!
//! ## Generate → Send Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  generate()                                                             │
//! │    Details(Editing) ──► Details(Generating)                             │
//! │       │ validate draft            ──✗──► Details(Editing) + Validation  │
//! │       │ POST /api/invoices        ──✗──► Details(Editing) + error       │
//! │       │ POST /api/invoices/{id}/pdf ✗──► Details(Editing) + error       │
//! │       ▼                                                                 │
//! │    Preview(Ready)  { invoice_id, pdf_url }                              │
//! │                                                                         │
//! │  send_via_whatsapp()                                                    │
//! │    Preview(Ready) ──► Preview(Sending)                                  │
//! │       │ POST /api/twilio/send-whatsapp-media                            │
//! │       ▼                                                                 │
//! │    Preview(Ready)  (success or not)                                     │
//! │                                                                         │
//! │  download_pdf()                                                         │
//! │    GET <pdf_url> ──► invoice-<no>.pdf                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every method that talks to the backend takes `&mut self`, so a workflow
//! can never have two requests in flight.

use tracing::{debug, info};

use invoiceflow_core::submission::pdf_file_name;
use invoiceflow_core::{
    CurrencyFormat, InvoiceDraft, InvoiceSubmission, ValidationError, ViewState,
};

use crate::api::{BackendClient, WhatsAppMessage};
use crate::error::{ClientError, ClientResult};

/// What the backend returned for a generated invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratedInvoice {
    pub invoice_id: String,
    pub pdf_url: String,

    /// Exactly what was posted.
    pub submission: InvoiceSubmission,
}

/// A downloaded invoice PDF.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadedPdf {
    /// Suggested file name, `invoice-<invoiceNo>.pdf`.
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Owns the draft and view state for one invoice.
#[derive(Debug)]
pub struct InvoiceWorkflow {
    client: BackendClient,
    currency: CurrencyFormat,
    draft: InvoiceDraft,
    view: ViewState,
    generated: Option<GeneratedInvoice>,
}

impl InvoiceWorkflow {
    pub fn new(client: BackendClient, draft: InvoiceDraft, currency: CurrencyFormat) -> Self {
        InvoiceWorkflow {
            client,
            currency,
            draft,
            view: ViewState::initial(),
            generated: None,
        }
    }

    pub fn draft(&self) -> &InvoiceDraft {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut InvoiceDraft {
        &mut self.draft
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn generated(&self) -> Option<&GeneratedInvoice> {
        self.generated.as_ref()
    }

    // =========================================================================
    // Generate
    // =========================================================================

    /// Validates, stores and renders the invoice.
    ///
    /// Nothing is sent when validation fails. Any failure leaves the view in
    /// `Details(Editing)`.
    pub async fn generate(&mut self) -> ClientResult<&GeneratedInvoice> {
        self.view.begin_generate()?;

        match self.create_and_render().await {
            Ok(generated) => {
                self.view.generated()?;
                info!(
                    invoice_no = %generated.submission.invoice_number(),
                    invoice_id = %generated.invoice_id,
                    "Invoice generated"
                );
                let generated = self.generated.insert(generated);
                Ok(&*generated)
            }
            Err(e) => {
                self.view.generation_failed()?;
                Err(e)
            }
        }
    }

    async fn create_and_render(&self) -> ClientResult<GeneratedInvoice> {
        let submission = self.draft.prepare_submission()?;
        debug!(
            items = submission.items.len(),
            grand_total = submission.totals.grand_total,
            "Submitting invoice"
        );

        let invoice_id = self.client.create_invoice(&submission).await?;
        let pdf_url = self.client.render_pdf(&invoice_id).await?;

        Ok(GeneratedInvoice {
            invoice_id,
            pdf_url,
            submission,
        })
    }

    // =========================================================================
    // Send
    // =========================================================================

    /// Sends the generated PDF to the customer's phone.
    ///
    /// The phone is read from the draft, so a corrected number is used
    /// without regenerating.
    pub async fn send_via_whatsapp(&mut self) -> ClientResult<()> {
        let phone = self.draft.customer.phone.trim().to_string();
        if phone.is_empty() {
            return Err(ClientError::Validation(
                ValidationError::Required {
                    field: "customer phone".to_string(),
                }
                .into(),
            ));
        }

        let generated = self
            .generated
            .as_ref()
            .ok_or(ClientError::MissingField("generated invoice PDF"))?;

        let message = WhatsAppMessage {
            to: phone,
            media_url: generated.pdf_url.clone(),
            body: generated.submission.whatsapp_caption(&self.currency),
        };

        self.view.begin_send()?;
        let result = self.client.send_whatsapp(&message).await;
        self.view.send_finished()?;

        result
    }

    // =========================================================================
    // Download
    // =========================================================================

    /// Fetches the generated PDF.
    pub async fn download_pdf(&self) -> ClientResult<DownloadedPdf> {
        let generated = self
            .generated
            .as_ref()
            .ok_or(ClientError::MissingField("generated invoice PDF"))?;

        let bytes = self.client.download_pdf(&generated.pdf_url).await?;
        Ok(DownloadedPdf {
            file_name: pdf_file_name(generated.submission.invoice_number()),
            bytes,
        })
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    pub fn show_details(&mut self) -> ClientResult<()> {
        Ok(self.view.show_details()?)
    }

    /// Back to the preview of the last generated PDF.
    pub fn show_preview(&mut self) -> ClientResult<()> {
        Ok(self.view.show_preview(self.generated.is_some())?)
    }
}
