mod common;

use invoiceflow_client::{ClientError, InvoiceWorkflow, SessionContext};
use invoiceflow_core::{CurrencyFormat, DetailsMode, PreviewMode, ViewState};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{client_for, invoice_number, sample_draft, signed_in_client};

async fn mount_create(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/invoices"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "invoice": { "_id": "inv-1" } })),
        )
        .mount(server)
        .await;
}

async fn mount_render(server: &MockServer, pdf_url: &str) {
    Mock::given(method("POST"))
        .and(path("/api/invoices/inv-1/pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "pdfUrl": pdf_url })))
        .mount(server)
        .await;
}

async fn generated_workflow(server: &MockServer) -> InvoiceWorkflow {
    mount_create(server).await;
    mount_render(server, &format!("{}/files/inv-1.pdf", server.uri())).await;

    let client = signed_in_client(server).await;
    let mut workflow = InvoiceWorkflow::new(client, sample_draft(), CurrencyFormat::default());
    workflow.generate().await.unwrap();
    workflow
}

// =============================================================================
// Generate
// =============================================================================

#[tokio::test]
async fn generate_posts_submittable_items_and_shows_preview() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/invoices"))
        .and(body_partial_json(json!({
            "customer": { "name": "Asha Traders", "phone": "+919800000000" },
            "metadata": { "dueDate": "2025-01-08", "paymentTerms": "Net 7 days" },
            "items": [
                {
                    "description": "Design",
                    "quantity": 2.0,
                    "unitPrice": 10.0,
                    "tax": 10.0,
                    "discount": 5.0
                }
            ],
            "totals": {
                "subtotal": 20.0,
                "totalTax": 2.0,
                "totalDiscount": 1.0,
                "grandTotal": 21.0
            }
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(json!({ "invoice": { "_id": "inv-1" } })),
        )
        .expect(1)
        .mount(&server)
        .await;
    mount_render(&server, "https://cdn.example.com/inv-1.pdf").await;

    let client = signed_in_client(&server).await;
    let mut workflow = InvoiceWorkflow::new(client, sample_draft(), CurrencyFormat::default());

    let generated = workflow.generate().await.unwrap();
    assert_eq!(generated.invoice_id, "inv-1");
    assert_eq!(generated.pdf_url, "https://cdn.example.com/inv-1.pdf");
    assert_eq!(generated.submission.items.len(), 1);

    assert_eq!(workflow.view(), ViewState::Preview(PreviewMode::Ready));
}

#[tokio::test]
async fn invalid_draft_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    let mut draft = sample_draft();
    draft.customer.name = "  ".to_string();
    draft.metadata.due_date = None;

    let mut workflow = InvoiceWorkflow::new(client, draft, CurrencyFormat::default());
    let err = workflow.generate().await.unwrap_err();

    match err {
        ClientError::Validation(errors) => assert_eq!(errors.len(), 2),
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(workflow.view(), ViewState::Details(DetailsMode::Editing));
    assert!(workflow.generated().is_none());
}

#[tokio::test]
async fn failed_render_returns_to_editing() {
    let server = MockServer::start().await;
    mount_create(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/invoices/inv-1/pdf"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "error": "Renderer crashed" })),
        )
        .mount(&server)
        .await;

    let client = signed_in_client(&server).await;
    let mut workflow = InvoiceWorkflow::new(client, sample_draft(), CurrencyFormat::default());

    let err = workflow.generate().await.unwrap_err();
    assert!(matches!(
        err,
        ClientError::Http { status: 500, ref message } if message == "Renderer crashed"
    ));
    assert_eq!(workflow.view(), ViewState::Details(DetailsMode::Editing));
    assert!(workflow.show_preview().is_err());
}

#[tokio::test]
async fn generate_without_session_asks_for_login() {
    let server = MockServer::start().await;
    let client = client_for(&server, SessionContext::new());
    let mut workflow = InvoiceWorkflow::new(client, sample_draft(), CurrencyFormat::default());

    let err = workflow.generate().await.unwrap_err();
    assert!(err.requires_login());
    assert_eq!(workflow.view(), ViewState::Details(DetailsMode::Editing));
}

// =============================================================================
// Send
// =============================================================================

#[tokio::test]
async fn send_uses_caption_and_returns_to_ready() {
    let server = MockServer::start().await;
    let pdf_url = format!("{}/files/inv-1.pdf", server.uri());
    let caption = format!(
        "Invoice {} for ₹21.00 is ready. Due: 2025-01-08.",
        invoice_number()
    );
    Mock::given(method("POST"))
        .and(path("/api/twilio/send-whatsapp-media"))
        .and(body_partial_json(json!({
            "to": "+919800000000",
            "mediaUrl": pdf_url,
            "body": caption
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut workflow = generated_workflow(&server).await;
    workflow.send_via_whatsapp().await.unwrap();

    assert_eq!(workflow.view(), ViewState::Preview(PreviewMode::Ready));
}

#[tokio::test]
async fn rejected_send_still_returns_to_ready() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/twilio/send-whatsapp-media"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": false })))
        .mount(&server)
        .await;

    let mut workflow = generated_workflow(&server).await;
    let err = workflow.send_via_whatsapp().await.unwrap_err();

    assert!(matches!(err, ClientError::Rejected(_)));
    assert_eq!(workflow.view(), ViewState::Preview(PreviewMode::Ready));
}

#[tokio::test]
async fn send_uses_corrected_phone_from_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/twilio/send-whatsapp-media"))
        .and(body_partial_json(json!({ "to": "+14155550100" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "success": true })))
        .expect(1)
        .mount(&server)
        .await;

    let mut workflow = generated_workflow(&server).await;
    workflow.draft_mut().customer.phone = " +14155550100 ".to_string();

    workflow.send_via_whatsapp().await.unwrap();
}

#[tokio::test]
async fn send_without_phone_is_validation_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/twilio/send-whatsapp-media"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut workflow = generated_workflow(&server).await;
    workflow.draft_mut().customer.phone.clear();

    let err = workflow.send_via_whatsapp().await.unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert_eq!(workflow.view(), ViewState::Preview(PreviewMode::Ready));
}

#[tokio::test]
async fn send_before_generate_is_refused() {
    let server = MockServer::start().await;
    let client = signed_in_client(&server).await;
    let mut workflow = InvoiceWorkflow::new(client, sample_draft(), CurrencyFormat::default());

    let err = workflow.send_via_whatsapp().await.unwrap_err();
    assert!(matches!(err, ClientError::MissingField(_)));
    assert_eq!(workflow.view(), ViewState::Details(DetailsMode::Editing));
}

// =============================================================================
// Download & Navigation
// =============================================================================

#[tokio::test]
async fn download_names_file_after_invoice_number() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/files/inv-1.pdf"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"%PDF-1.7".to_vec()))
        .expect(1)
        .mount(&server)
        .await;

    let workflow = generated_workflow(&server).await;
    let pdf = workflow.download_pdf().await.unwrap();

    assert_eq!(pdf.file_name, format!("invoice-{}.pdf", invoice_number()));
    assert_eq!(pdf.bytes, b"%PDF-1.7");
}

#[tokio::test]
async fn details_and_back_to_preview() {
    let server = MockServer::start().await;
    let mut workflow = generated_workflow(&server).await;

    workflow.show_details().unwrap();
    assert_eq!(workflow.view(), ViewState::Details(DetailsMode::Editing));

    workflow.show_preview().unwrap();
    assert_eq!(workflow.view(), ViewState::Preview(PreviewMode::Ready));
}
