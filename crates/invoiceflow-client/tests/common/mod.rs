#![allow(dead_code)]

use chrono::NaiveDate;
use invoiceflow_client::{BackendClient, ClientConfig, Session, SessionContext};
use invoiceflow_core::{Customer, InvoiceDraft, InvoiceMetadata, InvoiceNumber, LineItem};
use rand::rngs::StdRng;
use rand::SeedableRng;
use wiremock::MockServer;

pub const TEST_TOKEN: &str = "test-bearer-token";

pub fn client_for(server: &MockServer, session: SessionContext) -> BackendClient {
    let config = ClientConfig {
        request_timeout_secs: 5,
        ..ClientConfig::new(server.uri())
    };
    BackendClient::new(&config, session).expect("client")
}

pub async fn signed_in_client(server: &MockServer) -> BackendClient {
    let session = SessionContext::new();
    session
        .set(Session::new(TEST_TOKEN, None))
        .await
        .expect("set session");
    client_for(server, session)
}

pub fn invoice_number() -> InvoiceNumber {
    InvoiceNumber::generate_with(&mut StdRng::seed_from_u64(2025), 2025)
}

/// A valid draft with one row that will be dropped on submission.
pub fn sample_draft() -> InvoiceDraft {
    let mut metadata = InvoiceMetadata::with_number(
        invoice_number(),
        NaiveDate::from_ymd_opt(2025, 1, 1).expect("date"),
    );
    metadata.due_date = NaiveDate::from_ymd_opt(2025, 1, 8);

    let mut customer = Customer::new("Asha Traders", "+919800000000");
    customer.email = "accounts@asha.example".to_string();

    InvoiceDraft::from_parts(
        customer,
        metadata,
        vec![
            LineItem::new("Design", 2.0, 10.0)
                .with_tax(10.0)
                .with_discount(5.0),
            LineItem::new("placeholder", 1.0, 0.0),
        ],
    )
}
