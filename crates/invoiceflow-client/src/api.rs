//! # Backend Client
//!
//! Every HTTP call InvoiceFlow makes.
//!
//! ## Endpoints
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Method  Path                              Auth    Returns              │
//! │  ──────  ────                              ────    ───────              │
//! │  POST    /api/auth/login                   -       token (+ user)       │
//! │  POST    /api/auth/register                -       token (+ user)       │
//! │  POST    /api/invoices                     Bearer  invoice id           │
//! │  POST    /api/invoices/{id}/pdf            Bearer  PDF URL              │
//! │  POST    /api/twilio/send-whatsapp-media   Bearer  success flag         │
//! │  GET     <PDF URL>                         Bearer* PDF bytes            │
//! │                                                                         │
//! │  * only when the PDF is served from the backend's own origin            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Request Flow
//! ```text
//!   call ──► session.token() ──► reqwest ──► status?
//!                 │                            ├── 2xx  ──► contract adapter ──► typed value
//!                 │                            ├── 401  ──► session cleared ──► Unauthorized
//!                 ▼                            └── else ──► Http { status, message }
//!          NotAuthenticated
//! ```
//!
//! Calls are awaited one at a time and never retried.

use reqwest::{Response, StatusCode};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use invoiceflow_core::validation::{validate_login, validate_registration};
use invoiceflow_core::{InvoiceSubmission, LoginForm, RegistrationForm};

use crate::config::ClientConfig;
use crate::contract;
use crate::error::{ClientError, ClientResult};
use crate::session::{Session, SessionContext};

const LOGIN_PATH: &[&str] = &["api", "auth", "login"];
const REGISTER_PATH: &[&str] = &["api", "auth", "register"];
const INVOICES_PATH: &[&str] = &["api", "invoices"];
const WHATSAPP_PATH: &[&str] = &["api", "twilio", "send-whatsapp-media"];

/// Body of `POST /api/twilio/send-whatsapp-media`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatsAppMessage {
    /// Recipient phone number.
    pub to: String,
    pub media_url: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Auth {
    Anonymous,
    Bearer,
}

/// HTTP client for the invoice backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: reqwest::Client,
    base_url: Url,
    session: SessionContext,
}

impl BackendClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &ClientConfig, session: SessionContext) -> ClientResult<Self> {
        let base_url = config.parsed_base_url()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .user_agent(concat!("invoiceflow/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(BackendClient {
            http,
            base_url,
            session,
        })
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Signs in and starts a session.
    pub async fn login(&self, form: &LoginForm) -> ClientResult<Session> {
        validate_login(form)?;

        let body = self
            .post_json(self.endpoint(LOGIN_PATH)?, Some(form), Auth::Anonymous)
            .await?;
        self.start_session(&body).await
    }

    /// Creates an account and starts a session.
    pub async fn register(&self, form: &RegistrationForm) -> ClientResult<Session> {
        validate_registration(form)?;

        let body = self
            .post_json(self.endpoint(REGISTER_PATH)?, Some(form), Auth::Anonymous)
            .await?;
        self.start_session(&body).await
    }

    /// Ends the session locally. The backend keeps no session to revoke.
    pub async fn logout(&self) -> ClientResult<()> {
        self.session.clear().await
    }

    async fn start_session(&self, body: &Value) -> ClientResult<Session> {
        let token = contract::access_token(body)?;
        let session = Session::new(token, contract::user_profile(body));
        self.session.set(session.clone()).await?;
        Ok(session)
    }

    // =========================================================================
    // Invoices
    // =========================================================================

    /// Stores the invoice and returns its backend id.
    pub async fn create_invoice(&self, submission: &InvoiceSubmission) -> ClientResult<String> {
        let body = self
            .post_json(self.endpoint(INVOICES_PATH)?, Some(submission), Auth::Bearer)
            .await?;
        let id = contract::invoice_id(&body)?;

        info!(invoice_id = %id, invoice_no = %submission.invoice_number(), "Invoice created");
        Ok(id)
    }

    /// Renders the PDF for `invoice_id` and returns where to fetch it.
    pub async fn render_pdf(&self, invoice_id: &str) -> ClientResult<String> {
        let segments = ["api", "invoices", invoice_id, "pdf"];

        let body = self
            .post_json::<()>(self.endpoint(&segments)?, None, Auth::Bearer)
            .await?;
        let url = contract::pdf_url(&body)?;

        info!(invoice_id = %invoice_id, "PDF rendered");
        Ok(url)
    }

    /// Sends the PDF to a WhatsApp number.
    ///
    /// ## Errors
    /// `Rejected` when the relay answers without `success: true`.
    pub async fn send_whatsapp(&self, message: &WhatsAppMessage) -> ClientResult<()> {
        let body = self
            .post_json(self.endpoint(WHATSAPP_PATH)?, Some(message), Auth::Bearer)
            .await?;

        if !contract::whatsapp_sent(&body) {
            let reason = body
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("WhatsApp delivery was not confirmed")
                .to_string();
            warn!(reason = %reason, "WhatsApp send rejected");
            return Err(ClientError::Rejected(reason));
        }

        info!("Invoice sent via WhatsApp");
        Ok(())
    }

    /// Fetches the bytes behind a PDF URL.
    ///
    /// Relative URLs resolve against the base URL.
    pub async fn download_pdf(&self, pdf_url: &str) -> ClientResult<Vec<u8>> {
        let url = self.base_url.join(pdf_url)?;
        let same_origin = url.origin() == self.base_url.origin();

        let mut request = self.http.get(url.clone());
        if same_origin {
            request = request.bearer_auth(self.session.token().await?);
        }

        debug!(url = %url, same_origin, "GET");
        let response = request.send().await?;
        let auth = if same_origin { Auth::Bearer } else { Auth::Anonymous };
        let response = self.check_status(response, auth).await?;

        let bytes = response.bytes().await?;
        debug!(len = bytes.len(), "PDF downloaded");
        Ok(bytes.to_vec())
    }

    // =========================================================================
    // Plumbing
    // =========================================================================

    /// `base_url` + path segments. Segments are percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> ClientResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn post_json<B>(&self, url: Url, body: Option<&B>, auth: Auth) -> ClientResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let mut request = self.http.post(url.clone());
        if auth == Auth::Bearer {
            request = request.bearer_auth(self.session.token().await?);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        debug!(url = %url, "POST");
        let response = request.send().await?;
        let response = self.check_status(response, auth).await?;
        read_json(response).await
    }

    async fn check_status(&self, response: Response, auth: Auth) -> ClientResult<Response> {
        let status = response.status();
        debug!(url = %response.url(), status = status.as_u16(), "Response");

        if status.is_success() {
            return Ok(response);
        }

        if status == StatusCode::UNAUTHORIZED && auth == Auth::Bearer {
            self.session.invalidate().await;
            return Err(ClientError::Unauthorized);
        }

        let raw = response.text().await.unwrap_or_default();
        let message = contract::error_message(&raw).unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("Unknown error")
                .to_string()
        });

        warn!(status = status.as_u16(), message = %message, "Request failed");
        Err(ClientError::Http {
            status: status.as_u16(),
            message,
        })
    }
}

async fn read_json(response: Response) -> ClientResult<Value> {
    let raw = response.text().await?;
    serde_json::from_str(&raw)
        .map_err(|e| ClientError::Transport(format!("invalid JSON response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(base: &str) -> BackendClient {
        BackendClient::new(&ClientConfig::new(base), SessionContext::new()).unwrap()
    }

    #[test]
    fn test_endpoint_joins_onto_base_path() {
        let c = client("https://api.example.com");
        assert_eq!(
            c.endpoint(INVOICES_PATH).unwrap().as_str(),
            "https://api.example.com/api/invoices"
        );

        let c = client("https://example.com/backend/");
        assert_eq!(
            c.endpoint(LOGIN_PATH).unwrap().as_str(),
            "https://example.com/backend/api/auth/login"
        );
    }

    #[test]
    fn test_endpoint_escapes_ids() {
        let c = client("http://localhost:3500");
        let url = c.endpoint(&["api", "invoices", "a/b c", "pdf"]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:3500/api/invoices/a%2Fb%20c/pdf");
    }

    #[test]
    fn test_whatsapp_body_shape() {
        let message = WhatsAppMessage {
            to: "+919800000000".to_string(),
            media_url: "https://cdn.example.com/i.pdf".to_string(),
            body: "Invoice".to_string(),
        };
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["mediaUrl"], "https://cdn.example.com/i.pdf");
        assert_eq!(json["to"], "+919800000000");
    }
}
