//! # Response Contract
//!
//! The invoice backend does not answer in one consistent shape. Every
//! tolerance for that lives here, one adapter per value, so the rest of the
//! crate only sees typed results.
//!
//! ## Accepted Shapes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Value            Looked up at (first match wins)                       │
//! │  ─────            ───────────────────────────────                       │
//! │  access token     data.accessToken, data.token, accessToken, token      │
//! │  user profile     data.user, user                      (optional)       │
//! │  invoice id       _id, data._id, invoice._id, data.invoice._id          │
//! │  PDF URL          pdfUrl, url, data.pdfUrl, data.url, fileUrl           │
//! │  WhatsApp result  success                              (absent=false)   │
//! │  error message    message, error, else the raw body                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ClientError, ClientResult};

const ACCESS_TOKEN_PATHS: &[&str] = &["/data/accessToken", "/data/token", "/accessToken", "/token"];
const USER_PATHS: &[&str] = &["/data/user", "/user"];
const INVOICE_ID_PATHS: &[&str] = &["/_id", "/data/_id", "/invoice/_id", "/data/invoice/_id"];
const PDF_URL_PATHS: &[&str] = &["/pdfUrl", "/url", "/data/pdfUrl", "/data/url", "/fileUrl"];

/// The signed-in user as the auth service describes them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserProfile {
    /// Best name to show for this user.
    pub fn display_name(&self) -> Option<&str> {
        self.username.as_deref().or(self.email.as_deref())
    }
}

// =============================================================================
// Adapters
// =============================================================================

/// Bearer token from a login or signup response.
pub fn access_token(body: &Value) -> ClientResult<String> {
    first_string(body, ACCESS_TOKEN_PATHS).ok_or(ClientError::MissingField("access token"))
}

/// User profile from a login or signup response, if any.
///
/// A `user` value that is not an object is ignored.
pub fn user_profile(body: &Value) -> Option<UserProfile> {
    USER_PATHS
        .iter()
        .filter_map(|path| body.pointer(path))
        .filter(|value| value.is_object())
        .find_map(|value| serde_json::from_value(value.clone()).ok())
}

/// Identifier of a created invoice.
///
/// Numeric ids are accepted and rendered as strings.
pub fn invoice_id(body: &Value) -> ClientResult<String> {
    INVOICE_ID_PATHS
        .iter()
        .filter_map(|path| body.pointer(path))
        .find_map(|value| match value {
            Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .ok_or(ClientError::MissingField("invoice id"))
}

/// Download URL of a rendered PDF.
pub fn pdf_url(body: &Value) -> ClientResult<String> {
    first_string(body, PDF_URL_PATHS).ok_or(ClientError::MissingField("PDF URL"))
}

/// Whether the WhatsApp relay reports success.
pub fn whatsapp_sent(body: &Value) -> bool {
    body.get("success").and_then(Value::as_bool).unwrap_or(false)
}

/// Human-readable message from an error response body.
///
/// Empty bodies yield `None` so the caller can fall back to the status text.
pub fn error_message(raw: &str) -> Option<String> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    let from_json = serde_json::from_str::<Value>(raw).ok().and_then(|body| {
        ["message", "error"]
            .iter()
            .find_map(|key| body.get(*key).and_then(Value::as_str).map(str::to_string))
    });

    Some(from_json.unwrap_or_else(|| raw.to_string()))
}

fn first_string(body: &Value, paths: &[&str]) -> Option<String> {
    paths
        .iter()
        .filter_map(|path| body.pointer(path))
        .filter_map(Value::as_str)
        .find(|s| !s.trim().is_empty())
        .map(str::to_string)
}

// =============================================================================
// Unit Tests
// =============================================================================
