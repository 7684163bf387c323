//! # Session Context
//!
//! Holds the bearer token for the signed-in user and hands it to whatever
//! issues authenticated requests.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Session Lifecycle                               │
//! │                                                                         │
//! │   login / signup ──► SessionContext::set ──► TokenStore::save           │
//! │                             │                                           │
//! │                             ▼                                           │
//! │   every request ───► SessionContext::token ──► "Bearer <token>"         │
//! │                             │                                           │
//! │                             ├── none / expired ──► NotAuthenticated     │
//! │                             │                                           │
//! │   logout, or a 401 ──► SessionContext::clear ──► TokenStore::clear      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The context is cheap to clone; clones share one session, so a 401 seen by
//! any holder signs every holder out.
//!
//! ## Token Expiry
//! If the token is a JWT with an `exp` claim, the expiry is read (not
//! verified, the backend owns the key) and an expired token counts as
//! missing. Opaque tokens never expire locally.

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::contract::UserProfile;
use crate::error::{ClientError, ClientResult};
use crate::token_store::TokenStore;

// =============================================================================
// Session
// =============================================================================

/// An authenticated session.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    user: Option<UserProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    expires_at: Option<DateTime<Utc>>,

    created_at: DateTime<Utc>,
}

impl Session {
    pub fn new(token: impl Into<String>, user: Option<UserProfile>) -> Self {
        let token = token.into();
        let expires_at = token_expiry(&token);

        Session {
            token,
            user,
            expires_at,
            created_at: Utc::now(),
        }
    }

    pub fn token(&self) -> &str {
        &self.token
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_some_and(|exp| now >= exp)
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Never prints the token.
impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("token", &"<redacted>")
            .field("user", &self.user)
            .field("expires_at", &self.expires_at)
            .field("created_at", &self.created_at)
            .finish()
    }
}

#[derive(Deserialize)]
struct ExpiryClaim {
    exp: Option<i64>,
}

/// Reads the `exp` claim of a JWT without checking its signature.
fn token_expiry(token: &str) -> Option<DateTime<Utc>> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<ExpiryClaim>(token, &DecodingKey::from_secret(&[]), &validation).ok()?;
    data.claims
        .exp
        .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
}

// =============================================================================
// Session Context
// =============================================================================

/// Shared handle to the current session.
#[derive(Clone)]
pub struct SessionContext {
    session: Arc<RwLock<Option<Session>>>,
    store: Option<Arc<dyn TokenStore>>,
}

impl SessionContext {
    /// An empty, in-memory-only context.
    pub fn new() -> Self {
        SessionContext {
            session: Arc::new(RwLock::new(None)),
            store: None,
        }
    }

    /// A context backed by `store`, starting from whatever it holds.
    ///
    /// An expired stored session is discarded.
    pub fn with_store(store: Arc<dyn TokenStore>) -> ClientResult<Self> {
        let stored = match store.load()? {
            Some(session) if session.is_expired() => {
                info!("Stored session has expired, discarding");
                store.clear()?;
                None
            }
            other => other,
        };

        if stored.is_some() {
            debug!("Restored session from store");
        }

        Ok(SessionContext {
            session: Arc::new(RwLock::new(stored)),
            store: Some(store),
        })
    }

    /// Replaces the current session and persists it.
    pub async fn set(&self, session: Session) -> ClientResult<()> {
        if let Some(store) = &self.store {
            store.save(&session)?;
        }

        info!(
            user = session.user().and_then(UserProfile::display_name).unwrap_or("unknown"),
            expires_at = ?session.expires_at(),
            "Session started"
        );
        *self.session.write().await = Some(session);
        Ok(())
    }

    /// Ends the session here and in the store.
    pub async fn clear(&self) -> ClientResult<()> {
        let had_session = self.session.write().await.take().is_some();

        if let Some(store) = &self.store {
            store.clear()?;
        }

        if had_session {
            info!("Session cleared");
        }
        Ok(())
    }

    /// Clears after the backend rejected the token.
    ///
    /// A store failure here is logged, not returned, so the caller still
    /// reports the 401.
    pub(crate) async fn invalidate(&self) {
        warn!("Backend rejected the session token, signing out");
        if let Err(e) = self.clear().await {
            warn!(error = %e, "Failed to clear stored session");
        }
    }

    /// The bearer token, if signed in and not expired.
    pub async fn token(&self) -> ClientResult<String> {
        let guard = self.session.read().await;
        match guard.as_ref() {
            Some(session) if !session.is_expired() => Ok(session.token.clone()),
            Some(_) => {
                debug!("Session token has expired");
                Err(ClientError::NotAuthenticated)
            }
            None => Err(ClientError::NotAuthenticated),
        }
    }

    /// A copy of the current session, expired or not.
    pub async fn current(&self) -> Option<Session> {
        self.session.read().await.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token().await.is_ok()
    }
}

impl Default for SessionContext {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext")
            .field("persistent", &self.store.is_some())
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::token_store::MemoryTokenStore;
    use chrono::Duration;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::json;

    fn jwt_expiring_at(exp: DateTime<Utc>) -> String {
        encode(
            &Header::default(),
            &json!({ "sub": "u1", "exp": exp.timestamp() }),
            &EncodingKey::from_secret(b"backend-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_reads_jwt_expiry() {
        let exp = Utc::now() + Duration::hours(1);
        let session = Session::new(jwt_expiring_at(exp), None);

        assert_eq!(session.expires_at().unwrap().timestamp(), exp.timestamp());
        assert!(!session.is_expired());
        assert!(session.is_expired_at(exp + Duration::seconds(1)));
    }

    #[test]
    fn test_opaque_token_never_expires() {
        let session = Session::new("not-a-jwt", None);
        assert!(session.expires_at().is_none());
        assert!(!session.is_expired());
    }

    #[test]
    fn test_debug_redacts_token() {
        let session = Session::new("super-secret", None);
        let printed = format!("{:?}", session);

        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<redacted>"));
    }

    #[tokio::test]
    async fn test_missing_session_is_not_authenticated() {
        let ctx = SessionContext::new();
        assert!(matches!(ctx.token().await, Err(ClientError::NotAuthenticated)));
    }

    #[tokio::test]
    async fn test_set_and_clear_are_shared_between_clones() {
        let ctx = SessionContext::new();
        let other = ctx.clone();

        ctx.set(Session::new("abc", None)).await.unwrap();
        assert_eq!(other.token().await.unwrap(), "abc");

        other.clear().await.unwrap();
        assert!(!ctx.is_authenticated().await);
    }

    #[tokio::test]
    async fn test_expired_session_is_not_authenticated() {
        let ctx = SessionContext::new();
        let token = jwt_expiring_at(Utc::now() - Duration::minutes(5));
        ctx.set(Session::new(token, None)).await.unwrap();

        assert!(matches!(ctx.token().await, Err(ClientError::NotAuthenticated)));
        assert!(ctx.current().await.is_some());
    }

    #[tokio::test]
    async fn test_store_is_written_and_restored() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());

        let ctx = SessionContext::with_store(store.clone()).unwrap();
        ctx.set(Session::new("persisted", None)).await.unwrap();

        let restored = SessionContext::with_store(store.clone()).unwrap();
        assert_eq!(restored.token().await.unwrap(), "persisted");

        restored.invalidate().await;
        assert!(store.load().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_expired_stored_session_is_discarded() {
        let store: Arc<dyn TokenStore> = Arc::new(MemoryTokenStore::new());
        let token = jwt_expiring_at(Utc::now() - Duration::days(1));
        store.save(&Session::new(token, None)).unwrap();

        let ctx = SessionContext::with_store(store.clone()).unwrap();
        assert!(ctx.current().await.is_none());
        assert!(store.load().unwrap().is_none());
    }
}
