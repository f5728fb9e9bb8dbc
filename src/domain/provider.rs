use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::HeaderMap;

use super::{Claims, IssuedCredentials, SessionHandle};
use crate::errors::SessionError;

/// Issues, validates, renews and destroys sessions.
///
/// Lifecycle per SSID: absent -> active -> (renewed)* -> destroyed.
/// Requests are represented by their headers (credentials arrive as headers
/// or cookies); credentials to send back are returned as `IssuedCredentials`.
#[async_trait]
pub trait Provider: Send + Sync {
    /// Mints an access + refresh pair for a fresh SSID and writes the seed
    /// data into the backend. Either both happen or the call fails.
    async fn new_session(
        &self,
        user_id: &str,
        jwt_data: HashMap<String, String>,
        session_data: HashMap<String, String>,
    ) -> Result<(SessionHandle, IssuedCredentials), SessionError>;

    /// Validates the access credential (signature and expiry only, no backend
    /// round trip) and returns a handle bound to its claims.
    async fn get(&self, headers: &HeaderMap) -> Result<SessionHandle, SessionError>;

    /// Mints a new access credential from a valid refresh credential whose
    /// SSID matches the (possibly expired) access credential and whose backend
    /// record still exists.
    async fn renew_access_token(&self, headers: &HeaderMap)
        -> Result<IssuedCredentials, SessionError>;

    /// Re-mints the access credential with new claims. `claims.ssid` must be
    /// the SSID the request is already bound to.
    async fn update_claims(
        &self,
        headers: &HeaderMap,
        claims: Claims,
    ) -> Result<IssuedCredentials, SessionError>;

    /// Logout: validates the access credential and destroys its record.
    async fn destroy(&self, headers: &HeaderMap) -> Result<(), SessionError> {
        self.get(headers).await?.destroy().await
    }
}
