use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use axum::http::{header::AUTHORIZATION, HeaderMap};
use axum_extra::extract::CookieJar;
use chrono::Duration;
use uuid::Uuid;

use crate::domain::{
    Claims, Credential, IssuedCredentials, Provider, SessionHandle, SessionStore, TokenKind,
};
use crate::errors::SessionError;
use crate::services::{record_key, CacheSession, TokenService};
use crate::utils::{Config, REFRESH_TOKEN_HEADER, USER_ID_FIELD};

/// Provider pairing signed access/refresh credentials with a record in a
/// `SessionStore`.
///
/// Per-request validation (`get`) trusts the access credential's signature
/// and never touches the store, so a destroyed session's access credential
/// keeps passing `get` until it expires. Revocation is enforced at renewal,
/// where the store is authoritative.
#[derive(Clone)]
pub struct TokenProvider {
    cfg: Arc<Config>,
    tokens: TokenService,
    store: Arc<dyn SessionStore>,
}

impl TokenProvider {
    pub fn new(cfg: Arc<Config>, store: Arc<dyn SessionStore>) -> Self {
        let tokens = TokenService::new(cfg.clone());
        Self { cfg, tokens, store }
    }

    fn session_ttl(&self) -> Duration {
        Duration::seconds(self.cfg.session_ttl_seconds())
    }

    fn bind(&self, claims: Claims) -> SessionHandle {
        Arc::new(CacheSession::new(
            self.store.clone(),
            self.cfg.session_key_prefix(),
            claims,
        ))
    }

    fn credential(&self, token: String, kind: TokenKind) -> Credential {
        let cookie_name = match kind {
            TokenKind::Access => self.cfg.access_cookie_name(),
            TokenKind::Refresh => self.cfg.refresh_cookie_name(),
        };
        Credential {
            token,
            cookie_name: cookie_name.to_owned(),
            ttl_seconds: self.tokens.ttl_seconds(kind),
        }
    }

    /// `Authorization: Bearer <jwt>`, else the access cookie.
    fn access_token(&self, headers: &HeaderMap) -> Option<String> {
        let bearer = headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|v| v.trim().to_owned());
        bearer
            .filter(|t| !t.is_empty())
            .or_else(|| cookie_value(headers, self.cfg.access_cookie_name()))
    }

    /// `X-Refresh-Token: <jwt>`, else the refresh cookie.
    fn refresh_token(&self, headers: &HeaderMap) -> Option<String> {
        headers
            .get(REFRESH_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.trim().to_owned())
            .filter(|t| !t.is_empty())
            .or_else(|| cookie_value(headers, self.cfg.refresh_cookie_name()))
    }
}

fn cookie_value(headers: &HeaderMap, name: &str) -> Option<String> {
    CookieJar::from_headers(headers)
        .get(name)
        .map(|c| c.value().to_owned())
        .filter(|v| !v.is_empty())
}

#[async_trait]
impl Provider for TokenProvider {
    async fn new_session(
        &self,
        user_id: &str,
        jwt_data: HashMap<String, String>,
        session_data: HashMap<String, String>,
    ) -> Result<(SessionHandle, IssuedCredentials), SessionError> {
        let ssid = Uuid::new_v4().to_string();
        let claims = Claims::new(user_id, ssid.clone(), jwt_data);

        // Sign first: a signing failure must not leave a record behind.
        let access = self.tokens.mint(&claims, TokenKind::Access)?;
        let refresh = self.tokens.mint(&claims, TokenKind::Refresh)?;

        let mut fields: Vec<(String, String)> = session_data
            .into_iter()
            .filter(|(k, _)| k != USER_ID_FIELD)
            .collect();
        fields.push((USER_ID_FIELD.to_owned(), user_id.to_owned()));

        let key = record_key(self.cfg.session_key_prefix(), &ssid);
        if let Err(e) = self
            .store
            .init_record(&key, &fields, self.session_ttl())
            .await
        {
            log::warn!("failed to initialise session {ssid}: {e}");
            // A timed-out batch may still have been applied.
            if let Err(cleanup) = self.store.delete_record(&key).await {
                log::warn!("failed to roll back session {ssid}: {cleanup}");
            }
            return Err(e);
        }

        log::info!("session {ssid} created for user {user_id}");
        let issued = IssuedCredentials {
            ssid,
            access: self.credential(access, TokenKind::Access),
            refresh: Some(self.credential(refresh, TokenKind::Refresh)),
        };
        Ok((self.bind(claims), issued))
    }

    async fn get(&self, headers: &HeaderMap) -> Result<SessionHandle, SessionError> {
        let token = self.access_token(headers).ok_or(SessionError::Unauthorized)?;
        let claims = self.tokens.verify(&token, TokenKind::Access)?.into_claims();
        Ok(self.bind(claims))
    }

    async fn renew_access_token(
        &self,
        headers: &HeaderMap,
    ) -> Result<IssuedCredentials, SessionError> {
        let refresh = self
            .refresh_token(headers)
            .ok_or(SessionError::Unauthorized)?;
        let refresh_claims = self.tokens.verify(&refresh, TokenKind::Refresh)?;

        let access = self.access_token(headers).ok_or(SessionError::Unauthorized)?;
        let access_claims = self
            .tokens
            .verify_allow_expired(&access, TokenKind::Access)?;

        if access_claims.sid != refresh_claims.sid || access_claims.sub != refresh_claims.sub {
            log::debug!(
                "renewal rejected: access ssid {} does not match refresh ssid {}",
                access_claims.sid,
                refresh_claims.sid
            );
            return Err(SessionError::Unauthorized);
        }

        // Existence check and TTL refresh in one call; a missing record means
        // the session was destroyed or expired.
        let key = record_key(self.cfg.session_key_prefix(), &access_claims.sid);
        if !self.store.touch(&key, self.session_ttl()).await? {
            log::debug!("renewal rejected: session {} no longer exists", access_claims.sid);
            return Err(SessionError::Unauthorized);
        }

        let claims = access_claims.into_claims();
        let token = self.tokens.mint(&claims, TokenKind::Access)?;
        Ok(IssuedCredentials {
            ssid: claims.ssid,
            access: self.credential(token, TokenKind::Access),
            refresh: None,
        })
    }

    async fn update_claims(
        &self,
        headers: &HeaderMap,
        claims: Claims,
    ) -> Result<IssuedCredentials, SessionError> {
        let access = self.access_token(headers).ok_or(SessionError::Unauthorized)?;
        let current = self.tokens.verify(&access, TokenKind::Access)?;

        if claims.ssid != current.sid || claims.user_id != current.sub {
            log::debug!(
                "claims update rejected: ssid {} is not bound to this request",
                claims.ssid
            );
            return Err(SessionError::Unauthorized);
        }

        // Read-only liveness check; a destroyed session gets no new credential.
        let key = record_key(self.cfg.session_key_prefix(), &claims.ssid);
        if !self.store.exists(&key).await? {
            log::debug!("claims update rejected: session {} no longer exists", claims.ssid);
            return Err(SessionError::Unauthorized);
        }

        let token = self.tokens.mint(&claims, TokenKind::Access)?;
        Ok(IssuedCredentials {
            ssid: claims.ssid,
            access: self.credential(token, TokenKind::Access),
            refresh: None,
        })
    }
}
