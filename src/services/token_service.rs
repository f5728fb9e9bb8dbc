//! Minting and verification of the signed session credentials.
//!
//! Both credentials are HS256 JWTs carrying the same `Claims`; a `typ` claim
//! keeps a refresh credential from being accepted where an access credential
//! is expected and the other way round. Keys come from a kid-indexed ring so
//! secrets can be rotated without invalidating live tokens.
use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, Header, Validation};
use uuid::Uuid;

use crate::domain::{Claims, JwtKeyStore, TokenClaims, TokenKind};
use crate::errors::SessionError;
use crate::utils::config::Config;

#[derive(Clone)]
pub struct TokenService {
    cfg: Arc<Config>,
    keys: Arc<JwtKeyStore>,
}

impl TokenService {
    pub fn new(cfg: Arc<Config>) -> Self {
        let keys = Arc::new(JwtKeyStore::from_config(
            cfg.jwt_keys(),
            cfg.jwt_active_kid(),
        ));
        Self { cfg, keys }
    }

    pub fn ttl_seconds(&self, kind: TokenKind) -> i64 {
        match kind {
            TokenKind::Access => self.cfg.access_ttl_seconds(),
            TokenKind::Refresh => self.cfg.refresh_ttl_seconds(),
        }
    }

    /// Build & sign a credential of the given kind embedding `claims`.
    pub fn mint(&self, claims: &Claims, kind: TokenKind) -> Result<String, SessionError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.ttl_seconds(kind));

        let payload = TokenClaims {
            sub: claims.user_id.clone(),
            sid: claims.ssid.clone(),
            data: claims.data.clone(),
            typ: kind,
            iss: self.cfg.jwt_issuer().to_owned(),
            aud: self.cfg.jwt_audience().to_owned(),
            exp: exp.timestamp() as usize,
            iat: now.timestamp() as usize,
            jti: Uuid::new_v4().to_string(),
        };

        let (enc_key, kid) = self.keys.encoding_key_and_kid()?;
        let mut header = Header::new(Algorithm::HS256);
        header.kid = Some(kid.to_string());

        encode(&header, &payload, &enc_key).map_err(|e| SessionError::SigningFailure(e.to_string()))
    }

    /// Signature, issuer, audience, expiry and kind.
    pub fn verify(&self, token: &str, kind: TokenKind) -> Result<TokenClaims, SessionError> {
        self.verify_inner(token, kind, true)
    }

    /// Like `verify`, but an expired token is still accepted. The signature
    /// is always checked.
    pub fn verify_allow_expired(
        &self,
        token: &str,
        kind: TokenKind,
    ) -> Result<TokenClaims, SessionError> {
        self.verify_inner(token, kind, false)
    }

    fn verify_inner(
        &self,
        token: &str,
        kind: TokenKind,
        check_exp: bool,
    ) -> Result<TokenClaims, SessionError> {
        let header = decode_header(token).map_err(|_| SessionError::Unauthorized)?;
        let key = self
            .keys
            .decoding_key_for_kid(header.kid.as_deref())
            .ok_or(SessionError::Unauthorized)?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.cfg.jwt_issuer()]);
        validation.set_audience(&[self.cfg.jwt_audience()]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);
        validation.validate_exp = check_exp;
        validation.leeway = 0;

        let data = decode::<TokenClaims>(token, &key, &validation).map_err(|e| {
            log::debug!("credential rejected: {e}");
            SessionError::Unauthorized
        })?;

        if data.claims.typ != kind {
            log::debug!("credential rejected: expected {:?}, got {:?}", kind, data.claims.typ);
            return Err(SessionError::Unauthorized);
        }
        if data.claims.sid.is_empty() {
            return Err(SessionError::Unauthorized);
        }

        Ok(data.claims)
    }
}
