use std::collections::HashSet;
use std::env;
use std::time::Duration;

use base64::engine::general_purpose::{STANDARD as B64_STD, URL_SAFE_NO_PAD as B64_URL};
use base64::Engine;
use dotenvy::dotenv;
use serde::Deserialize;
use thiserror::Error;

use super::consts::{
    DEFAULT_ACCESS_COOKIE_NAME, DEFAULT_BACKEND_TIMEOUT_MS, DEFAULT_REDIS_HOST,
    DEFAULT_REFRESH_COOKIE_NAME, DEFAULT_SESSION_KEY_PREFIX,
};

/// Immutable runtime settings for the session subsystem.
///
/// Loaded once at startup and shared as `Arc<Config>`; nothing in the request
/// path takes a lock to read it.
#[derive(Clone, Debug)]
pub struct Config {
    issuer: String,
    audience: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
    session_ttl_seconds: i64,
    jwt_keys: Vec<(String, Vec<u8>)>, // (kid, secret)
    active_kid: String,
    access_cookie_name: String,
    refresh_cookie_name: String,
    session_key_prefix: String,
    redis_host: String,
    backend_timeout: Duration,
}

impl Config {
    pub fn jwt_issuer(&self) -> &str {
        &self.issuer
    }
    pub fn jwt_audience(&self) -> &str {
        &self.audience
    }
    pub fn access_ttl_seconds(&self) -> i64 {
        self.access_ttl_seconds
    }
    pub fn refresh_ttl_seconds(&self) -> i64 {
        self.refresh_ttl_seconds
    }
    /// TTL applied to the server-side record at creation and on every renewal.
    pub fn session_ttl_seconds(&self) -> i64 {
        self.session_ttl_seconds
    }
    pub fn jwt_keys(&self) -> &[(String, Vec<u8>)] {
        &self.jwt_keys
    }
    pub fn jwt_active_kid(&self) -> &str {
        &self.active_kid
    }
    pub fn access_cookie_name(&self) -> &str {
        &self.access_cookie_name
    }
    pub fn refresh_cookie_name(&self) -> &str {
        &self.refresh_cookie_name
    }
    pub fn session_key_prefix(&self) -> &str {
        &self.session_key_prefix
    }
    pub fn redis_host(&self) -> &str {
        &self.redis_host
    }
    pub fn backend_timeout(&self) -> Duration {
        self.backend_timeout
    }

    pub fn default() -> Result<Self, ConfigError> {
        // Load .env in dev; no-op in prod if not present.
        let _ = dotenv();

        let issuer = req_var("JWT_ISSUER")?;
        let audience = req_var("JWT_AUDIENCE")?;

        let access_ttl_seconds = parse_positive_i64("ACCESS_TTL_SECONDS")?;
        let refresh_ttl_seconds = parse_positive_i64("REFRESH_TTL_SECONDS")?;
        if refresh_ttl_seconds < access_ttl_seconds {
            return Err(ConfigError::Invalid(
                "REFRESH_TTL_SECONDS must not be shorter than ACCESS_TTL_SECONDS",
            ));
        }
        let session_ttl_seconds = match opt_var("SESSION_TTL_SECONDS") {
            Some(_) => parse_positive_i64("SESSION_TTL_SECONDS")?,
            None => refresh_ttl_seconds,
        };

        let active_kid = req_var("JWT_ACTIVE_KID")?;
        let jwt_keys = parse_hs256_keys_json("JWT_HS256_KEYS_JSON")?;
        let kids: HashSet<_> = jwt_keys.iter().map(|(k, _)| k).collect();
        if !kids.contains(&active_kid) {
            return Err(ConfigError::Invalid(
                "JWT_ACTIVE_KID not found in JWT_HS256_KEYS_JSON",
            ));
        }

        let access_cookie_name =
            opt_var("ACCESS_COOKIE_NAME").unwrap_or_else(|| DEFAULT_ACCESS_COOKIE_NAME.into());
        let refresh_cookie_name =
            opt_var("REFRESH_COOKIE_NAME").unwrap_or_else(|| DEFAULT_REFRESH_COOKIE_NAME.into());
        let session_key_prefix =
            opt_var("SESSION_KEY_PREFIX").unwrap_or_else(|| DEFAULT_SESSION_KEY_PREFIX.into());
        let redis_host = opt_var("REDIS_HOST").unwrap_or_else(|| DEFAULT_REDIS_HOST.into());

        let backend_timeout_ms = match opt_var("BACKEND_TIMEOUT_MS") {
            Some(_) => parse_positive_i64("BACKEND_TIMEOUT_MS")? as u64,
            None => DEFAULT_BACKEND_TIMEOUT_MS,
        };

        Ok(Self {
            issuer,
            audience,
            access_ttl_seconds,
            refresh_ttl_seconds,
            session_ttl_seconds,
            jwt_keys,
            active_kid,
            access_cookie_name,
            refresh_cookie_name,
            session_key_prefix,
            redis_host,
            backend_timeout: Duration::from_millis(backend_timeout_ms),
        })
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing env var {0}")]
    Missing(&'static str),
    #[error("invalid env var {0}")]
    Invalid(&'static str),
    #[error("decode error in {0}")]
    Decode(&'static str),
    #[error("{0}")]
    WrongLen(&'static str),
}

fn req_var(key: &'static str) -> Result<String, ConfigError> {
    env::var(key).map_err(|_| ConfigError::Missing(key))
}

fn opt_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_positive_i64(key: &'static str) -> Result<i64, ConfigError> {
    let v = req_var(key)?;
    match v.trim().parse::<i64>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::Invalid(key)),
    }
}

/// Secrets may be URL-safe (unpadded) or standard base64.
fn decode_b64_any(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    B64_URL.decode(s).or_else(|_| B64_STD.decode(s))
}

/// One entry of `JWT_HS256_KEYS_JSON`.
#[derive(Deserialize)]
struct KeyEntry {
    kid: String,
    secret_b64: String,
}

impl KeyEntry {
    fn into_secret(self, key_name: &'static str) -> Result<(String, Vec<u8>), ConfigError> {
        let secret = decode_b64_any(&self.secret_b64).map_err(|_| ConfigError::Decode(key_name))?;
        if secret.len() < 32 {
            return Err(ConfigError::WrongLen("HS256 secret shorter than 32 bytes"));
        }
        Ok((self.kid, secret))
    }
}

fn parse_hs256_keys_json(key_name: &'static str) -> Result<Vec<(String, Vec<u8>)>, ConfigError> {
    parse_hs256_keys(&req_var(key_name)?, key_name)
}

fn parse_hs256_keys(
    raw: &str,
    key_name: &'static str,
) -> Result<Vec<(String, Vec<u8>)>, ConfigError> {
    let entries: Vec<KeyEntry> =
        serde_json::from_str(raw).map_err(|_| ConfigError::Invalid(key_name))?;
    if entries.is_empty() {
        return Err(ConfigError::Invalid("key ring is empty"));
    }

    let mut kids = HashSet::with_capacity(entries.len());
    if !entries.iter().all(|e| kids.insert(e.kid.as_str())) {
        return Err(ConfigError::Invalid("kid listed twice in key ring"));
    }

    entries
        .into_iter()
        .map(|e| e.into_secret(key_name))
        .collect()
}
