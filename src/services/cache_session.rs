use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{Claims, Session, SessionStore},
    errors::SessionError,
    utils::USER_ID_FIELD,
};

/// `Session` backed by a record in the key-value cache.
///
/// Holds only the record key and the claims; every read and write goes to
/// the store. The owner field keeps the record alive and is hidden from
/// callers: it reads as absent and cannot be written or deleted.
pub struct CacheSession {
    store: Arc<dyn SessionStore>,
    key: String,
    claims: Claims,
}

impl CacheSession {
    pub fn new(store: Arc<dyn SessionStore>, key_prefix: &str, claims: Claims) -> Self {
        Self {
            store,
            key: record_key(key_prefix, &claims.ssid),
            claims,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }
}

pub fn record_key(prefix: &str, ssid: &str) -> String {
    format!("{prefix}{ssid}")
}

fn reject_reserved(key: &str) -> Result<(), SessionError> {
    if key == USER_ID_FIELD {
        return Err(SessionError::ReservedKey(key.to_owned()));
    }
    Ok(())
}

#[async_trait]
impl Session for CacheSession {
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        reject_reserved(key)?;
        if self.store.set_field(&self.key, key, value).await? {
            Ok(())
        } else {
            Err(SessionError::SessionNotFound)
        }
    }

    async fn get(&self, key: &str) -> Result<String, SessionError> {
        if key == USER_ID_FIELD {
            return Err(SessionError::KeyNotFound);
        }
        self.store
            .get_field(&self.key, key)
            .await?
            .ok_or(SessionError::KeyNotFound)
    }

    async fn del(&self, key: &str) -> Result<(), SessionError> {
        reject_reserved(key)?;
        self.store.del_field(&self.key, key).await
    }

    async fn destroy(&self) -> Result<(), SessionError> {
        self.store.delete_record(&self.key).await?;
        log::info!("session {} destroyed", self.claims.ssid);
        Ok(())
    }

    fn claims(&self) -> &Claims {
        &self.claims
    }
}
