use std::sync::Arc;

use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};

use super::Claims;
use crate::errors::SessionError;

/// A handle bound to one SSID.
///
/// The handle holds nothing but its `Claims`; auxiliary data always lives in
/// the backend, so two handles for the same SSID observe each other's writes.
/// Values are opaque strings: callers serialize before `set`.
#[async_trait]
pub trait Session: Send + Sync {
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError>;
    /// Fails with `KeyNotFound` when the field (or the whole record) is absent.
    async fn get(&self, key: &str) -> Result<String, SessionError>;
    /// Deleting an absent key is not an error.
    async fn del(&self, key: &str) -> Result<(), SessionError>;
    /// Removes the whole server-side record. Idempotent.
    async fn destroy(&self) -> Result<(), SessionError>;
    /// Claims captured when the handle was created or validated.
    fn claims(&self) -> &Claims;
}

pub type SessionHandle = Arc<dyn Session>;

impl dyn Session {
    pub async fn set_json<T: Serialize + ?Sized>(
        &self,
        key: &str,
        value: &T,
    ) -> Result<(), SessionError> {
        let raw = serde_json::to_string(value)
            .map_err(|e| SessionError::InvalidValue(format!("encode {key}: {e}")))?;
        self.set(key, &raw).await
    }

    pub async fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<T, SessionError> {
        let raw = self.get(key).await?;
        serde_json::from_str(&raw)
            .map_err(|e| SessionError::InvalidValue(format!("decode {key}: {e}")))
    }
}
