use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{
    domain::{Claims, Session},
    errors::SessionError,
};

/// Self-contained `Session` for tests: the data lives in the handle itself.
///
/// `destroy` and `update_claims` are deliberate no-ops. The handle is not
/// registered anywhere, so there is nothing to remove, and test lifetimes end
/// with the process. Do not use outside tests.
pub struct MemorySession {
    data: RwLock<HashMap<String, String>>,
    claims: Claims,
}

impl MemorySession {
    pub fn new(claims: Claims) -> Self {
        Self {
            data: RwLock::new(HashMap::new()),
            claims,
        }
    }

    pub fn with_data(claims: Claims, data: HashMap<String, String>) -> Self {
        Self {
            data: RwLock::new(data),
            claims,
        }
    }

    /// No-op: claims on a memory session are fixed for its lifetime.
    pub async fn update_claims(&self, _claims: Claims) -> Result<(), SessionError> {
        Ok(())
    }
}

#[async_trait]
impl Session for MemorySession {
    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.data
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<String, SessionError> {
        self.data
            .read()
            .await
            .get(key)
            .cloned()
            .ok_or(SessionError::KeyNotFound)
    }

    async fn del(&self, key: &str) -> Result<(), SessionError> {
        self.data.write().await.remove(key);
        Ok(())
    }

    async fn destroy(&self) -> Result<(), SessionError> {
        Ok(())
    }

    fn claims(&self) -> &Claims {
        &self.claims
    }
}
