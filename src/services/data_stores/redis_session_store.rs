use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;

use crate::{domain::SessionStore, errors::SessionError, services::RedisService};

/// Session records as Redis hashes.
pub struct RedisSessionStore {
    redis_service: Arc<RedisService>,
}

impl RedisSessionStore {
    pub fn new(redis_service: Arc<RedisService>) -> Self {
        Self { redis_service }
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn init_record(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), SessionError> {
        self.redis_service
            .init_hash(key, fields, ttl.num_seconds())
            .await
            .map_err(SessionError::from)
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<bool, SessionError> {
        self.redis_service
            .set_hash_field_if_exists(key, field, value)
            .await
            .map_err(SessionError::from)
    }

    async fn get_field(&self, key: &str, field: &str) -> Result<Option<String>, SessionError> {
        self.redis_service
            .get_hash_field(key, field)
            .await
            .map_err(SessionError::from)
    }

    async fn del_field(&self, key: &str, field: &str) -> Result<(), SessionError> {
        self.redis_service.delete_hash_field(key, field).await?;
        Ok(())
    }

    async fn delete_record(&self, key: &str) -> Result<(), SessionError> {
        self.redis_service.delete_key(key).await?;
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, SessionError> {
        self.redis_service
            .exists(key)
            .await
            .map_err(SessionError::from)
    }

    async fn touch(&self, key: &str, ttl: Duration) -> Result<bool, SessionError> {
        self.redis_service
            .expire(key, ttl.num_seconds())
            .await
            .map_err(SessionError::from)
    }
}
