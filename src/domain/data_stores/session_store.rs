use async_trait::async_trait;
use chrono::Duration;

use crate::errors::SessionError;

/// The key-value cache a session record lives in: one hash per record, with
/// a TTL on the record as a whole.
///
/// Each method is expected to be atomic on the backend side. Implementations
/// must bound every call with their own deadline and never retry.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Writes all fields and applies the TTL as a single batch, so the record
    /// is never observable without an expiry.
    async fn init_record(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), SessionError>;

    /// Sets one field on an existing record. Returns `false`, writing nothing,
    /// when the record does not exist.
    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<bool, SessionError>;

    async fn get_field(&self, key: &str, field: &str) -> Result<Option<String>, SessionError>;

    async fn del_field(&self, key: &str, field: &str) -> Result<(), SessionError>;

    async fn delete_record(&self, key: &str) -> Result<(), SessionError>;

    async fn exists(&self, key: &str) -> Result<bool, SessionError>;

    /// Resets the record's TTL. Returns `false` when the record does not exist.
    async fn touch(&self, key: &str, ttl: Duration) -> Result<bool, SessionError>;
}
