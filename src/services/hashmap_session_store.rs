use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;

use crate::{domain::SessionStore, errors::SessionError};

struct Record {
    fields: HashMap<String, String>,
    expires_at: DateTime<Utc>,
}

impl Record {
    fn is_live(&self, now: DateTime<Utc>) -> bool {
        self.expires_at > now
    }
}

/// In-process stand-in for the Redis backend, with the same record/TTL
/// semantics. Expired records are dropped lazily on access.
#[derive(Default)]
pub struct HashmapSessionStore {
    records: RwLock<HashMap<String, Record>>,
}

impl HashmapSessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forces a record past its expiry, as if the backend TTL had fired.
    pub async fn expire_now(&self, key: &str) {
        if let Some(record) = self.records.write().await.get_mut(key) {
            record.expires_at = Utc::now() - Duration::seconds(1);
        }
    }

    pub async fn ttl(&self, key: &str) -> Option<Duration> {
        let now = Utc::now();
        self.records
            .read()
            .await
            .get(key)
            .filter(|r| r.is_live(now))
            .map(|r| r.expires_at - now)
    }

    async fn purge_if_expired(&self, key: &str) {
        let now = Utc::now();
        let mut records = self.records.write().await;
        if records.get(key).is_some_and(|r| !r.is_live(now)) {
            records.remove(key);
        }
    }
}

#[async_trait]
impl SessionStore for HashmapSessionStore {
    async fn init_record(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl: Duration,
    ) -> Result<(), SessionError> {
        let ttl = ttl.max(Duration::seconds(1));
        let mut records = self.records.write().await;
        let record = records.entry(key.to_string()).or_insert_with(|| Record {
            fields: HashMap::new(),
            expires_at: Utc::now() + ttl,
        });
        record.fields.extend(fields.iter().cloned());
        record.expires_at = Utc::now() + ttl;
        Ok(())
    }

    async fn set_field(&self, key: &str, field: &str, value: &str) -> Result<bool, SessionError> {
        self.purge_if_expired(key).await;
        match self.records.write().await.get_mut(key) {
            Some(record) => {
                record.fields.insert(field.to_string(), value.to_string());
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn get_field(&self, key: &str, field: &str) -> Result<Option<String>, SessionError> {
        self.purge_if_expired(key).await;
        Ok(self
            .records
            .read()
            .await
            .get(key)
            .and_then(|r| r.fields.get(field).cloned()))
    }

    async fn del_field(&self, key: &str, field: &str) -> Result<(), SessionError> {
        self.purge_if_expired(key).await;
        let mut records = self.records.write().await;
        if let Some(record) = records.get_mut(key) {
            record.fields.remove(field);
            // Redis drops a hash once its last field is gone.
            if record.fields.is_empty() {
                records.remove(key);
            }
        }
        Ok(())
    }

    async fn delete_record(&self, key: &str) -> Result<(), SessionError> {
        self.records.write().await.remove(key);
        Ok(())
    }

    async fn exists(&self, key: &str) -> Result<bool, SessionError> {
        self.purge_if_expired(key).await;
        Ok(self.records.read().await.contains_key(key))
    }

    async fn touch(&self, key: &str, ttl: Duration) -> Result<bool, SessionError> {
        self.purge_if_expired(key).await;
        match self.records.write().await.get_mut(key) {
            Some(record) => {
                record.expires_at = Utc::now() + ttl.max(Duration::seconds(1));
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
