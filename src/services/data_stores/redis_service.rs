use std::fmt;
use std::future::Future;
use std::time::Duration;

use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Client, RedisResult, Script};
use std::error::Error;
use tokio::time::timeout;

// Common seconds type for Redis expirations
type Seconds = i64;

// HSET only when the record is still alive, so writes never resurrect a
// destroyed or expired session.
const SET_IF_EXISTS: &str = r"
if redis.call('EXISTS', KEYS[1]) == 1 then
    redis.call('HSET', KEYS[1], ARGV[1], ARGV[2])
    return 1
end
return 0
";

// Small helper to shorten CRUD error mapping
fn crud<E: ToString>(e: E) -> RedisServiceErr {
    RedisServiceErr::CRUDErr(e.to_string())
}

#[derive(Debug)]
pub enum RedisServiceErr {
    ConnectionErr(String),
    CRUDErr(String),
    Timeout,
}

impl fmt::Display for RedisServiceErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RedisServiceErr::ConnectionErr(str) => {
                write!(f, "error while connecting to instance: {str}")
            }
            RedisServiceErr::CRUDErr(str) => write!(f, "error while performing CRUD action: {str}"),
            RedisServiceErr::Timeout => write!(f, "redis call exceeded its deadline"),
        }
    }
}

impl Error for RedisServiceErr {}

/// Thin wrapper over a multiplexed Redis connection. Every call is bounded by
/// `command_timeout`; nothing is retried.
#[derive(Clone)]
pub struct RedisService {
    conn: MultiplexedConnection,
    command_timeout: Duration,
}

impl RedisService {
    pub async fn connect(host_url: &str, command_timeout: Duration) -> Result<Self, RedisServiceErr> {
        let formatted_url = format!("redis://{}/", host_url);
        let client =
            Client::open(formatted_url).map_err(|e| RedisServiceErr::ConnectionErr(e.to_string()))?;
        let conn = match timeout(command_timeout, client.get_multiplexed_async_connection()).await {
            Ok(conn) => conn.map_err(|e| RedisServiceErr::ConnectionErr(e.to_string()))?,
            Err(_) => return Err(RedisServiceErr::Timeout),
        };
        Ok(Self {
            conn,
            command_timeout,
        })
    }

    async fn bounded<T, F>(&self, fut: F) -> Result<T, RedisServiceErr>
    where
        F: Future<Output = RedisResult<T>>,
    {
        match timeout(self.command_timeout, fut).await {
            Ok(res) => res.map_err(crud),
            Err(_) => Err(RedisServiceErr::Timeout),
        }
    }

    /// HSET all fields and EXPIRE the key inside one MULTI/EXEC.
    pub async fn init_hash(
        &self,
        key: &str,
        fields: &[(String, String)],
        ttl_seconds: Seconds,
    ) -> Result<(), RedisServiceErr> {
        let mut conn = self.conn.clone();
        let ttl_seconds = ttl_seconds.max(1);

        let mut pipe = redis::pipe();
        pipe.atomic();
        if !fields.is_empty() {
            pipe.hset_multiple(key, fields).ignore();
        }
        pipe.expire(key, ttl_seconds).ignore();

        self.bounded(async move {
            let _: () = pipe.query_async(&mut conn).await?;
            Ok(())
        })
        .await
    }

    pub async fn set_hash_field_if_exists(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<bool, RedisServiceErr> {
        let mut conn = self.conn.clone();
        let script = Script::new(SET_IF_EXISTS);
        let written: i64 = self
            .bounded(async move {
                script
                    .key(key)
                    .arg(field)
                    .arg(value)
                    .invoke_async(&mut conn)
                    .await
            })
            .await?;
        Ok(written == 1)
    }

    pub async fn get_hash_field(
        &self,
        key: &str,
        field: &str,
    ) -> Result<Option<String>, RedisServiceErr> {
        let mut conn = self.conn.clone();
        self.bounded(async move { conn.hget(key, field).await }).await
    }

    pub async fn get_hash_all(&self, key: &str) -> Result<Vec<(String, String)>, RedisServiceErr> {
        let mut conn = self.conn.clone();
        self.bounded(async move { conn.hgetall(key).await }).await
    }

    pub async fn delete_hash_field(&self, key: &str, field: &str) -> Result<bool, RedisServiceErr> {
        let mut conn = self.conn.clone();
        let removed: i64 = self.bounded(async move { conn.hdel(key, field).await }).await?;
        Ok(removed > 0)
    }

    pub async fn exists(&self, key: &str) -> Result<bool, RedisServiceErr> {
        let mut conn = self.conn.clone();
        self.bounded(async move { conn.exists(key).await }).await
    }

    pub async fn expire(&self, key: &str, ttl_seconds: Seconds) -> Result<bool, RedisServiceErr> {
        let mut conn = self.conn.clone();
        let ttl_seconds = ttl_seconds.max(1);
        self.bounded(async move { conn.expire(key, ttl_seconds).await })
            .await
    }

    pub async fn ttl(&self, key: &str) -> Result<Seconds, RedisServiceErr> {
        let mut conn = self.conn.clone();
        self.bounded(async move { conn.ttl(key).await }).await
    }

    pub async fn delete_key(&self, key: &str) -> Result<bool, RedisServiceErr> {
        let mut conn = self.conn.clone();
        let deleted: i64 = self.bounded(async move { conn.del(key).await }).await?;
        Ok(deleted > 0)
    }
}
