//! Durable cache client.
//!
//! The backend is best-effort by contract: a read error is a miss, a write
//! error is a dropped write, and neither ever propagates into the request
//! pipeline.

use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

use redis::aio::ConnectionManager;
use redis::AsyncCommands;

use foretick_core::PredictionCache;

/// Upper bound on one cache round-trip; a backend slower than this reads
/// as a miss so it cannot occupy a worker.
const CACHE_OP_TIMEOUT: Duration = Duration::from_secs(2);

/// Redis-backed [`PredictionCache`].
///
/// The connection manager reconnects on its own after transient failures;
/// while the backend is down every lookup reads as a miss and the service
/// keeps computing results directly.
#[derive(Clone)]
pub struct RedisCache {
    manager: ConnectionManager,
}

impl RedisCache {
    pub async fn connect(url: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self { manager })
    }
}

impl PredictionCache for RedisCache {
    fn get<'a>(&'a self, key: &'a str) -> Pin<Box<dyn Future<Output = Option<String>> + Send + 'a>> {
        Box::pin(async move {
            let mut conn = self.manager.clone();
            match tokio::time::timeout(CACHE_OP_TIMEOUT, conn.get::<_, Option<String>>(key)).await
            {
                Ok(Ok(value)) => value,
                Ok(Err(error)) => {
                    tracing::warn!(%key, %error, "durable cache read failed; treating as miss");
                    None
                }
                Err(_) => {
                    tracing::warn!(%key, "durable cache read timed out; treating as miss");
                    None
                }
            }
        })
    }

    fn set<'a>(
        &'a self,
        key: &'a str,
        value: String,
        ttl: Duration,
    ) -> Pin<Box<dyn Future<Output = ()> + Send + 'a>> {
        Box::pin(async move {
            let mut conn = self.manager.clone();
            match tokio::time::timeout(
                CACHE_OP_TIMEOUT,
                conn.set_ex::<_, _, ()>(key, value, ttl.as_secs()),
            )
            .await
            {
                Ok(Ok(())) => {}
                Ok(Err(error)) => {
                    tracing::warn!(%key, %error, "durable cache write dropped");
                }
                Err(_) => {
                    tracing::warn!(%key, "durable cache write timed out; dropped");
                }
            }
        })
    }
}
