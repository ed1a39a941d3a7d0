use super::CacheStore;
use crate::config::CacheConfig;
use anyhow::{Context, Result};
use async_trait::async_trait;
use redis::AsyncCommands;
use redis::aio::ConnectionManager;
use std::collections::HashSet;
use tracing::info;

/// Redis implementation of [`CacheStore`].
///
/// An explicitly constructed, injectable handle: cloning is cheap and every
/// clone shares one multiplexed connection that reconnects on failure.
/// Dropping the last clone closes the connection.
#[derive(Clone)]
pub struct RedisStore {
    conn: ConnectionManager,
}

impl RedisStore {
    /// Connect to the Redis instance at `url` (e.g. `redis://localhost:6379`).
    pub async fn connect(url: &str) -> Result<Self> {
        let client =
            redis::Client::open(url).with_context(|| format!("Invalid Redis URL: {}", url))?;
        let conn = ConnectionManager::new(client)
            .await
            .with_context(|| format!("Failed to connect to Redis at {}", url))?;
        info!("Connected to Redis at {}", url);
        Ok(Self { conn })
    }

    /// Connect using the URL from a [`CacheConfig`].
    pub async fn from_config(config: &CacheConfig) -> Result<Self> {
        Self::connect(&config.redis_url).await
    }
}

#[async_trait]
impl CacheStore for RedisStore {
    async fn list_replace(&self, key: &str, items: Vec<String>, capacity: usize) -> Result<()> {
        let mut conn = self.conn.clone();
        // DEL + RPUSH + LTRIM as one MULTI/EXEC unit so a concurrent reader
        // never observes the list half-built. RPUSH rejects empty input, so
        // an empty replacement degenerates to a bare DEL.
        let mut pipe = redis::pipe();
        pipe.atomic().del(key).ignore();
        if !items.is_empty() {
            pipe.rpush(key, items).ignore();
            pipe.ltrim(key, -(capacity as isize), -1).ignore();
        }
        let () = pipe.query_async(&mut conn).await?;
        Ok(())
    }

    async fn list_append(&self, key: &str, item: String, capacity: usize) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = redis::pipe()
            .atomic()
            .rpush(key, item)
            .ignore()
            .ltrim(key, -(capacity as isize), -1)
            .ignore()
            .query_async(&mut conn)
            .await?;
        Ok(())
    }

    async fn list_range(&self, key: &str) -> Result<Vec<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.lrange(key, 0, -1).await?)
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = conn.del(key).await?;
        Ok(())
    }

    async fn set_add(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = conn.sadd(key, member).await?;
        Ok(())
    }

    async fn set_remove(&self, key: &str, member: &str) -> Result<()> {
        let mut conn = self.conn.clone();
        let () = conn.srem(key, member).await?;
        Ok(())
    }

    async fn set_members(&self, key: &str) -> Result<HashSet<String>> {
        let mut conn = self.conn.clone();
        Ok(conn.smembers(key).await?)
    }
}
