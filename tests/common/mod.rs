// Shared test helpers — not all items used by every test binary.
#![allow(unused)]

use anyhow::{Result, anyhow};
use async_trait::async_trait;
use chrono::{Duration, Utc};
use convocache::{CacheStore, CachedMessage};
use std::collections::HashSet;

/// Build `count` text messages with strictly increasing creation times,
/// the order the durable store would return them in.
pub fn message_seq(sender: &str, receiver: &str, count: usize) -> Vec<CachedMessage> {
    let base = Utc::now();
    (0..count)
        .map(|i| {
            let mut msg = CachedMessage::text(sender, receiver, format!("message {}", i));
            msg.created_at = base + Duration::seconds(i as i64);
            msg.updated_at = msg.created_at;
            msg
        })
        .collect()
}

/// [`CacheStore`] double whose every operation fails, for exercising the
/// best-effort contract: callers must see a miss or a no-op, never an error.
pub struct FailingStore;

#[async_trait]
impl CacheStore for FailingStore {
    async fn list_replace(&self, _key: &str, _items: Vec<String>, _capacity: usize) -> Result<()> {
        Err(anyhow!("backing store unreachable"))
    }

    async fn list_append(&self, _key: &str, _item: String, _capacity: usize) -> Result<()> {
        Err(anyhow!("backing store unreachable"))
    }

    async fn list_range(&self, _key: &str) -> Result<Vec<String>> {
        Err(anyhow!("backing store unreachable"))
    }

    async fn delete(&self, _key: &str) -> Result<()> {
        Err(anyhow!("backing store unreachable"))
    }

    async fn set_add(&self, _key: &str, _member: &str) -> Result<()> {
        Err(anyhow!("backing store unreachable"))
    }

    async fn set_remove(&self, _key: &str, _member: &str) -> Result<()> {
        Err(anyhow!("backing store unreachable"))
    }

    async fn set_members(&self, _key: &str) -> Result<HashSet<String>> {
        Err(anyhow!("backing store unreachable"))
    }
}
