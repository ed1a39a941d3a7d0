mod memory;
mod redis;

pub use self::memory::MemoryStore;
pub use self::redis::RedisStore;

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashSet;

/// Key-value primitives the cache and presence layers are built on.
///
/// This is the pluggable-backend seam: [`RedisStore`] is the production
/// implementation, [`MemoryStore`] serves tests and Redis-less runs.
///
/// Implementations must make each operation atomic at the key level — in
/// particular `list_replace` (delete + bulk push + trim) and `list_append`
/// (push + trim) are single logical units, never separate round trips a
/// concurrent operation on the same key could interleave with.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Replace the list at `key` with `items`, keeping only the last
    /// `capacity` elements (oldest dropped first). An empty `items` removes
    /// the key: an absent key and an empty list are the same observable
    /// state.
    async fn list_replace(&self, key: &str, items: Vec<String>, capacity: usize) -> Result<()>;

    /// Append one item to the list at `key` (creating it if absent), then
    /// trim to the last `capacity` elements.
    async fn list_append(&self, key: &str, item: String, capacity: usize) -> Result<()>;

    /// The full list at `key`, oldest first. An absent key yields an empty
    /// list.
    async fn list_range(&self, key: &str) -> Result<Vec<String>>;

    /// Remove `key` entirely. Removing an absent key is a no-op.
    async fn delete(&self, key: &str) -> Result<()>;

    /// Add `member` to the set at `key`. Idempotent.
    async fn set_add(&self, key: &str, member: &str) -> Result<()>;

    /// Remove `member` from the set at `key`. Idempotent.
    async fn set_remove(&self, key: &str, member: &str) -> Result<()>;

    /// All members of the set at `key`, unordered.
    async fn set_members(&self, key: &str) -> Result<HashSet<String>>;
}
