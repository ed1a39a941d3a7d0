use crate::config::CacheConfig;
use crate::message::CachedMessage;
use crate::store::CacheStore;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, warn};

/// Default number of messages kept per conversation.
pub const DEFAULT_MESSAGE_CAPACITY: usize = 50;

/// Cap on tracked per-conversation locks before pruning idle ones.
const MAX_TRACKED_LOCKS: usize = 1024;

/// Per-conversation, capacity-bounded cache of recent messages, layered
/// cache-aside over the durable message store.
///
/// Entries live under `messages:{conversation_id}` as ordered lists of
/// JSON-serialized [`CachedMessage`]s, oldest first, matching ascending
/// creation-time order. Entries have no TTL; they live until explicitly
/// invalidated. The cache is non-authoritative: the message-mutation
/// handler is responsible for calling [`invalidate`](Self::invalidate)
/// after any edit or soft delete.
///
/// Every operation is best-effort. Backend and serialization failures are
/// logged and surface to the caller as a miss (reads) or a no-op (writes),
/// never as an error — a cache outage must cost latency, not correctness.
pub struct MessageCache {
    store: Arc<dyn CacheStore>,
    capacity: usize,
    // Serializes replace_all/append per conversation. The store's per-key
    // primitives are atomic, but the window between a handler's durable
    // fetch and its repopulating write is not, so writes for the same
    // conversation take a turn here.
    key_locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl MessageCache {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self::with_capacity(store, DEFAULT_MESSAGE_CAPACITY)
    }

    pub fn with_capacity(store: Arc<dyn CacheStore>, capacity: usize) -> Self {
        Self {
            store,
            capacity,
            key_locks: Mutex::new(HashMap::new()),
        }
    }

    pub fn from_config(store: Arc<dyn CacheStore>, config: &CacheConfig) -> Self {
        Self::with_capacity(store, config.message_capacity)
    }

    fn cache_key(conversation_id: &str) -> String {
        format!("messages:{}", conversation_id)
    }

    async fn write_lock(&self, conversation_id: &str) -> Arc<Mutex<()>> {
        let mut locks = self.key_locks.lock().await;
        if locks.len() >= MAX_TRACKED_LOCKS {
            // Keep only locks some task still holds a handle to
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        }
        locks
            .entry(conversation_id.to_string())
            .or_default()
            .clone()
    }

    /// The cached messages for `conversation_id`, oldest first.
    ///
    /// An empty result means "miss": a conversation cached with zero
    /// messages is indistinguishable from one never cached at all, and the
    /// caller falls through to the durable store either way. This collapse
    /// is deliberate — the durable fetch for a truly empty conversation is
    /// also empty, so re-fetching is harmless.
    ///
    /// A malformed element makes the whole entry a miss; the entry is
    /// dropped (best effort) so the next read repopulates cleanly instead
    /// of serving a partial history.
    pub async fn get_cached(&self, conversation_id: &str) -> Vec<CachedMessage> {
        let key = Self::cache_key(conversation_id);
        let raw = match self.store.list_range(&key).await {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Cache read failed for {}: {}", key, e);
                return Vec::new();
            }
        };

        let mut messages = Vec::with_capacity(raw.len());
        for entry in &raw {
            match serde_json::from_str::<CachedMessage>(entry) {
                Ok(msg) => messages.push(msg),
                Err(e) => {
                    warn!("Malformed entry under {}, treating as miss: {}", key, e);
                    if let Err(e) = self.store.delete(&key).await {
                        debug!("Failed to drop malformed entry {}: {}", key, e);
                    }
                    return Vec::new();
                }
            }
        }

        if messages.is_empty() {
            debug!("Cache miss for conversation {}", conversation_id);
        } else {
            debug!(
                "Cache hit for conversation {}: {} messages",
                conversation_id,
                messages.len()
            );
        }
        messages
    }

    /// Replace the entry with the conversation's full message list from the
    /// durable store, in ascending creation-time order, keeping only the
    /// newest `capacity` messages. Idempotent; called once per
    /// miss-then-repopulate cycle.
    pub async fn replace_all(&self, conversation_id: &str, messages: &[CachedMessage]) {
        let lock = self.write_lock(conversation_id).await;
        let _guard = lock.lock().await;

        let items: Vec<String> = match messages.iter().map(serde_json::to_string).collect() {
            Ok(items) => items,
            Err(e) => {
                warn!(
                    "Failed to serialize messages for conversation {}: {}",
                    conversation_id, e
                );
                return;
            }
        };

        let key = Self::cache_key(conversation_id);
        match self.store.list_replace(&key, items, self.capacity).await {
            Ok(()) => debug!(
                "Cached {} messages for conversation {}",
                messages.len(),
                conversation_id
            ),
            Err(e) => warn!("Cache populate failed for {}: {}", key, e),
        }
    }

    /// Append one newly created message, trimming the oldest past capacity.
    ///
    /// Works on an absent entry: a fresh conversation accumulates its cache
    /// incrementally without requiring an initial full load.
    pub async fn append(&self, conversation_id: &str, message: &CachedMessage) {
        let lock = self.write_lock(conversation_id).await;
        let _guard = lock.lock().await;

        let item = match serde_json::to_string(message) {
            Ok(item) => item,
            Err(e) => {
                warn!(
                    "Failed to serialize message for conversation {}: {}",
                    conversation_id, e
                );
                return;
            }
        };

        let key = Self::cache_key(conversation_id);
        if let Err(e) = self.store.list_append(&key, item, self.capacity).await {
            warn!("Cache append failed for {}: {}", key, e);
        }
    }

    /// Remove the entry for `conversation_id` entirely, forcing the next
    /// read to re-synchronize from the durable store.
    ///
    /// The entry holds denormalized copies, so a single edited or deleted
    /// message stales the whole list; whole-entry invalidation trades hit
    /// rate for correctness.
    pub async fn invalidate(&self, conversation_id: &str) {
        let key = Self::cache_key(conversation_id);
        match self.store.delete(&key).await {
            Ok(()) => debug!(
                "Invalidated message cache for conversation {}",
                conversation_id
            ),
            Err(e) => warn!("Cache invalidation failed for {}: {}", key, e),
        }
    }
}
