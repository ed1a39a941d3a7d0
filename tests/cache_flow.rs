//! End-to-end cache-aside flows as the request-handling layer drives them:
//! read with miss-then-repopulate, send with incremental append, and
//! edit/delete with whole-entry invalidation.

mod common;

use common::{FailingStore, message_seq};
use convocache::{CachedMessage, MemoryStore, MessageCache};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Stand-in for the durable message store (the system of record).
struct DurableStore {
    messages: Mutex<Vec<CachedMessage>>,
}

impl DurableStore {
    fn with_messages(messages: Vec<CachedMessage>) -> Self {
        Self {
            messages: Mutex::new(messages),
        }
    }

    async fn load_all(&self) -> Vec<CachedMessage> {
        self.messages.lock().await.clone()
    }

    async fn insert(&self, msg: CachedMessage) {
        self.messages.lock().await.push(msg);
    }

    async fn edit(&self, index: usize, body: &str) {
        let mut messages = self.messages.lock().await;
        messages[index].body = body.to_string();
        messages[index].updated_at = chrono::Utc::now();
    }
}

/// What a read handler does: cache first, durable store on miss, write back.
async fn handle_get_messages(
    cache: &MessageCache,
    durable: &DurableStore,
    conversation_id: &str,
) -> Vec<CachedMessage> {
    let cached = cache.get_cached(conversation_id).await;
    if !cached.is_empty() {
        return cached;
    }
    let messages = durable.load_all().await;
    cache.replace_all(conversation_id, &messages).await;
    messages
}

#[tokio::test(flavor = "current_thread")]
async fn miss_then_repopulate_then_hit() {
    let durable = DurableStore::with_messages(message_seq("u1", "u2", 3));
    let cache = MessageCache::new(Arc::new(MemoryStore::new()));

    // First read misses and repopulates from the durable store
    let first = handle_get_messages(&cache, &durable, "c1").await;
    assert_eq!(first.len(), 3);

    // Second read is served from the cache, same content and order
    let second = cache.get_cached("c1").await;
    assert_eq!(second, first);
}

#[tokio::test(flavor = "current_thread")]
async fn send_message_appends_to_both_stores() {
    let durable = DurableStore::with_messages(Vec::new());
    let cache = MessageCache::new(Arc::new(MemoryStore::new()));

    // Freshly created conversation: append works without a prior full load
    let msg = CachedMessage::text("u1", "u2", "first!");
    durable.insert(msg.clone()).await;
    cache.append("c-new", &msg).await;

    let cached = cache.get_cached("c-new").await;
    assert_eq!(cached, vec![msg]);
}

#[tokio::test(flavor = "current_thread")]
async fn edit_invalidates_and_next_read_resyncs() {
    let durable = DurableStore::with_messages(message_seq("u1", "u2", 3));
    let cache = MessageCache::new(Arc::new(MemoryStore::new()));

    handle_get_messages(&cache, &durable, "c1").await;
    assert!(!cache.get_cached("c1").await.is_empty());

    // Edit handler mutates the durable store, then invalidates
    durable.edit(1, "edited body").await;
    cache.invalidate("c1").await;
    assert!(cache.get_cached("c1").await.is_empty());

    // Next read re-synchronizes fully and sees the edit
    let resynced = handle_get_messages(&cache, &durable, "c1").await;
    assert_eq!(resynced[1].body, "edited body");
    assert_eq!(cache.get_cached("c1").await, resynced);
}

#[tokio::test(flavor = "current_thread")]
async fn long_conversation_caches_only_last_fifty() {
    let durable = DurableStore::with_messages(message_seq("u1", "u2", 75));
    let cache = MessageCache::new(Arc::new(MemoryStore::new()));

    // The handler gets the full history; the cache keeps the newest 50
    let all = handle_get_messages(&cache, &durable, "c1").await;
    assert_eq!(all.len(), 75);

    let cached = cache.get_cached("c1").await;
    assert_eq!(cached.len(), 50);
    assert_eq!(cached, all[25..]);
}

#[tokio::test(flavor = "current_thread")]
async fn cache_outage_degrades_to_durable_store() {
    let durable = DurableStore::with_messages(message_seq("u1", "u2", 2));
    let cache = MessageCache::new(Arc::new(FailingStore));

    // Reads fall back, writes are silent no-ops; the handler never errors
    let messages = handle_get_messages(&cache, &durable, "c1").await;
    assert_eq!(messages.len(), 2);

    cache.append("c1", &CachedMessage::text("u1", "u2", "hi")).await;
    cache.invalidate("c1").await;
    assert!(cache.get_cached("c1").await.is_empty());

    // The durable store kept serving the whole time
    assert_eq!(handle_get_messages(&cache, &durable, "c1").await.len(), 2);
}

#[tokio::test(flavor = "current_thread")]
async fn conversations_are_isolated() {
    let cache = MessageCache::new(Arc::new(MemoryStore::new()));
    cache.replace_all("c1", &message_seq("u1", "u2", 2)).await;
    cache.replace_all("c2", &message_seq("u3", "u4", 4)).await;

    cache.invalidate("c1").await;

    assert!(cache.get_cached("c1").await.is_empty());
    assert_eq!(cache.get_cached("c2").await.len(), 4);
}
