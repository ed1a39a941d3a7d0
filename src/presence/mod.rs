use crate::store::CacheStore;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

const ONLINE_USERS_KEY: &str = "online_users";

/// Tracks which users currently hold a live connection, as a set in the
/// same backing store the message cache uses (no shared keyspace).
///
/// Same best-effort posture as the cache: a backing-store failure must not
/// take down the connection handler, so add/remove failures are logged and
/// swallowed, and listing degrades to an empty set.
pub struct PresenceTracker {
    store: Arc<dyn CacheStore>,
}

impl PresenceTracker {
    pub fn new(store: Arc<dyn CacheStore>) -> Self {
        Self { store }
    }

    /// Record `user_id` as online. Idempotent.
    pub async fn mark_online(&self, user_id: &str) {
        match self.store.set_add(ONLINE_USERS_KEY, user_id).await {
            Ok(()) => debug!("User {} online", user_id),
            Err(e) => warn!("Failed to mark {} online: {}", user_id, e),
        }
    }

    /// Record `user_id` as offline. Idempotent.
    pub async fn mark_offline(&self, user_id: &str) {
        match self.store.set_remove(ONLINE_USERS_KEY, user_id).await {
            Ok(()) => debug!("User {} offline", user_id),
            Err(e) => warn!("Failed to mark {} offline: {}", user_id, e),
        }
    }

    /// All currently online user ids, unordered. Empty on backend failure.
    pub async fn list_online(&self) -> HashSet<String> {
        match self.store.set_members(ONLINE_USERS_KEY).await {
            Ok(users) => users,
            Err(e) => {
                warn!("Failed to list online users: {}", e);
                HashSet::new()
            }
        }
    }
}
