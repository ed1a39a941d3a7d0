use serde::{Deserialize, Serialize};

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_message_capacity() -> usize {
    50
}

/// Configuration for the cache subsystem.
///
/// Deserializable from whatever config format the embedding application
/// uses; every field has a default so an empty section is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Connection URL for the backing store.
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Maximum number of messages kept per conversation entry.
    #[serde(default = "default_message_capacity")]
    pub message_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            redis_url: default_redis_url(),
            message_capacity: default_message_capacity(),
        }
    }
}
