use thiserror::Error;

/// Typed error hierarchy for the cache subsystem.
///
/// Use at the storage boundary. Internal/leaf functions can continue using
/// `anyhow::Result` — the `Internal` variant allows seamless conversion via
/// the `?` operator. Note that the public cache and presence surfaces
/// swallow their own errors (best-effort contract), so these types mostly
/// travel through logs.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Backend error: {0}")]
    Backend(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenience alias for results using [`CacheError`].
pub type CacheResult<T> = std::result::Result<T, CacheError>;

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Backend(err.to_string())
    }
}

impl CacheError {
    /// Whether this error is transient (backend unreachable, timeouts) as
    /// opposed to a data or configuration problem.
    pub fn is_transient(&self) -> bool {
        matches!(self, CacheError::Backend(_))
    }
}
