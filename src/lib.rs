#![warn(clippy::pedantic)]
// Noisy doc/signature lints — would require annotating most pub functions
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Module structure — store::CacheStore, cache::MessageCache by design
#![allow(clippy::module_name_repetitions)]
// Style preference — keeping format!("{}", x) over format!("{x}")
#![allow(clippy::uninlined_format_args)]
// Intentional casts where list lengths meet Redis index arithmetic
#![allow(clippy::cast_possible_wrap)]

//! Conversation message cache for a chat backend.
//!
//! Sits between the request-handling layer and the durable message store,
//! keeping a capacity-bounded, order-preserving list of the most recent
//! messages per conversation in an external key-value store (Redis in
//! production), used cache-aside: handlers read the cache first, fall back
//! to the durable store on miss, and write the result back. The same
//! backing store also tracks which users are currently online.
//!
//! The cache is best-effort and never a system of record: every operation
//! swallows backing-store failures, so a total cache outage degrades
//! latency, not correctness.

pub mod cache;
pub mod config;
pub mod errors;
pub mod message;
pub mod presence;
pub mod store;

pub use cache::{DEFAULT_MESSAGE_CAPACITY, MessageCache};
pub use config::CacheConfig;
pub use errors::{CacheError, CacheResult};
pub use message::{CachedMessage, MessageKind};
pub use presence::PresenceTracker;
pub use store::{CacheStore, MemoryStore, RedisStore};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
