//! Cache Module
//!
//! Persisted key-value caching with time-based expiration and LRU eviction
//! under backing store quota pressure.

mod entry;
mod lru;
mod options;
mod stats;
mod store;
mod ttl;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use lru::least_recently_used;
pub use options::{CacheOptions, WrapKeyFn};
pub use stats::CacheStats;
pub use store::Cache;
pub use ttl::Ttl;

// == Public Constants ==
/// Namespace prepended to keys when no prefix is configured
pub const DEFAULT_PREFIX: &str = "cache:";

/// Default entry lifetime in seconds (one day)
pub const DEFAULT_DURATION_SECS: u64 = 60 * 60 * 24;

/// Reserved key remembering when `clean` last purged
pub const LAST_CLEAN_KEY: &str = "__lastClean";

/// Maximum allowed key length in bytes for keys arriving over HTTP
pub const MAX_KEY_LENGTH: usize = 256;
