//! Expiring Cache - a persisted key-value cache
//!
//! Entries expire after a time-to-live checked at read time. The cache
//! mirrors every entry to a size-limited backing store and evicts the least
//! recently used entry whenever that store runs out of room.

pub mod api;
pub mod backend;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use backend::{BackingStore, FileStore, MemoryStore, StoreError};
pub use cache::{Cache, CacheEntry, CacheOptions, Ttl};
pub use config::Config;
pub use error::{CacheError, Result};
pub use tasks::spawn_clean_task;
