//! Backing Store Module
//!
//! Defines the durable key-value contract the cache persists to, along with
//! the in-memory and file-backed implementations.

mod file;
mod memory;

use thiserror::Error;
use tracing::warn;

pub use file::FileStore;
pub use memory::MemoryStore;

// == Public Constants ==
/// Reserved key written and removed by the availability probe
pub const PROBE_KEY: &str = "__storageTest";

// == Store Error ==
/// Failures reported by a backing store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The write would exceed the store's capacity
    #[error("Quota exceeded writing '{key}': needed {needed} bytes, {available} available")]
    QuotaExceeded {
        key: String,
        needed: usize,
        available: usize,
    },

    /// Underlying I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Store cannot be used at all
    #[error("Store unavailable: {0}")]
    Unavailable(String),
}

impl StoreError {
    /// Returns true for capacity failures, the only kind eviction can fix.
    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, StoreError::QuotaExceeded { .. })
    }
}

// == Backing Store ==
/// A synchronous string-to-string store that may reject writes when full.
pub trait BackingStore: Send + Sync {
    /// Returns the raw value under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// Must fail with [`StoreError::QuotaExceeded`] when the write does not fit.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Removes `key`. Removing an absent key is not an error.
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;

    /// Enumerates every key currently held.
    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<S: BackingStore + ?Sized> BackingStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        (**self).remove(key)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}

// == Probe ==
/// Checks that a store round-trips a write, then cleans up after itself.
///
/// Any failure is logged and reported as `false`; callers fall back to
/// memory-only operation.
pub fn probe<S: BackingStore + ?Sized>(store: &mut S) -> bool {
    let result = store
        .set(PROBE_KEY, PROBE_KEY)
        .and_then(|_| store.get(PROBE_KEY))
        .and_then(|read| {
            store.remove(PROBE_KEY)?;
            Ok(read)
        });

    match result {
        Ok(Some(read)) if read == PROBE_KEY => true,
        Ok(_) => {
            warn!("Backing store probe read back a different value");
            false
        }
        Err(e) => {
            warn!("Backing store probe failed: {}", e);
            false
        }
    }
}
