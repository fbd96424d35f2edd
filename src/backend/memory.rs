//! In-memory backing store with an optional byte quota.

use std::collections::BTreeMap;

use super::{BackingStore, StoreError};

// == Memory Store ==
/// Ordered in-process map that rejects writes past its quota.
///
/// Usage is measured as key bytes plus value bytes, the way browser storage
/// areas account for their limit.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: BTreeMap<String, String>,
    quota: Option<usize>,
    used: usize,
}

impl MemoryStore {
    /// Creates an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that holds at most `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Bytes currently accounted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.used
    }

    pub fn quota(&self) -> Option<usize> {
        self.quota
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl BackingStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.items.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self
            .items
            .get(key)
            .map(|old| key.len() + old.len())
            .unwrap_or(0);
        let needed = key.len() + value.len();

        if let Some(quota) = self.quota {
            let available = quota - (self.used - previous);
            if needed > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }

        self.items.insert(key.to_string(), value.to_string());
        self.used = self.used - previous + needed;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        if let Some(old) = self.items.remove(key) {
            self.used -= key.len() + old.len();
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.items.keys().cloned().collect())
    }
}
