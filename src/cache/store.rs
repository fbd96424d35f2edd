//! Cache Store Module
//!
//! Main cache engine: an in-memory entry map mirrored to a backing store,
//! with read-time expiration and LRU eviction when the store runs out of room.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::backend::{self, BackingStore, MemoryStore};
use crate::cache::{
    current_timestamp_ms, least_recently_used, CacheEntry, CacheOptions, CacheStats, Ttl,
    WrapKeyFn, LAST_CLEAN_KEY,
};
use crate::error::{CacheError, Result};

// == Cache ==
/// Expiring LRU cache persisted to a [`BackingStore`].
///
/// The in-memory map is authoritative for reads. Every mutation is mirrored
/// to the backing store in the same call when persistence is enabled.
pub struct Cache<S: BackingStore = MemoryStore> {
    /// Normalized key -> entry
    entries: HashMap<String, CacheEntry>,
    /// Durable mirror of `entries`
    store: S,
    /// Whether `store` is written to at all
    persist: bool,
    prefix: String,
    /// Fallback lifetime in seconds
    default_duration: u64,
    wrap_key: Option<WrapKeyFn>,
    stats: CacheStats,
}

impl Cache<MemoryStore> {
    /// Creates a cache that never touches a durable store.
    pub fn memory_only(options: CacheOptions) -> Self {
        Self::new(MemoryStore::new(), options.use_persistence(false))
    }
}

impl<S: BackingStore> Cache<S> {
    // == Constructor ==
    /// Builds a cache over `store`, rehydrating every entry under the prefix.
    ///
    /// When `use_persistence` is left unset the store is probed once; a failed
    /// probe degrades the cache to memory-only operation.
    pub fn new(mut store: S, options: CacheOptions) -> Self {
        let persist = match options.use_persistence {
            Some(enabled) => enabled,
            None => backend::probe(&mut store),
        };
        if !persist {
            info!("Cache '{}' running memory-only", options.prefix);
        }

        let mut cache = Self {
            entries: HashMap::new(),
            store,
            persist,
            prefix: options.prefix,
            default_duration: options.default_duration,
            wrap_key: options.wrap_key,
            stats: CacheStats::new(),
        };
        if persist {
            cache.load();
        }
        cache
    }

    /// Populates the entry map from the backing store.
    ///
    /// Keys that fail to read or parse are skipped.
    fn load(&mut self) {
        let keys = match self.store.keys() {
            Ok(keys) => keys,
            Err(e) => {
                warn!("Unable to enumerate backing store, starting empty: {}", e);
                return;
            }
        };

        let mut skipped = 0;
        for key in keys.into_iter().filter(|k| k.starts_with(&self.prefix)) {
            let raw = match self.store.get(&key) {
                Ok(Some(raw)) => raw,
                Ok(None) => continue,
                Err(e) => {
                    warn!("Skipping unreadable entry '{}': {}", key, e);
                    skipped += 1;
                    continue;
                }
            };
            match serde_json::from_str::<CacheEntry>(&raw) {
                Ok(entry) => {
                    self.entries.insert(key, entry);
                }
                Err(e) => {
                    warn!("Skipping corrupt entry '{}': {}", key, e);
                    skipped += 1;
                }
            }
        }

        self.stats.set_total_entries(self.entries.len());
        info!(
            "Loaded {} entries for prefix '{}' ({} skipped)",
            self.entries.len(),
            self.prefix,
            skipped
        );
    }

    // == Normalize Key ==
    /// Returns `prefix + wrap_key(key)`, the key used for all storage.
    pub fn normalize_key(&self, key: &str) -> String {
        match &self.wrap_key {
            Some(wrap) => format!("{}{}", self.prefix, wrap(key)),
            None => format!("{}{}", self.prefix, key),
        }
    }

    // == Get ==
    /// Retrieves a live value, or `None` on a miss.
    ///
    /// `duration` overrides the stored lifetime for this read only. A hit
    /// refreshes the entry's usage time in the backing store; an expired
    /// entry is removed.
    pub fn get(&mut self, key: &str, duration: Option<Ttl>) -> Result<Option<Value>> {
        let normalized = self.normalize_key(key);
        let now = current_timestamp_ms();

        let Some(entry) = self.entries.get(&normalized) else {
            self.stats.record_miss();
            return Ok(None);
        };

        let effective_ms = match duration {
            Some(ttl) => ttl.to_millis(now),
            None => entry
                .stored_duration()
                .unwrap_or_else(|| self.default_duration_ms()),
        };

        if entry.is_live(now, effective_ms) {
            let mut entry = entry.clone();
            entry.touch(now);
            let value = entry.value.clone();
            self.save(&normalized, entry)?;
            self.stats.record_hit();
            return Ok(Some(value));
        }

        debug!("Entry '{}' expired on read", normalized);
        self.remove_normalized(&normalized)?;
        self.stats.record_expirations(1);
        self.stats.record_miss();
        Ok(None)
    }

    /// Like [`get`](Self::get), deserializing the value into `T`.
    pub fn get_as<T: DeserializeOwned>(
        &mut self,
        key: &str,
        duration: Option<Ttl>,
    ) -> Result<Option<T>> {
        match self.get(key, duration)? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    // == Set ==
    /// Stores `value` under `key` for `duration` (the default when `None`).
    ///
    /// A duration that resolves to zero or less removes the key instead.
    pub fn set(&mut self, key: &str, value: Value, duration: Option<Ttl>) -> Result<()> {
        let now = current_timestamp_ms();
        let duration_ms = match duration {
            Some(ttl) => ttl.to_millis(now),
            None => self.default_duration_ms(),
        };
        if duration_ms <= 0 {
            return self.remove(key);
        }

        let normalized = self.normalize_key(key);
        self.save(&normalized, CacheEntry::new(value, now, duration_ms))
    }

    /// Like [`set`](Self::set), serializing `value` first.
    pub fn set_as<T: Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
        duration: Option<Ttl>,
    ) -> Result<()> {
        let value = serde_json::to_value(value)?;
        self.set(key, value, duration)
    }

    // == Save ==
    /// Writes an entry under an already normalized key.
    ///
    /// The entry map is updated first. When the backing store reports it is
    /// full, the least recently used other entry is evicted and the write is
    /// retried, once per remaining entry at most. If nothing is left to evict
    /// the store's error is returned as [`CacheError::StorageFull`]; memory
    /// then stays ahead of the store for this key.
    pub fn save(&mut self, normalized_key: &str, entry: CacheEntry) -> Result<()> {
        let raw = if self.persist {
            Some(serde_json::to_string(&entry)?)
        } else {
            None
        };

        self.entries.insert(normalized_key.to_string(), entry);
        self.stats.set_total_entries(self.entries.len());

        let Some(raw) = raw else {
            return Ok(());
        };

        loop {
            match self.store.set(normalized_key, &raw) {
                Ok(()) => return Ok(()),
                Err(e) if e.is_quota_exceeded() => {
                    if self.evict_lru(Some(normalized_key))?.is_none() {
                        warn!(
                            "Nothing left to evict for '{}' ({} bytes)",
                            normalized_key,
                            raw.len()
                        );
                        return Err(CacheError::StorageFull {
                            key: normalized_key.to_string(),
                            source: e,
                        });
                    }
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    // == Clear LRU ==
    /// Evicts the least recently used entry, returning its normalized key.
    pub fn clear_lru(&mut self) -> Result<Option<String>> {
        self.evict_lru(None)
    }

    fn evict_lru(&mut self, except: Option<&str>) -> Result<Option<String>> {
        let Some(key) = least_recently_used(&self.entries, except) else {
            return Ok(None);
        };
        self.remove_normalized(&key)?;
        self.stats.record_eviction();
        debug!("Evicted least recently used entry '{}'", key);
        Ok(Some(key))
    }

    // == Remove ==
    /// Deletes `key` from memory and the backing store. Absent keys are fine.
    pub fn remove(&mut self, key: &str) -> Result<()> {
        let normalized = self.normalize_key(key);
        self.remove_normalized(&normalized)
    }

    fn remove_normalized(&mut self, normalized_key: &str) -> Result<()> {
        self.entries.remove(normalized_key);
        self.stats.set_total_entries(self.entries.len());
        if self.persist {
            self.store.remove(normalized_key)?;
        }
        Ok(())
    }

    // == Clear ==
    /// Removes every entry of this cache.
    pub fn clear(&mut self) -> Result<()> {
        let keys: Vec<String> = self.entries.keys().cloned().collect();
        for key in keys {
            self.remove_normalized(&key)?;
        }
        Ok(())
    }

    // == Purge ==
    /// Removes every entry whose stored lifetime has elapsed.
    ///
    /// Entries without a stored duration are judged against the default
    /// duration; entries without a creation time are removed. Returns the
    /// number of entries removed.
    pub fn purge(&mut self) -> Result<usize> {
        let now = current_timestamp_ms();
        let default_ms = self.default_duration_ms();

        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| {
                !entry.is_live(now, entry.stored_duration().unwrap_or(default_ms))
            })
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_normalized(key)?;
        }

        self.stats.record_purge();
        self.stats.record_expirations(expired.len());
        if expired.is_empty() {
            debug!("Purge: no expired entries found");
        } else {
            info!("Purge: removed {} expired entries", expired.len());
        }
        Ok(expired.len())
    }

    // == Clean ==
    /// Purges at most once per `duration` window (the default duration when
    /// `None` or non-positive).
    ///
    /// The time of the last purge is kept in the cache itself under
    /// [`LAST_CLEAN_KEY`], so throttling survives a reload. Returns the number
    /// of entries the purge removed, or `None` when the window was still open.
    /// The marker itself is never counted.
    pub fn clean(&mut self, duration: Option<Ttl>) -> Result<Option<usize>> {
        let now = current_timestamp_ms();
        let window = match duration {
            Some(ttl) if ttl.to_millis(now) > 0 => ttl,
            _ => Ttl::from(self.default_duration),
        };

        if self.get(LAST_CLEAN_KEY, Some(window))?.is_some() {
            return Ok(None);
        }

        let removed = self.purge()?;
        self.set(LAST_CLEAN_KEY, Value::Bool(true), Some(window))?;
        Ok(Some(removed))
    }

    // == Introspection ==
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks for an entry under `key` without touching or expiring it.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(&self.normalize_key(key))
    }

    /// Returns the raw entry under `key` without touching or expiring it.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(&self.normalize_key(key))
    }

    /// Normalized keys currently held, sorted.
    pub fn keys(&self) -> Vec<String> {
        let mut keys: Vec<String> = self.entries.keys().cloned().collect();
        keys.sort();
        keys
    }

    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn persistence_enabled(&self) -> bool {
        self.persist
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Fallback lifetime in seconds.
    pub fn default_duration(&self) -> u64 {
        self.default_duration
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the cache, handing back its backing store.
    pub fn into_store(self) -> S {
        self.store
    }

    fn default_duration_ms(&self) -> i64 {
        i64::try_from(self.default_duration)
            .unwrap_or(i64::MAX)
            .saturating_mul(1000)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    fn persisted(store: MemoryStore) -> Cache<MemoryStore> {
        Cache::new(store, CacheOptions::default())
    }

    #[test]
    fn test_cache_new_probes_store() {
        let cache = persisted(MemoryStore::new());
        assert!(cache.persistence_enabled());
        assert!(cache.is_empty());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_cache_degrades_when_probe_fails() {
        let mut cache = persisted(MemoryStore::with_quota(0));
        assert!(!cache.persistence_enabled());

        cache.set("k", json!(1), None).unwrap();
        assert_eq!(cache.get("k", None).unwrap(), Some(json!(1)));
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_normalize_key() {
        let cache = Cache::memory_only(CacheOptions::new().prefix("app:"));
        assert_eq!(cache.normalize_key("user"), "app:user");

        let wrapped = Cache::memory_only(CacheOptions::new().wrap_key(|k| k.to_uppercase()));
        assert_eq!(wrapped.normalize_key("user"), "cache:USER");
    }

    #[test]
    fn test_set_and_get() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("key1", json!({"a": 1}), None).unwrap();
        assert_eq!(cache.get("key1", None).unwrap(), Some(json!({"a": 1})));
        assert!(cache.store().get("cache:key1").unwrap().is_some());
    }

    #[test]
    fn test_get_missing_is_none() {
        let mut cache = persisted(MemoryStore::new());
        assert_eq!(cache.get("missing", None).unwrap(), None);
        assert_eq!(cache.stats().misses, 1);
    }

    #[test]
    fn test_get_updates_last_used() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("k", json!("v"), None).unwrap();
        assert_eq!(cache.entry("k").unwrap().last_used_at, 0);

        cache.get("k", None).unwrap();
        let last_used = cache.entry("k").unwrap().last_used_at;
        assert!(last_used > 0);

        // Write-through: the persisted record carries the new usage time
        let raw = cache.store().get("cache:k").unwrap().unwrap();
        let stored: CacheEntry = serde_json::from_str(&raw).unwrap();
        assert_eq!(stored.last_used_at, last_used);
    }

    #[test]
    fn test_read_override_zero_expires() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("k", json!("v"), Some(Ttl::from(60))).unwrap();
        cache.get("k", Some(Ttl::from(0))).unwrap();
        assert!(cache.entry("k").is_none());
    }

    #[test]
    fn test_ttl_expiration() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("k", json!("v"), Some(Ttl::from(0.2))).unwrap();
        assert!(cache.get("k", None).unwrap().is_some());

        sleep(Duration::from_millis(300));

        assert!(cache.get("k", None).unwrap().is_none());
        assert!(!cache.contains_key("k"));
        assert!(cache.store().get("cache:k").unwrap().is_none());
        assert_eq!(cache.stats().expirations, 1);
    }

    #[test]
    fn test_zero_duration_set_removes() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("k", json!("v"), None).unwrap();
        cache.set("k", json!("v2"), Some(Ttl::from(0))).unwrap();

        assert!(cache.get("k", None).unwrap().is_none());
        assert!(cache.store().get("cache:k").unwrap().is_none());
    }

    #[test]
    fn test_negative_duration_set_is_not_stored() {
        let mut cache = persisted(MemoryStore::new());
        cache.set("k", json!("v"), Some(Ttl::from(-5))).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_past_point_in_time_set_removes() {
        let mut cache = persisted(MemoryStore::new());
        let past = chrono::Utc::now() - chrono::Duration::seconds(10);

        cache.set("k", json!("v"), Some(Ttl::from(past))).unwrap();
        assert!(cache.is_empty());
    }

    #[test]
    fn test_future_point_in_time_set() {
        let mut cache = persisted(MemoryStore::new());
        let future = chrono::Utc::now() + chrono::Duration::seconds(60);

        cache.set("k", json!("v"), Some(Ttl::from(future))).unwrap();
        let duration = cache.entry("k").unwrap().duration.unwrap();
        assert!(duration > 55_000 && duration <= 60_000);
    }

    #[test]
    fn test_read_override_can_revive_entry() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("k", json!("v"), Some(Ttl::from(0.05))).unwrap();
        sleep(Duration::from_millis(100));

        // Stored lifetime has elapsed but a longer read-time window keeps it
        assert_eq!(cache.get("k", Some(Ttl::from(60))).unwrap(), Some(json!("v")));
    }

    #[test]
    fn test_default_duration_used_when_entry_has_none() {
        let mut store = MemoryStore::new();
        store
            .set("cache:legacy", r#"{"value": 7, "createdAt": 1}"#)
            .unwrap();

        let mut cache = Cache::new(store, CacheOptions::new().default_duration(60));
        // createdAt is far in the past, so the default window has elapsed
        assert!(cache.get("legacy", None).unwrap().is_none());
        assert!(cache.store().get("cache:legacy").unwrap().is_none());
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("k", json!(1), None).unwrap();
        cache.remove("k").unwrap();
        cache.remove("k").unwrap();
        cache.remove("never-set").unwrap();

        assert!(cache.is_empty());
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_clear_removes_everything() {
        let mut store = MemoryStore::new();
        store.set("other:keep", "untouched").unwrap();

        let mut cache = persisted(store);
        for i in 0..10 {
            cache.set(&format!("k{}", i), json!(i), None).unwrap();
        }

        cache.clear().unwrap();

        assert!(cache.is_empty());
        assert_eq!(cache.store().keys().unwrap(), vec!["other:keep".to_string()]);
    }

    #[test]
    fn test_load_skips_foreign_and_corrupt_keys() {
        let mut store = MemoryStore::new();
        store.set("other:a", r#"{"value": 1}"#).unwrap();
        store.set("cache:bad", "not json").unwrap();
        store
            .set(
                "cache:good",
                &serde_json::to_string(&CacheEntry::new(
                    json!("ok"),
                    current_timestamp_ms(),
                    60_000,
                ))
                .unwrap(),
            )
            .unwrap();

        let mut cache = persisted(store);
        assert_eq!(cache.keys(), vec!["cache:good".to_string()]);
        assert_eq!(cache.get("good", None).unwrap(), Some(json!("ok")));
    }

    #[test]
    fn test_get_as_and_set_as() {
        #[derive(Debug, PartialEq, serde::Serialize, serde::Deserialize)]
        struct User {
            id: u32,
            name: String,
        }

        let mut cache = persisted(MemoryStore::new());
        let user = User {
            id: 7,
            name: "ada".to_string(),
        };

        cache.set_as("user", &user, None).unwrap();
        assert_eq!(cache.get_as::<User>("user", None).unwrap(), Some(user));
        assert!(cache.get_as::<User>("nobody", None).unwrap().is_none());
    }

    #[test]
    fn test_purge_removes_only_expired() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("short", json!(1), Some(Ttl::from(0.05))).unwrap();
        cache.set("long", json!(2), Some(Ttl::from(60))).unwrap();
        sleep(Duration::from_millis(100));

        assert_eq!(cache.purge().unwrap(), 1);
        assert_eq!(cache.keys(), vec!["cache:long".to_string()]);
        assert_eq!(cache.store().keys().unwrap(), vec!["cache:long".to_string()]);
    }

    #[test]
    fn test_purge_handles_legacy_entries() {
        let now = current_timestamp_ms();
        let mut store = MemoryStore::new();
        // No createdAt: can never be shown live, so purge drops it
        store.set("cache:no-created", r#"{"value": 1}"#).unwrap();
        // No duration: judged against the default duration
        store
            .set(
                "cache:no-duration",
                &format!(r#"{{"value": 2, "createdAt": {}}}"#, now),
            )
            .unwrap();

        let mut cache = persisted(store);
        assert_eq!(cache.purge().unwrap(), 1);
        assert_eq!(cache.keys(), vec!["cache:no-duration".to_string()]);
    }

    #[test]
    fn test_clean_throttles_purge() {
        let mut cache = persisted(MemoryStore::new());

        assert_eq!(cache.clean(Some(Ttl::from(60))).unwrap(), Some(0));
        assert_eq!(cache.clean(Some(Ttl::from(60))).unwrap(), None);
        assert_eq!(cache.clean(Some(Ttl::from(60))).unwrap(), None);

        assert_eq!(cache.stats().purges, 1);
        assert!(cache.contains_key(LAST_CLEAN_KEY));
    }

    #[test]
    fn test_clean_runs_again_after_window() {
        let mut cache = persisted(MemoryStore::new());

        assert_eq!(cache.clean(Some(Ttl::from(0.05))).unwrap(), Some(0));
        sleep(Duration::from_millis(100));
        // The stale marker is dropped on the way in but is not a removed entry
        assert_eq!(cache.clean(Some(Ttl::from(0.05))).unwrap(), Some(0));

        assert_eq!(cache.stats().purges, 2);
    }

    #[test]
    fn test_clean_counts_only_purged_entries() {
        let mut cache = persisted(MemoryStore::new());

        cache.clean(Some(Ttl::from(0.05))).unwrap();
        cache.set("short", json!(1), Some(Ttl::from(0.05))).unwrap();
        cache.set("long", json!(2), None).unwrap();
        sleep(Duration::from_millis(100));

        assert_eq!(cache.clean(Some(Ttl::from(0.05))).unwrap(), Some(1));
        assert_eq!(
            cache.keys(),
            vec!["cache:__lastClean".to_string(), "cache:long".to_string()]
        );
    }

    #[test]
    fn test_huge_default_duration_does_not_wrap() {
        let mut cache = Cache::new(
            MemoryStore::new(),
            CacheOptions::new().default_duration(u64::MAX),
        );
        assert_eq!(cache.default_duration_ms(), i64::MAX);

        cache.set("k", json!("v"), None).unwrap();
        assert_eq!(cache.get("k", None).unwrap(), Some(json!("v")));
    }

    #[test]
    fn test_clean_zero_uses_default_window() {
        let mut cache = persisted(MemoryStore::new());

        assert!(cache.clean(Some(Ttl::from(0))).unwrap().is_some());
        assert!(cache.clean(None).unwrap().is_none());
        assert_eq!(cache.stats().purges, 1);
    }

    #[test]
    fn test_quota_triggers_lru_eviction() {
        // Each record is well under 100 bytes; the quota fits two of them
        let mut cache = persisted(MemoryStore::with_quota(200));

        cache.set("a", json!("x"), None).unwrap();
        sleep(Duration::from_millis(2));
        cache.set("b", json!("x"), None).unwrap();
        sleep(Duration::from_millis(2));
        cache.set("c", json!("x"), None).unwrap();

        assert_eq!(cache.stats().evictions, 1);
        assert!(!cache.contains_key("a"));
        assert!(cache.contains_key("b"));
        assert!(cache.contains_key("c"));
        assert_eq!(cache.keys(), cache.store().keys().unwrap());
    }

    #[test]
    fn test_oversized_write_is_fatal() {
        let mut cache = persisted(MemoryStore::with_quota(200));

        cache.set("small", json!(1), None).unwrap();
        let huge = json!("x".repeat(500));
        let err = cache.set("huge", huge, None).unwrap_err();

        assert!(matches!(err, CacheError::StorageFull { .. }));
        // The small entry was sacrificed trying to make room
        assert!(!cache.contains_key("small"));
        assert_eq!(cache.stats().evictions, 1);
        // Memory stays ahead of the store for the failed key
        assert!(cache.contains_key("huge"));
        assert!(cache.store().get("cache:huge").unwrap().is_none());
    }

    #[test]
    fn test_clear_lru_order() {
        let mut cache = persisted(MemoryStore::new());

        cache.set("a", json!(1), None).unwrap();
        sleep(Duration::from_millis(2));
        cache.set("b", json!(2), None).unwrap();
        sleep(Duration::from_millis(2));
        cache.set("c", json!(3), None).unwrap();
        cache.get("b", None).unwrap();

        assert_eq!(cache.clear_lru().unwrap(), Some("cache:a".to_string()));
        assert_eq!(cache.clear_lru().unwrap(), Some("cache:c".to_string()));
        assert_eq!(cache.clear_lru().unwrap(), Some("cache:b".to_string()));
        assert_eq!(cache.clear_lru().unwrap(), None);
        assert!(cache.store().is_empty());
    }

    #[test]
    fn test_rehydrate_from_store() {
        let mut cache = persisted(MemoryStore::new());
        cache.set("k", json!([1, 2, 3]), None).unwrap();
        cache.get("k", None).unwrap();
        let last_used = cache.entry("k").unwrap().last_used_at;

        let mut reloaded = persisted(cache.into_store());
        assert_eq!(reloaded.entry("k").unwrap().last_used_at, last_used);
        assert_eq!(reloaded.get("k", None).unwrap(), Some(json!([1, 2, 3])));
    }

    #[test]
    fn test_memory_only_skips_store() {
        let mut cache = Cache::new(MemoryStore::new(), CacheOptions::new().use_persistence(false));

        cache.set("k", json!(1), None).unwrap();
        cache.get("k", None).unwrap();
        cache.remove("k").unwrap();

        assert!(!cache.persistence_enabled());
        assert!(cache.store().is_empty());
    }
}
