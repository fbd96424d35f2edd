//! Cache Entry Module
//!
//! Defines the persisted record for a cached value and its expiration metadata.

use serde::{Deserialize, Serialize};
use serde_json::Value;

// == Cache Entry ==
/// A cached value plus the timestamps used for expiration and LRU eviction.
///
/// Serialized as `{value, createdAt, lastUsedAt, duration}`. `createdAt` and
/// `duration` are optional only so records written by older versions still load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheEntry {
    /// The stored value
    pub value: Value,
    /// Creation timestamp (Unix milliseconds)
    #[serde(default)]
    pub created_at: Option<i64>,
    /// Timestamp of the last successful read (Unix milliseconds), 0 = never read
    #[serde(default)]
    pub last_used_at: i64,
    /// Time-to-live in milliseconds, fixed at write time
    #[serde(default)]
    pub duration: Option<i64>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a never-read entry written at `now_ms` that lives for `duration_ms`.
    pub fn new(value: Value, now_ms: i64, duration_ms: i64) -> Self {
        Self {
            value,
            created_at: Some(now_ms),
            last_used_at: 0,
            duration: Some(duration_ms),
        }
    }

    // == Is Live ==
    /// Checks whether the entry is still alive at `now_ms` under `duration_ms`.
    ///
    /// Boundary condition: the entry is dead once `now >= createdAt + duration`.
    /// An entry without a creation time is never live.
    pub fn is_live(&self, now_ms: i64, duration_ms: i64) -> bool {
        match self.created_at {
            Some(created) => now_ms < created.saturating_add(duration_ms),
            None => false,
        }
    }

    // == Stored Duration ==
    /// Returns the stored duration, treating zero as absent.
    pub fn stored_duration(&self) -> Option<i64> {
        self.duration.filter(|d| *d != 0)
    }

    // == Expires At ==
    /// Returns the expiration timestamp under the stored duration, if known.
    pub fn expires_at(&self) -> Option<i64> {
        Some(self.created_at?.saturating_add(self.stored_duration()?))
    }

    // == Touch ==
    /// Records a read at `now_ms`.
    pub fn touch(&mut self, now_ms: i64) {
        self.last_used_at = now_ms;
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
