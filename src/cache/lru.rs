//! LRU Selection Module
//!
//! Picks the least recently used entry by scanning usage timestamps.

use std::collections::HashMap;

use crate::cache::CacheEntry;

// == Least Recently Used ==
/// Returns the key of the least recently used entry, skipping `except`.
///
/// Ordering is by `lastUsedAt`, so never-read entries (0) go first; ties fall
/// back to `createdAt`, then to whichever entry the scan met first. Returns
/// `None` when no candidate remains. O(n) in the number of entries.
pub fn least_recently_used(
    entries: &HashMap<String, CacheEntry>,
    except: Option<&str>,
) -> Option<String> {
    let mut lru: Option<(&String, &CacheEntry)> = None;

    for (key, entry) in entries {
        if Some(key.as_str()) == except {
            continue;
        }
        let older = match lru {
            None => true,
            Some((_, current)) => recency(entry) < recency(current),
        };
        if older {
            lru = Some((key, entry));
        }
    }

    lru.map(|(key, _)| key.clone())
}

fn recency(entry: &CacheEntry) -> (i64, i64) {
    (entry.last_used_at, entry.created_at.unwrap_or(0))
}
