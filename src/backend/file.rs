//! File-backed store
//!
//! Durable store keeping one file per key inside a directory. File names are
//! the SHA-256 digest of the key, so every key maps to a short, valid path
//! component; the key itself is kept inside the file next to the value.

use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use super::{BackingStore, StoreError};

const FILE_EXTENSION: &str = "entry";

/// On-disk layout of a single entry file.
#[derive(Debug, Serialize, Deserialize)]
struct EntryFile {
    key: String,
    value: String,
}

// == File Store ==
/// Directory of entry files with an optional byte quota.
#[derive(Debug)]
pub struct FileStore {
    directory: PathBuf,
    quota: Option<usize>,
    /// Size in bytes of each stored value, keyed by the original key
    sizes: HashMap<String, usize>,
    /// Running total of key bytes plus value bytes
    used: usize,
}

impl FileStore {
    /// Opens (or creates) a store rooted at `directory`.
    ///
    /// Existing entry files are indexed so quota accounting survives restarts.
    pub fn open(directory: impl AsRef<Path>, quota: Option<usize>) -> Result<Self, StoreError> {
        let directory = directory.as_ref().to_path_buf();
        fs::create_dir_all(&directory)?;

        let mut sizes = HashMap::new();
        let mut used = 0;
        for dir_entry in fs::read_dir(&directory)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some(FILE_EXTENSION) {
                continue;
            }
            let Some(file) = read_entry_file(&path) else {
                warn!("Ignoring unrecognized file in store: {}", path.display());
                continue;
            };
            if path != entry_path(&directory, &file.key) {
                warn!("Ignoring misplaced entry file: {}", path.display());
                continue;
            }
            used += file.key.len() + file.value.len();
            sizes.insert(file.key, file.value.len());
        }

        debug!(
            "Opened file store at {} with {} keys ({} bytes)",
            directory.display(),
            sizes.len(),
            used
        );

        Ok(Self {
            directory,
            quota,
            sizes,
            used,
        })
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Bytes currently accounted against the quota.
    pub fn used_bytes(&self) -> usize {
        self.used
    }

    fn path_for(&self, key: &str) -> PathBuf {
        entry_path(&self.directory, key)
    }
}

impl BackingStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        if !self.sizes.contains_key(key) {
            return Ok(None);
        }
        let raw = match fs::read(self.path_for(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let file: EntryFile = serde_json::from_slice(&raw).map_err(std::io::Error::from)?;
        if file.key != key {
            return Ok(None);
        }
        Ok(Some(file.value))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        let previous = self.sizes.get(key).map(|size| key.len() + size).unwrap_or(0);
        let needed = key.len() + value.len();

        if let Some(quota) = self.quota {
            let available = quota.saturating_sub(self.used - previous);
            if needed > available {
                return Err(StoreError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }

        let file = EntryFile {
            key: key.to_string(),
            value: value.to_string(),
        };
        let raw = serde_json::to_vec(&file).map_err(std::io::Error::from)?;
        fs::write(self.path_for(key), raw)?;

        self.sizes.insert(key.to_string(), value.len());
        self.used = self.used - previous + needed;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)) {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        if let Some(size) = self.sizes.remove(key) {
            self.used -= key.len() + size;
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self.sizes.keys().cloned().collect();
        keys.sort();
        Ok(keys)
    }
}

// == File Naming ==
fn entry_path(directory: &Path, key: &str) -> PathBuf {
    directory.join(format!("{}.{}", key_digest(key), FILE_EXTENSION))
}

fn key_digest(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn read_entry_file(path: &Path) -> Option<EntryFile> {
    let raw = fs::read(path).ok()?;
    serde_json::from_slice(&raw).ok()
}
