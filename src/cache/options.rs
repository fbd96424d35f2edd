//! Construction options for a cache instance.

use std::fmt;
use std::sync::Arc;

use crate::cache::{DEFAULT_DURATION_SECS, DEFAULT_PREFIX};

/// Key transformation hook applied before prefixing.
pub type WrapKeyFn = Arc<dyn Fn(&str) -> String + Send + Sync>;

// == Cache Options ==
/// Options supplied when building a [`Cache`](crate::cache::Cache).
#[derive(Clone)]
pub struct CacheOptions {
    /// Namespace prepended to every normalized key
    pub prefix: String,
    /// Fallback lifetime in seconds
    pub default_duration: u64,
    /// Persist to the backing store; `None` decides by probing the store
    pub use_persistence: Option<bool>,
    /// Key transformation applied before prefixing (identity when unset)
    pub wrap_key: Option<WrapKeyFn>,
}

impl CacheOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    pub fn default_duration(mut self, seconds: u64) -> Self {
        self.default_duration = seconds;
        self
    }

    pub fn use_persistence(mut self, enabled: bool) -> Self {
        self.use_persistence = Some(enabled);
        self
    }

    pub fn wrap_key<F>(mut self, wrap: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.wrap_key = Some(Arc::new(wrap));
        self
    }
}

impl Default for CacheOptions {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_string(),
            default_duration: DEFAULT_DURATION_SECS,
            use_persistence: None,
            wrap_key: None,
        }
    }
}

impl fmt::Debug for CacheOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CacheOptions")
            .field("prefix", &self.prefix)
            .field("default_duration", &self.default_duration)
            .field("use_persistence", &self.use_persistence)
            .field("wrap_key", &self.wrap_key.as_ref().map(|_| "<fn>"))
            .finish()
    }
}
