//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use crate::cache::{Ttl, MAX_KEY_LENGTH};

/// Request body for the SET operation (PUT /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: Any JSON value
/// - `ttl`: Optional lifetime in seconds
/// - `until`: Optional absolute expiration time (RFC 3339), used when `ttl` is absent
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: Value,
    /// Optional lifetime in seconds
    #[serde(default)]
    pub ttl: Option<f64>,
    /// Optional expiration moment
    #[serde(default)]
    pub until: Option<DateTime<Utc>>,
}

impl SetRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        validate_key(&self.key)
    }

    /// The requested lifetime, `None` meaning the cache default.
    pub fn duration(&self) -> Option<Ttl> {
        match (self.ttl, self.until) {
            (Some(secs), _) => Some(Ttl::Seconds(secs)),
            (None, Some(moment)) => Some(Ttl::At(moment)),
            (None, None) => None,
        }
    }
}

/// Query string accepted by GET /get/:key and POST /clean
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DurationQuery {
    /// Optional lifetime override in seconds
    #[serde(default)]
    pub duration: Option<f64>,
}

impl DurationQuery {
    pub fn ttl(&self) -> Option<Ttl> {
        self.duration.map(Ttl::Seconds)
    }
}

/// Shared key validation for every endpoint taking a key.
pub fn validate_key(key: &str) -> Option<String> {
    if key.is_empty() {
        return Some("Key cannot be empty".to_string());
    }
    if key.len() > MAX_KEY_LENGTH {
        return Some(format!(
            "Key exceeds maximum length of {} bytes",
            MAX_KEY_LENGTH
        ));
    }
    None
}
