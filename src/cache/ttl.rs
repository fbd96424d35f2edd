//! Duration arguments accepted by `get`, `set` and `clean`.

use chrono::{DateTime, Utc};

// == Ttl ==
/// A time-to-live given either as seconds or as an absolute point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ttl {
    /// Relative lifetime in seconds; zero or negative means already expired
    Seconds(f64),
    /// Absolute expiration moment
    At(DateTime<Utc>),
}

impl Ttl {
    /// Resolves the lifetime to milliseconds relative to `now_ms`.
    pub fn to_millis(self, now_ms: i64) -> i64 {
        match self {
            Ttl::Seconds(secs) => (secs * 1000.0).round() as i64,
            Ttl::At(moment) => moment.timestamp_millis() - now_ms,
        }
    }
}

impl From<f64> for Ttl {
    fn from(secs: f64) -> Self {
        Ttl::Seconds(secs)
    }
}

impl From<i64> for Ttl {
    fn from(secs: i64) -> Self {
        Ttl::Seconds(secs as f64)
    }
}

impl From<i32> for Ttl {
    fn from(secs: i32) -> Self {
        Ttl::Seconds(f64::from(secs))
    }
}

impl From<u64> for Ttl {
    fn from(secs: u64) -> Self {
        Ttl::Seconds(secs as f64)
    }
}

impl From<std::time::Duration> for Ttl {
    fn from(duration: std::time::Duration) -> Self {
        Ttl::Seconds(duration.as_secs_f64())
    }
}

impl From<DateTime<Utc>> for Ttl {
    fn from(moment: DateTime<Utc>) -> Self {
        Ttl::At(moment)
    }
}
