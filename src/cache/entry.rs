//! Cache Entry Module
//!
//! Defines a cached response body together with its freshness window.

use chrono::{DateTime, Duration, Utc};
use serde_json::Value;

/// Upper bound applied when turning a TTL into a timestamp (~68 years).
const MAX_TTL_SECONDS: u64 = i32::MAX as u64;

// == Cache Entry ==
/// A parsed response body stored under a route fingerprint.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Parsed response body
    pub value: Value,
    /// When the response was stored
    pub stored_at: DateTime<Utc>,
    /// Effective lifetime in seconds
    pub ttl_seconds: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry stored at the current time.
    pub fn new(value: Value, ttl_seconds: u64) -> Self {
        Self::stored_at(value, ttl_seconds, Utc::now())
    }

    /// Creates an entry stored at an explicit instant.
    pub fn stored_at(value: Value, ttl_seconds: u64, stored_at: DateTime<Utc>) -> Self {
        Self {
            value,
            stored_at,
            ttl_seconds,
        }
    }

    // == Expires At ==
    /// Instant at which the entry stops being fresh.
    pub fn expires_at(&self) -> DateTime<Utc> {
        let ttl = Duration::seconds(self.ttl_seconds.min(MAX_TTL_SECONDS) as i64);
        self.stored_at
            .checked_add_signed(ttl)
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    // == Is Expired ==
    /// Checks expiry against `now`.
    ///
    /// Boundary condition: the entry is expired once `now >= stored_at + ttl`,
    /// so a zero TTL is expired immediately.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at()
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }

    // == Time To Live ==
    /// Remaining freshness in whole seconds, 0 once expired.
    pub fn ttl_remaining(&self) -> u64 {
        let remaining = self.expires_at() - Utc::now();
        remaining.num_seconds().max(0) as u64
    }
}
