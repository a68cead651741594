//! Response Cache Module
//!
//! Fingerprint-keyed store combining lazy TTL expiry with insertion-order eviction.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::cache::{CacheEntry, CacheStats, InsertionOrder};

// == Response Cache ==
/// Bounded in-memory cache of parsed GET responses.
///
/// Expired entries are only removed when looked up; there is no sweeper.
#[derive(Debug)]
pub struct ResponseCache {
    entries: HashMap<String, CacheEntry>,
    order: InsertionOrder,
    stats: CacheStats,
    max_entries: usize,
}

impl ResponseCache {
    // == Constructor ==
    /// Creates an empty cache holding at most `max_entries` responses.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            order: InsertionOrder::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Get ==
    /// Returns the cached body for `key` if it is still fresh.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.get_at(key, Utc::now())
    }

    /// Lookup against an explicit clock.
    ///
    /// An expired entry is removed here and counted as both an expiration
    /// and a miss.
    pub fn get_at(&mut self, key: &str, now: DateTime<Utc>) -> Option<Value> {
        let expired = match self.entries.get(key) {
            Some(entry) if !entry.is_expired_at(now) => {
                let value = entry.value.clone();
                self.stats.record_hit();
                return Some(value);
            }
            Some(_) => true,
            None => false,
        };

        if expired {
            self.remove_entry(key);
            self.stats.record_expiration();
        }
        self.stats.record_miss();
        None
    }

    // == Insert ==
    /// Stores `value` under `key` with the given TTL.
    ///
    /// Returns false when nothing was stored (zero TTL or zero capacity).
    pub fn insert(&mut self, key: String, value: Value, ttl_seconds: u64) -> bool {
        self.insert_at(key, value, ttl_seconds, Utc::now())
    }

    /// Insert with an explicit storage time.
    ///
    /// A new key arriving at capacity evicts the oldest insertion first.
    /// Re-inserting an existing key replaces it and makes it the newest.
    pub fn insert_at(
        &mut self,
        key: String,
        value: Value,
        ttl_seconds: u64,
        now: DateTime<Utc>,
    ) -> bool {
        if ttl_seconds == 0 || self.max_entries == 0 {
            return false;
        }

        let is_overwrite = self.entries.contains_key(&key);
        while !is_overwrite && self.entries.len() >= self.max_entries {
            match self.order.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record_eviction();
                }
                None => break,
            }
        }

        self.entries
            .insert(key.clone(), CacheEntry::stored_at(value, ttl_seconds, now));
        self.order.record_insert(&key);
        self.stats.set_total_entries(self.entries.len());
        true
    }

    // == Entry ==
    /// Peeks at an entry without touching stats or expiring it.
    pub fn entry(&self, key: &str) -> Option<&CacheEntry> {
        self.entries.get(key)
    }

    // == Remove ==
    /// Drops `key`, returning whether it was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.remove_entry(key).is_some()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }

    fn remove_entry(&mut self, key: &str) -> Option<CacheEntry> {
        let removed = self.entries.remove(key);
        if removed.is_some() {
            self.order.remove(key);
            self.stats.set_total_entries(self.entries.len());
        }
        removed
    }
}
