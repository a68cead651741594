//! Cache Module
//!
//! In-memory response caching with TTL freshness and bounded eviction.

mod entry;
mod freshness;
mod order;
mod stats;
mod store;


// Re-export public types
pub use entry::CacheEntry;
pub use freshness::{parse_max_age, ttl_from_headers};
pub use order::InsertionOrder;
pub use stats::CacheStats;
pub use store::ResponseCache;
