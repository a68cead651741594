//! Insertion Order Module
//!
//! Tracks insertion order so a full cache can evict its oldest entry.

use std::collections::VecDeque;

// == Insertion Order ==
/// FIFO of cache keys.
///
/// - Front = newest insertion
/// - Back = oldest insertion
///
/// Reads never reorder keys; only a fresh insert moves a key to the front.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Record Insert ==
    /// Marks `key` as the newest insertion, dropping any earlier position.
    pub fn record_insert(&mut self, key: &str) {
        self.remove(key);
        self.order.push_front(key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Returns and removes the oldest key, or None if empty.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    pub fn peek_oldest(&self) -> Option<&String> {
        self.order.back()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_new() {
        let order = InsertionOrder::new();
        assert!(order.is_empty());
        assert_eq!(order.len(), 0);
    }

    #[test]
    fn test_oldest_is_first_inserted() {
        let mut order = InsertionOrder::new();

        order.record_insert("key1");
        order.record_insert("key2");
        order.record_insert("key3");

        assert_eq!(order.len(), 3);
        assert_eq!(order.peek_oldest(), Some(&"key1".to_string()));
    }

    #[test]
    fn test_reinsert_moves_to_newest() {
        let mut order = InsertionOrder::new();

        order.record_insert("key1");
        order.record_insert("key2");
        order.record_insert("key1");

        assert_eq!(order.len(), 2);
        assert_eq!(order.evict_oldest(), Some("key2".to_string()));
        assert_eq!(order.evict_oldest(), Some("key1".to_string()));
        assert_eq!(order.evict_oldest(), None);
    }

    #[test]
    fn test_remove() {
        let mut order = InsertionOrder::new();

        order.record_insert("a");
        order.record_insert("b");
        order.remove("a");
        order.remove("missing");

        assert_eq!(order.len(), 1);
        assert!(!order.contains("a"));
        assert!(order.contains("b"));
    }

    #[test]
    fn test_clear() {
        let mut order = InsertionOrder::new();
        order.record_insert("a");
        order.clear();
        assert!(order.is_empty());
    }
}
