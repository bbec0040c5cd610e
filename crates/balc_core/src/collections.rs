//! Hash collections used throughout the front end.
//!
//! The parser keys most of its tables by small `Copy` enums, so the Fx
//! hasher is used everywhere instead of SipHash.

use std::hash::Hash;

pub use rustc_hash::{FxHashMap, FxHashSet};

/// A small counter keyed by an arbitrary hashable value.
///
/// The recovery engine counts inserts per token position with it.
#[derive(Debug, Clone)]
pub struct Counter<K> {
    counts: FxHashMap<K, u32>,
}

impl<K: Eq + Hash> Counter<K> {
    pub fn new() -> Self {
        Self {
            counts: FxHashMap::default(),
        }
    }

    /// Increment the count for `key` and return the new value.
    pub fn bump(&mut self, key: K) -> u32 {
        let slot = self.counts.entry(key).or_insert(0);
        *slot += 1;
        *slot
    }

    pub fn get(&self, key: &K) -> u32 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    pub fn clear(&mut self) {
        self.counts.clear();
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }
}

impl<K: Eq + Hash> Default for Counter<K> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_bump() {
        let mut counter = Counter::new();
        assert_eq!(counter.bump(3usize), 1);
        assert_eq!(counter.bump(3usize), 2);
        assert_eq!(counter.bump(4usize), 1);
        assert_eq!(counter.get(&3), 2);
        assert_eq!(counter.get(&9), 0);
        assert_eq!(counter.len(), 2);
    }

    #[test]
    fn test_counter_clear() {
        let mut counter = Counter::new();
        counter.bump("a");
        counter.clear();
        assert!(counter.is_empty());
    }
}
