//! Key → position indexes used by grouping, lookups and set operators.
//!
//! Two strategies:
//! - [`HashIndex`]: `K: Hash + Eq`, O(1) amortized per probe.
//! - [`ScanIndex`]: `K: PartialEq` only (floats, comparator-only keys).
//!   Every probe is a linear scan over the distinct keys seen so far, so
//!   building a lookup costs O(n·k), O(n²) in the worst case.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

/// Maps distinct keys to the dense position of their first occurrence.
pub trait KeyIndex<K> {
    /// Position recorded for `key`, if it was seen before.
    fn position(&self, key: &K) -> Option<usize>;

    /// Return the position for `key`, recording `next` if the key is new.
    /// The flag is `true` when the key was inserted.
    fn position_or_insert(&mut self, key: K, next: usize) -> (usize, bool);

    /// Number of distinct keys.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stable strategy name for tracing.
    fn strategy(&self) -> &'static str;
}

#[derive(Debug, Clone)]
pub struct HashIndex<K> {
    map: HashMap<K, usize>,
}

impl<K> Default for HashIndex<K> {
    fn default() -> Self {
        Self {
            map: HashMap::new(),
        }
    }
}

impl<K: Hash + Eq> HashIndex<K> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<K: Hash + Eq> KeyIndex<K> for HashIndex<K> {
    fn position(&self, key: &K) -> Option<usize> {
        self.map.get(key).copied()
    }

    fn position_or_insert(&mut self, key: K, next: usize) -> (usize, bool) {
        match self.map.entry(key) {
            Entry::Occupied(e) => (*e.get(), false),
            Entry::Vacant(e) => {
                e.insert(next);
                (next, true)
            }
        }
    }

    fn len(&self) -> usize {
        self.map.len()
    }

    fn strategy(&self) -> &'static str {
        "hash"
    }
}

/// Equality-scan index. Quadratic; see module docs.
#[derive(Debug, Clone)]
pub struct ScanIndex<K> {
    keys: Vec<K>,
    warn_threshold: usize,
    warned: bool,
}

impl<K: PartialEq> ScanIndex<K> {
    pub fn new(warn_threshold: usize) -> Self {
        Self {
            keys: Vec::new(),
            warn_threshold,
            warned: false,
        }
    }
}

impl<K: PartialEq> KeyIndex<K> for ScanIndex<K> {
    fn position(&self, key: &K) -> Option<usize> {
        self.keys.iter().position(|k| k == key)
    }

    fn position_or_insert(&mut self, key: K, next: usize) -> (usize, bool) {
        if let Some(pos) = self.position(&key) {
            return (pos, false);
        }
        // Positions are dense, so `next` always equals the current key count.
        debug_assert_eq!(next, self.keys.len());
        self.keys.push(key);
        if !self.warned && self.keys.len() > self.warn_threshold {
            self.warned = true;
            #[cfg(feature = "tracing")]
            tracing::warn!(
                distinct_keys = self.keys.len(),
                threshold = self.warn_threshold,
                "equality-scan key index is quadratic; prefer hashable keys"
            );
        }
        (next, true)
    }

    fn len(&self) -> usize {
        self.keys.len()
    }

    fn strategy(&self) -> &'static str {
        "scan"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill<I: KeyIndex<K>, K>(index: &mut I, keys: Vec<K>) -> Vec<(usize, bool)> {
        keys.into_iter()
            .map(|k| {
                let next = index.len();
                index.position_or_insert(k, next)
            })
            .collect()
    }

    #[test]
    fn hash_index_assigns_first_occurrence_positions() {
        let mut index = HashIndex::new();
        let got = fill(&mut index, vec!["a", "b", "a", "c"]);
        assert_eq!(got, vec![(0, true), (1, true), (0, false), (2, true)]);
        assert_eq!(index.position(&"c"), Some(2));
        assert_eq!(index.position(&"z"), None);
    }

    #[test]
    fn scan_index_handles_float_keys() {
        let mut index = ScanIndex::new(16);
        let got = fill(&mut index, vec![8.0, 4.0, 1.0, 4.0]);
        assert_eq!(got, vec![(0, true), (1, true), (2, true), (1, false)]);
        assert_eq!(index.len(), 3);
        assert_eq!(index.strategy(), "scan");
    }
}
