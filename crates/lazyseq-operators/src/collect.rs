//! Terminal conversions and side-effecting consumers.

use std::collections::hash_map::Entry;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use lazyseq_core::{QueryError, Result};

use crate::enumerable::Enumerable;

impl<T: 'static> Enumerable<T> {
    pub fn to_vec(&self) -> Vec<T> {
        self.iter().collect()
    }

    /// Fixed-size snapshot of the sequence.
    pub fn to_boxed_slice(&self) -> Box<[T]> {
        self.iter().collect()
    }

    pub fn to_set(&self) -> HashSet<T>
    where
        T: Hash + Eq,
    {
        self.iter().collect()
    }

    /// Key/value map. A repeated key fails with `DuplicateKey` carrying the
    /// position of the second occurrence; no partial map is returned.
    pub fn to_map<K, V, F, G>(&self, key: F, value: G) -> Result<HashMap<K, V>>
    where
        K: Hash + Eq,
        F: Fn(&T) -> K,
        G: Fn(T) -> V,
    {
        let mut out = HashMap::new();
        for (position, item) in self.iter().enumerate() {
            match out.entry(key(&item)) {
                Entry::Occupied(_) => return Err(QueryError::DuplicateKey { position }),
                Entry::Vacant(slot) => {
                    slot.insert(value(item));
                }
            }
        }
        Ok(out)
    }

    /// Same length and pairwise equal elements, in order.
    pub fn sequence_equal(&self, other: &Enumerable<T>) -> bool
    where
        T: PartialEq,
    {
        self.iter().eq(other.iter())
    }

    pub fn for_each<F>(&self, mut action: F)
    where
        F: FnMut(T),
    {
        self.iter().for_each(&mut action)
    }

    pub fn for_each_indexed<F>(&self, mut action: F)
    where
        F: FnMut(T, usize),
    {
        for (i, x) in self.iter().enumerate() {
            action(x, i);
        }
    }
}
