//! Key grouping and lookups.
//!
//! `to_lookup*` build a [`Lookup`] immediately; `group_by*` defer the same
//! build until the returned pipeline is driven and rebuild it per drive.
//!
//! Keys that are `Hash + Eq` use a hashed index. The `_eq` variants accept
//! keys that only implement `PartialEq` (floats, for example) and fall back
//! to a linear scan over the distinct keys seen so far, which is O(n·k) and
//! O(n²) in the worst case.

pub mod grouping;
pub mod lookup;

use std::hash::Hash;
use std::rc::Rc;

use lazyseq_core::config::QueryConfig;
use lazyseq_core::key_index::{HashIndex, ScanIndex};

use crate::enumerable::Enumerable;
pub use grouping::Grouping;
pub use lookup::{Lookup, LookupIter};

fn scan_index<K: PartialEq>() -> ScanIndex<K> {
    ScanIndex::new(QueryConfig::global().scan_warn_threshold)
}

impl<T: 'static> Enumerable<T> {
    pub fn to_lookup<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K,
    {
        Lookup::build(self.iter(), HashIndex::<K>::new(), key, |x| x)
    }

    pub fn to_lookup_select<K, V, F, G>(&self, key: F, value: G) -> Lookup<K, V>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K,
        G: Fn(T) -> V,
    {
        Lookup::build(self.iter(), HashIndex::<K>::new(), key, value)
    }

    /// `to_lookup` for keys with only `PartialEq`. Quadratic in the number
    /// of distinct keys.
    pub fn to_lookup_eq<K, F>(&self, key: F) -> Lookup<K, T>
    where
        K: PartialEq + Clone + 'static,
        F: Fn(&T) -> K,
    {
        Lookup::build(self.iter(), scan_index::<K>(), key, |x| x)
    }

    /// Groupings in first-occurrence key order.
    pub fn group_by<K, F>(&self, key: F) -> Enumerable<Grouping<K, T>>
    where
        K: Hash + Eq + Clone + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.group_by_select(key, |x| x)
    }

    pub fn group_by_select<K, V, F, G>(&self, key: F, value: G) -> Enumerable<Grouping<K, V>>
    where
        K: Hash + Eq + Clone + 'static,
        V: 'static,
        F: Fn(&T) -> K + 'static,
        G: Fn(T) -> V + 'static,
    {
        let key = Rc::new(key);
        let value = Rc::new(value);
        self.derive(move |it| {
            let lookup = Lookup::build(it, HashIndex::<K>::new(), &*key, &*value);
            Box::new(lookup.into_iter())
        })
    }

    /// Group, project members, then combine each (key, members) pair.
    pub fn group_by_with<K, V, R, F, G, H>(&self, key: F, value: G, result: H) -> Enumerable<R>
    where
        K: Hash + Eq + Clone + 'static,
        V: Clone + 'static,
        R: 'static,
        F: Fn(&T) -> K + 'static,
        G: Fn(T) -> V + 'static,
        H: Fn(K, Enumerable<V>) -> R + 'static,
    {
        let result = Rc::new(result);
        self.group_by_select(key, value).derive(move |groups| {
            let result = Rc::clone(&result);
            Box::new(groups.map(move |g| {
                let members = g.to_enumerable();
                let (k, _) = g.into_parts();
                result(k, members)
            }))
        })
    }

    /// `group_by` for keys with only `PartialEq`. Quadratic in the number
    /// of distinct keys.
    pub fn group_by_eq<K, F>(&self, key: F) -> Enumerable<Grouping<K, T>>
    where
        K: PartialEq + Clone + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let key = Rc::new(key);
        self.derive(move |it| {
            let lookup = Lookup::build(it, scan_index::<K>(), &*key, |x| x);
            Box::new(lookup.into_iter())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn group_by_keeps_key_and_member_order() {
        let e = Enumerable::from_vec(vec![8.3f64, 4.9, 1.5, 4.3]);
        let groups = e.group_by(|x| x.floor() as i64).to_vec();
        let keys: Vec<i64> = groups.iter().map(|g| *g.key()).collect();
        assert_eq!(keys, vec![8, 4, 1]);
        assert_eq!(groups[1].values(), &[4.9, 4.3]);
    }

    #[test]
    fn group_by_eq_accepts_float_keys() {
        let e = Enumerable::from_vec(vec![8.3f64, 4.9, 1.5, 4.3]);
        let groups = e.group_by_eq(|x| x.floor()).to_vec();
        let keys: Vec<f64> = groups.iter().map(|g| *g.key()).collect();
        assert_eq!(keys, vec![8.0, 4.0, 1.0]);
        assert_eq!(e.to_lookup_eq(|x| x.floor()).strategy(), "scan");
    }

    #[test]
    fn group_by_with_combines_in_key_order() {
        let words = Enumerable::from_vec(vec!["ant", "bee", "asp", "cat", "bat"]);
        let summary = words
            .group_by_with(|w| w.as_bytes()[0], |w| w.len(), |k, lens| (k as char, lens.count()))
            .to_vec();
        assert_eq!(summary, vec![('a', 2), ('b', 2), ('c', 1)]);
    }

    #[test]
    fn lookup_absent_key_is_empty() {
        let e = Enumerable::from_vec(vec![1, 2, 3, 4, 5]);
        let lookup = e.to_lookup_select(|x| x % 2 == 0, |x| x * 10);
        assert_eq!(lookup.len(), 2);
        assert!(lookup.contains(&true));
        assert_eq!(lookup.get(&false).values(), &[10, 30, 50]);

        let odd_only = Enumerable::from_vec(vec![1, 3]).to_lookup(|x| x % 2 == 0);
        assert!(!odd_only.contains(&true));
        assert!(odd_only.get(&true).is_empty());
    }

    #[test]
    fn apply_result_selector_is_lazy_and_ordered() {
        let lookup = Enumerable::from_vec(vec!["x1", "y1", "x2"]).to_lookup(|s| s.as_bytes()[0]);
        let sizes = lookup.apply_result_selector(|k, members| (k, members.to_vec()));
        assert_eq!(
            sizes.to_vec(),
            vec![(b'x', vec!["x1", "x2"]), (b'y', vec!["y1"])]
        );
    }
}
