use std::fmt;
use std::rc::Rc;

use lazyseq_core::key_index::KeyIndex;

use crate::enumerable::Enumerable;
use crate::group::grouping::Grouping;
use crate::source::VecSequence;

/// Ordered multi-map from distinct keys to their [`Grouping`]s.
///
/// Key order is first occurrence in the source pass; member order is
/// occurrence order. Cheap to clone (shared storage).
pub struct Lookup<K, V> {
    groups: Rc<Vec<Grouping<K, V>>>,
    index: Rc<dyn KeyIndex<K>>,
}

impl<K, V> Clone for Lookup<K, V> {
    fn clone(&self) -> Self {
        Self {
            groups: Rc::clone(&self.groups),
            index: Rc::clone(&self.index),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for Lookup<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lookup")
            .field("strategy", &self.index.strategy())
            .field("groups", &self.groups)
            .finish()
    }
}

impl<K: 'static, V> Lookup<K, V> {
    /// One pass over `items`: the first time a key is seen its grouping is
    /// appended; every element's projected value joins its key's grouping.
    pub(crate) fn build<T, I, F, G>(items: impl Iterator<Item = T>, mut index: I, key: F, mut value: G) -> Self
    where
        K: Clone,
        I: KeyIndex<K> + 'static,
        F: Fn(&T) -> K,
        G: FnMut(T) -> V,
    {
        let mut slots: Vec<(K, Vec<V>)> = Vec::new();
        let mut rows = 0usize;
        for item in items {
            rows += 1;
            let k = key(&item);
            let (pos, inserted) = index.position_or_insert(k.clone(), slots.len());
            if inserted {
                slots.push((k, Vec::new()));
            }
            slots[pos].1.push(value(item));
        }
        crate::metrics::lookup_built(index.strategy(), slots.len(), rows);

        let groups = slots
            .into_iter()
            .map(|(k, values)| Grouping::new(k, values))
            .collect();
        Self {
            groups: Rc::new(groups),
            index: Rc::new(index),
        }
    }
}

impl<K, V> Lookup<K, V> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.index.position(key).is_some()
    }

    /// Key index strategy (`"hash"` or `"scan"`).
    pub fn strategy(&self) -> &'static str {
        self.index.strategy()
    }

    /// The grouping for `key`. An absent key yields an empty grouping.
    pub fn get(&self, key: &K) -> Grouping<K, V>
    where
        K: Clone,
    {
        match self.index.position(key) {
            Some(pos) => self.groups[pos].clone(),
            None => Grouping::new(key.clone(), Vec::new()),
        }
    }

    pub fn iter(&self) -> LookupIter<K, V> {
        LookupIter {
            groups: Rc::clone(&self.groups),
            next: 0,
        }
    }
}

impl<K: Clone + 'static, V: Clone + 'static> Lookup<K, V> {
    /// Groupings as a pipeline, in key order.
    pub fn to_enumerable(&self) -> Enumerable<Grouping<K, V>> {
        Enumerable::from_sequence(VecSequence::from_shared(Rc::clone(&self.groups)))
    }

    /// Lazily map every (key, members) pair, preserving key order.
    pub fn apply_result_selector<R, F>(&self, selector: F) -> Enumerable<R>
    where
        R: 'static,
        F: Fn(K, Enumerable<V>) -> R + 'static,
    {
        let selector = Rc::new(selector);
        let lookup = self.clone();
        Enumerable::from_boxed(move || {
            let selector = Rc::clone(&selector);
            Box::new(
                lookup
                    .iter()
                    .map(move |g| selector(g.key().clone(), g.to_enumerable())),
            )
        })
    }
}

/// Owning iterator over a lookup's groupings.
pub struct LookupIter<K, V> {
    groups: Rc<Vec<Grouping<K, V>>>,
    next: usize,
}

impl<K: Clone, V> Iterator for LookupIter<K, V> {
    type Item = Grouping<K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        let g = self.groups.get(self.next)?.clone();
        self.next += 1;
        Some(g)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.groups.len() - self.next;
        (left, Some(left))
    }
}

impl<K: Clone, V> IntoIterator for Lookup<K, V> {
    type Item = Grouping<K, V>;
    type IntoIter = LookupIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K: Clone, V> IntoIterator for &Lookup<K, V> {
    type Item = Grouping<K, V>;
    type IntoIter = LookupIter<K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
