use std::rc::Rc;

use crate::enumerable::Enumerable;
use crate::source::VecSequence;

/// One key and its members, in occurrence order. Immutable once built.
#[derive(Debug, PartialEq)]
pub struct Grouping<K, V> {
    key: K,
    values: Rc<Vec<V>>,
}

impl<K: Clone, V> Clone for Grouping<K, V> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            values: Rc::clone(&self.values),
        }
    }
}

impl<K, V> Grouping<K, V> {
    pub(crate) fn new(key: K, values: Vec<V>) -> Self {
        Self {
            key,
            values: Rc::new(values),
        }
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[V] {
        &self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.values.iter()
    }

    pub fn into_parts(self) -> (K, Rc<Vec<V>>) {
        (self.key, self.values)
    }
}

impl<K, V: Clone + 'static> Grouping<K, V> {
    /// Members as a pipeline sharing this grouping's storage.
    pub fn to_enumerable(&self) -> Enumerable<V> {
        Enumerable::from_sequence(VecSequence::from_shared(Rc::clone(&self.values)))
    }
}

impl<'a, K, V> IntoIterator for &'a Grouping<K, V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}
