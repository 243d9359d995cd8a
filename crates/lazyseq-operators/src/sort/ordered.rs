use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use lazyseq_core::compare::{self, Comparer, Direction};

use crate::enumerable::Enumerable;
use crate::sort::chain::SortChain;

/// A sequence plus its ordering steps.
///
/// Derefs to the sorted [`Enumerable`], so every operator applies to the
/// ordered output. Each drive materializes the source once and runs a single
/// stable sort with the composed comparator; nothing is cached between drives.
pub struct OrderedEnumerable<T> {
    source: Enumerable<T>,
    chain: SortChain<T>,
    sorted: Enumerable<T>,
}

impl<T> Clone for OrderedEnumerable<T> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            chain: self.chain.clone(),
            sorted: self.sorted.clone(),
        }
    }
}

impl<T> fmt::Debug for OrderedEnumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrderedEnumerable")
            .field("source", &self.source)
            .field("steps", &self.chain.len())
            .finish()
    }
}

impl<T> Deref for OrderedEnumerable<T> {
    type Target = Enumerable<T>;

    fn deref(&self) -> &Enumerable<T> {
        &self.sorted
    }
}

impl<T: 'static> OrderedEnumerable<T> {
    pub(crate) fn new(source: Enumerable<T>, chain: SortChain<T>) -> Self {
        let upstream = source.clone();
        let steps_chain = chain.clone();
        let sorted = Enumerable::from_boxed(move || {
            let steps = steps_chain.steps();
            let mut buffer: Vec<T> = upstream.iter().collect();
            buffer.sort_by(|a, b| compare::compose(&steps, a, b));
            crate::metrics::sorted(steps.len(), buffer.len());
            Box::new(buffer.into_iter())
        })
        .restartable_with(source.is_restartable());
        Self {
            source,
            chain,
            sorted,
        }
    }

    fn refine(&self, cmp: Comparer<T>, direction: Direction) -> Self {
        Self::new(self.source.clone(), self.chain.push(cmp, direction))
    }

    /// Break ties of the existing order by `key`, ascending.
    pub fn then_by<K, F>(&self, key: F) -> Self
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.refine(Rc::new(compare::by_key(key)), Direction::Ascending)
    }

    pub fn then_by_descending<K, F>(&self, key: F) -> Self
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.refine(Rc::new(compare::by_key(key)), Direction::Descending)
    }

    /// Break ties with an element comparator.
    pub fn then_by_with<F>(&self, cmp: F, direction: Direction) -> Self
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        self.refine(Rc::new(cmp), direction)
    }

    /// Number of ordering steps.
    pub fn depth(&self) -> usize {
        self.chain.len()
    }

    /// Drop the ordering handle, keeping the sorted pipeline.
    pub fn into_enumerable(self) -> Enumerable<T> {
        self.sorted
    }
}

impl<T: 'static> IntoIterator for OrderedEnumerable<T> {
    type Item = T;
    type IntoIter = lazyseq_core::BoxIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.sorted.iter()
    }
}
