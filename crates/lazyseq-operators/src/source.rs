//! Source bindings: the fixed sequences a pipeline can be rooted on.
//!
//! - [`VecSequence`]: shared, restartable, full native capabilities.
//! - [`SetSequence`]: restartable, native length and O(1) membership.
//! - [`OnceSequence`]: a single-pass iterator. The first drive consumes it;
//!   later drives see an empty sequence. Wrap it with `as_cached` when it
//!   must be read more than once.

use std::cell::RefCell;
use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use lazyseq_core::{BoxIter, Result};

use crate::traits::{Probe, Sequence};

#[derive(Debug)]
pub struct VecSequence<T> {
    items: Rc<Vec<T>>,
}

impl<T> VecSequence<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self {
            items: Rc::new(items),
        }
    }

    /// Bind an already shared buffer without copying it.
    pub fn from_shared(items: Rc<Vec<T>>) -> Self {
        Self { items }
    }
}

impl<T: Clone + 'static> Sequence<T> for VecSequence<T> {
    fn drive(&self) -> BoxIter<T> {
        let items = Rc::clone(&self.items);
        Box::new((0..items.len()).map(move |i| items[i].clone()))
    }

    fn native_len(&self) -> Probe<usize> {
        Probe::Native(self.items.len())
    }

    fn native_contains(&self, item: &T) -> Probe<bool>
    where
        T: PartialEq,
    {
        Probe::Native(self.items.contains(item))
    }

    fn native_get(&self, index: usize) -> Probe<Result<Option<T>>> {
        Probe::Native(Ok(self.items.get(index).cloned()))
    }

    fn native_reversed(&self) -> Probe<BoxIter<T>> {
        let items = Rc::clone(&self.items);
        Probe::Native(Box::new((0..items.len()).rev().map(move |i| items[i].clone())))
    }

    fn name(&self) -> &'static str {
        "vec"
    }
}

/// Hash set binding. Iteration order is the set's own (unspecified) order.
#[derive(Debug)]
pub struct SetSequence<T> {
    items: Rc<HashSet<T>>,
}

impl<T: Hash + Eq> SetSequence<T> {
    pub fn new(items: HashSet<T>) -> Self {
        Self {
            items: Rc::new(items),
        }
    }
}

impl<T: Hash + Eq + Clone + 'static> Sequence<T> for SetSequence<T> {
    fn drive(&self) -> BoxIter<T> {
        // Snapshot keeps the pass independent of the Rc borrow.
        let snapshot: Vec<T> = self.items.iter().cloned().collect();
        Box::new(snapshot.into_iter())
    }

    fn native_len(&self) -> Probe<usize> {
        Probe::Native(self.items.len())
    }

    fn native_contains(&self, item: &T) -> Probe<bool>
    where
        T: PartialEq,
    {
        Probe::Native(self.items.contains(item))
    }

    fn name(&self) -> &'static str {
        "set"
    }
}

pub struct OnceSequence<T> {
    iter: RefCell<Option<BoxIter<T>>>,
}

impl<T> OnceSequence<T> {
    pub fn new<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self {
            iter: RefCell::new(Some(Box::new(iter.into_iter()))),
        }
    }

    /// Whether the single pass has already been handed out.
    pub fn is_consumed(&self) -> bool {
        self.iter.borrow().is_none()
    }
}

impl<T: 'static> Sequence<T> for OnceSequence<T> {
    fn drive(&self) -> BoxIter<T> {
        match self.iter.borrow_mut().take() {
            Some(it) => it,
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!("single-pass source driven again; yielding nothing");
                Box::new(std::iter::empty())
            }
        }
    }

    fn is_restartable(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "once"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vec_sequence_probes_natively() {
        let seq = VecSequence::new(vec![3, 1, 2]);
        assert_eq!(seq.native_len(), Probe::Native(3));
        assert_eq!(seq.native_contains(&1), Probe::Native(true));
        assert_eq!(seq.native_get(5), Probe::Native(Ok(None)));
        match seq.native_reversed() {
            Probe::Native(it) => assert_eq!(it.collect::<Vec<_>>(), vec![2, 1, 3]),
            Probe::Fallback => panic!("vec reversal should be native"),
        }
        assert_eq!(seq.drive().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(seq.drive().collect::<Vec<_>>(), vec![3, 1, 2]);
    }

    #[test]
    fn once_sequence_yields_a_single_pass() {
        let seq = OnceSequence::new(vec![1, 2]);
        assert!(!seq.is_restartable());
        assert_eq!(seq.drive().collect::<Vec<_>>(), vec![1, 2]);
        assert!(seq.is_consumed());
        assert_eq!(seq.drive().count(), 0);
    }

    #[test]
    fn set_sequence_membership_is_native() {
        let seq = SetSequence::new([1, 2, 3].into_iter().collect());
        assert_eq!(seq.native_contains(&4), Probe::Native(false));
        assert_eq!(seq.native_get(0), Probe::Fallback);
    }
}
