//! `Enumerable<T>`: the lazy pipeline node.
//!
//! A node is an immutable, cheaply clonable handle. It is either bound to a
//! [`Sequence`] or to a producer closure that re-derives its output from
//! upstream node(s) every time it is driven. Nothing runs until a terminal
//! consumer pulls; building a longer chain never mutates an existing node,
//! so any node in a chain can be re-queried independently.

use std::fmt;
use std::rc::Rc;

use lazyseq_core::{BoxIter, QueryError, Result};

use crate::source::{OnceSequence, VecSequence};
use crate::traits::{Probe, Sequence};

enum Binding<T> {
    Sequence(Rc<dyn Sequence<T>>),
    Producer(Rc<dyn Fn() -> BoxIter<T>>),
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        match self {
            Binding::Sequence(s) => Binding::Sequence(Rc::clone(s)),
            Binding::Producer(p) => Binding::Producer(Rc::clone(p)),
        }
    }
}

pub struct Enumerable<T> {
    binding: Binding<T>,
    /// Producer bindings only: false once any upstream is single-pass.
    restartable: bool,
}

impl<T> Clone for Enumerable<T> {
    fn clone(&self) -> Self {
        Self {
            binding: self.binding.clone(),
            restartable: self.restartable,
        }
    }
}

impl<T> fmt::Debug for Enumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let binding = match &self.binding {
            Binding::Sequence(s) => s.name(),
            Binding::Producer(_) => "producer",
        };
        f.debug_struct("Enumerable")
            .field("binding", &binding)
            .finish()
    }
}

impl<T: 'static> Enumerable<T> {
    /// Bind a producer; each drive calls it again for a fresh pass.
    pub fn from_fn<F, I>(producer: F) -> Self
    where
        F: Fn() -> I + 'static,
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_boxed(move || Box::new(producer().into_iter()))
    }

    pub(crate) fn from_boxed<F>(producer: F) -> Self
    where
        F: Fn() -> BoxIter<T> + 'static,
    {
        Self {
            binding: Binding::Producer(Rc::new(producer)),
            restartable: true,
        }
    }

    /// Bind a host sequence; its native capabilities are probed on demand.
    pub fn from_sequence<S>(sequence: S) -> Self
    where
        S: Sequence<T> + 'static,
    {
        Self {
            binding: Binding::Sequence(Rc::new(sequence)),
            restartable: true,
        }
    }

    /// Bind a single-pass iterator. Only the first drive sees its elements.
    pub fn once<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
    {
        Self::from_sequence(OnceSequence::new(iter))
    }

    pub fn empty() -> Self {
        Self::from_boxed(|| Box::new(std::iter::empty()))
    }

    /// Start one pass over the pipeline.
    pub fn iter(&self) -> BoxIter<T> {
        match &self.binding {
            Binding::Sequence(s) => s.drive(),
            Binding::Producer(p) => p(),
        }
    }

    /// Whether driving this node again replays it. Derived nodes answer
    /// false as soon as any of their upstreams is single-pass.
    pub fn is_restartable(&self) -> bool {
        match &self.binding {
            Binding::Sequence(s) => s.is_restartable(),
            Binding::Producer(_) => self.restartable,
        }
    }

    /// Fold another upstream's restartability into this node's.
    pub(crate) fn restartable_with(mut self, upstream: bool) -> Self {
        self.restartable &= upstream;
        self
    }

    /// Build a derived node: `op` turns one upstream pass into one output pass.
    pub(crate) fn derive<U, F>(&self, op: F) -> Enumerable<U>
    where
        U: 'static,
        F: Fn(BoxIter<T>) -> BoxIter<U> + 'static,
    {
        let upstream = self.clone();
        Enumerable::from_boxed(move || op(upstream.iter()))
            .restartable_with(self.is_restartable())
    }

    fn sequence(&self) -> Option<&Rc<dyn Sequence<T>>> {
        match &self.binding {
            Binding::Sequence(s) => Some(s),
            Binding::Producer(_) => None,
        }
    }

    /// Number of elements. Uses the source's native length when available.
    pub fn count(&self) -> usize {
        self.sequence()
            .map_or(Probe::Fallback, |s| s.native_len())
            .or_else(|| self.iter().count())
    }

    pub fn contains(&self, item: &T) -> bool
    where
        T: PartialEq,
    {
        self.sequence()
            .map_or(Probe::Fallback, |s| s.native_contains(item))
            .or_else(|| self.iter().any(|x| x == *item))
    }

    /// Element at `index`; `IndexOutOfRange` past the end.
    pub fn element_at(&self, index: usize) -> Result<T> {
        self.try_get(index)?
            .ok_or(QueryError::IndexOutOfRange { index })
    }

    /// Element at `index`, or `default` past the end. Errors only when the
    /// source cannot serve an index it once produced (evicted cache slots).
    pub fn element_at_or(&self, index: usize, default: T) -> Result<T> {
        Ok(self.try_get(index)?.unwrap_or(default))
    }

    fn try_get(&self, index: usize) -> Result<Option<T>> {
        self.sequence()
            .map_or(Probe::Fallback, |s| s.native_get(index))
            .or_else(|| Ok(self.iter().nth(index)))
    }

    /// Last-to-first. Native reversal when the source has one; otherwise each
    /// drive materializes upstream before yielding the first element.
    pub fn reverse(&self) -> Enumerable<T> {
        let upstream = self.clone();
        Enumerable::from_boxed(move || {
            if let Some(seq) = upstream.sequence() {
                if let Probe::Native(it) = seq.native_reversed() {
                    return it;
                }
            }
            let buffered: Vec<T> = upstream.iter().collect();
            crate::metrics::materialized("reverse", buffered.len());
            Box::new(buffered.into_iter().rev())
        })
        .restartable_with(self.is_restartable())
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    /// Bind an owned vector (restartable, full native capabilities).
    pub fn from_vec(items: Vec<T>) -> Self {
        Self::from_sequence(VecSequence::new(items))
    }
}

impl<T: Clone + 'static> From<Vec<T>> for Enumerable<T> {
    fn from(items: Vec<T>) -> Self {
        Self::from_vec(items)
    }
}

impl<T: Clone + 'static> FromIterator<T> for Enumerable<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: 'static> IntoIterator for Enumerable<T> {
    type Item = T;
    type IntoIter = BoxIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T: 'static> IntoIterator for &Enumerable<T> {
    type Item = T;
    type IntoIter = BoxIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
