//! Persistent chain of ordering steps.
//!
//! Appending a refinement allocates one link that points at the existing
//! chain, so `order_by(a).then_by(b)` and `order_by(a).then_by(c)` share the
//! `a` link and neither observes the other.

use std::rc::Rc;

use lazyseq_core::compare::{Comparer, Direction};

struct Link<T> {
    cmp: Comparer<T>,
    direction: Direction,
    parent: Option<Rc<Link<T>>>,
}

pub(crate) struct SortChain<T> {
    head: Option<Rc<Link<T>>>,
    len: usize,
}

impl<T> Clone for SortChain<T> {
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
        }
    }
}

impl<T> SortChain<T> {
    pub(crate) fn single(cmp: Comparer<T>, direction: Direction) -> Self {
        Self::empty().push(cmp, direction)
    }

    fn empty() -> Self {
        Self { head: None, len: 0 }
    }

    pub(crate) fn push(&self, cmp: Comparer<T>, direction: Direction) -> Self {
        Self {
            head: Some(Rc::new(Link {
                cmp,
                direction,
                parent: self.head.clone(),
            })),
            len: self.len + 1,
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Steps outermost first.
    pub(crate) fn steps(&self) -> Vec<(Comparer<T>, Direction)> {
        let mut out = Vec::with_capacity(self.len);
        let mut cursor = self.head.as_ref();
        while let Some(link) = cursor {
            out.push((Rc::clone(&link.cmp), link.direction));
            cursor = link.parent.as_ref();
        }
        out.reverse();
        out
    }
}
