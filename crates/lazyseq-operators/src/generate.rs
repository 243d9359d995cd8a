//! Generated sources: ranges, repetition and tree walks.

use std::collections::VecDeque;
use std::rc::Rc;

use lazyseq_core::{QueryError, Result};

use crate::enumerable::Enumerable;

impl Enumerable<i64> {
    /// `count` consecutive integers starting at `start`.
    pub fn range(start: i64, count: i64) -> Result<Self> {
        if count < 0 {
            return Err(QueryError::invalid_argument(format!(
                "range count must be non-negative, got {count}"
            )));
        }
        if count > 0 && start.checked_add(count - 1).is_none() {
            return Err(QueryError::invalid_argument(format!(
                "range of {count} from {start} overflows i64"
            )));
        }
        Ok(Self::from_fn(move || (0..count).map(move |i| start + i)))
    }

    /// Ascending integers from `start` up to `i64::MAX`. Effectively
    /// unbounded; bound it with `take`/`take_while` before a full consumer.
    pub fn range_from(start: i64) -> Self {
        Self::from_fn(move || start..=i64::MAX)
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    pub fn repeat(value: T, count: i64) -> Result<Self> {
        if count < 0 {
            return Err(QueryError::invalid_argument(format!(
                "repeat count must be non-negative, got {count}"
            )));
        }
        let count = count as usize;
        Ok(Self::from_fn(move || std::iter::repeat(value.clone()).take(count)))
    }

    pub fn repeat_forever(value: T) -> Self {
        Self::from_fn(move || std::iter::repeat(value.clone()))
    }

    /// Pre-order walk from `root`; children are visited in the order the
    /// selector yields them.
    pub fn traverse_depth_first<I, F>(root: T, children: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> I + 'static,
    {
        let children = Rc::new(children);
        Self::from_boxed(move || {
            let children = Rc::clone(&children);
            let mut stack = vec![root.clone()];
            Box::new(std::iter::from_fn(move || {
                let node = stack.pop()?;
                let mut kids: Vec<T> = children(&node).into_iter().collect();
                kids.reverse();
                stack.extend(kids);
                Some(node)
            }))
        })
    }

    /// Level-order walk from `root`.
    pub fn traverse_breadth_first<I, F>(root: T, children: F) -> Self
    where
        I: IntoIterator<Item = T>,
        F: Fn(&T) -> I + 'static,
    {
        let children = Rc::new(children);
        Self::from_boxed(move || {
            let children = Rc::clone(&children);
            let mut queue = VecDeque::from([root.clone()]);
            Box::new(std::iter::from_fn(move || {
                let node = queue.pop_front()?;
                queue.extend(children(&node));
                Some(node)
            }))
        })
    }
}
