//! Tail windows: `take_last` and `skip_last`.
//!
//! Both keep a bounded ring of at most `n` elements per drive.

use std::collections::VecDeque;

use lazyseq_core::BoxIter;

use crate::enumerable::Enumerable;

impl<T: 'static> Enumerable<T> {
    /// The final `count` elements. Nothing is yielded until upstream ends.
    pub fn take_last(&self, count: usize) -> Enumerable<T> {
        self.derive(move |it| Box::new(TakeLast::new(it, count)))
    }

    /// Everything except the final `count` elements; emission trails
    /// upstream by `count`.
    pub fn skip_last(&self, count: usize) -> Enumerable<T> {
        self.derive(move |it| Box::new(SkipLast::new(it, count)))
    }
}

struct TakeLast<T> {
    upstream: Option<BoxIter<T>>,
    count: usize,
    window: VecDeque<T>,
}

impl<T> TakeLast<T> {
    fn new(upstream: BoxIter<T>, count: usize) -> Self {
        Self {
            upstream: Some(upstream),
            count,
            window: VecDeque::with_capacity(count.min(1024)),
        }
    }
}

impl<T> Iterator for TakeLast<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(upstream) = self.upstream.take() {
            if self.count > 0 {
                for item in upstream {
                    if self.window.len() == self.count {
                        self.window.pop_front();
                    }
                    self.window.push_back(item);
                }
            }
            crate::metrics::materialized("take_last", self.window.len());
        }
        self.window.pop_front()
    }
}

struct SkipLast<T> {
    upstream: BoxIter<T>,
    count: usize,
    window: VecDeque<T>,
}

impl<T> SkipLast<T> {
    fn new(upstream: BoxIter<T>, count: usize) -> Self {
        Self {
            upstream,
            count,
            window: VecDeque::with_capacity(count.min(1024) + 1),
        }
    }
}

impl<T> Iterator for SkipLast<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        for item in self.upstream.by_ref() {
            self.window.push_back(item);
            if self.window.len() > self.count {
                return self.window.pop_front();
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn take_last_keeps_tail() {
        let e = Enumerable::from_fn(|| 1..=6);
        assert_eq!(e.take_last(2).to_vec(), vec![5, 6]);
        assert_eq!(e.take_last(10).to_vec(), vec![1, 2, 3, 4, 5, 6]);
        assert!(e.take_last(0).to_vec().is_empty());
    }

    #[test]
    fn skip_last_trails_upstream() {
        let pulled = Rc::new(Cell::new(0));
        let seen = Rc::clone(&pulled);
        let e = Enumerable::from_fn(move || {
            let seen = Rc::clone(&seen);
            (1..=5).inspect(move |_| seen.set(seen.get() + 1))
        });
        let mut it = e.skip_last(2).iter();
        assert_eq!(it.next(), Some(1));
        assert_eq!(pulled.get(), 3);
        assert_eq!(it.collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(e.skip_last(0).count(), 5);
    }
}
