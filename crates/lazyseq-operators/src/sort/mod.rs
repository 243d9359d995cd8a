//! Multi-key stable ordering.

pub(crate) mod chain;
pub mod ordered;

use std::cmp::Ordering;
use std::rc::Rc;

use lazyseq_core::compare::{self, Direction};

use crate::enumerable::Enumerable;
use chain::SortChain;
pub use ordered::OrderedEnumerable;

impl<T: 'static> Enumerable<T> {
    pub fn order_by<K, F>(&self, key: F) -> OrderedEnumerable<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.ordered(Rc::new(compare::by_key(key)), Direction::Ascending)
    }

    pub fn order_by_descending<K, F>(&self, key: F) -> OrderedEnumerable<T>
    where
        K: Ord + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.ordered(Rc::new(compare::by_key(key)), Direction::Descending)
    }

    /// Order with an element comparator; see [`compare::from_sign`] for
    /// comparators that return integers.
    pub fn order_by_with<F>(&self, cmp: F, direction: Direction) -> OrderedEnumerable<T>
    where
        F: Fn(&T, &T) -> Ordering + 'static,
    {
        self.ordered(Rc::new(cmp), direction)
    }

    fn ordered(&self, cmp: compare::Comparer<T>, direction: Direction) -> OrderedEnumerable<T> {
        OrderedEnumerable::new(self.clone(), SortChain::single(cmp, direction))
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    #[test]
    fn then_by_refines_ties() {
        let e = Enumerable::from_vec(vec![(1, 'b'), (2, 'a'), (1, 'a')]);
        let sorted = e.order_by(|p| p.0).then_by(|p| p.1);
        assert_eq!(sorted.to_vec(), vec![(1, 'a'), (1, 'b'), (2, 'a')]);
        assert_eq!(sorted.depth(), 2);
    }

    #[test]
    fn full_ties_keep_source_order() {
        let e = Enumerable::from_vec(vec![(2, 'x'), (1, 'y'), (2, 'z'), (1, 'w')]);
        assert_eq!(
            e.order_by_descending(|p| p.0).to_vec(),
            vec![(2, 'x'), (2, 'z'), (1, 'y'), (1, 'w')]
        );
    }

    #[test]
    fn refinements_do_not_leak_between_branches() {
        let e = Enumerable::from_vec(vec![(1, 3), (1, 1), (0, 2)]);
        let base = e.order_by(|p| p.0);
        let up = base.then_by(|p| p.1);
        let down = base.then_by_descending(|p| p.1);
        assert_eq!(up.to_vec(), vec![(0, 2), (1, 1), (1, 3)]);
        assert_eq!(down.to_vec(), vec![(0, 2), (1, 3), (1, 1)]);
        assert_eq!(base.to_vec(), vec![(0, 2), (1, 3), (1, 1)]);
    }

    #[test]
    fn comparator_steps_and_float_keys() {
        let e = Enumerable::from_vec(vec![2.5f64, -1.0, 9.75]);
        let desc = e.order_by_with(|a, b| compare::partial(a, b), Direction::Descending);
        assert_eq!(desc.to_vec(), vec![9.75, 2.5, -1.0]);
        let by_sign = Enumerable::from_vec(vec![3, 1, 2])
            .order_by_with(compare::from_sign(|a: &i32, b: &i32| a - b), Direction::Ascending)
            .then_by_with(|_, _| Ordering::Equal, Direction::Descending);
        assert_eq!(by_sign.to_vec(), vec![1, 2, 3]);
    }

    #[test]
    fn sort_is_deferred_and_rederived() {
        let drives = Rc::new(Cell::new(0));
        let seen = Rc::clone(&drives);
        let e = Enumerable::from_fn(move || {
            seen.set(seen.get() + 1);
            vec![3, 1, 2]
        });
        let sorted = e.order_by(|x| *x);
        assert_eq!(drives.get(), 0);
        assert_eq!(sorted.first().unwrap(), 1);
        assert_eq!(sorted.to_vec(), vec![1, 2, 3]);
        assert_eq!(drives.get(), 2);
    }
}
