//! Filtering and limiting operators.
//!
//! All of these are streaming and short-circuit: once a limit is satisfied
//! they stop pulling upstream.

use std::rc::Rc;

use lazyseq_core::{BoxIter, QueryError, Result};

use crate::enumerable::Enumerable;

impl<T: 'static> Enumerable<T> {
    pub fn filter<F>(&self, predicate: F) -> Enumerable<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.derive(move |it| {
            let predicate = Rc::clone(&predicate);
            Box::new(it.filter(move |x| predicate(x)))
        })
    }

    /// Like `filter`, with the element's upstream position.
    pub fn filter_indexed<F>(&self, predicate: F) -> Enumerable<T>
    where
        F: Fn(&T, usize) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.derive(move |it| {
            let predicate = Rc::clone(&predicate);
            Box::new(
                it.enumerate()
                    .filter(move |(i, x)| predicate(x, *i))
                    .map(|(_, x)| x),
            )
        })
    }

    pub fn take(&self, count: usize) -> Enumerable<T> {
        self.derive(move |it| Box::new(it.take(count)))
    }

    pub fn skip(&self, count: usize) -> Enumerable<T> {
        self.derive(move |it| Box::new(it.skip(count)))
    }

    pub fn take_while<F>(&self, predicate: F) -> Enumerable<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.derive(move |it| {
            let predicate = Rc::clone(&predicate);
            Box::new(it.take_while(move |x| predicate(x)))
        })
    }

    pub fn take_while_indexed<F>(&self, predicate: F) -> Enumerable<T>
    where
        F: Fn(&T, usize) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.derive(move |it| {
            let predicate = Rc::clone(&predicate);
            Box::new(
                it.enumerate()
                    .take_while(move |(i, x)| predicate(x, *i))
                    .map(|(_, x)| x),
            )
        })
    }

    pub fn skip_while<F>(&self, predicate: F) -> Enumerable<T>
    where
        F: Fn(&T) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.derive(move |it| {
            let predicate = Rc::clone(&predicate);
            Box::new(it.skip_while(move |x| predicate(x)))
        })
    }

    pub fn skip_while_indexed<F>(&self, predicate: F) -> Enumerable<T>
    where
        F: Fn(&T, usize) -> bool + 'static,
    {
        let predicate = Rc::new(predicate);
        self.derive(move |it| {
            let predicate = Rc::clone(&predicate);
            Box::new(
                it.enumerate()
                    .skip_while(move |(i, x)| predicate(x, *i))
                    .map(|(_, x)| x),
            )
        })
    }

    /// Positions `start, start + step, ...` strictly below `end`.
    pub fn elements_in(&self, start: usize, end: usize, step: usize) -> Result<Enumerable<T>> {
        if step == 0 {
            return Err(QueryError::invalid_argument("elements_in step must be positive"));
        }
        let len = end.saturating_sub(start);
        Ok(self.derive(move |it| Box::new(it.skip(start).take(len).step_by(step))))
    }

    /// Keep the elements convertible to `U`, converted.
    pub fn of_type<U>(&self) -> Enumerable<U>
    where
        U: TryFrom<T> + 'static,
    {
        self.derive(|it| Box::new(it.filter_map(|x| U::try_from(x).ok())))
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    /// The upstream, or a single `default` when upstream is empty.
    pub fn default_if_empty(&self, default: T) -> Enumerable<T> {
        self.derive(move |mut it| -> BoxIter<T> {
            match it.next() {
                Some(first) => Box::new(std::iter::once(first).chain(it)),
                None => Box::new(std::iter::once(default.clone())),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    fn counted(values: Vec<i32>, pulls: Rc<Cell<usize>>) -> Enumerable<i32> {
        Enumerable::from_fn(move || {
            let pulls = Rc::clone(&pulls);
            values.clone().into_iter().inspect(move |_| pulls.set(pulls.get() + 1))
        })
    }

    #[test]
    fn take_stops_pulling() {
        let pulls = Rc::new(Cell::new(0));
        let e = counted(vec![1, 2, 3, 4, 5], Rc::clone(&pulls));
        assert_eq!(e.take(2).to_vec(), vec![1, 2]);
        assert_eq!(pulls.get(), 2);
    }

    #[test]
    fn indexed_variants_see_upstream_positions() {
        let e = Enumerable::from_vec(vec![10, 11, 12, 13, 14]);
        assert_eq!(e.filter_indexed(|_, i| i % 2 == 0).to_vec(), vec![10, 12, 14]);
        assert_eq!(e.take_while_indexed(|x, i| *x < 13 && i < 5).to_vec(), vec![10, 11, 12]);
        assert_eq!(e.skip_while_indexed(|_, i| i < 3).to_vec(), vec![13, 14]);
    }

    #[test]
    fn while_variants() {
        let e = Enumerable::from_vec(vec![1, 2, 5, 1]);
        assert_eq!(e.take_while(|x| *x < 3).to_vec(), vec![1, 2]);
        assert_eq!(e.skip_while(|x| *x < 3).to_vec(), vec![5, 1]);
        assert_eq!(e.skip(3).to_vec(), vec![1]);
    }

    #[test]
    fn elements_in_slices_with_step() {
        let e = Enumerable::from_fn(|| 0..10);
        assert_eq!(e.elements_in(2, 9, 3).unwrap().to_vec(), vec![2, 5, 8]);
        assert!(e.elements_in(5, 2, 1).unwrap().to_vec().is_empty());
        assert!(matches!(
            e.elements_in(0, 3, 0),
            Err(QueryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn of_type_keeps_convertible() {
        let e = Enumerable::from_vec(vec![1i64, -2, 300, 4]);
        assert_eq!(e.of_type::<u8>().to_vec(), vec![1u8, 4]);
    }

    #[test]
    fn default_if_empty() {
        assert_eq!(Enumerable::<i32>::empty().default_if_empty(7).to_vec(), vec![7]);
        assert_eq!(Enumerable::from_vec(vec![1, 2]).default_if_empty(7).to_vec(), vec![1, 2]);
    }
}
