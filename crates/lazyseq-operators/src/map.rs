//! Projection, flattening and combination operators.

use std::rc::Rc;

use lazyseq_core::{BoxIter, QueryError};

use crate::enumerable::Enumerable;

impl<T: 'static> Enumerable<T> {
    pub fn select<U, F>(&self, selector: F) -> Enumerable<U>
    where
        U: 'static,
        F: Fn(T) -> U + 'static,
    {
        let selector = Rc::new(selector);
        self.derive(move |it| {
            let selector = Rc::clone(&selector);
            Box::new(it.map(move |x| selector(x)))
        })
    }

    /// Like `select`, with the element's upstream position.
    pub fn select_indexed<U, F>(&self, selector: F) -> Enumerable<U>
    where
        U: 'static,
        F: Fn(T, usize) -> U + 'static,
    {
        let selector = Rc::new(selector);
        self.derive(move |it| {
            let selector = Rc::clone(&selector);
            Box::new(it.enumerate().map(move |(i, x)| selector(x, i)))
        })
    }

    /// Map each element to a sub-sequence and drain each one, in order,
    /// before moving to the next upstream element.
    pub fn select_many<U, I, F>(&self, selector: F) -> Enumerable<U>
    where
        U: 'static,
        I: IntoIterator<Item = U> + 'static,
        I::IntoIter: 'static,
        F: Fn(T) -> I + 'static,
    {
        let selector = Rc::new(selector);
        self.derive(move |it| {
            let selector = Rc::clone(&selector);
            Box::new(it.flat_map(move |x| selector(x)))
        })
    }

    /// `select_many` with a combiner applied to every (outer, inner) pair.
    pub fn select_many_with<U, I, R, F, G>(&self, selector: F, combiner: G) -> Enumerable<R>
    where
        U: 'static,
        R: 'static,
        I: IntoIterator<Item = U>,
        I::IntoIter: 'static,
        F: Fn(&T) -> I + 'static,
        G: Fn(&T, U) -> R + 'static,
    {
        let selector = Rc::new(selector);
        let combiner = Rc::new(combiner);
        self.derive(move |it| {
            let selector = Rc::clone(&selector);
            let combiner = Rc::clone(&combiner);
            Box::new(it.flat_map(move |outer| {
                let inner = selector(&outer).into_iter();
                let combiner = Rc::clone(&combiner);
                inner.map(move |u| combiner(&outer, u))
            }))
        })
    }

    /// Checked conversion of every element. Failures surface as
    /// `InvalidCast` items at the position they occur.
    pub fn cast<U>(&self) -> Enumerable<Result<U, QueryError>>
    where
        U: TryFrom<T> + 'static,
    {
        self.derive(|it| {
            Box::new(
                it.enumerate()
                    .map(|(position, x)| U::try_from(x).map_err(|_| QueryError::InvalidCast { position })),
            )
        })
    }

    /// Stop at the shorter input.
    pub fn zip<U: 'static>(&self, other: &Enumerable<U>) -> Enumerable<(T, U)> {
        let restartable = other.is_restartable();
        let other = other.clone();
        self.derive(move |it| Box::new(it.zip(other.iter())))
            .restartable_with(restartable)
    }

    pub fn zip3<U: 'static, V: 'static>(
        &self,
        second: &Enumerable<U>,
        third: &Enumerable<V>,
    ) -> Enumerable<(T, U, V)> {
        let restartable = second.is_restartable() && third.is_restartable();
        let second = second.clone();
        let third = third.clone();
        self.derive(move |it| {
            Box::new(
                it.zip(second.iter())
                    .zip(third.iter())
                    .map(|((a, b), c)| (a, b, c)),
            )
        })
        .restartable_with(restartable)
    }

    pub fn zip_with<U, R, F>(&self, other: &Enumerable<U>, combiner: F) -> Enumerable<R>
    where
        U: 'static,
        R: 'static,
        F: Fn(T, U) -> R + 'static,
    {
        let restartable = other.is_restartable();
        let other = other.clone();
        let combiner = Rc::new(combiner);
        self.derive(move |it| {
            let combiner = Rc::clone(&combiner);
            Box::new(it.zip(other.iter()).map(move |(a, b)| combiner(a, b)))
        })
        .restartable_with(restartable)
    }

    pub fn concat(&self, other: &Enumerable<T>) -> Enumerable<T> {
        let restartable = other.is_restartable();
        let other = other.clone();
        self.derive(move |it| Box::new(it.chain(other.iter())))
            .restartable_with(restartable)
    }

    /// Round-robin across `self` and `others`, dropping inputs as they run out.
    pub fn interleave(&self, others: &[Enumerable<T>]) -> Enumerable<T> {
        let restartable = others.iter().all(Enumerable::is_restartable);
        let others: Vec<Enumerable<T>> = others.to_vec();
        self.derive(move |it| {
            let mut lanes: Vec<BoxIter<T>> = Vec::with_capacity(others.len() + 1);
            lanes.push(it);
            lanes.extend(others.iter().map(|e| e.iter()));
            Box::new(Interleave { lanes, cursor: 0 })
        })
        .restartable_with(restartable)
    }

    /// Flatten to any depth. Elements for which `selector` returns a nested
    /// sequence are replaced by that sequence, itself flattened the same way;
    /// all other elements are yielded as-is, depth first.
    pub fn flatten_with<I, F>(&self, selector: F) -> Enumerable<T>
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: 'static,
        F: Fn(&T) -> Option<I> + 'static,
    {
        let selector = Rc::new(selector);
        self.derive(move |it| {
            Box::new(DepthFlatten {
                stack: vec![it],
                selector: Rc::clone(&selector),
            })
        })
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    pub fn append(&self, value: T) -> Enumerable<T> {
        self.derive(move |it| Box::new(it.chain(std::iter::once(value.clone()))))
    }

    pub fn prepend(&self, value: T) -> Enumerable<T> {
        self.derive(move |it| Box::new(std::iter::once(value.clone()).chain(it)))
    }
}

impl<T> Enumerable<T>
where
    T: IntoIterator + 'static,
    T::IntoIter: 'static,
    T::Item: 'static,
{
    /// Flatten one level of nesting.
    pub fn flatten(&self) -> Enumerable<T::Item> {
        self.derive(|it| Box::new(it.flatten()))
    }
}

struct DepthFlatten<T, F> {
    stack: Vec<BoxIter<T>>,
    selector: Rc<F>,
}

impl<T, I, F> Iterator for DepthFlatten<T, F>
where
    I: IntoIterator<Item = T>,
    I::IntoIter: 'static,
    F: Fn(&T) -> Option<I>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            let top = self.stack.last_mut()?;
            match top.next() {
                Some(item) => match (self.selector)(&item) {
                    Some(nested) => self.stack.push(Box::new(nested.into_iter())),
                    None => return Some(item),
                },
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

struct Interleave<T> {
    lanes: Vec<BoxIter<T>>,
    cursor: usize,
}

impl<T> Iterator for Interleave<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        while !self.lanes.is_empty() {
            if self.cursor >= self.lanes.len() {
                self.cursor = 0;
            }
            match self.lanes[self.cursor].next() {
                Some(item) => {
                    self.cursor += 1;
                    return Some(item);
                }
                None => {
                    // Exhausted lane; the next lane slides into `cursor`.
                    drop(self.lanes.remove(self.cursor));
                }
            }
        }
        None
    }
}
