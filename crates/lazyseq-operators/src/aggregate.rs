//! Folds, quantifiers and numeric aggregates.

use std::cmp::Ordering;
use std::iter::Sum;
use std::rc::Rc;

use lazyseq_core::{QueryError, Result};

use crate::enumerable::Enumerable;

/// The first element that no later element beats under `wins`.
fn extreme<T>(mut it: impl Iterator<Item = T>, wins: impl Fn(&T, &T) -> bool) -> Result<T> {
    let mut best = it.next().ok_or(QueryError::EmptySequence)?;
    for x in it {
        if wins(&x, &best) {
            best = x;
        }
    }
    Ok(best)
}

fn mean(mut it: impl Iterator<Item = f64>) -> Result<f64> {
    let first = it.next().ok_or(QueryError::EmptySequence)?;
    let (sum, n) = it.fold((first, 1usize), |(s, n), x| (s + x, n + 1));
    Ok(sum / n as f64)
}

impl<T: 'static> Enumerable<T> {
    /// Left fold seeded with the first element. `EmptySequence` on empty input.
    pub fn aggregate<F>(&self, func: F) -> Result<T>
    where
        F: Fn(T, T) -> T,
    {
        let mut it = self.iter();
        let seed = it.next().ok_or(QueryError::EmptySequence)?;
        Ok(it.fold(seed, func))
    }

    pub fn aggregate_seeded<A, F>(&self, seed: A, func: F) -> A
    where
        F: Fn(A, T) -> A,
    {
        self.iter().fold(seed, func)
    }

    pub fn aggregate_with<A, R, F, G>(&self, seed: A, func: F, result: G) -> R
    where
        F: Fn(A, T) -> A,
        G: FnOnce(A) -> R,
    {
        result(self.aggregate_seeded(seed, func))
    }

    /// Right fold: `func(element, accumulator)` from the last element back.
    pub fn aggregate_right<F>(&self, func: F) -> Result<T>
    where
        F: Fn(T, T) -> T,
    {
        let mut it = self.reverse().iter();
        let seed = it.next().ok_or(QueryError::EmptySequence)?;
        Ok(it.fold(seed, |acc, x| func(x, acc)))
    }

    pub fn aggregate_right_seeded<A, F>(&self, seed: A, func: F) -> A
    where
        F: Fn(T, A) -> A,
    {
        self.reverse().iter().fold(seed, |acc, x| func(x, acc))
    }

    pub fn aggregate_right_with<A, R, F, G>(&self, seed: A, func: F, result: G) -> R
    where
        F: Fn(T, A) -> A,
        G: FnOnce(A) -> R,
    {
        result(self.aggregate_right_seeded(seed, func))
    }

    /// True for an empty sequence.
    pub fn all<F>(&self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.iter().all(|x| predicate(&x))
    }

    pub fn any(&self) -> bool {
        self.iter().next().is_some()
    }

    pub fn any_where<F>(&self, predicate: F) -> bool
    where
        F: Fn(&T) -> bool,
    {
        self.iter().any(|x| predicate(&x))
    }

    pub fn count_where<F>(&self, predicate: F) -> usize
    where
        F: Fn(&T) -> bool,
    {
        self.iter().filter(|x| predicate(x)).count()
    }

    /// Sum of the elements; an empty sequence sums to `S`'s zero.
    pub fn sum<S>(&self) -> S
    where
        S: Sum<T>,
    {
        self.iter().sum()
    }

    pub fn sum_by<S, F>(&self, selector: F) -> S
    where
        S: Sum<S>,
        F: Fn(T) -> S,
    {
        self.iter().map(selector).sum()
    }

    pub fn average(&self) -> Result<f64>
    where
        T: Into<f64>,
    {
        mean(self.iter().map(Into::into))
    }

    pub fn average_by<U, F>(&self, selector: F) -> Result<f64>
    where
        U: Into<f64>,
        F: Fn(T) -> U,
    {
        mean(self.iter().map(|x| selector(x).into()))
    }

    /// Smallest element; the first one wins ties. Incomparable values (NaN)
    /// never replace the current minimum.
    pub fn min(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        extreme(self.iter(), |x, best| x < best)
    }

    pub fn max(&self) -> Result<T>
    where
        T: PartialOrd,
    {
        extreme(self.iter(), |x, best| x > best)
    }

    /// Smallest selected value.
    pub fn min_of<U, F>(&self, selector: F) -> Result<U>
    where
        U: PartialOrd,
        F: Fn(T) -> U,
    {
        extreme(self.iter().map(selector), |x, best| x < best)
    }

    /// Largest selected value.
    pub fn max_of<U, F>(&self, selector: F) -> Result<U>
    where
        U: PartialOrd,
        F: Fn(T) -> U,
    {
        extreme(self.iter().map(selector), |x, best| x > best)
    }

    /// Every element sharing the smallest key, in source order.
    pub fn min_by<K, F>(&self, key: F) -> Enumerable<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.extrema_by(key, Ordering::Less)
    }

    /// Every element sharing the largest key, in source order.
    pub fn max_by<K, F>(&self, key: F) -> Enumerable<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        self.extrema_by(key, Ordering::Greater)
    }

    fn extrema_by<K, F>(&self, key: F, wins: Ordering) -> Enumerable<T>
    where
        K: PartialOrd + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let key = Rc::new(key);
        self.derive(move |it| {
            let mut best: Option<K> = None;
            let mut members: Vec<T> = Vec::new();
            for x in it {
                let k = key(&x);
                let ord = match &best {
                    None => Some(wins),
                    Some(b) => k.partial_cmp(b),
                };
                if ord == Some(wins) {
                    best = Some(k);
                    members.clear();
                    members.push(x);
                } else if ord == Some(Ordering::Equal) {
                    members.push(x);
                }
            }
            crate::metrics::materialized("extrema_by", members.len());
            Box::new(members.into_iter())
        })
    }
}
