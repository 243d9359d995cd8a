//! Shared comparison utilities.
//!
//! Everything that orders elements reduces to a 3-way comparator over
//! elements (`Fn(&T, &T) -> Ordering`). Key extractors are lifted into that
//! shape with [`by_key`]/[`by_key_with`], and sign-returning comparators with
//! [`from_sign`], so the ordering engine only ever composes one kind of step.

use std::cmp::Ordering;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

/// Shared, type-erased comparator.
pub type Comparer<T> = Rc<dyn Fn(&T, &T) -> Ordering>;

/// Sort direction of a single refinement step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Ascending,
    Descending,
}

impl Direction {
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            Direction::Ascending => ord,
            Direction::Descending => ord.reverse(),
        }
    }
}

/// Natural ordering for totally ordered values.
#[inline]
pub fn natural<T: Ord + ?Sized>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Ordering for partially ordered values. Incomparable pairs (NaN) compare
/// equal, which keeps stable sorts stable instead of panicking.
#[inline]
pub fn partial<T: PartialOrd + ?Sized>(a: &T, b: &T) -> Ordering {
    a.partial_cmp(b).unwrap_or(Ordering::Equal)
}

/// Lift a key extractor into an element comparator using the key's `Ord`.
pub fn by_key<T, K, F>(key: F) -> impl Fn(&T, &T) -> Ordering
where
    K: Ord,
    F: Fn(&T) -> K,
{
    move |a, b| key(a).cmp(&key(b))
}

/// Lift a key extractor plus key comparator into an element comparator.
pub fn by_key_with<T, K, F, C>(key: F, cmp: C) -> impl Fn(&T, &T) -> Ordering
where
    F: Fn(&T) -> K,
    C: Fn(&K, &K) -> Ordering,
{
    move |a, b| cmp(&key(a), &key(b))
}

/// Adapt a comparator returning negative/zero/positive integers.
pub fn from_sign<T, F>(cmp: F) -> impl Fn(&T, &T) -> Ordering
where
    F: Fn(&T, &T) -> i32,
{
    move |a, b| cmp(a, b).cmp(&0)
}

/// Lexicographic composition: the first non-equal step decides.
pub fn compose<T>(steps: &[(Comparer<T>, Direction)], a: &T, b: &T) -> Ordering {
    for (cmp, direction) in steps {
        let ord = direction.apply(cmp(a, b));
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sign_comparator_matches_natural() {
        let cmp = from_sign(|a: &i32, b: &i32| a - b);
        assert_eq!(cmp(&1, &2), Ordering::Less);
        assert_eq!(cmp(&2, &2), Ordering::Equal);
        assert_eq!(cmp(&3, &2), Ordering::Greater);
    }

    #[test]
    fn compose_falls_through_on_ties() {
        let first: Comparer<(i32, char)> = Rc::new(by_key(|p: &(i32, char)| p.0));
        let second: Comparer<(i32, char)> = Rc::new(by_key(|p: &(i32, char)| p.1));
        let steps = vec![(first, Direction::Ascending), (second, Direction::Descending)];
        assert_eq!(compose(&steps, &(1, 'a'), &(2, 'a')), Ordering::Less);
        assert_eq!(compose(&steps, &(1, 'a'), &(1, 'b')), Ordering::Greater);
        assert_eq!(compose(&steps, &(1, 'a'), &(1, 'a')), Ordering::Equal);
    }

    #[test]
    fn nan_compares_equal() {
        assert_eq!(partial(&f64::NAN, &1.0), Ordering::Equal);
        assert_eq!(partial(&0.5, &1.0), Ordering::Less);
    }
}
