//! Set operators over structural (`Hash + Eq`) equality.
//!
//! Output order always follows the left-hand operand. A right-hand operand is
//! drained once, at the start of each drive, before the first element is
//! emitted.

use std::collections::HashSet;
use std::hash::Hash;
use std::rc::Rc;

use crate::enumerable::Enumerable;

impl<T> Enumerable<T>
where
    T: Hash + Eq + Clone + 'static,
{
    /// First occurrence of each value, in source order.
    pub fn distinct(&self) -> Enumerable<T> {
        self.distinct_by(T::clone)
    }

    /// Distinct values of `self` followed by those of `other` not seen yet.
    pub fn union(&self, other: &Enumerable<T>) -> Enumerable<T> {
        self.concat(other).distinct()
    }

    /// Left-hand values also present on the right, each emitted once.
    pub fn intersect(&self, other: &Enumerable<T>) -> Enumerable<T> {
        let restartable = other.is_restartable();
        let other = other.clone();
        self.derive(move |it| {
            let mut keep: HashSet<T> = other.iter().collect();
            crate::metrics::materialized("intersect", keep.len());
            Box::new(it.filter(move |x| keep.remove(x)))
        })
        .restartable_with(restartable)
    }

    /// Left-hand values absent on the right, each emitted once.
    pub fn except(&self, other: &Enumerable<T>) -> Enumerable<T> {
        self.except_by(other, T::clone)
    }
}

impl<T: 'static> Enumerable<T> {
    /// First element for each distinct key, in source order.
    pub fn distinct_by<K, F>(&self, key: F) -> Enumerable<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let key = Rc::new(key);
        self.derive(move |it| {
            let key = Rc::clone(&key);
            let mut seen = HashSet::new();
            Box::new(it.filter(move |x| seen.insert(key(x))))
        })
    }

    /// Left-hand elements whose key is absent from `other`'s keys. Keys
    /// already emitted are excluded too, so each key appears at most once.
    pub fn except_by<K, F>(&self, other: &Enumerable<T>, key: F) -> Enumerable<T>
    where
        K: Hash + Eq + 'static,
        F: Fn(&T) -> K + 'static,
    {
        let restartable = other.is_restartable();
        let other = other.clone();
        let key = Rc::new(key);
        self.derive(move |it| {
            let key = Rc::clone(&key);
            let mut seen: HashSet<K> = other.iter().map(|x| key(&x)).collect();
            crate::metrics::materialized("except", seen.len());
            Box::new(it.filter(move |x| seen.insert(key(x))))
        })
        .restartable_with(restartable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distinct_keeps_first_occurrence_order() {
        let e = Enumerable::from_vec(vec![1, 4, 5, 6, 4, 3, 1, 99]);
        assert_eq!(e.distinct().to_vec(), vec![1, 4, 5, 6, 3, 99]);
    }

    #[test]
    fn union_intersect_except_follow_left_order() {
        let a = Enumerable::from_vec(vec![5, 3, 9, 7, 5, 9, 3, 7]);
        let b = Enumerable::from_vec(vec![8, 3, 6, 4, 4, 9, 1, 0]);
        assert_eq!(a.union(&b).to_vec(), vec![5, 3, 9, 7, 8, 6, 4, 1, 0]);
        assert_eq!(a.intersect(&b).to_vec(), vec![3, 9]);
        assert_eq!(a.except(&b).to_vec(), vec![5, 7]);
    }

    #[test]
    fn by_key_variants() {
        let words = Enumerable::from_vec(vec!["apple", "avocado", "banana", "cherry", "blueberry"]);
        let first_letter = |w: &&str| w.as_bytes()[0];
        assert_eq!(words.distinct_by(first_letter).to_vec(), vec!["apple", "banana", "cherry"]);
        let banned = Enumerable::from_vec(vec!["bread"]);
        assert_eq!(
            words.except_by(&banned, first_letter).to_vec(),
            vec!["apple", "cherry"]
        );
    }

    #[test]
    fn right_operand_is_drained_per_drive() {
        let a = Enumerable::from_vec(vec![1, 2, 3]);
        let b = Enumerable::from_fn(|| vec![2, 3]);
        let i = a.intersect(&b);
        assert_eq!(i.to_vec(), vec![2, 3]);
        assert_eq!(i.to_vec(), vec![2, 3]);
    }
}
