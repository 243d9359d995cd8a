//! Element selection: `first`, `last`, `single` and their variants.
//!
//! These never assume random access; each runs one generic pass and stops as
//! soon as the answer is known.

use lazyseq_core::{QueryError, Result};

use crate::enumerable::Enumerable;

/// At most one element; a second one is `NotUnique`.
fn at_most_one<T>(mut it: impl Iterator<Item = T>) -> Result<Option<T>> {
    match it.next() {
        None => Ok(None),
        Some(only) => match it.next() {
            None => Ok(Some(only)),
            Some(_) => Err(QueryError::NotUnique),
        },
    }
}

impl<T: 'static> Enumerable<T> {
    pub fn first(&self) -> Result<T> {
        self.iter().next().ok_or(QueryError::EmptySequence)
    }

    pub fn first_where<F>(&self, predicate: F) -> Result<T>
    where
        F: Fn(&T) -> bool,
    {
        self.iter().find(|x| predicate(x)).ok_or(QueryError::EmptySequence)
    }

    pub fn first_or(&self, default: T) -> T {
        self.iter().next().unwrap_or(default)
    }

    pub fn first_where_or<F>(&self, predicate: F, default: T) -> T
    where
        F: Fn(&T) -> bool,
    {
        self.iter().find(|x| predicate(x)).unwrap_or(default)
    }

    pub fn last(&self) -> Result<T> {
        self.iter().last().ok_or(QueryError::EmptySequence)
    }

    pub fn last_where<F>(&self, predicate: F) -> Result<T>
    where
        F: Fn(&T) -> bool,
    {
        self.iter()
            .filter(|x| predicate(x))
            .last()
            .ok_or(QueryError::EmptySequence)
    }

    pub fn last_or(&self, default: T) -> T {
        self.iter().last().unwrap_or(default)
    }

    pub fn last_where_or<F>(&self, predicate: F, default: T) -> T
    where
        F: Fn(&T) -> bool,
    {
        self.iter().filter(|x| predicate(x)).last().unwrap_or(default)
    }

    /// The only element. `EmptySequence` when there is none, `NotUnique`
    /// when there is more than one.
    pub fn single(&self) -> Result<T> {
        at_most_one(self.iter())?.ok_or(QueryError::EmptySequence)
    }

    pub fn single_where<F>(&self, predicate: F) -> Result<T>
    where
        F: Fn(&T) -> bool,
    {
        at_most_one(self.iter().filter(|x| predicate(x)))?.ok_or(QueryError::EmptySequence)
    }

    /// Like `single`, but an empty sequence yields `default`. More than one
    /// element is still `NotUnique`.
    pub fn single_or(&self, default: T) -> Result<T> {
        Ok(at_most_one(self.iter())?.unwrap_or(default))
    }

    pub fn single_where_or<F>(&self, predicate: F, default: T) -> Result<T>
    where
        F: Fn(&T) -> bool,
    {
        Ok(at_most_one(self.iter().filter(|x| predicate(x)))?.unwrap_or(default))
    }
}
