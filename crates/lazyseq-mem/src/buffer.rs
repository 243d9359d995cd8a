//! Append-only window over the tail of a logical sequence.
//!
//! Logical indexes never shift: `offset` is the logical index of the oldest
//! retained element. When a capacity bound is set, pushing past it evicts
//! from the front and advances `offset`.

use std::collections::VecDeque;

/// Where a logical index falls relative to the retained window.
#[derive(Debug, PartialEq, Eq)]
pub enum Slot<'a, T> {
    /// Already produced but dropped under capacity pressure.
    Evicted { oldest: usize },
    Present(&'a T),
    /// Not produced yet.
    Ahead,
}

#[derive(Debug, Clone)]
pub struct CacheBuffer<T> {
    items: VecDeque<T>,
    offset: usize,
    capacity: Option<usize>,
}

impl<T> CacheBuffer<T> {
    pub fn new(capacity: Option<usize>) -> Self {
        Self {
            items: VecDeque::new(),
            offset: 0,
            capacity,
        }
    }

    pub fn slot(&self, index: usize) -> Slot<'_, T> {
        if index < self.offset {
            return Slot::Evicted {
                oldest: self.offset,
            };
        }
        match self.items.get(index - self.offset) {
            Some(item) => Slot::Present(item),
            None => Slot::Ahead,
        }
    }

    /// Append one element; returns how many old elements were evicted.
    pub fn push(&mut self, item: T) -> usize {
        self.items.push_back(item);
        self.enforce_capacity()
    }

    /// Change the bound. Shrinking evicts immediately; returns the count evicted.
    pub fn set_capacity(&mut self, capacity: Option<usize>) -> usize {
        self.capacity = capacity;
        self.enforce_capacity()
    }

    fn enforce_capacity(&mut self) -> usize {
        let Some(cap) = self.capacity else {
            return 0;
        };
        let mut evicted = 0;
        while self.items.len() > cap {
            self.items.pop_front();
            self.offset += 1;
            evicted += 1;
        }
        evicted
    }

    pub fn capacity(&self) -> Option<usize> {
        self.capacity
    }

    /// Logical index of the oldest retained element.
    pub fn oldest(&self) -> usize {
        self.offset
    }

    /// Logical index one past the newest element (= elements ever pushed).
    pub fn end(&self) -> usize {
        self.offset + self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
