//! Shared cache state + handle.
//!
//! The handle is cheap to clone; every clone (and every cursor) points at the
//! same buffer and the same upstream pull position.

use std::cell::RefCell;
use std::rc::Rc;

use lazyseq_core::id::CacheId;
use lazyseq_core::{BoxIter, QueryError, Result};

use crate::buffer::{CacheBuffer, Slot};
use crate::cursor::CacheCursor;
use crate::tracking::{CacheStats, StatsTracker};

/// Lifecycle of the wrapped upstream. It is started lazily on first touch
/// and dropped as soon as it reports exhaustion.
enum Upstream<T> {
    Pending(Box<dyn FnOnce() -> BoxIter<T>>),
    Running(BoxIter<T>),
    Exhausted,
}

struct CacheInner<T> {
    id: CacheId,
    upstream: Upstream<T>,
    buffer: CacheBuffer<T>,
    tracker: StatsTracker,
}

impl<T> CacheInner<T> {
    fn pull(&mut self) -> Option<T> {
        if let Upstream::Pending(_) = self.upstream {
            if let Upstream::Pending(start) =
                std::mem::replace(&mut self.upstream, Upstream::Exhausted)
            {
                #[cfg(feature = "tracing")]
                tracing::debug!(cache = %self.id, "cache driving upstream");
                self.upstream = Upstream::Running(start());
            }
        }
        let next = match &mut self.upstream {
            Upstream::Running(it) => it.next(),
            _ => None,
        };
        match next {
            Some(item) => {
                self.tracker.record_pull(self.id);
                Some(item)
            }
            None => {
                let was_running = matches!(self.upstream, Upstream::Running(_));
                self.upstream = Upstream::Exhausted;
                if was_running {
                    self.on_exhausted();
                }
                None
            }
        }
    }

    fn on_exhausted(&self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(cache = %self.id, produced = self.buffer.end(), "cache upstream exhausted");
    }

    fn append(&mut self, item: T) {
        let evicted = self.buffer.push(item);
        self.tracker.record_evicted(self.id, evicted);
        self.tracker.record_buffered(self.id, self.buffer.len());
    }
}

impl<T: Clone> CacheInner<T> {
    fn fetch(&mut self, index: usize) -> Result<Option<T>> {
        match self.buffer.slot(index) {
            Slot::Evicted { oldest } => return Err(QueryError::EvictedIndex { index, oldest }),
            Slot::Present(item) => {
                let item = item.clone();
                self.tracker.record_hit();
                return Ok(Some(item));
            }
            Slot::Ahead => {}
        }

        self.tracker.record_miss();
        loop {
            let logical = self.buffer.end();
            let Some(item) = self.pull() else {
                return Ok(None);
            };
            // Keep our own copy of the requested element: under a tight bound
            // it can be evicted by the very push that stores it.
            let hit = (logical == index).then(|| item.clone());
            self.append(item);
            if hit.is_some() {
                return Ok(hit);
            }
        }
    }
}

/// Handle to a memoizing cache over one upstream stream.
pub struct SharedCache<T> {
    inner: Rc<RefCell<CacheInner<T>>>,
}

impl<T> Clone for SharedCache<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: 'static> SharedCache<T> {
    /// `start` is invoked at most once, on the first read that misses.
    pub fn new<F>(start: F, capacity: Option<usize>) -> Self
    where
        F: FnOnce() -> BoxIter<T> + 'static,
    {
        Self {
            inner: Rc::new(RefCell::new(CacheInner {
                id: CacheId::next(),
                upstream: Upstream::Pending(Box::new(start)),
                buffer: CacheBuffer::new(capacity),
                tracker: StatsTracker::default(),
            })),
        }
    }
}

impl<T> SharedCache<T> {
    pub fn id(&self) -> CacheId {
        self.inner.borrow().id
    }

    pub fn capacity(&self) -> Option<usize> {
        self.inner.borrow().buffer.capacity()
    }

    /// Rebind the capacity; shrinking evicts the oldest elements immediately.
    pub fn set_capacity(&self, capacity: Option<usize>) {
        let mut inner = self.inner.borrow_mut();
        let evicted = inner.buffer.set_capacity(capacity);
        let id = inner.id;
        inner.tracker.record_evicted(id, evicted);
    }

    /// Oldest logical index that can still be replayed.
    pub fn oldest(&self) -> usize {
        self.inner.borrow().buffer.oldest()
    }

    /// Number of elements pulled from upstream so far.
    pub fn produced(&self) -> usize {
        self.inner.borrow().buffer.end()
    }

    pub fn is_exhausted(&self) -> bool {
        matches!(self.inner.borrow().upstream, Upstream::Exhausted)
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.borrow().tracker.snapshot()
    }

    /// Whether two handles share the same buffer.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl<T: Clone> SharedCache<T> {
    /// Element at logical `index`.
    ///
    /// `Ok(None)` means the upstream ended before `index`;
    /// `Err(EvictedIndex)` means it was produced but is no longer retained.
    pub fn get(&self, index: usize) -> Result<Option<T>> {
        self.inner.borrow_mut().fetch(index)
    }

    /// Drive the upstream to exhaustion, returning the total produced.
    pub fn fill(&self) -> usize {
        let mut inner = self.inner.borrow_mut();
        while let Some(item) = inner.pull() {
            inner.append(item);
        }
        inner.buffer.end()
    }

    /// Cursor starting at the oldest retained element.
    pub fn cursor(&self) -> CacheCursor<T> {
        CacheCursor::new(self.clone(), self.oldest())
    }

    /// Cursor starting at an explicit logical index.
    pub fn cursor_at(&self, index: usize) -> CacheCursor<T> {
        CacheCursor::new(self.clone(), index)
    }
}
