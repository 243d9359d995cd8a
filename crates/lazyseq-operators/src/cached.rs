//! Cache layer: make any pipeline, including a single-pass one, safely
//! re-enumerable.
//!
//! `as_cached*` wraps a node in a [`SharedCache`]. The wrapped node is driven
//! at most once no matter how many consumers read from the handle; every
//! drive of the handle is a cursor over the shared buffer.

use std::fmt;
use std::ops::Deref;

use lazyseq_core::config::QueryConfig;
use lazyseq_core::id::CacheId;
use lazyseq_core::{BoxIter, Result};
use lazyseq_mem::{CacheCursor, CacheStats, SharedCache};

use crate::enumerable::Enumerable;
use crate::traits::{Probe, Sequence};

/// `Sequence` view of a shared cache.
pub struct CachedSequence<T> {
    cache: SharedCache<T>,
}

impl<T: Clone + 'static> Sequence<T> for CachedSequence<T> {
    fn drive(&self) -> BoxIter<T> {
        Box::new(self.cache.cursor())
    }

    /// Known only once upstream is exhausted and nothing was evicted.
    fn native_len(&self) -> Probe<usize> {
        if self.cache.is_exhausted() && self.cache.oldest() == 0 {
            Probe::Native(self.cache.produced())
        } else {
            Probe::Fallback
        }
    }

    fn native_get(&self, index: usize) -> Probe<Result<Option<T>>> {
        Probe::Native(self.cache.get(index))
    }

    fn name(&self) -> &'static str {
        "cached"
    }
}

/// Handle to a cache layer. Derefs to an [`Enumerable`] that reads through
/// the cache, so every operator accepts it.
pub struct CachedEnumerable<T> {
    cache: SharedCache<T>,
    view: Enumerable<T>,
}

impl<T> Clone for CachedEnumerable<T> {
    fn clone(&self) -> Self {
        Self {
            cache: self.cache.clone(),
            view: self.view.clone(),
        }
    }
}

impl<T> fmt::Debug for CachedEnumerable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CachedEnumerable")
            .field("id", &self.cache.id())
            .field("capacity", &self.cache.capacity())
            .field("produced", &self.cache.produced())
            .finish()
    }
}

impl<T> Deref for CachedEnumerable<T> {
    type Target = Enumerable<T>;

    fn deref(&self) -> &Enumerable<T> {
        &self.view
    }
}

impl<T: Clone + 'static> CachedEnumerable<T> {
    fn wrap(source: &Enumerable<T>, capacity: Option<usize>) -> Self {
        let upstream = source.clone();
        let cache = SharedCache::new(move || upstream.iter(), capacity);
        #[cfg(feature = "tracing")]
        tracing::debug!(cache = %cache.id(), ?capacity, "cache layer created");
        Self::from_cache(cache)
    }

    fn from_cache(cache: SharedCache<T>) -> Self {
        let view = Enumerable::from_sequence(CachedSequence {
            cache: cache.clone(),
        });
        Self { cache, view }
    }

    /// Same cache, unbounded.
    pub fn as_cached(&self) -> CachedEnumerable<T> {
        self.rebound(None)
    }

    /// Same cache, bounded to `capacity` elements; shrinking evicts now.
    pub fn as_cached_bounded(&self, capacity: usize) -> CachedEnumerable<T> {
        self.rebound(Some(capacity))
    }

    /// Same cache, with the configured capacity.
    pub fn as_cached_with(&self, config: &QueryConfig) -> Result<CachedEnumerable<T>> {
        Ok(self.rebound(config.cache_capacity()?))
    }

    fn rebound(&self, capacity: Option<usize>) -> CachedEnumerable<T> {
        self.cache.set_capacity(capacity);
        Self::from_cache(self.cache.clone())
    }

    /// Element at logical `index`: `Ok(None)` past the end, `EvictedIndex`
    /// when it was produced but is no longer retained.
    pub fn get(&self, index: usize) -> Result<Option<T>> {
        self.cache.get(index)
    }

    /// A consumer that reports eviction through `try_next` instead of
    /// skipping ahead.
    pub fn cursor(&self) -> CacheCursor<T> {
        self.cache.cursor()
    }

    pub fn cursor_at(&self, index: usize) -> CacheCursor<T> {
        self.cache.cursor_at(index)
    }

    /// Drive the wrapped source to exhaustion; returns elements produced.
    pub fn fill(&self) -> usize {
        self.cache.fill()
    }
}

impl<T> CachedEnumerable<T> {
    pub fn id(&self) -> CacheId {
        self.cache.id()
    }

    pub fn capacity(&self) -> Option<usize> {
        self.cache.capacity()
    }

    pub fn set_capacity(&self, capacity: Option<usize>) {
        self.cache.set_capacity(capacity)
    }

    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }

    pub fn is_exhausted(&self) -> bool {
        self.cache.is_exhausted()
    }

    /// Whether both handles read the same cache.
    pub fn shares_cache_with(&self, other: &CachedEnumerable<T>) -> bool {
        self.cache.ptr_eq(&other.cache)
    }

    pub fn into_enumerable(self) -> Enumerable<T> {
        self.view
    }
}

impl<T: Clone + 'static> Enumerable<T> {
    /// Memoize this pipeline without a size bound.
    pub fn as_cached(&self) -> CachedEnumerable<T> {
        CachedEnumerable::wrap(self, None)
    }

    /// Memoize at most `capacity` most recent elements.
    pub fn as_cached_bounded(&self, capacity: usize) -> CachedEnumerable<T> {
        CachedEnumerable::wrap(self, Some(capacity))
    }

    /// Memoize with `config.cache_capacity`; a negative value is
    /// `InvalidArgument`.
    pub fn as_cached_with(&self, config: &QueryConfig) -> Result<CachedEnumerable<T>> {
        Ok(CachedEnumerable::wrap(self, config.cache_capacity()?))
    }
}

impl<T: Clone + 'static> IntoIterator for CachedEnumerable<T> {
    type Item = T;
    type IntoIter = BoxIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.view.iter()
    }
}
