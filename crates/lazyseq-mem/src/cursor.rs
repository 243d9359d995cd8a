//! Per-consumer read position over a `SharedCache`.

use lazyseq_core::id::CursorId;
use lazyseq_core::{QueryError, Result};

use crate::shared::SharedCache;

/// Independent consumer of a shared cache.
///
/// `try_next` reports eviction as an error. The `Iterator` impl instead
/// resumes at the oldest retained element, i.e. it restarts its count from
/// the eviction point.
pub struct CacheCursor<T> {
    id: CursorId,
    cache: SharedCache<T>,
    next: usize,
}

impl<T> CacheCursor<T> {
    pub(crate) fn new(cache: SharedCache<T>, start: usize) -> Self {
        Self {
            id: CursorId::next(),
            cache,
            next: start,
        }
    }

    pub fn id(&self) -> CursorId {
        self.id
    }

    /// Logical index the next read will request.
    pub fn position(&self) -> usize {
        self.next
    }
}

impl<T: Clone> CacheCursor<T> {
    pub fn try_next(&mut self) -> Result<Option<T>> {
        let item = self.cache.get(self.next)?;
        if item.is_some() {
            self.next += 1;
        }
        Ok(item)
    }
}

impl<T: Clone> Iterator for CacheCursor<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        loop {
            match self.try_next() {
                Ok(item) => return item,
                Err(QueryError::EvictedIndex { oldest, .. }) => {
                    #[cfg(feature = "tracing")]
                    tracing::debug!(
                        cursor = %self.id,
                        cache = %self.cache.id(),
                        skipped_from = self.next,
                        resume_at = oldest,
                        "cursor fell behind cache window"
                    );
                    self.next = oldest;
                }
                Err(_) => return None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use lazyseq_core::BoxIter;

    use super::*;

    #[test]
    fn cursors_share_one_pull() {
        let cache = SharedCache::new(|| Box::new(vec!['x', 'y', 'z'].into_iter()) as BoxIter<char>, None);
        let mut a = cache.cursor();
        let mut b = cache.cursor();
        assert_eq!(a.next(), Some('x'));
        assert_eq!(a.next(), Some('y'));
        assert_eq!(b.next(), Some('x'));
        assert_eq!(cache.stats().pulled, 2);
        assert_eq!(b.by_ref().collect::<Vec<_>>(), vec!['y', 'z']);
        assert_eq!(a.next(), Some('z'));
        assert_eq!(a.next(), None);
        assert_eq!(cache.stats().pulled, 3);
    }

    #[test]
    fn lagging_cursor_reports_then_skips_eviction() {
        let cache = SharedCache::new(|| Box::new(0..6) as BoxIter<i32>, Some(2));
        let mut lagging = cache.cursor();
        let mut leader = cache.cursor();
        assert_eq!(leader.by_ref().take(4).collect::<Vec<_>>(), vec![0, 1, 2, 3]);

        assert_eq!(
            lagging.try_next().unwrap_err(),
            QueryError::EvictedIndex { index: 0, oldest: 2 }
        );
        assert_eq!(lagging.next(), Some(2));
        assert_eq!(lagging.position(), 3);
    }
}
