//! Lightweight cache counters and peak tracking.
//!
//! Keep this cheap. Snapshots are serializable so callers can ship them to
//! whatever metrics sink they use.

use serde::{Deserialize, Serialize};

use lazyseq_core::id::CacheId;

/// Point-in-time snapshot of a cache's counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Elements pulled from the wrapped upstream (each at most once).
    pub pulled: u64,
    /// Reads served directly from the buffer.
    pub hits: u64,
    /// Reads that had to pull from upstream.
    pub misses: u64,
    /// Elements dropped under capacity pressure.
    pub evicted: u64,
    /// Largest number of elements ever buffered at once.
    pub peak_buffered: usize,
}

#[derive(Debug, Default)]
pub(crate) struct StatsTracker {
    stats: CacheStats,
}

impl StatsTracker {
    pub(crate) fn record_hit(&mut self) {
        self.stats.hits += 1;
    }

    pub(crate) fn record_miss(&mut self) {
        self.stats.misses += 1;
    }

    pub(crate) fn record_pull(&mut self, _id: CacheId) {
        self.stats.pulled += 1;
    }

    pub(crate) fn record_evicted(&mut self, _id: CacheId, count: usize) {
        if count == 0 {
            return;
        }
        self.stats.evicted += count as u64;
        #[cfg(feature = "tracing")]
        tracing::debug!(cache = %_id, count, total = self.stats.evicted, "cache eviction");
    }

    /// Record a new buffered length; updates peak if higher.
    pub(crate) fn record_buffered(&mut self, _id: CacheId, buffered: usize) {
        if buffered > self.stats.peak_buffered {
            self.stats.peak_buffered = buffered;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(
            cache = %_id,
            buffered,
            peak = self.stats.peak_buffered,
            pulled = self.stats.pulled,
            "cache usage"
        );
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_only_grows() {
        let id = CacheId::new(1);
        let mut t = StatsTracker::default();
        t.record_buffered(id, 3);
        t.record_buffered(id, 1);
        t.record_evicted(id, 2);
        let s = t.snapshot();
        assert_eq!(s.peak_buffered, 3);
        assert_eq!(s.evicted, 2);
    }

    #[test]
    fn stats_serialize() {
        let s = CacheStats {
            pulled: 3,
            ..CacheStats::default()
        };
        let json = serde_json::to_string(&s).unwrap();
        assert!(json.contains("\"pulled\":3"));
    }
}
