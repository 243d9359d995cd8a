//! Host-sequence capability interface.
//!
//! A pipeline's root is either a producer closure or something implementing
//! [`Sequence`]. Sequences may expose native length, membership, indexing and
//! reversal; each probe answers [`Probe::Native`] when it can and
//! [`Probe::Fallback`] when the generic O(n) traversal must be used instead.
//! Native answers must be semantically identical to the fallback.

use lazyseq_core::{BoxIter, Result};

/// Outcome of probing a sequence for a specialized capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Probe<R> {
    Native(R),
    Fallback,
}

impl<R> Probe<R> {
    /// Use the native answer, or compute the generic one.
    pub fn or_else<F: FnOnce() -> R>(self, fallback: F) -> R {
        match self {
            Probe::Native(r) => r,
            Probe::Fallback => fallback(),
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Probe::Native(_))
    }
}

/// A bound host sequence.
///
/// Invariants:
/// - `drive` starts a new pass; whether that pass replays the same elements is
///   up to the implementor and reported by `is_restartable`.
/// - Every `native_*` probe either answers exactly what the generic traversal
///   of `drive()` would, or returns `Probe::Fallback`.
pub trait Sequence<T> {
    /// Start one pass over the elements.
    fn drive(&self) -> BoxIter<T>;

    /// Whether repeated `drive` calls replay the same elements.
    fn is_restartable(&self) -> bool {
        true
    }

    fn native_len(&self) -> Probe<usize> {
        Probe::Fallback
    }

    fn native_contains(&self, _item: &T) -> Probe<bool>
    where
        T: PartialEq,
    {
        Probe::Fallback
    }

    /// Indexed access. `Ok(None)` means `index` is past the end.
    fn native_get(&self, _index: usize) -> Probe<Result<Option<T>>> {
        Probe::Fallback
    }

    fn native_reversed(&self) -> Probe<BoxIter<T>> {
        Probe::Fallback
    }

    /// Human-readable binding name (stable), used in `Debug` and traces.
    fn name(&self) -> &'static str;
}
