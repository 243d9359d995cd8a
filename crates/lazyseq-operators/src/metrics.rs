//! Tracing hooks for materializing operators.
//!
//! This module purposefully avoids pulling heavy telemetry stacks; with the
//! `tracing` feature off every hook compiles to nothing.

#[cfg(feature = "tracing")]
pub(crate) fn materialized(op: &'static str, rows: usize) {
    if lazyseq_core::config::QueryConfig::global().trace_materialization {
        tracing::trace!(op, rows, "materialized upstream");
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn materialized(_op: &'static str, _rows: usize) {}

#[cfg(feature = "tracing")]
pub(crate) fn lookup_built(strategy: &'static str, groups: usize, rows: usize) {
    if lazyseq_core::config::QueryConfig::global().trace_materialization {
        tracing::trace!(strategy, groups, rows, "lookup built");
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn lookup_built(_strategy: &'static str, _groups: usize, _rows: usize) {}

#[cfg(feature = "tracing")]
pub(crate) fn sorted(steps: usize, rows: usize) {
    if lazyseq_core::config::QueryConfig::global().trace_materialization {
        tracing::trace!(steps, rows, "stable sort pass");
    }
}

#[cfg(not(feature = "tracing"))]
pub(crate) fn sorted(_steps: usize, _rows: usize) {}
