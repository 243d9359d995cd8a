#![forbid(unsafe_code)]
//! lazyseq-operators: deferred-execution query operators over `Enumerable<T>`.
//!
//! Design intent:
//! - Building a pipeline never iterates; every operator returns a new node
//!   that re-derives its output from upstream each time it is driven.
//! - Materializing operators (sort, group-by, set right-hand sides, reverse,
//!   tail windows) keep their buffers in the per-drive iterator, never in the
//!   node, so any node can be re-queried independently.
//! - Single-threaded: nodes are `Rc`-shared and not `Send`.
//! - Host sequences plug in through `Sequence`, whose capability probes are
//!   preferred over the generic O(n) traversal.

pub mod enumerable;
pub mod source;
pub mod traits;

mod aggregate;
mod collect;
mod element;
mod filter;
mod generate;
mod map;
mod set;
mod window;

pub mod cached;
pub mod group;
mod join;
pub mod sort;

mod metrics;

pub use cached::{CachedEnumerable, CachedSequence};
pub use enumerable::Enumerable;
pub use group::{Grouping, Lookup, LookupIter};
pub use sort::OrderedEnumerable;
pub use source::{OnceSequence, SetSequence, VecSequence};
pub use traits::{Probe, Sequence};
