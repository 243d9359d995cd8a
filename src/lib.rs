#![forbid(unsafe_code)]
//! lazyseq: deferred-execution query combinators.
//!
//! Facade over the workspace crates:
//! - `lazyseq-core`: errors, configuration, comparers, key indexes.
//! - `lazyseq-mem`: the memoizing buffer behind `as_cached`.
//! - `lazyseq-operators`: `Enumerable<T>` and every operator.
//!
//! ```
//! use lazyseq::prelude::*;
//!
//! let evens = Enumerable::range(1, 10)
//!     .unwrap()
//!     .filter(|x| x % 2 == 0)
//!     .select(|x| x * x);
//! assert_eq!(evens.to_vec(), vec![4, 16, 36, 64, 100]);
//! ```

pub use lazyseq_core;
pub use lazyseq_mem;
pub use lazyseq_operators;

pub use lazyseq_core::{BoxIter, QueryError, Result};
pub use lazyseq_operators::{
    CachedEnumerable, Enumerable, Grouping, Lookup, OrderedEnumerable, Probe, Sequence,
};

pub mod prelude {
    pub use lazyseq_core::compare::{self, Direction};
    pub use lazyseq_core::config::QueryConfig;
    pub use lazyseq_core::{QueryError, Result};
    pub use lazyseq_mem::CacheStats;
    pub use lazyseq_operators::{
        CachedEnumerable, Enumerable, Grouping, Lookup, OnceSequence, OrderedEnumerable, Probe,
        Sequence, SetSequence, VecSequence,
    };
}
