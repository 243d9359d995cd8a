#![forbid(unsafe_code)]
//! lazyseq-core: shared vocabulary for the lazyseq workspace.
//!
//! Design intent:
//! - No operators here; only errors, config, ids, the boxed-iterator alias
//!   and the comparison/equality utilities every operator builds on.
//! - Keep deps minimal so any crate can depend on core cheaply.

pub mod compare;
pub mod config;
pub mod error;
pub mod id;
pub mod key_index;
pub mod prelude;

pub use error::{QueryError, Result};

/// Type-erased pull stream; every lazy operator suspends at its `next`.
pub type BoxIter<T> = Box<dyn Iterator<Item = T>>;
