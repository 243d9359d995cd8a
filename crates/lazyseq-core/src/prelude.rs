//! Convenient re-exports for downstream crates.

pub use crate::compare::{Comparer, Direction};
pub use crate::config::QueryConfig;
pub use crate::error::{QueryError, Result};
pub use crate::id::{CacheId, CursorId};
pub use crate::BoxIter;
pub use crate::key_index::{HashIndex, KeyIndex, ScanIndex};
