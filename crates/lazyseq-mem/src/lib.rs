#![forbid(unsafe_code)]
//! lazyseq-mem: memoizing cache buffer behind the cache layer.
//!
//! A `SharedCache` wraps one upstream stream and guarantees it is driven at
//! most once. Any number of `CacheCursor`s read from the shared window; a pull
//! triggered by one cursor benefits all of them.
//!
//! Single-threaded by construction (`Rc<RefCell<..>>`). The borrow taken by
//! `SharedCache::get` is the mutual-exclusion scope around
//! "check buffer, else pull-and-append".

pub mod buffer;
pub mod cursor;
pub mod shared;
pub mod tracking;

pub use buffer::{CacheBuffer, Slot};
pub use cursor::CacheCursor;
pub use shared::SharedCache;
pub use tracking::CacheStats;
