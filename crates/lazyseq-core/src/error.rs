use thiserror::Error;

/// Canonical result for every lazyseq crate.
pub type Result<T> = std::result::Result<T, QueryError>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("sequence contains no qualifying elements")]
    EmptySequence,

    #[error("sequence contains more than one qualifying element")]
    NotUnique,

    #[error("index {index} is out of range")]
    IndexOutOfRange { index: usize },

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // Raised by the cache layer only. `oldest` is the first index still replayable.
    #[error("index {index} was evicted from the cache (oldest retained index is {oldest})")]
    EvictedIndex { index: usize, oldest: usize },

    #[error("duplicate key produced by the element at position {position}")]
    DuplicateKey { position: usize },

    #[error("element at position {position} cannot be converted to the target type")]
    InvalidCast { position: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl QueryError {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        QueryError::InvalidArgument(msg.into())
    }
}

impl From<serde_json::Error> for QueryError {
    fn from(e: serde_json::Error) -> Self {
        QueryError::Config(e.to_string())
    }
}
