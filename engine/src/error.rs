//! Error types for the Curio engine.

use crate::CollectionKind;
use thiserror::Error;

/// All possible errors from the Curio engine.
///
/// Every variant names the collection and the zero-based index of the
/// offending record, so a failure can be traced without re-reading input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("record {index} in '{collection}' has no id field")]
    MissingId {
        collection: CollectionKind,
        index: usize,
    },

    #[error("record {index} in '{collection}' has an empty id")]
    EmptyId {
        collection: CollectionKind,
        index: usize,
    },

    #[error("record {index} in '{collection}' has an unusable id: expected a non-empty string or integer, got {got}")]
    InvalidId {
        collection: CollectionKind,
        index: usize,
        got: String,
    },
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
