//! Unified error handling for the sync CLI.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by sync commands.
///
/// Engine validation errors pass through unchanged so the operator sees
/// the offending collection and record index. Filesystem and parse
/// failures carry the path that triggered them.
#[derive(Debug, Error)]
pub enum SyncError {
    /// A record failed id validation before any mode ran.
    #[error(transparent)]
    Validation(#[from] curio_engine::Error),

    /// A catalog file exists but does not hold the expected JSON shape.
    #[error("malformed catalog file {}: {detail}", path.display())]
    MalformedInput {
        /// File that failed to parse.
        path: PathBuf,
        /// Parser message, including line and column.
        detail: String,
    },

    /// Reading or writing a file failed.
    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        /// Path of the failed operation.
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// Serializing a report or artifact to JSON failed.
    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl SyncError {
    /// Wrap an IO error with the path it occurred on.
    pub fn filesystem(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, SyncError>;
