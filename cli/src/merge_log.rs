//! Append-only log of archived conflict copies.

use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, SecondsFormat, Utc};
use curio_engine::{CollectionKind, RecordId};

use crate::error::{Result, SyncError};

/// One archived conflict, ready to be logged.
#[derive(Debug, Clone)]
pub struct ConflictEntry {
    /// Collection the conflicting record belongs to.
    pub kind: CollectionKind,
    /// Id shared by the incoming record and the superseded one.
    pub id: RecordId,
    /// Where the superseded copy was archived.
    pub artifact: PathBuf,
}

impl fmt::Display for ConflictEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{} -> {}", self.kind, self.id, self.artifact.display())
    }
}

/// Append one line per archived conflict to the merge log.
///
/// Every line from a single run carries the same `logged_at` stamp, so
/// the log groups naturally by invocation. A run with no conflicts
/// leaves the log untouched and never creates the file.
pub fn append_entries(
    path: &Path,
    logged_at: DateTime<Utc>,
    entries: &[ConflictEntry],
) -> Result<()> {
    if entries.is_empty() {
        return Ok(());
    }

    let stamp = logged_at.to_rfc3339_opts(SecondsFormat::Millis, true);
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| SyncError::filesystem(path, e))?;
    for entry in entries {
        writeln!(file, "{stamp} {entry}").map_err(|e| SyncError::filesystem(path, e))?;
    }

    Ok(())
}
