//! Pre-mutation snapshots of the live catalog.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use curio_engine::CollectionKind;

use crate::config::Config;
use crate::error::{Result, SyncError};

/// Directory name for a snapshot taken at `now`.
///
/// An ISO 8601 timestamp with `:` and `.` replaced by `-`, so the name
/// stays valid on filesystems that reject colons.
pub fn snapshot_dir_name(now: DateTime<Utc>) -> String {
    now.format("%Y-%m-%dT%H-%M-%S-%3fZ").to_string()
}

/// Copy the live collection files into a fresh timestamped directory
/// under the backup root.
///
/// Missing collection files are skipped rather than invented, so the
/// snapshot mirrors exactly what was on disk. If two snapshots land in
/// the same millisecond, a numeric suffix keeps the directories apart.
pub fn take_snapshot(config: &Config, now: DateTime<Utc>) -> Result<PathBuf> {
    let base = snapshot_dir_name(now);
    let mut dir = config.backup_root.join(&base);
    let mut attempt = 0;
    while dir.exists() {
        attempt += 1;
        dir = config.backup_root.join(format!("{base}-{attempt}"));
    }
    fs::create_dir_all(&dir).map_err(|e| SyncError::filesystem(&dir, e))?;

    for kind in CollectionKind::ALL {
        let source = config.collection_path(kind);
        if source.exists() {
            let target = dir.join(kind.file_name());
            fs::copy(&source, &target).map_err(|e| SyncError::filesystem(&target, e))?;
        }
    }

    Ok(dir)
}

/// Create and return the directory that receives archived conflict
/// copies for one snapshot.
pub fn conflict_dir(snapshot: &Path) -> Result<PathBuf> {
    let dir = snapshot.join("conflicts");
    fs::create_dir_all(&dir).map_err(|e| SyncError::filesystem(&dir, e))?;
    Ok(dir)
}
