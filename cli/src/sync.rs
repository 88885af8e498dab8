//! The three sync modes: preview, overwrite, and merge.
//!
//! Every mode validates the incoming state before acting, so a catalog
//! with unusable ids never gets near the authoritative files. The
//! mutating modes snapshot the live files before writing anything.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use curio_engine::{
    diff_catalogs, merge_records, validate_catalog, CatalogDiff, CollectionKind, RecordConflict,
    RecordId,
};

use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::merge_log::{self, ConflictEntry};
use crate::snapshot;
use crate::store;

/// Result of an overwrite run.
#[derive(Debug)]
pub struct OverwriteReport {
    /// Snapshot of the state that was replaced.
    pub snapshot_dir: PathBuf,
}

/// Result of a merge run.
#[derive(Debug)]
pub struct MergeReport {
    /// Snapshot of the state before merging.
    pub snapshot_dir: PathBuf,
    /// Conflicts archived during the run, in log order.
    pub conflicts: Vec<ConflictEntry>,
}

/// Compare the incoming state against the authoritative one.
///
/// Read-only: no snapshot, no writes, no index rebuild.
pub fn preview(config: &Config, incoming_dir: &Path) -> Result<CatalogDiff> {
    let incoming = store::load_catalog(incoming_dir)?;
    validate_catalog(&incoming)?;
    let current = store::load_catalog(&config.data_dir)?;

    Ok(diff_catalogs(&current, &incoming))
}

/// Replace the authoritative state with the incoming one.
///
/// Records present only in the authoritative state are gone afterwards.
/// The prior state survives in the snapshot.
pub fn overwrite(config: &Config, incoming_dir: &Path) -> Result<OverwriteReport> {
    let incoming = store::load_catalog(incoming_dir)?;
    validate_catalog(&incoming)?;

    let snapshot_dir = snapshot::take_snapshot(config, Utc::now())?;
    for kind in CollectionKind::ALL {
        store::save_records(&config.collection_path(kind), incoming.records(kind))?;
    }
    rebuild_indices();

    Ok(OverwriteReport { snapshot_dir })
}

/// Merge the incoming state into the authoritative one.
///
/// Union semantics, incoming wins on conflict. Each superseded record is
/// archived under the snapshot's `conflicts` directory and logged, so no
/// data is silently lost even when overwritten.
pub fn merge(config: &Config, incoming_dir: &Path) -> Result<MergeReport> {
    let incoming = store::load_catalog(incoming_dir)?;
    validate_catalog(&incoming)?;
    let current = store::load_catalog(&config.data_dir)?;

    let snapshot_dir = snapshot::take_snapshot(config, Utc::now())?;
    let conflicts_dir = snapshot::conflict_dir(&snapshot_dir)?;

    // Conflicts for both collections are archived before the first
    // authoritative write; a failed artifact write aborts with the live
    // files untouched.
    let mut entries = Vec::new();
    let mut merged = Vec::new();
    for kind in CollectionKind::ALL {
        let outcome = merge_records(current.records(kind), incoming.records(kind));
        for conflict in &outcome.conflicts {
            let artifact = write_conflict_artifact(&conflicts_dir, kind, conflict)?;
            entries.push(ConflictEntry {
                kind,
                id: conflict.id.clone(),
                artifact,
            });
        }
        merged.push((kind, outcome.merged));
    }
    for (kind, records) in merged {
        store::save_records(&config.collection_path(kind), &records)?;
    }

    merge_log::append_entries(&config.merge_log, Utc::now(), &entries)?;
    rebuild_indices();

    Ok(MergeReport {
        snapshot_dir,
        conflicts: entries,
    })
}

/// Archive the superseded side of one conflict and return the artifact path.
fn write_conflict_artifact(
    dir: &Path,
    kind: CollectionKind,
    conflict: &RecordConflict,
) -> Result<PathBuf> {
    let file_name = format!(
        "{}_{}_conflictCopy.json",
        kind.as_str(),
        sanitize_id(&conflict.id)
    );
    let path = dir.join(file_name);

    let mut text = serde_json::to_string_pretty(&conflict.superseded)?;
    text.push('\n');
    fs::write(&path, text).map_err(|e| SyncError::filesystem(&path, e))?;

    Ok(path)
}

/// Replace characters unsafe in file names with `-`.
fn sanitize_id(id: &RecordId) -> String {
    id.to_string()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Announce the index rebuild phases the site tooling runs after a mutation.
fn rebuild_indices() {
    tracing::info!("rebuilding search index");
    tracing::info!("rebuilding text index");
}
