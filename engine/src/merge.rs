//! Identity-keyed merge of an incoming collection into an existing one.
//!
//! The merge is a union: every id from either side survives. When both
//! sides carry the same id with structurally different contents, the
//! incoming version wins and the superseded existing version is reported
//! as a conflict for the caller to archive.

use crate::{Record, RecordId};
use std::collections::HashMap;

/// An id present on both sides with structurally different contents.
///
/// Carries the superseded version so callers can keep an audit copy.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordConflict {
    /// The contested id
    pub id: RecordId,
    /// The version replaced by the incoming record
    pub superseded: Record,
}

/// Result of merging one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct MergeOutcome {
    /// The merged record sequence
    pub merged: Vec<Record>,
    /// Conflicts resolved in favor of the incoming side, in encounter order
    pub conflicts: Vec<RecordConflict>,
}

/// Merge incoming records into existing ones; incoming wins.
///
/// Existing records keep their original relative order, replaced in place
/// when superseded; ids new to the collection are appended in encounter
/// order. Ids absent from incoming are retained: the merge never deletes.
/// Existing records without a usable id are kept as-is and never matched;
/// incoming records without a usable id are skipped.
pub fn merge_records(existing: &[Record], incoming: &[Record]) -> MergeOutcome {
    let mut merged: Vec<Record> = Vec::with_capacity(existing.len() + incoming.len());
    let mut positions: HashMap<RecordId, usize> = HashMap::new();

    for record in existing {
        match record.id() {
            Some(id) => match positions.get(&id).copied() {
                // duplicate id inside existing: first-seen position, last value
                Some(at) => merged[at] = record.clone(),
                None => {
                    positions.insert(id, merged.len());
                    merged.push(record.clone());
                }
            },
            None => merged.push(record.clone()),
        }
    }

    let mut conflicts = Vec::new();

    for record in incoming {
        let id = match record.id() {
            Some(id) => id,
            None => continue,
        };
        match positions.get(&id).copied() {
            Some(at) => {
                if merged[at] != *record {
                    conflicts.push(RecordConflict {
                        id: id.clone(),
                        superseded: merged[at].clone(),
                    });
                }
                merged[at] = record.clone();
            }
            None => {
                positions.insert(id, merged.len());
                merged.push(record.clone());
            }
        }
    }

    MergeOutcome { merged, conflicts }
}
