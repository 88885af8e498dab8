//! Diff computation between an existing and an incoming state.
//!
//! A diff classifies records by id: present only in incoming (`added`),
//! present only in existing (`removed`), present in both with structurally
//! different contents (`updated`). Records identical on both sides
//! contribute nothing.

use crate::{Catalog, CollectionKind, Record, RecordId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A record present on both sides with different contents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedRecord {
    /// The existing version
    pub before: Record,
    /// The incoming version
    pub after: Record,
}

/// Differences of one collection between two states.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionDiff {
    /// Records whose id appears only in the incoming state
    pub added: Vec<Record>,
    /// Records whose id appears only in the existing state
    pub removed: Vec<Record>,
    /// Records present in both states with different contents
    pub updated: Vec<UpdatedRecord>,
}

impl CollectionDiff {
    /// Whether the two states were identical.
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.updated.is_empty()
    }

    /// Total number of differing records.
    pub fn change_count(&self) -> usize {
        self.added.len() + self.removed.len() + self.updated.len()
    }
}

/// Per-collection differences between two catalog states.
///
/// Serializes as a mapping of collection name to its diff, which is the
/// shape the preview report prints.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogDiff {
    /// Diff of the collections set
    pub collections: CollectionDiff,
    /// Diff of the media index
    pub media: CollectionDiff,
}

impl CatalogDiff {
    /// Diff of one collection.
    pub fn get(&self, kind: CollectionKind) -> &CollectionDiff {
        match kind {
            CollectionKind::Collections => &self.collections,
            CollectionKind::Media => &self.media,
        }
    }

    /// Whether the two catalogs were identical.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.media.is_empty()
    }

    /// Total number of differing records across both collections.
    pub fn change_count(&self) -> usize {
        self.collections.change_count() + self.media.change_count()
    }
}

/// Diff both collections of two catalog states.
pub fn diff_catalogs(existing: &Catalog, incoming: &Catalog) -> CatalogDiff {
    CatalogDiff {
        collections: diff_records(
            existing.records(CollectionKind::Collections),
            incoming.records(CollectionKind::Collections),
        ),
        media: diff_records(
            existing.records(CollectionKind::Media),
            incoming.records(CollectionKind::Media),
        ),
    }
}

/// Diff one collection against its incoming counterpart.
///
/// `added` and `updated` follow incoming encounter order, `removed` follows
/// existing encounter order. Duplicate ids within one input are indexed
/// last-occurrence-wins; records without a usable id cannot be indexed and
/// do not participate.
pub fn diff_records(existing: &[Record], incoming: &[Record]) -> CollectionDiff {
    let (existing_index, existing_order) = index_by_id(existing);
    let (incoming_index, incoming_order) = index_by_id(incoming);

    let mut diff = CollectionDiff::default();

    for id in &incoming_order {
        let record = incoming_index[id];
        match existing_index.get(id) {
            None => diff.added.push(record.clone()),
            Some(&previous) if previous != record => diff.updated.push(UpdatedRecord {
                before: previous.clone(),
                after: record.clone(),
            }),
            Some(_) => {}
        }
    }

    for id in &existing_order {
        if !incoming_index.contains_key(id) {
            diff.removed.push(existing_index[id].clone());
        }
    }

    diff
}

/// Index records by id: last occurrence wins, first-seen order retained.
fn index_by_id(records: &[Record]) -> (HashMap<RecordId, &Record>, Vec<RecordId>) {
    let mut index = HashMap::new();
    let mut order = Vec::new();
    for record in records {
        let id = match record.id() {
            Some(id) => id,
            None => continue,
        };
        if index.insert(id.clone(), record).is_none() {
            order.push(id);
        }
    }
    (index, order)
}
