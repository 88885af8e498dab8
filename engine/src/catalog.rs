//! The two-collection catalog model.
//!
//! A catalog is the complete state the tool reconciles: the `collections`
//! set and the `media` index, each an ordered sequence of records.

use crate::Record;
use serde::{Deserialize, Serialize};

/// The collections a catalog is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Curated collection entries
    Collections,
    /// Media index entries
    Media,
}

impl CollectionKind {
    /// Both collections, in persistence order.
    pub const ALL: [CollectionKind; 2] = [CollectionKind::Collections, CollectionKind::Media];

    /// Canonical name used in reports and log entries.
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Collections => "collections",
            CollectionKind::Media => "media",
        }
    }

    /// File name of the authoritative JSON file for this collection.
    pub fn file_name(&self) -> &'static str {
        match self {
            CollectionKind::Collections => "collections.json",
            CollectionKind::Media => "media-index.json",
        }
    }
}

impl std::fmt::Display for CollectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A complete catalog state: the record sequences of both collections.
///
/// "Existing" and "incoming" states are both plain catalogs; only the
/// caller knows which role one plays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    /// Records of the collections set
    pub collections: Vec<Record>,
    /// Records of the media index
    pub media: Vec<Record>,
}

impl Catalog {
    /// Create a catalog from both record sequences.
    pub fn new(collections: Vec<Record>, media: Vec<Record>) -> Self {
        Self { collections, media }
    }

    /// Records of one collection.
    pub fn records(&self, kind: CollectionKind) -> &[Record] {
        match kind {
            CollectionKind::Collections => &self.collections,
            CollectionKind::Media => &self.media,
        }
    }

    /// Replace the records of one collection.
    pub fn set_records(&mut self, kind: CollectionKind, records: Vec<Record>) {
        match kind {
            CollectionKind::Collections => self.collections = records,
            CollectionKind::Media => self.media = records,
        }
    }

    /// Total number of records across both collections.
    pub fn record_count(&self) -> usize {
        self.collections.len() + self.media.len()
    }

    /// Whether both collections are empty.
    pub fn is_empty(&self) -> bool {
        self.collections.is_empty() && self.media.is_empty()
    }
}
