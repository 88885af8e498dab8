//! # Curio Engine
//!
//! The reconciliation core of the Curio catalog tool.
//!
//! This crate holds the logic for comparing and merging two catalog
//! states: the authoritative one on disk and an incoming candidate. It
//! validates record identities, computes diffs, and performs the
//! identity-keyed incoming-wins merge - all as pure functions over
//! in-memory data.
//!
//! ## Design Principles
//!
//! - **No IO**: the engine has no knowledge of files or directories
//! - **Deterministic**: same inputs always produce same outputs
//! - **Testable**: pure logic, no mocks needed
//!
//! ## Core Concepts
//!
//! ### Records
//!
//! A [`Record`] is a free-form JSON object carrying a required `id` field.
//! Ids are typed ([`RecordId`]): non-empty strings or `i64` integers, with
//! no coercion between the two. Record equality is structural and
//! key-order-insensitive at every nesting depth.
//!
//! ### Catalogs
//!
//! A [`Catalog`] pairs the two collections the tool manages: the
//! `collections` set and the `media` index ([`CollectionKind`]).
//!
//! ### Validation
//!
//! [`validate_catalog`] rejects any record whose id is missing, empty, or
//! of an unusable type, reporting the collection and record index. The
//! same gate runs before every operation.
//!
//! ### Diff and Merge
//!
//! [`diff_records`] classifies records as added, removed, or updated by
//! id. [`merge_records`] unions two record sequences: ids unique to either
//! side survive, and when both sides carry the same id with different
//! contents the incoming version wins while the superseded one is reported
//! as a [`RecordConflict`] for archival.
//!
//! ## Quick Start
//!
//! ```rust
//! use curio_engine::{diff_records, merge_records, Record};
//! use serde_json::json;
//!
//! let existing = vec![
//!     Record::from_value(json!({"id": "album-1", "title": "Dawn"})).unwrap(),
//! ];
//! let incoming = vec![
//!     Record::from_value(json!({"id": "album-1", "title": "Dawn (remaster)"})).unwrap(),
//!     Record::from_value(json!({"id": "album-2", "title": "Dusk"})).unwrap(),
//! ];
//!
//! // What would change?
//! let diff = diff_records(&existing, &incoming);
//! assert_eq!(diff.added.len(), 1);
//! assert_eq!(diff.updated.len(), 1);
//!
//! // Merge with incoming-wins resolution.
//! let outcome = merge_records(&existing, &incoming);
//! assert_eq!(outcome.merged.len(), 2);
//! assert_eq!(outcome.conflicts.len(), 1);
//! ```

pub mod catalog;
pub mod diff;
pub mod error;
pub mod merge;
pub mod record;
pub mod validate;

// Re-export main types at crate root
pub use catalog::{Catalog, CollectionKind};
pub use diff::{diff_catalogs, diff_records, CatalogDiff, CollectionDiff, UpdatedRecord};
pub use error::Error;
pub use merge::{merge_records, MergeOutcome, RecordConflict};
pub use record::{Record, RecordId};
pub use validate::{validate_catalog, validate_records};
