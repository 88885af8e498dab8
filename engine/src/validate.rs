//! Incoming-state validation.
//!
//! Every record in every collection must carry a usable id before any
//! operation may touch the catalog. The same gate runs for preview,
//! overwrite, and merge, so an invalid state can never reach disk.

use crate::{error::Result, Catalog, CollectionKind, Error, Record, RecordId};
use serde_json::Value;

/// Validate every record of every collection in a catalog.
///
/// Fails on the first offending record, naming its collection and
/// zero-based index.
pub fn validate_catalog(catalog: &Catalog) -> Result<()> {
    for kind in CollectionKind::ALL {
        validate_records(kind, catalog.records(kind))?;
    }
    Ok(())
}

/// Validate a single collection's records.
pub fn validate_records(collection: CollectionKind, records: &[Record]) -> Result<()> {
    for (index, record) in records.iter().enumerate() {
        validate_record(collection, index, record)?;
    }
    Ok(())
}

fn validate_record(collection: CollectionKind, index: usize, record: &Record) -> Result<()> {
    let raw = match record.raw_id() {
        Some(raw) => raw,
        None => return Err(Error::MissingId { collection, index }),
    };

    if matches!(raw, Value::String(s) if s.is_empty()) {
        return Err(Error::EmptyId { collection, index });
    }

    match RecordId::from_value(raw) {
        Some(_) => Ok(()),
        None => Err(Error::InvalidId {
            collection,
            index,
            got: json_type_name(raw).to_string(),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "Null",
        Value::Bool(_) => "Bool",
        Value::Number(n) if n.is_i64() || n.is_u64() => "Int",
        Value::Number(_) => "Float",
        Value::String(_) => "String",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    }
}
