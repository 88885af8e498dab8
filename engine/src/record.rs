//! Record types for catalog entries.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The typed identity of a record, extracted from its `id` field.
///
/// Identity follows JSON value semantics: `Int(1)` and `Text("1")` are
/// distinct ids and never compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RecordId {
    /// A non-empty string id
    Text(String),
    /// An integer id
    Int(i64),
}

impl RecordId {
    /// Extract a usable id from a JSON value.
    ///
    /// Usable ids are non-empty strings and integers representable as
    /// `i64`. Everything else - null, booleans, floats, arrays, objects,
    /// out-of-range integers - yields `None`. The integer `0` is usable.
    pub fn from_value(value: &Value) -> Option<RecordId> {
        match value {
            Value::String(s) if !s.is_empty() => Some(RecordId::Text(s.clone())),
            Value::Number(n) => n.as_i64().map(RecordId::Int),
            _ => None,
        }
    }
}

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordId::Text(s) => write!(f, "{}", s),
            RecordId::Int(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Int(n)
    }
}

/// A catalog record: a free-form JSON object expected to carry an `id` field.
///
/// Serializes transparently as the underlying object, so a collection file
/// is exactly a JSON array of these. Equality is structural: field by
/// field, order-insensitive for object keys, at every nesting depth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Create a record from a field mapping.
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Create a record from a JSON value, if it is an object.
    pub fn from_value(value: Value) -> Option<Record> {
        match value {
            Value::Object(fields) => Some(Record { fields }),
            _ => None,
        }
    }

    /// The record's typed id, if it carries a usable one.
    pub fn id(&self) -> Option<RecordId> {
        self.fields.get("id").and_then(RecordId::from_value)
    }

    /// Raw value of the `id` field, usable or not.
    pub fn raw_id(&self) -> Option<&Value> {
        self.fields.get("id")
    }

    /// Look up a field by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }
}
