//! Conversions between `Document` and `serde_json::Value`.
//!
//! The upstream import adapters (CSV/Excel readers and similar) produce
//! JSON-shaped trees; these conversions are the interchange seam between
//! them and the preparation core. Both directions are lossless except for
//! non-finite floats, which JSON cannot represent and which become null.

use crate::value::{Document, Mapping};
use serde_json::Value;

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Document::Null,
            Value::Bool(b) => Document::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Document::Int(i)
                } else {
                    // u64 beyond i64::MAX or a true float; widen to f64.
                    Document::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Document::String(s),
            Value::Array(items) => {
                Document::Sequence(items.into_iter().map(Document::from).collect())
            }
            Value::Object(entries) => {
                let mapping: Mapping = entries
                    .into_iter()
                    .map(|(k, v)| (k, Document::from(v)))
                    .collect();
                Document::Mapping(mapping)
            }
        }
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        match doc {
            Document::Null => Value::Null,
            Document::Bool(b) => Value::Bool(b),
            Document::Int(i) => Value::Number(i.into()),
            Document::Float(f) => {
                serde_json::Number::from_f64(f).map_or(Value::Null, Value::Number)
            }
            Document::String(s) => Value::String(s),
            Document::Sequence(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            Document::Mapping(entries) => {
                let mut map = serde_json::Map::new();
                for (key, value) in entries {
                    map.insert(key, Value::from(value));
                }
                Value::Object(map)
            }
        }
    }
}
