//! The `Document` value tree.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The mapping node type used throughout the document tree.
///
/// Keys are unique strings; iteration follows insertion order, which keeps
/// merge output and validation diagnostics reproducible.
pub type Mapping = IndexMap<String, Document>;

/// A recursively-typed document tree.
///
/// Represents both document instances (models, overlays, domain data) and
/// the schema descriptions they are validated against. Scalars cover
/// null, booleans, integers, floats, and strings; containers are
/// sequences and string-keyed mappings.
///
/// Equality is deep structural equality. Integer and float scalars are
/// distinct: `Document::Int(2) != Document::Float(2.0)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Document {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Sequence(Vec<Document>),
    Mapping(Mapping),
}

impl Document {
    /// Get a human-readable name for this node's type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Document::Null => "null",
            Document::Bool(_) => "boolean",
            Document::Int(_) => "integer",
            Document::Float(_) => "float",
            Document::String(_) => "string",
            Document::Sequence(_) => "sequence",
            Document::Mapping(_) => "mapping",
        }
    }

    /// Check if this is a scalar (anything but a sequence or mapping).
    pub fn is_scalar(&self) -> bool {
        !matches!(self, Document::Sequence(_) | Document::Mapping(_))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Document::Null)
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Document::Int(_) | Document::Float(_))
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, Document::Sequence(_))
    }

    pub fn is_mapping(&self) -> bool {
        matches!(self, Document::Mapping(_))
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Document::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Document::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Get this node as a number, widening integers to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Document::Int(i) => Some(*i as f64),
            Document::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Document::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[Document]> {
        match self {
            Document::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_sequence_mut(&mut self) -> Option<&mut Vec<Document>> {
        match self {
            Document::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&Mapping> {
        match self {
            Document::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn as_mapping_mut(&mut self) -> Option<&mut Mapping> {
        match self {
            Document::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    /// Look up a key in a mapping node.
    ///
    /// Returns `None` if this node is not a mapping or the key is absent.
    pub fn get(&self, key: &str) -> Option<&Document> {
        self.as_mapping().and_then(|m| m.get(key))
    }

    /// Navigate a chain of mapping keys.
    pub fn get_path(&self, path: &[&str]) -> Option<&Document> {
        let mut current = self;
        for key in path {
            current = current.get(key)?;
        }
        Some(current)
    }
}

impl From<bool> for Document {
    fn from(b: bool) -> Self {
        Document::Bool(b)
    }
}

impl From<i64> for Document {
    fn from(i: i64) -> Self {
        Document::Int(i)
    }
}

impl From<f64> for Document {
    fn from(f: f64) -> Self {
        Document::Float(f)
    }
}

impl From<&str> for Document {
    fn from(s: &str) -> Self {
        Document::String(s.to_string())
    }
}

impl From<String> for Document {
    fn from(s: String) -> Self {
        Document::String(s)
    }
}

impl From<Vec<Document>> for Document {
    fn from(items: Vec<Document>) -> Self {
        Document::Sequence(items)
    }
}

impl From<Mapping> for Document {
    fn from(entries: Mapping) -> Self {
        Document::Mapping(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(entries: Vec<(&str, Document)>) -> Document {
        Document::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
        )
    }

    #[test]
    fn test_type_names() {
        assert_eq!(Document::Null.type_name(), "null");
        assert_eq!(Document::Bool(true).type_name(), "boolean");
        assert_eq!(Document::Int(1).type_name(), "integer");
        assert_eq!(Document::Float(1.5).type_name(), "float");
        assert_eq!(Document::from("x").type_name(), "string");
        assert_eq!(Document::Sequence(vec![]).type_name(), "sequence");
        assert_eq!(mapping(vec![]).type_name(), "mapping");
    }

    #[test]
    fn test_scalar_predicates() {
        assert!(Document::Null.is_scalar());
        assert!(Document::Int(3).is_scalar());
        assert!(!Document::Sequence(vec![]).is_scalar());
        assert!(!mapping(vec![]).is_scalar());
        assert!(Document::Int(3).is_number());
        assert!(Document::Float(3.0).is_number());
        assert!(!Document::from("3").is_number());
    }

    #[test]
    fn test_as_f64_widens_integers() {
        assert_eq!(Document::Int(7).as_f64(), Some(7.0));
        assert_eq!(Document::Float(7.25).as_f64(), Some(7.25));
        assert_eq!(Document::from("7").as_f64(), None);
    }

    #[test]
    fn test_int_and_float_are_distinct() {
        assert_ne!(Document::Int(2), Document::Float(2.0));
        assert_eq!(Document::Int(2), Document::Int(2));
    }

    #[test]
    fn test_get_and_get_path() {
        let doc = mapping(vec![(
            "vehicle",
            mapping(vec![("mass", Document::Float(1450.0))]),
        )]);

        assert!(doc.get("vehicle").is_some());
        assert!(doc.get("missing").is_none());
        assert_eq!(
            doc.get_path(&["vehicle", "mass"]).and_then(Document::as_f64),
            Some(1450.0)
        );
        assert!(doc.get_path(&["vehicle", "mass", "deeper"]).is_none());
    }

    #[test]
    fn test_mapping_preserves_insertion_order() {
        let doc = mapping(vec![
            ("b", Document::Int(1)),
            ("a", Document::Int(2)),
            ("c", Document::Int(3)),
        ]);
        let keys: Vec<_> = doc.as_mapping().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["b", "a", "c"]);
    }

    #[test]
    fn test_deep_equality_ignores_mapping_key_order() {
        let left = mapping(vec![("a", Document::Int(1)), ("b", Document::Int(2))]);
        let right = mapping(vec![("b", Document::Int(2)), ("a", Document::Int(1))]);
        // IndexMap equality is order-insensitive by contract.
        assert_eq!(left, right);
    }

    #[test]
    fn test_serde_round_trip() {
        let doc = mapping(vec![
            ("name", Document::from("coastdown")),
            ("speeds", Document::Sequence(vec![Document::Int(30), Document::Float(27.8)])),
            ("enabled", Document::Bool(true)),
            ("note", Document::Null),
        ]);
        let text = serde_json::to_string(&doc).unwrap();
        let back: Document = serde_json::from_str(&text).unwrap();
        assert_eq!(doc, back);
    }
}
