//! Schema type definitions.
//!
//! One struct per schema type, each carrying the shared annotations plus
//! its own constraints. The structs are plain data; behavior lives on the
//! [`Schema`] enum and in the validator.

use indexmap::IndexMap;
use testrig_document::Document;

use super::Schema;

/// Annotations that can be attached to any schema node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SchemaAnnotations {
    /// Short description of the field
    pub description: Option<String>,
    /// Value injected when an instance omits the annotated property
    pub default: Option<Document>,
}

/// Boolean type schema
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanSchema {
    pub annotations: SchemaAnnotations,
}

/// Number type schema (integer or float)
#[derive(Debug, Clone, PartialEq)]
pub struct NumberSchema {
    pub annotations: SchemaAnnotations,
    pub minimum: Option<f64>,
    pub maximum: Option<f64>,
    pub exclusive_minimum: Option<f64>,
    pub exclusive_maximum: Option<f64>,
}

/// String type schema
#[derive(Debug, Clone, PartialEq)]
pub struct StringSchema {
    pub annotations: SchemaAnnotations,
    /// Regular expression the string must match; validity is checked at
    /// compile time
    pub pattern: Option<String>,
}

/// Null type schema
#[derive(Debug, Clone, PartialEq)]
pub struct NullSchema {
    pub annotations: SchemaAnnotations,
}

/// Any type schema (no validation)
#[derive(Debug, Clone, PartialEq)]
pub struct AnySchema {
    pub annotations: SchemaAnnotations,
}

/// Enum schema (fixed set of allowed values)
#[derive(Debug, Clone, PartialEq)]
pub struct EnumSchema {
    pub annotations: SchemaAnnotations,
    pub values: Vec<Document>,
}

/// Array type schema
#[derive(Debug, Clone, PartialEq)]
pub struct ArraySchema {
    pub annotations: SchemaAnnotations,
    pub items: Option<Box<Schema>>,
    pub min_items: Option<usize>,
    pub max_items: Option<usize>,
}

/// Object type schema
///
/// `properties` is ordered so that defaults injection and error
/// collection are deterministic.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectSchema {
    pub annotations: SchemaAnnotations,
    pub properties: IndexMap<String, Schema>,
    pub required: Vec<String>,
}

/// Reference to a named schema in the definitions namespace
///
/// Only present between parsing and resolution; a resolved schema tree
/// contains no references. Annotations at the reference site override the
/// target's, so a `$ref` property can carry its own `default`.
#[derive(Debug, Clone, PartialEq)]
pub struct RefSchema {
    pub annotations: SchemaAnnotations,
    pub reference: String,
}
