//! Schema types, parsing, and `$ref` resolution.
//!
//! Schemas go through two phases:
//!
//! 1. **Parsing** (stateless): a schema `Document` → [`Schema`] tree,
//!    possibly containing [`Schema::Ref`] nodes.
//! 2. **Resolution** (with a [`Definitions`] store): every `$ref` is
//!    inlined eagerly, producing the fully-resolved tree the validator
//!    consumes. Dangling and circular references are reported here, so
//!    validation never encounters them.

use std::collections::HashMap;

use testrig_document::Document;

use crate::error::{SchemaError, SchemaResult};

mod helpers;
mod parser;
mod types;

pub use types::{
    AnySchema, ArraySchema, BooleanSchema, EnumSchema, NullSchema, NumberSchema, ObjectSchema,
    RefSchema, SchemaAnnotations, StringSchema,
};

/// The main schema enum representing all schema types.
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Boolean type schema
    Boolean(BooleanSchema),
    /// Number type schema (integer or float)
    Number(NumberSchema),
    /// String type schema
    String(StringSchema),
    /// Null type schema
    Null(NullSchema),
    /// Enum schema (fixed set of values)
    Enum(EnumSchema),
    /// Any type schema (no validation)
    Any(AnySchema),
    /// Array type schema
    Array(ArraySchema),
    /// Object type schema
    Object(ObjectSchema),
    /// Reference to a named schema (eliminated by resolution)
    Ref(RefSchema),
}

impl Schema {
    /// Parse a schema description.
    ///
    /// # Example
    ///
    /// ```
    /// use testrig_document::Document;
    /// use testrig_validation::Schema;
    ///
    /// let doc = Document::from(serde_json::json!({"type": "boolean"}));
    /// let schema = Schema::from_document(&doc).unwrap();
    /// assert_eq!(schema.type_name(), "boolean");
    /// ```
    pub fn from_document(doc: &Document) -> SchemaResult<Schema> {
        parser::from_document(doc)
    }

    /// Get the annotations for this schema.
    pub fn annotations(&self) -> &SchemaAnnotations {
        match self {
            Schema::Boolean(s) => &s.annotations,
            Schema::Number(s) => &s.annotations,
            Schema::String(s) => &s.annotations,
            Schema::Null(s) => &s.annotations,
            Schema::Enum(s) => &s.annotations,
            Schema::Any(s) => &s.annotations,
            Schema::Array(s) => &s.annotations,
            Schema::Object(s) => &s.annotations,
            Schema::Ref(s) => &s.annotations,
        }
    }

    fn annotations_mut(&mut self) -> &mut SchemaAnnotations {
        match self {
            Schema::Boolean(s) => &mut s.annotations,
            Schema::Number(s) => &mut s.annotations,
            Schema::String(s) => &mut s.annotations,
            Schema::Null(s) => &mut s.annotations,
            Schema::Enum(s) => &mut s.annotations,
            Schema::Any(s) => &mut s.annotations,
            Schema::Array(s) => &mut s.annotations,
            Schema::Object(s) => &mut s.annotations,
            Schema::Ref(s) => &mut s.annotations,
        }
    }

    /// Get a human-readable name for this schema type.
    pub fn type_name(&self) -> &'static str {
        match self {
            Schema::Boolean(_) => "boolean",
            Schema::Number(_) => "number",
            Schema::String(_) => "string",
            Schema::Null(_) => "null",
            Schema::Enum(_) => "enum",
            Schema::Any(_) => "any",
            Schema::Array(_) => "array",
            Schema::Object(_) => "object",
            Schema::Ref(_) => "$ref",
        }
    }

    /// Resolve every `$ref` against a definitions namespace, returning a
    /// fully-resolved schema tree.
    ///
    /// Resolution is eager: the result contains no [`Schema::Ref`] nodes.
    /// Annotations at a reference site override the target's, so a `$ref`
    /// property can attach its own `default` or `description`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::UnresolvedRef`] for a reference with no definition;
    /// [`SchemaError::CircularRef`] for a reference chain that revisits a
    /// name.
    pub fn resolve(&self, definitions: &Definitions) -> SchemaResult<Schema> {
        resolve_refs(self, definitions, &mut Vec::new())
    }
}

fn resolve_refs(
    schema: &Schema,
    definitions: &Definitions,
    visiting: &mut Vec<String>,
) -> SchemaResult<Schema> {
    match schema {
        Schema::Ref(r) => {
            if visiting.iter().any(|name| name == &r.reference) {
                return Err(SchemaError::CircularRef(r.reference.clone()));
            }
            let target = definitions
                .resolve(&r.reference)
                .ok_or_else(|| SchemaError::UnresolvedRef(r.reference.clone()))?;

            visiting.push(r.reference.clone());
            let mut resolved = resolve_refs(target, definitions, visiting)?;
            visiting.pop();

            let site = &r.annotations;
            if site.description.is_some() {
                resolved.annotations_mut().description = site.description.clone();
            }
            if site.default.is_some() {
                resolved.annotations_mut().default = site.default.clone();
            }
            Ok(resolved)
        }

        Schema::Array(array) => {
            let items = match &array.items {
                Some(items) => Some(Box::new(resolve_refs(items, definitions, visiting)?)),
                None => None,
            };
            Ok(Schema::Array(ArraySchema {
                annotations: array.annotations.clone(),
                items,
                min_items: array.min_items,
                max_items: array.max_items,
            }))
        }

        Schema::Object(object) => {
            let mut properties = indexmap::IndexMap::new();
            for (name, property) in &object.properties {
                properties.insert(name.clone(), resolve_refs(property, definitions, visiting)?);
            }
            Ok(Schema::Object(ObjectSchema {
                annotations: object.annotations.clone(),
                properties,
                required: object.required.clone(),
            }))
        }

        // Leaf schemas resolve to themselves.
        Schema::Boolean(_)
        | Schema::Number(_)
        | Schema::String(_)
        | Schema::Null(_)
        | Schema::Enum(_)
        | Schema::Any(_) => Ok(schema.clone()),
    }
}

/// Named schema store backing `$ref` resolution.
///
/// Built once from a `definitions` mapping (or programmatically) and then
/// only read. Definitions may reference each other; cycles are caught
/// during resolution.
#[derive(Debug, Default)]
pub struct Definitions {
    schemas: HashMap<String, Schema>,
}

impl Definitions {
    /// Create an empty definitions store.
    pub fn new() -> Self {
        Self {
            schemas: HashMap::new(),
        }
    }

    /// Parse a `definitions` mapping (name → schema description).
    pub fn from_document(doc: &Document) -> SchemaResult<Self> {
        let entries = doc.as_mapping().ok_or_else(|| {
            SchemaError::structure(format!(
                "`definitions` must be a mapping, got {}",
                doc.type_name()
            ))
        })?;
        let mut definitions = Definitions::new();
        for (name, schema_doc) in entries {
            definitions.register(name.clone(), Schema::from_document(schema_doc)?);
        }
        Ok(definitions)
    }

    /// Register a schema under a name.
    pub fn register(&mut self, name: String, schema: Schema) {
        self.schemas.insert(name, schema);
    }

    /// Resolve a name to its schema.
    pub fn resolve(&self, name: &str) -> Option<&Schema> {
        self.schemas.get(name)
    }

    /// All registered names.
    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.schemas.keys()
    }
}
