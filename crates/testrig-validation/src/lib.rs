//! # testrig-validation
//!
//! Schema compilation and structural validation for model documents.
//!
//! Schemas are authored as `Document` trees using a small keyword set
//! (`type`, `properties`, `required`, `items`, `minItems`/`maxItems`,
//! `minimum`/`maximum`, `exclusiveMinimum`/`exclusiveMaximum`, `enum`,
//! `pattern`, `default`, `description`, `$ref`, `definitions`), compiled
//! once into a typed [`Schema`] tree with every `$ref` inlined from a
//! [`Definitions`] store, and then used to validate instances.
//!
//! Validation is a two-pass pipeline composed by ordinary function
//! composition:
//!
//! 1. [`inject_defaults`] fills schema-declared defaults into absent
//!    optional properties, depth-first, mutating only the instance.
//! 2. [`check`] performs the pure structural pass, collecting *every*
//!    violation into one list instead of stopping at the first.
//!
//! [`validate`] runs both in that order, so an injected default satisfies
//! a `required` constraint at the same level. Schema violations are data
//! findings, never errors: the functions here return error lists and do
//! not fail.
//!
//! ## Example
//!
//! ```rust
//! use testrig_document::Document;
//! use testrig_validation::{Definitions, Schema, validate};
//!
//! let schema_doc = Document::from(serde_json::json!({
//!     "type": "object",
//!     "required": ["mass"],
//!     "properties": {
//!         "mass": {"type": "number", "exclusiveMinimum": 0},
//!         "label": {"type": "string", "default": "unnamed"}
//!     }
//! }));
//! let schema = Schema::from_document(&schema_doc)
//!     .and_then(|s| s.resolve(&Definitions::new()))
//!     .unwrap();
//!
//! let mut instance = Document::from(serde_json::json!({"mass": 1450.0}));
//! let errors = validate(&schema, &mut instance);
//! assert!(errors.is_empty());
//! assert_eq!(instance.get("label"), Some(&Document::from("unnamed")));
//! ```

mod defaults;
mod error;
mod schema;
mod validator;

pub use defaults::inject_defaults;
pub use error::{
    InstancePath, PathSegment, SchemaError, SchemaResult, ValidationError, ValidationErrorKind,
};
pub use schema::{
    AnySchema, ArraySchema, BooleanSchema, Definitions, EnumSchema, NullSchema, NumberSchema,
    ObjectSchema, RefSchema, Schema, SchemaAnnotations, StringSchema,
};
pub use validator::{check, validate};
