//! # testrig-model
//!
//! Model document preparation: compose a base document with overlay
//! fragments, fill in schema-declared defaults, and validate the result
//! against the built-in vehicle model schema — collecting every violation
//! instead of failing on the first.
//!
//! The pieces:
//!
//! - [`SchemaRegistry`] compiles the built-in model and domain-data
//!   schemas once at startup; it is immutable and passed by reference.
//! - [`Model`] folds overlays onto a base via `testrig-overlay`, runs the
//!   defaults-injecting validation from `testrig-validation`, and exposes
//!   the working document together with the collected errors.
//! - [`DomainData`] is the same two-state wrapper for the auxiliary
//!   domain-data document (physical constants, friction tables).
//!
//! Construction never fails because of schema violations; only an
//! explicit [`Model::validate`] with `raise_on_error = true` escalates
//! the accumulated list into a [`ValidationFailure`]. Malformed merge
//! directives, by contrast, are authoring defects and abort construction
//! immediately.
//!
//! ## Example
//!
//! ```rust
//! use testrig_model::{Document, Model, SchemaRegistry};
//!
//! let registry = SchemaRegistry::new().unwrap();
//!
//! let base = Document::from(serde_json::json!({
//!     "vehicle": {
//!         "mass": 1450.0,
//!         "wheelbase": 2.6,
//!         "axles": [
//!             {"position": "front", "load_fraction": 0.55},
//!             {"position": "rear", "load_fraction": 0.45}
//!         ]
//!     },
//!     "test": {"maneuver": "coastdown"}
//! }));
//! let heavier = Document::from(serde_json::json!({"vehicle": {"mass": 1520.0}}));
//!
//! let model = Model::new(&registry, &base, &[heavier]).unwrap();
//! assert!(model.errors().is_empty());
//! // Overlay won the scalar conflict; defaults were filled in.
//! assert_eq!(model.data().get_path(&["vehicle", "mass"]), Some(&Document::Float(1520.0)));
//! assert_eq!(model.data().get_path(&["test", "sample_rate"]), Some(&Document::Float(100.0)));
//! ```

mod domain;
mod model;
mod registry;

pub use domain::DomainData;
pub use model::{Model, ValidationFailure};
pub use registry::SchemaRegistry;

// Re-exported so downstream consumers need only this crate.
pub use testrig_document::Document;
pub use testrig_overlay::MergeError;
pub use testrig_validation::{SchemaError, ValidationError};
