//! # testrig-document
//!
//! The in-memory document tree shared by every stage of model preparation.
//!
//! This crate provides [`Document`], a recursively-typed value tree
//! (scalars, sequences, string-keyed mappings) that represents model
//! documents, overlay fragments, and schema descriptions alike. Upstream
//! import adapters hand the preparation core plain `Document` trees; the
//! downstream computation stage consumes the merged, defaulted result.
//!
//! ## Design
//!
//! `Document` is an explicit tagged enum rather than a dynamic value: the
//! merge and validation layers pattern-match exhaustively instead of
//! inspecting types at runtime. Mappings use [`indexmap::IndexMap`] so that
//! traversal, defaults injection, and diagnostics are deterministic.
//!
//! ## Example
//!
//! ```rust
//! use testrig_document::Document;
//!
//! let doc = Document::from(serde_json::json!({
//!     "vehicle": { "mass": 1450.0 }
//! }));
//! assert_eq!(doc.get_path(&["vehicle", "mass"]).and_then(Document::as_f64), Some(1450.0));
//! ```

mod convert;
mod value;

pub use value::{Document, Mapping};
