//! # testrig-overlay
//!
//! Declarative overlay composition for model documents.
//!
//! A base document is combined with partial "overlay" documents that may
//! embed control keys specifying how each node merges with its base
//! counterpart:
//!
//! - `$merge: <bool>` on a mapping selects recursive key-by-key merging
//!   (`true`, the default) or whole-subtree replacement (`false`).
//! - `$list: [...]` with `$merge: <strategy>` combines a sequence fragment
//!   with the base sequence. Strategies: `replace` (default), `merge`,
//!   `append_head`, `append_tail`, `overwrite_head`, `overwrite_tail`.
//!
//! Control keys never survive into the composed result, and [`merge`]
//! never mutates its inputs, so the same base can be folded against
//! several overlay stacks independently. Later overlays win scalar
//! conflicts. Malformed directives are authoring defects and fail
//! immediately with [`MergeError::AmbiguousDirective`]; they are not
//! collected the way schema violations are.
//!
//! ## Example
//!
//! ```rust
//! use testrig_document::Document;
//! use testrig_overlay::merge;
//!
//! let base = Document::from(serde_json::json!({"gears": [1, 2], "mass": 1400}));
//! let overlay = Document::from(serde_json::json!({
//!     "gears": {"$merge": "append_tail", "$list": [3]},
//!     "mass": 1450
//! }));
//! let composed = merge(&base, &overlay).unwrap();
//! assert_eq!(composed, Document::from(serde_json::json!({"gears": [1, 2, 3], "mass": 1450})));
//! ```

mod directive;
mod error;
mod merge;

pub use directive::SequenceStrategy;
pub use error::MergeError;
pub use merge::{MergeOptions, fold, fold_with_options, merge, merge_with_options};
