//! Error types for overlay composition.

use thiserror::Error;

/// Errors raised while composing an overlay onto a base document.
///
/// Both variants indicate defects in the overlay itself (or a runaway
/// structure), not data-quality problems in the model: they are raised
/// synchronously from the merge rather than accumulated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MergeError {
    /// An overlay node carries a malformed merge directive.
    #[error("ambiguous merge directive at {}: {detail}", display_path(path))]
    AmbiguousDirective {
        /// Path from the overlay root to the offending node
        path: Vec<String>,
        /// What made the directive unreadable
        detail: String,
    },

    /// Overlay nesting exceeds the maximum depth.
    #[error("overlay nesting too deep (max depth: {max_depth}) at {}", display_path(path))]
    NestingTooDeep {
        /// Maximum allowed depth
        max_depth: usize,
        /// Path where the limit was exceeded
        path: Vec<String>,
    },
}

impl MergeError {
    pub(crate) fn ambiguous(path: &[String], detail: impl Into<String>) -> Self {
        MergeError::AmbiguousDirective {
            path: path.to_vec(),
            detail: detail.into(),
        }
    }

    /// The document path at which the error was raised.
    pub fn path(&self) -> &[String] {
        match self {
            MergeError::AmbiguousDirective { path, .. } => path,
            MergeError::NestingTooDeep { path, .. } => path,
        }
    }
}

fn display_path(path: &[String]) -> String {
    if path.is_empty() {
        "(root)".to_string()
    } else {
        path.join(".")
    }
}
