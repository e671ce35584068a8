//! The model document lifecycle.
//!
//! A `Model` is built from a base document plus zero or more overlays,
//! folded in argument order (later overlays win conflicts). Unless
//! validation is skipped, the merged document is immediately run through
//! the defaults-injecting validator and the collected violations are
//! retained. Deciding whether those violations are fatal is left to the
//! caller, via [`Model::validate`].

use std::fmt;

use testrig_document::Document;
use testrig_overlay::MergeError;
use testrig_validation::{Schema, ValidationError, validate};

use crate::registry::SchemaRegistry;

/// A prepared model document and the violations found while preparing it.
#[derive(Debug, Clone)]
pub struct Model {
    data: Document,
    errors: Vec<ValidationError>,
    validated: bool,
}

impl Model {
    /// Compose `base` with `overlays` and validate the result against the
    /// model schema, injecting schema-declared defaults.
    ///
    /// Schema violations never fail construction; they are retained for
    /// inspection and for explicit escalation. Only a malformed merge
    /// directive aborts construction.
    pub fn new(
        registry: &SchemaRegistry,
        base: &Document,
        overlays: &[Document],
    ) -> Result<Self, MergeError> {
        Self::prepare(registry.model_schema(), base, overlays)
    }

    /// Compose `base` with `overlays` without validation.
    ///
    /// The exposed document is exactly the merged tree: no defaults are
    /// injected and no checks run, so [`Model::errors`] is empty.
    pub fn new_unvalidated(base: &Document, overlays: &[Document]) -> Result<Self, MergeError> {
        let data = testrig_overlay::fold(base, overlays)?;
        Ok(Self {
            data,
            errors: Vec::new(),
            validated: false,
        })
    }

    pub(crate) fn prepare(
        schema: &Schema,
        base: &Document,
        overlays: &[Document],
    ) -> Result<Self, MergeError> {
        let mut data = testrig_overlay::fold(base, overlays)?;
        let errors = validate(schema, &mut data);
        Ok(Self {
            data,
            errors,
            validated: true,
        })
    }

    /// The merged, defaulted (unless skipped) working document.
    pub fn data(&self) -> &Document {
        &self.data
    }

    /// Consume the model, yielding the working document for the
    /// downstream stage.
    pub fn into_data(self) -> Document {
        self.data
    }

    /// Whether the defaults-and-validation pass ran at construction.
    pub fn is_validated(&self) -> bool {
        self.validated
    }

    /// The violations collected at construction time.
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// Return the collected violations, optionally escalating them.
    ///
    /// With `raise_on_error = false` this always succeeds, returning the
    /// (possibly empty) list. With `raise_on_error = true` a non-empty
    /// list becomes a [`ValidationFailure`] carrying every violation, not
    /// just the first.
    pub fn validate(&self, raise_on_error: bool) -> Result<Vec<ValidationError>, ValidationFailure> {
        if raise_on_error && !self.errors.is_empty() {
            return Err(ValidationFailure {
                errors: self.errors.clone(),
            });
        }
        Ok(self.errors.clone())
    }
}

/// Escalation of a non-empty violation list.
///
/// Carries the complete list so a caller reporting the failure can show
/// every problem from the one preparation pass.
#[derive(Debug, Clone)]
pub struct ValidationFailure {
    pub errors: Vec<ValidationError>,
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "document validation failed with {} violation(s)",
            self.errors.len()
        )?;
        for error in &self.errors {
            write!(f, "\n  - {error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationFailure {}
