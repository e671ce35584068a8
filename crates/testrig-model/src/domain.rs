//! Auxiliary domain-data documents.
//!
//! Domain data (physical constants, friction tables) follows the same
//! two-state lifecycle as a model document but is checked against the
//! domain schema. With every property defaulted, an empty base yields a
//! complete, valid document.

use testrig_document::Document;
use testrig_overlay::MergeError;
use testrig_validation::ValidationError;

use crate::model::{Model, ValidationFailure};
use crate::registry::SchemaRegistry;

/// A prepared domain-data document.
#[derive(Debug, Clone)]
pub struct DomainData {
    inner: Model,
}

impl DomainData {
    /// Compose and validate a domain-data document against the domain
    /// schema, injecting defaults. Schema violations are collected, not
    /// raised.
    pub fn new(
        registry: &SchemaRegistry,
        base: &Document,
        overlays: &[Document],
    ) -> Result<Self, MergeError> {
        Ok(Self {
            inner: Model::prepare(registry.domain_schema(), base, overlays)?,
        })
    }

    /// Compose without validation; the document is exactly the merged tree.
    pub fn new_unvalidated(base: &Document, overlays: &[Document]) -> Result<Self, MergeError> {
        Ok(Self {
            inner: Model::new_unvalidated(base, overlays)?,
        })
    }

    pub fn data(&self) -> &Document {
        self.inner.data()
    }

    pub fn into_data(self) -> Document {
        self.inner.into_data()
    }

    pub fn is_validated(&self) -> bool {
        self.inner.is_validated()
    }

    pub fn errors(&self) -> &[ValidationError] {
        self.inner.errors()
    }

    /// See [`Model::validate`].
    pub fn validate(&self, raise_on_error: bool) -> Result<Vec<ValidationError>, ValidationFailure> {
        self.inner.validate(raise_on_error)
    }
}
