//! Error types for schema compilation and validation.
//!
//! Two distinct failure families live here. [`SchemaError`] reports
//! defects in a schema description itself (authoring/programmer errors,
//! raised while compiling). [`ValidationError`] reports a structural
//! violation found in an instance; these are collected into lists and
//! never raised by the validator.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while compiling a schema description.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    /// Unknown `type` name in a schema description.
    #[error("invalid schema type: {0}")]
    InvalidType(String),

    /// A schema keyword carries the wrong shape of value.
    #[error("invalid schema structure: {message}")]
    InvalidStructure { message: String },

    /// A `$ref` names no entry in the definitions namespace.
    #[error("unresolved schema reference: {0}")]
    UnresolvedRef(String),

    /// A `$ref` chain refers back to itself.
    #[error("circular schema reference through '{0}'")]
    CircularRef(String),

    /// A `pattern` keyword is not a valid regular expression.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern { pattern: String, message: String },
}

impl SchemaError {
    pub(crate) fn structure(message: impl Into<String>) -> Self {
        SchemaError::InvalidStructure {
            message: message.into(),
        }
    }
}

/// Result type for schema compilation operations.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Structured validation error kinds.
///
/// Each variant corresponds to a schema keyword and carries the data a
/// reporter needs; the human-readable message is derived, not stored.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum ValidationErrorKind {
    /// Instance node has the wrong type
    TypeMismatch { expected: String, got: String },

    /// Required property absent from a mapping
    MissingRequiredProperty { property: String },

    /// Number outside its declared bounds
    ///
    /// Only the violated bound is set.
    NumberOutOfRange {
        value: f64,
        minimum: Option<f64>,
        maximum: Option<f64>,
        exclusive_minimum: Option<f64>,
        exclusive_maximum: Option<f64>,
    },

    /// Sequence length outside its declared bounds
    ///
    /// Only the violated bound is set.
    SequenceLengthInvalid {
        length: usize,
        min_items: Option<usize>,
        max_items: Option<usize>,
    },

    /// Value not among the enumerated alternatives
    InvalidEnumValue { value: String, allowed: Vec<String> },

    /// String does not match the declared pattern
    PatternMismatch { value: String, pattern: String },

    /// A `$ref` survived into a compiled schema
    UnresolvedReference { reference: String },
}

impl ValidationErrorKind {
    /// The schema keyword this violation belongs to.
    pub fn rule(&self) -> &'static str {
        match self {
            ValidationErrorKind::TypeMismatch { .. } => "type",
            ValidationErrorKind::MissingRequiredProperty { .. } => "required",
            ValidationErrorKind::NumberOutOfRange {
                minimum,
                maximum,
                exclusive_minimum,
                ..
            } => {
                if minimum.is_some() {
                    "minimum"
                } else if maximum.is_some() {
                    "maximum"
                } else if exclusive_minimum.is_some() {
                    "exclusiveMinimum"
                } else {
                    "exclusiveMaximum"
                }
            }
            ValidationErrorKind::SequenceLengthInvalid { min_items, .. } => {
                if min_items.is_some() {
                    "minItems"
                } else {
                    "maxItems"
                }
            }
            ValidationErrorKind::InvalidEnumValue { .. } => "enum",
            ValidationErrorKind::PatternMismatch { .. } => "pattern",
            ValidationErrorKind::UnresolvedReference { .. } => "$ref",
        }
    }

    /// Format a human-readable message for this violation.
    pub fn message(&self) -> String {
        match self {
            ValidationErrorKind::TypeMismatch { expected, got } => {
                format!("expected {expected}, got {got}")
            }
            ValidationErrorKind::MissingRequiredProperty { property } => {
                format!("missing required property '{property}'")
            }
            ValidationErrorKind::NumberOutOfRange {
                value,
                minimum,
                maximum,
                exclusive_minimum,
                exclusive_maximum,
            } => {
                if let Some(min) = minimum {
                    format!("number {value} is less than minimum {min}")
                } else if let Some(max) = maximum {
                    format!("number {value} is greater than maximum {max}")
                } else if let Some(min) = exclusive_minimum {
                    format!("number {value} is not greater than {min}")
                } else if let Some(max) = exclusive_maximum {
                    format!("number {value} is not less than {max}")
                } else {
                    format!("number {value} is out of range")
                }
            }
            ValidationErrorKind::SequenceLengthInvalid {
                length,
                min_items,
                max_items,
            } => {
                if let Some(min) = min_items {
                    format!("sequence length {length} is less than minimum {min}")
                } else if let Some(max) = max_items {
                    format!("sequence length {length} is greater than maximum {max}")
                } else {
                    format!("sequence length {length} is invalid")
                }
            }
            ValidationErrorKind::InvalidEnumValue { value, allowed } => {
                format!("value must be one of: {}, got {value}", allowed.join(", "))
            }
            ValidationErrorKind::PatternMismatch { value, pattern } => {
                format!("string '{value}' does not match pattern '{pattern}'")
            }
            ValidationErrorKind::UnresolvedReference { reference } => {
                format!("unresolved schema reference: {reference}")
            }
        }
    }
}

/// A structural violation found at one instance path.
///
/// The `(path, rule, message)` triple consumed by reporters is exposed
/// through [`ValidationError::path`], [`ValidationError::rule`] and
/// [`ValidationError::message`].
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ValidationError {
    /// The structured violation
    pub kind: ValidationErrorKind,
    /// Instance path where the violation occurred
    pub path: InstancePath,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, path: InstancePath) -> Self {
        Self { kind, path }
    }

    /// The instance path where the violation occurred.
    pub fn path(&self) -> &InstancePath {
        &self.path
    }

    /// The schema keyword that was violated.
    pub fn rule(&self) -> &'static str {
        self.kind.rule()
    }

    /// The human-readable message for this violation.
    pub fn message(&self) -> String {
        self.kind.message()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} [{}]", self.path, self.message(), self.rule())
    }
}

/// Path from the instance root to a node (e.g. `vehicle.axles.[0].tire`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstancePath {
    segments: Vec<PathSegment>,
}

impl InstancePath {
    pub fn new() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    pub fn push_key(&mut self, key: impl Into<String>) {
        self.segments.push(PathSegment::Key(key.into()));
    }

    pub fn push_index(&mut self, index: usize) {
        self.segments.push(PathSegment::Index(index));
    }

    pub fn pop(&mut self) -> Option<PathSegment> {
        self.segments.pop()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for InstancePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.segments.is_empty() {
            write!(f, "(root)")
        } else {
            for (i, segment) in self.segments.iter().enumerate() {
                if i > 0 {
                    write!(f, ".")?;
                }
                write!(f, "{segment}")?;
            }
            Ok(())
        }
    }
}

/// One step in an instance path: a mapping key or a sequence index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    Key(String),
    Index(usize),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Key(key) => write!(f, "{key}"),
            PathSegment::Index(index) => write!(f, "[{index}]"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instance_path_display() {
        let mut path = InstancePath::new();
        assert_eq!(path.to_string(), "(root)");

        path.push_key("vehicle");
        path.push_key("axles");
        path.push_index(0);
        assert_eq!(path.to_string(), "vehicle.axles.[0]");

        path.pop();
        assert_eq!(path.to_string(), "vehicle.axles");
    }

    #[test]
    fn test_error_triple() {
        let mut path = InstancePath::new();
        path.push_key("mass");

        let error = ValidationError::new(
            ValidationErrorKind::NumberOutOfRange {
                value: -1.0,
                minimum: None,
                maximum: None,
                exclusive_minimum: Some(0.0),
                exclusive_maximum: None,
            },
            path,
        );
        assert_eq!(error.rule(), "exclusiveMinimum");
        assert_eq!(error.message(), "number -1 is not greater than 0");
        assert_eq!(error.path().to_string(), "mass");
    }

    #[test]
    fn test_rule_names_the_violated_keyword() {
        let kind = ValidationErrorKind::SequenceLengthInvalid {
            length: 9,
            min_items: None,
            max_items: Some(4),
        };
        assert_eq!(kind.rule(), "maxItems");

        let kind = ValidationErrorKind::TypeMismatch {
            expected: "number".to_string(),
            got: "string".to_string(),
        };
        assert_eq!(kind.rule(), "type");
        assert_eq!(kind.message(), "expected number, got string");
    }

    #[test]
    fn test_display_joins_triple() {
        let error = ValidationError::new(
            ValidationErrorKind::MissingRequiredProperty {
                property: "maneuver".to_string(),
            },
            InstancePath::new(),
        );
        assert_eq!(
            error.to_string(),
            "(root): missing required property 'maneuver' [required]"
        );
    }
}
