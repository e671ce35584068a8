//! Structural validation with aggregate error reporting.
//!
//! [`check`] walks an instance against a resolved schema and collects
//! every violation it finds; traversal never stops at the first problem,
//! so a user fixing input data sees all issues from one pass. [`validate`]
//! composes defaults injection with the structural pass.

use regex::Regex;
use testrig_document::Document;

use crate::defaults::inject_defaults;
use crate::error::{InstancePath, ValidationError, ValidationErrorKind};
use crate::schema::Schema;

/// Validate an instance: inject schema-declared defaults, then run the
/// structural pass on the defaulted document.
///
/// Injection comes first so that an injected default satisfies a
/// `required` constraint at the same level. The instance is the only
/// thing mutated; the schema is never touched. Never fails: violations
/// are returned as a list, in document traversal order.
pub fn validate(schema: &Schema, instance: &mut Document) -> Vec<ValidationError> {
    inject_defaults(schema, instance);
    check(schema, instance)
}

/// Run the pure structural pass, without defaults injection.
pub fn check(schema: &Schema, instance: &Document) -> Vec<ValidationError> {
    let mut context = ValidationContext::new();
    check_value(instance, schema, &mut context);
    context.errors
}

/// Tracks the current instance path and the violations collected so far.
struct ValidationContext {
    path: InstancePath,
    errors: Vec<ValidationError>,
}

impl ValidationContext {
    fn new() -> Self {
        Self {
            path: InstancePath::new(),
            errors: Vec::new(),
        }
    }

    fn add_error(&mut self, kind: ValidationErrorKind) {
        self.errors
            .push(ValidationError::new(kind, self.path.clone()));
    }

    fn with_key<F>(&mut self, key: &str, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.path.push_key(key);
        f(self);
        self.path.pop();
    }

    fn with_index<F>(&mut self, index: usize, f: F)
    where
        F: FnOnce(&mut Self),
    {
        self.path.push_index(index);
        f(self);
        self.path.pop();
    }
}

fn check_value(value: &Document, schema: &Schema, context: &mut ValidationContext) {
    match schema {
        Schema::Any(_) => {}
        Schema::Boolean(_) => {
            if !matches!(value, Document::Bool(_)) {
                context.add_error(type_mismatch("boolean", value));
            }
        }
        Schema::Null(_) => {
            if !value.is_null() {
                context.add_error(type_mismatch("null", value));
            }
        }
        Schema::Number(s) => check_number(value, s, context),
        Schema::String(s) => check_string(value, s, context),
        Schema::Enum(s) => check_enum(value, s, context),
        Schema::Array(s) => check_sequence(value, s, context),
        Schema::Object(s) => check_mapping(value, s, context),
        Schema::Ref(r) => {
            // A resolved schema contains no references; reaching one means
            // the caller skipped resolution.
            context.add_error(ValidationErrorKind::UnresolvedReference {
                reference: r.reference.clone(),
            });
        }
    }
}

fn type_mismatch(expected: &str, value: &Document) -> ValidationErrorKind {
    ValidationErrorKind::TypeMismatch {
        expected: expected.to_string(),
        got: value.type_name().to_string(),
    }
}

fn check_number(
    value: &Document,
    schema: &crate::schema::NumberSchema,
    context: &mut ValidationContext,
) {
    let Some(number) = value.as_f64() else {
        context.add_error(type_mismatch("number", value));
        return;
    };

    if let Some(min) = schema.minimum
        && number < min
    {
        context.add_error(ValidationErrorKind::NumberOutOfRange {
            value: number,
            minimum: Some(min),
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: None,
        });
    }

    if let Some(max) = schema.maximum
        && number > max
    {
        context.add_error(ValidationErrorKind::NumberOutOfRange {
            value: number,
            minimum: None,
            maximum: Some(max),
            exclusive_minimum: None,
            exclusive_maximum: None,
        });
    }

    if let Some(min) = schema.exclusive_minimum
        && number <= min
    {
        context.add_error(ValidationErrorKind::NumberOutOfRange {
            value: number,
            minimum: None,
            maximum: None,
            exclusive_minimum: Some(min),
            exclusive_maximum: None,
        });
    }

    if let Some(max) = schema.exclusive_maximum
        && number >= max
    {
        context.add_error(ValidationErrorKind::NumberOutOfRange {
            value: number,
            minimum: None,
            maximum: None,
            exclusive_minimum: None,
            exclusive_maximum: Some(max),
        });
    }
}

fn check_string(
    value: &Document,
    schema: &crate::schema::StringSchema,
    context: &mut ValidationContext,
) {
    let Some(text) = value.as_str() else {
        context.add_error(type_mismatch("string", value));
        return;
    };

    // Pattern validity was checked at schema compile time.
    if let Some(pattern) = &schema.pattern
        && let Ok(re) = Regex::new(pattern)
        && !re.is_match(text)
    {
        context.add_error(ValidationErrorKind::PatternMismatch {
            value: text.to_string(),
            pattern: pattern.clone(),
        });
    }
}

fn check_enum(
    value: &Document,
    schema: &crate::schema::EnumSchema,
    context: &mut ValidationContext,
) {
    if !schema.values.contains(value) {
        context.add_error(ValidationErrorKind::InvalidEnumValue {
            value: render(value),
            allowed: schema.values.iter().map(render).collect(),
        });
    }
}

fn check_sequence(
    value: &Document,
    schema: &crate::schema::ArraySchema,
    context: &mut ValidationContext,
) {
    let Some(items) = value.as_sequence() else {
        context.add_error(type_mismatch("sequence", value));
        return;
    };

    if let Some(min) = schema.min_items
        && items.len() < min
    {
        context.add_error(ValidationErrorKind::SequenceLengthInvalid {
            length: items.len(),
            min_items: Some(min),
            max_items: None,
        });
    }

    if let Some(max) = schema.max_items
        && items.len() > max
    {
        context.add_error(ValidationErrorKind::SequenceLengthInvalid {
            length: items.len(),
            min_items: None,
            max_items: Some(max),
        });
    }

    if let Some(item_schema) = &schema.items {
        for (index, item) in items.iter().enumerate() {
            context.with_index(index, |ctx| check_value(item, item_schema, ctx));
        }
    }
}

fn check_mapping(
    value: &Document,
    schema: &crate::schema::ObjectSchema,
    context: &mut ValidationContext,
) {
    let Some(entries) = value.as_mapping() else {
        context.add_error(type_mismatch("mapping", value));
        return;
    };

    for required in &schema.required {
        if !entries.contains_key(required) {
            context.add_error(ValidationErrorKind::MissingRequiredProperty {
                property: required.clone(),
            });
        }
    }

    // Properties without a schema entry are passed through untouched.
    for (key, child) in entries {
        if let Some(property) = schema.properties.get(key) {
            context.with_key(key, |ctx| check_value(child, property, ctx));
        }
    }
}

fn render(value: &Document) -> String {
    serde_json::Value::from(value.clone()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Definitions;
    use serde_json::json;

    fn schema(value: serde_json::Value) -> Schema {
        Schema::from_document(&Document::from(value))
            .unwrap()
            .resolve(&Definitions::new())
            .unwrap()
    }

    fn doc(value: serde_json::Value) -> Document {
        Document::from(value)
    }

    #[test]
    fn test_check_boolean() {
        let s = schema(json!({"type": "boolean"}));
        assert!(check(&s, &doc(json!(true))).is_empty());
        let errors = check(&s, &doc(json!("not a boolean")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), "type");
    }

    #[test]
    fn test_check_null() {
        let s = schema(json!({"type": "null"}));
        assert!(check(&s, &doc(json!(null))).is_empty());
        assert_eq!(check(&s, &doc(json!(0))).len(), 1);
    }

    #[test]
    fn test_check_number_accepts_int_and_float() {
        let s = schema(json!({"type": "number"}));
        assert!(check(&s, &doc(json!(42))).is_empty());
        assert!(check(&s, &doc(json!(3.14))).is_empty());
        assert_eq!(check(&s, &doc(json!("42"))).len(), 1);
    }

    #[test]
    fn test_check_number_bounds() {
        let s = schema(json!({"type": "number", "minimum": 0, "maximum": 100}));
        assert!(check(&s, &doc(json!(0))).is_empty());
        assert!(check(&s, &doc(json!(100))).is_empty());

        let errors = check(&s, &doc(json!(-5)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), "minimum");

        let errors = check(&s, &doc(json!(101)));
        assert_eq!(errors[0].rule(), "maximum");
    }

    #[test]
    fn test_check_number_exclusive_bounds() {
        let s = schema(json!({"type": "number", "exclusiveMinimum": 0}));
        assert!(check(&s, &doc(json!(0.1))).is_empty());
        let errors = check(&s, &doc(json!(0)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), "exclusiveMinimum");

        let s = schema(json!({"type": "number", "exclusiveMaximum": 1}));
        assert!(check(&s, &doc(json!(0.99))).is_empty());
        assert_eq!(check(&s, &doc(json!(1)))[0].rule(), "exclusiveMaximum");
    }

    #[test]
    fn test_check_string_pattern() {
        let s = schema(json!({"type": "string", "pattern": "^[a-z][a-z0-9_]*$"}));
        assert!(check(&s, &doc(json!("yaw_rate"))).is_empty());
        let errors = check(&s, &doc(json!("Yaw Rate")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), "pattern");
    }

    #[test]
    fn test_check_enum() {
        let s = schema(json!({"enum": ["coastdown", "step_steer"]}));
        assert!(check(&s, &doc(json!("coastdown"))).is_empty());

        let errors = check(&s, &doc(json!("drift")));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), "enum");
        assert!(errors[0].message().contains("coastdown"));
    }

    #[test]
    fn test_check_enum_distinguishes_int_and_float() {
        let s = schema(json!({"enum": [2]}));
        assert!(check(&s, &doc(json!(2))).is_empty());
        assert_eq!(check(&s, &doc(json!(2.0))).len(), 1);
    }

    #[test]
    fn test_check_sequence_bounds_and_items() {
        let s = schema(json!({
            "type": "array",
            "items": {"type": "number"},
            "minItems": 1,
            "maxItems": 3
        }));
        assert!(check(&s, &doc(json!([1, 2]))).is_empty());

        assert_eq!(check(&s, &doc(json!([])))[0].rule(), "minItems");
        assert_eq!(check(&s, &doc(json!([1, 2, 3, 4])))[0].rule(), "maxItems");

        let errors = check(&s, &doc(json!([1, "two", 3])));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path().to_string(), "[1]");
    }

    #[test]
    fn test_check_mapping_required_and_properties() {
        let s = schema(json!({
            "type": "object",
            "required": ["mass"],
            "properties": {"mass": {"type": "number", "exclusiveMinimum": 0}}
        }));
        assert!(check(&s, &doc(json!({"mass": 1450}))).is_empty());

        let errors = check(&s, &doc(json!({})));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), "required");

        let errors = check(&s, &doc(json!({"mass": 0})));
        assert_eq!(errors[0].path().to_string(), "mass");
    }

    #[test]
    fn test_unknown_properties_are_ignored() {
        let s = schema(json!({"type": "object", "properties": {"a": {"type": "number"}}}));
        assert!(check(&s, &doc(json!({"a": 1, "extra": "anything"}))).is_empty());
    }

    #[test]
    fn test_collects_all_violations_in_traversal_order() {
        let s = schema(json!({
            "type": "object",
            "required": ["maneuver"],
            "properties": {
                "speed": {"type": "number", "minimum": 0},
                "channels": {"type": "array", "maxItems": 2}
            }
        }));
        let instance = doc(json!({
            "speed": -3,
            "channels": ["ax", "ay", "yaw_rate"]
        }));

        let errors = check(&s, &instance);
        assert_eq!(errors.len(), 3);
        // Required errors for the node come first, then children in
        // document order.
        assert_eq!(errors[0].rule(), "required");
        assert_eq!(errors[1].path().to_string(), "speed");
        assert_eq!(errors[1].rule(), "minimum");
        assert_eq!(errors[2].path().to_string(), "channels");
        assert_eq!(errors[2].rule(), "maxItems");
    }

    #[test]
    fn test_nested_paths_in_errors() {
        let s = schema(json!({
            "type": "object",
            "properties": {
                "axles": {"type": "array", "items": {
                    "type": "object",
                    "required": ["position"],
                    "properties": {"position": {"enum": ["front", "rear"]}}
                }}
            }
        }));
        let instance = doc(json!({"axles": [{"position": "front"}, {"position": "middle"}]}));

        let errors = check(&s, &instance);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path().to_string(), "axles.[1].position");
        assert_eq!(errors[0].rule(), "enum");
    }

    #[test]
    fn test_check_never_mutates_instance() {
        let s = schema(json!({
            "type": "object",
            "properties": {"a": {"type": "number", "default": 7}}
        }));
        let instance = doc(json!({}));
        let before = instance.clone();
        let _ = check(&s, &instance);
        assert_eq!(instance, before);
    }

    #[test]
    fn test_validate_injects_then_checks() {
        let s = schema(json!({
            "type": "object",
            "required": ["speed"],
            "properties": {"speed": {"type": "number", "minimum": 0, "default": 27.8}}
        }));
        let mut instance = doc(json!({}));
        let errors = validate(&s, &mut instance);
        assert!(errors.is_empty());
        assert_eq!(instance.get("speed"), Some(&Document::Float(27.8)));
    }

    #[test]
    fn test_unresolved_ref_reported_not_panicking() {
        let s = Schema::from_document(&Document::from(json!({"$ref": "ghost"}))).unwrap();
        let errors = check(&s, &doc(json!(1)));
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule(), "$ref");
    }
}
