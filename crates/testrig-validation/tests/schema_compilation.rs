use serde_json::json;
use testrig_document::Document;
use testrig_validation::{Definitions, Schema, check, validate};

fn compile(definitions: serde_json::Value, schema: serde_json::Value) -> Schema {
    let definitions = Definitions::from_document(&Document::from(definitions)).unwrap();
    Schema::from_document(&Document::from(schema))
        .unwrap()
        .resolve(&definitions)
        .unwrap()
}

/// A reduced vehicle schema exercising refs, defaults, enums, and bounds
/// together, the way the built-in model schema composes them.
fn vehicle_schema() -> Schema {
    compile(
        json!({
            "positiveNumber": {"type": "number", "exclusiveMinimum": 0},
            "axle": {
                "type": "object",
                "required": ["position", "load_fraction"],
                "properties": {
                    "position": {"enum": ["front", "rear"]},
                    "load_fraction": {"type": "number", "minimum": 0, "maximum": 1},
                    "driven": {"type": "boolean", "default": false}
                }
            }
        }),
        json!({
            "type": "object",
            "required": ["mass", "axles"],
            "properties": {
                "mass": {"$ref": "positiveNumber"},
                "drag_coefficient": {"$ref": "positiveNumber", "default": 0.3},
                "axles": {
                    "type": "array",
                    "items": {"$ref": "axle"},
                    "minItems": 1,
                    "maxItems": 4
                }
            }
        }),
    )
}

#[test]
fn test_valid_instance_passes_and_gains_defaults() {
    let schema = vehicle_schema();
    let mut instance = Document::from(json!({
        "mass": 1450.0,
        "axles": [
            {"position": "front", "load_fraction": 0.55},
            {"position": "rear", "load_fraction": 0.45, "driven": true}
        ]
    }));

    let errors = validate(&schema, &mut instance);
    assert!(errors.is_empty(), "unexpected errors: {errors:?}");

    // Defaults landed at both the top level and inside sequence items.
    assert_eq!(
        instance.get("drag_coefficient"),
        Some(&Document::Float(0.3))
    );
    assert_eq!(
        instance.get_path(&["axles"]).unwrap().as_sequence().unwrap()[0].get("driven"),
        Some(&Document::Bool(false))
    );
}

#[test]
fn test_violations_are_collected_across_the_whole_tree() {
    let schema = vehicle_schema();
    let mut instance = Document::from(json!({
        "mass": 0,
        "axles": [
            {"position": "middle", "load_fraction": 1.5},
            {"position": "rear"}
        ]
    }));

    let errors = validate(&schema, &mut instance);
    let rendered: Vec<String> = errors.iter().map(|e| e.to_string()).collect();

    assert_eq!(errors.len(), 4, "expected four violations: {rendered:?}");
    assert_eq!(errors[0].path().to_string(), "mass");
    assert_eq!(errors[0].rule(), "exclusiveMinimum");
    assert_eq!(errors[1].path().to_string(), "axles.[0].position");
    assert_eq!(errors[1].rule(), "enum");
    assert_eq!(errors[2].path().to_string(), "axles.[0].load_fraction");
    assert_eq!(errors[2].rule(), "maximum");
    assert_eq!(errors[3].path().to_string(), "axles.[1]");
    assert_eq!(errors[3].rule(), "required");
}

#[test]
fn test_injected_default_satisfies_required() {
    let schema = compile(
        json!({}),
        json!({
            "type": "object",
            "required": ["schema_version", "label"],
            "properties": {
                "schema_version": {"type": "string", "default": "1.0"},
                "label": {"type": "string"}
            }
        }),
    );
    let mut instance = Document::from(json!({"label": "baseline"}));

    let errors = validate(&schema, &mut instance);
    assert!(errors.is_empty());
    assert_eq!(instance.get("schema_version"), Some(&Document::from("1.0")));

    // Without a default, the missing requirement is reported exactly once.
    let mut instance = Document::from(json!({}));
    let errors = validate(&schema, &mut instance);
    let label_errors: Vec<_> = errors
        .iter()
        .filter(|e| e.path().to_string() == "label")
        .collect();
    assert_eq!(label_errors.len(), 0);
    assert_eq!(
        errors
            .iter()
            .filter(|e| e.rule() == "required")
            .count(),
        1
    );
}

#[test]
fn test_revalidating_a_defaulted_document_is_stable() {
    let schema = vehicle_schema();
    let mut instance = Document::from(json!({
        "mass": 1450.0,
        "axles": [{"position": "front", "load_fraction": 0.5}]
    }));

    assert!(validate(&schema, &mut instance).is_empty());
    let defaulted = instance.clone();

    let errors = validate(&schema, &mut instance);
    assert!(errors.is_empty());
    assert_eq!(instance, defaulted);
}

#[test]
fn test_check_alone_reports_missing_defaultable_property() {
    // The pure structural pass does not inject; composition order is
    // what makes defaults satisfy `required`.
    let schema = compile(
        json!({}),
        json!({
            "type": "object",
            "required": ["schema_version"],
            "properties": {"schema_version": {"type": "string", "default": "1.0"}}
        }),
    );
    let instance = Document::from(json!({}));
    let errors = check(&schema, &instance);
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].rule(), "required");
}
