//! The built-in schema registry.
//!
//! The model schema (vehicle plus test parameters) and the domain-data
//! schema (physical constants handed to the downstream stage) are
//! declared as document trees, share one `definitions` namespace, and are
//! compiled exactly once. After construction the registry is read-only
//! and may be shared freely across threads.

use serde_json::json;
use testrig_document::Document;
use testrig_validation::{Definitions, Schema, SchemaResult};

/// Holds the fully-resolved built-in schemas.
///
/// Build one at process start and pass it by reference to every call
/// site; there is no hidden global instance.
#[derive(Debug)]
pub struct SchemaRegistry {
    model: Schema,
    domain: Schema,
}

impl SchemaRegistry {
    /// Compile the built-in schemas.
    ///
    /// Fails only on a defect in the embedded schema documents themselves
    /// (a programmer error), never on instance data.
    pub fn new() -> SchemaResult<Self> {
        let definitions = Definitions::from_document(&shared_definitions())?;
        let model = Schema::from_document(&model_schema_document())?.resolve(&definitions)?;
        let domain = Schema::from_document(&domain_schema_document())?.resolve(&definitions)?;
        Ok(Self { model, domain })
    }

    /// The schema for model documents (vehicle and test parameters).
    pub fn model_schema(&self) -> &Schema {
        &self.model
    }

    /// The schema for auxiliary domain-data documents.
    pub fn domain_schema(&self) -> &Schema {
        &self.domain
    }
}

/// Sub-schemas shared by both top-level schemas.
fn shared_definitions() -> Document {
    Document::from(json!({
        "positiveNumber": {"type": "number", "exclusiveMinimum": 0},
        "nonNegativeNumber": {"type": "number", "minimum": 0},
        "fraction": {"type": "number", "minimum": 0, "maximum": 1},
        "identifier": {"type": "string", "pattern": "^[a-z][a-z0-9_]*$"},
        "tire": {
            "type": "object",
            "required": ["width", "aspect_ratio", "rim_diameter"],
            "properties": {
                "width": {
                    "$ref": "positiveNumber",
                    "description": "Section width in millimetres"
                },
                "aspect_ratio": {"$ref": "positiveNumber"},
                "rim_diameter": {
                    "$ref": "positiveNumber",
                    "description": "Rim diameter in inches"
                },
                "pressure": {
                    "$ref": "positiveNumber",
                    "default": 2.5,
                    "description": "Cold inflation pressure in bar"
                },
                "rolling_resistance": {"$ref": "nonNegativeNumber", "default": 0.01}
            }
        },
        "axle": {
            "type": "object",
            "required": ["position", "load_fraction"],
            "properties": {
                "position": {"enum": ["front", "rear"]},
                "load_fraction": {
                    "$ref": "fraction",
                    "description": "Share of vehicle mass carried by this axle"
                },
                "track_width": {"$ref": "positiveNumber"},
                "driven": {"type": "boolean", "default": false},
                "tire": {"$ref": "tire"}
            }
        }
    }))
}

fn model_schema_document() -> Document {
    Document::from(json!({
        "type": "object",
        "required": ["schema_version", "vehicle", "test"],
        "properties": {
            "schema_version": {"type": "string", "default": "1.0"},
            "label": {"type": "string"},
            "vehicle": {
                "type": "object",
                "required": ["mass", "wheelbase", "axles"],
                "properties": {
                    "mass": {
                        "$ref": "positiveNumber",
                        "description": "Curb mass plus payload in kilograms"
                    },
                    "wheelbase": {"$ref": "positiveNumber"},
                    "cg_height": {
                        "$ref": "positiveNumber",
                        "default": 0.55,
                        "description": "Centre-of-gravity height in metres"
                    },
                    "frontal_area": {"$ref": "positiveNumber", "default": 2.2},
                    "drag_coefficient": {"$ref": "positiveNumber", "default": 0.3},
                    "axles": {
                        "type": "array",
                        "items": {"$ref": "axle"},
                        "minItems": 1,
                        "maxItems": 4
                    }
                }
            },
            "test": {
                "type": "object",
                "required": ["maneuver"],
                "properties": {
                    "maneuver": {
                        "enum": ["coastdown", "constant_speed", "step_steer", "brake_in_turn"]
                    },
                    "initial_speed": {
                        "$ref": "nonNegativeNumber",
                        "default": 27.8,
                        "description": "Entry speed in metres per second"
                    },
                    "duration": {"$ref": "positiveNumber", "default": 30.0},
                    "sample_rate": {
                        "$ref": "positiveNumber",
                        "default": 100.0,
                        "description": "Output sampling rate in hertz"
                    },
                    "channels": {
                        "type": "array",
                        "items": {"$ref": "identifier"},
                        "maxItems": 64
                    }
                }
            }
        }
    }))
}

fn domain_schema_document() -> Document {
    Document::from(json!({
        "type": "object",
        "properties": {
            "gravity": {"$ref": "positiveNumber", "default": 9.81},
            "air_density": {"$ref": "positiveNumber", "default": 1.204},
            "ambient_temperature": {"type": "number", "default": 20.0},
            "friction": {
                "type": "array",
                "minItems": 1,
                "items": {
                    "type": "object",
                    "required": ["surface", "mu"],
                    "properties": {
                        "surface": {"$ref": "identifier"},
                        "mu": {"$ref": "fraction"}
                    }
                },
                "default": [{"surface": "dry_asphalt", "mu": 0.9}]
            }
        }
    }))
}
