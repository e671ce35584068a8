//! Parsing schema descriptions into typed schemas.
//!
//! A schema description is a `Document` mapping that declares exactly one
//! of `$ref`, `enum`, or `type`. Keyword values are checked strictly here
//! so that authoring mistakes fail at compile time rather than silently
//! weakening validation.

use regex::Regex;
use testrig_document::{Document, Mapping};

use crate::error::{SchemaError, SchemaResult};
use crate::schema::helpers::{get_f64, get_str, get_string_list, get_usize};
use crate::schema::types::{
    AnySchema, ArraySchema, BooleanSchema, EnumSchema, NullSchema, NumberSchema, ObjectSchema,
    RefSchema, SchemaAnnotations, StringSchema,
};
use crate::schema::Schema;

pub(crate) fn from_document(doc: &Document) -> SchemaResult<Schema> {
    let entries = doc.as_mapping().ok_or_else(|| {
        SchemaError::structure(format!("schema must be a mapping, got {}", doc.type_name()))
    })?;

    let annotations = parse_annotations(entries)?;

    if let Some(reference) = get_str(entries, "$ref")? {
        return Ok(Schema::Ref(RefSchema {
            annotations,
            reference,
        }));
    }

    if let Some(values) = entries.get("enum") {
        let values = values.as_sequence().ok_or_else(|| {
            SchemaError::structure(format!(
                "`enum` must be a sequence, got {}",
                values.type_name()
            ))
        })?;
        return Ok(Schema::Enum(EnumSchema {
            annotations,
            values: values.to_vec(),
        }));
    }

    let Some(type_name) = get_str(entries, "type")? else {
        return Err(SchemaError::structure(
            "schema must declare `type`, `enum`, or `$ref`",
        ));
    };

    match type_name.as_str() {
        "boolean" => Ok(Schema::Boolean(BooleanSchema { annotations })),
        "null" => Ok(Schema::Null(NullSchema { annotations })),
        "any" => Ok(Schema::Any(AnySchema { annotations })),
        "number" => parse_number(entries, annotations),
        "string" => parse_string(entries, annotations),
        "array" => parse_array(entries, annotations),
        "object" => parse_object(entries, annotations),
        other => Err(SchemaError::InvalidType(other.to_string())),
    }
}

fn parse_annotations(entries: &Mapping) -> SchemaResult<SchemaAnnotations> {
    Ok(SchemaAnnotations {
        description: get_str(entries, "description")?,
        default: entries.get("default").cloned(),
    })
}

fn parse_number(entries: &Mapping, annotations: SchemaAnnotations) -> SchemaResult<Schema> {
    Ok(Schema::Number(NumberSchema {
        annotations,
        minimum: get_f64(entries, "minimum")?,
        maximum: get_f64(entries, "maximum")?,
        exclusive_minimum: get_f64(entries, "exclusiveMinimum")?,
        exclusive_maximum: get_f64(entries, "exclusiveMaximum")?,
    }))
}

fn parse_string(entries: &Mapping, annotations: SchemaAnnotations) -> SchemaResult<Schema> {
    let pattern = get_str(entries, "pattern")?;
    if let Some(pattern) = &pattern {
        Regex::new(pattern).map_err(|e| SchemaError::InvalidPattern {
            pattern: pattern.clone(),
            message: e.to_string(),
        })?;
    }
    Ok(Schema::String(StringSchema {
        annotations,
        pattern,
    }))
}

fn parse_array(entries: &Mapping, annotations: SchemaAnnotations) -> SchemaResult<Schema> {
    let items = match entries.get("items") {
        Some(items_doc) => Some(Box::new(from_document(items_doc)?)),
        None => None,
    };
    Ok(Schema::Array(ArraySchema {
        annotations,
        items,
        min_items: get_usize(entries, "minItems")?,
        max_items: get_usize(entries, "maxItems")?,
    }))
}

fn parse_object(entries: &Mapping, annotations: SchemaAnnotations) -> SchemaResult<Schema> {
    let mut properties = indexmap::IndexMap::new();
    if let Some(props) = entries.get("properties") {
        let props = props.as_mapping().ok_or_else(|| {
            SchemaError::structure(format!(
                "`properties` must be a mapping, got {}",
                props.type_name()
            ))
        })?;
        for (name, property_doc) in props {
            properties.insert(name.clone(), from_document(property_doc)?);
        }
    }
    Ok(Schema::Object(ObjectSchema {
        annotations,
        properties,
        required: get_string_list(entries, "required")?.unwrap_or_default(),
    }))
}
