//! Helper functions for reading schema keywords out of a mapping.
//!
//! Each extractor distinguishes "absent" (`Ok(None)`) from "present with
//! the wrong shape" (`Err`), so schema authoring defects surface at
//! compile time with a message naming the keyword.

use crate::error::{SchemaError, SchemaResult};
use testrig_document::{Document, Mapping};

pub(super) fn get_str(entries: &Mapping, key: &str) -> SchemaResult<Option<String>> {
    match entries.get(key) {
        None => Ok(None),
        Some(Document::String(s)) => Ok(Some(s.clone())),
        Some(other) => Err(SchemaError::structure(format!(
            "`{key}` must be a string, got {}",
            other.type_name()
        ))),
    }
}

pub(super) fn get_f64(entries: &Mapping, key: &str) -> SchemaResult<Option<f64>> {
    match entries.get(key) {
        None => Ok(None),
        Some(value) => match value.as_f64() {
            Some(n) => Ok(Some(n)),
            None => Err(SchemaError::structure(format!(
                "`{key}` must be a number, got {}",
                value.type_name()
            ))),
        },
    }
}

pub(super) fn get_usize(entries: &Mapping, key: &str) -> SchemaResult<Option<usize>> {
    match entries.get(key) {
        None => Ok(None),
        Some(Document::Int(i)) if *i >= 0 => Ok(Some(*i as usize)),
        Some(other) => Err(SchemaError::structure(format!(
            "`{key}` must be a non-negative integer, got {}",
            other.type_name()
        ))),
    }
}

pub(super) fn get_string_list(entries: &Mapping, key: &str) -> SchemaResult<Option<Vec<String>>> {
    let Some(value) = entries.get(key) else {
        return Ok(None);
    };
    let items = value.as_sequence().ok_or_else(|| {
        SchemaError::structure(format!(
            "`{key}` must be a sequence, got {}",
            value.type_name()
        ))
    })?;
    let strings: SchemaResult<Vec<String>> = items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                SchemaError::structure(format!(
                    "`{key}` items must be strings, got {}",
                    item.type_name()
                ))
            })
        })
        .collect();
    Ok(Some(strings?))
}
