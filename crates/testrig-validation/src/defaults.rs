//! Defaults injection.
//!
//! The second half of the validation pipeline: fills schema-declared
//! `default` values into absent optional properties, depth-first, so a
//! freshly injected subtree receives its own nested defaults in the same
//! pass. Mutates only the instance; the schema is read-only. Running the
//! pass twice injects nothing new.

use testrig_document::Document;

use crate::schema::Schema;

/// Inject schema-declared defaults into absent optional properties.
///
/// For every mapping node matched against an object schema's
/// `properties`, each declared property that is absent from the instance
/// and whose schema carries a `default` is inserted with that default;
/// present (and freshly injected) values are then descended into.
/// Nodes whose shape does not match the schema are left for the
/// structural pass to report.
pub fn inject_defaults(schema: &Schema, instance: &mut Document) {
    match (schema, instance) {
        (Schema::Object(object), Document::Mapping(entries)) => {
            for (name, property) in &object.properties {
                if !entries.contains_key(name)
                    && let Some(default) = &property.annotations().default
                {
                    entries.insert(name.clone(), default.clone());
                }
                if let Some(value) = entries.get_mut(name) {
                    inject_defaults(property, value);
                }
            }
        }
        (Schema::Array(array), Document::Sequence(items)) => {
            if let Some(item_schema) = &array.items {
                for item in items {
                    inject_defaults(item_schema, item);
                }
            }
        }
        _ => {}
    }
}
