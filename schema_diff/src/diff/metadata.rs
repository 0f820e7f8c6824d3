//! Structural getters over raw schemas and metadata comparison between two versions
//!
//! Every getter is total: a missing schema, a missing keyword, or a keyword of the
//! wrong JSON shape all read as "not present".

use serde::Serialize;
use serde_json::Value;
use strum::{AsRefStr, Display};

use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};

/// Type name reported when a schema's type cannot be determined
pub const UNKNOWN_TYPE: &str = "unknown";

/// Annotations tracked by [`compute_metadata_changes`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr, Serialize)]
#[strum(serialize_all = "camelCase")]
#[serde(rename_all = "camelCase")]
pub enum MetadataField {
    /// `description`
    Description,
    /// `deprecated`
    Deprecated,
    /// `x-formula.expression`
    Formula,
    /// `foreignKey`
    ForeignKey,
    /// `default`
    Default,
}

/// Before/after values of one changed annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldChange<T> {
    /// Value in the base schema
    pub from: Option<T>,
    /// Value in the current schema
    pub to:   Option<T>,
}

/// Annotation differences between two versions of one field
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataChanges {
    /// Every annotation that differs, in a fixed order
    pub changed:            Vec<MetadataField>,
    /// Set when the description differs
    pub description_change: Option<FieldChange<String>>,
    /// Set when the deprecated flag differs
    pub deprecated_change:  Option<FieldChange<bool>>,
    /// Set when the formula expression differs
    pub formula_change:     Option<FieldChange<String>>,
    /// Set when the foreign key differs
    pub foreign_key_change: Option<FieldChange<String>>,
    /// Set when the explicit default differs
    pub default_change:     Option<FieldChange<Value>>,
}

impl MetadataChanges {
    /// Whether any annotation differs
    pub const fn is_empty(&self) -> bool {
        self.changed.is_empty()
    }
}

/// Display type of a schema
///
/// `$ref` schemas report the reference itself, arrays with items report
/// `array<item-type>` at any depth, everything else reports its `type` tag.
pub fn schema_type(schema: Option<&Value>) -> String {
    let Some(schema) = schema else {
        return UNKNOWN_TYPE.to_string();
    };
    if let Some(reference) = schema.get_ref() {
        return reference.to_string();
    }
    let type_tag = schema.get_type_str();
    if type_tag == Some(SchemaType::Array.as_ref())
        && let Some(items) = schema.get_items()
    {
        return format!("{}<{}>", SchemaType::Array, schema_type(Some(items)));
    }
    type_tag.map_or_else(|| UNKNOWN_TYPE.to_string(), ToString::to_string)
}

/// Expression of the schema's `x-formula` block
pub fn formula_expression(schema: Option<&Value>) -> Option<&str> {
    schema?
        .get_field(SchemaField::XFormula)?
        .get_field_str(SchemaField::Expression)
}

/// The schema's explicit `default`
pub fn default_value(schema: Option<&Value>) -> Option<&Value> {
    schema?.get_field(SchemaField::Default)
}

/// The schema's `description`
pub fn description(schema: Option<&Value>) -> Option<&str> {
    schema?.get_field_str(SchemaField::Description)
}

/// The schema's `deprecated` flag
pub fn deprecated(schema: Option<&Value>) -> Option<bool> {
    schema?.get_field_bool(SchemaField::Deprecated)
}

/// The schema's `foreignKey`
pub fn foreign_key(schema: Option<&Value>) -> Option<&str> {
    schema?.get_field_str(SchemaField::ForeignKey)
}

/// Whether `schema` is a string, number, or boolean leaf
pub fn is_primitive(schema: &Value) -> bool {
    schema.get_ref().is_none()
        && schema
            .get_type_str()
            .and_then(|tag| tag.parse::<SchemaType>().ok())
            .is_some_and(SchemaType::is_primitive)
}

/// Items schema of an array-with-items
fn array_items(schema: &Value) -> Option<&Value> {
    if schema.get_type_str() == Some(SchemaType::Array.as_ref()) {
        schema.get_items()
    } else {
        None
    }
}

fn change<T: PartialEq>(from: Option<T>, to: Option<T>) -> Option<FieldChange<T>> {
    (from != to).then_some(FieldChange { from, to })
}

/// Compare the annotations of two versions of one field
///
/// When a primitive field was promoted to an array, the current item schema stands in
/// for the current schema, since the items are the same conceptual field.
pub fn compute_metadata_changes(base: Option<&Value>, current: Option<&Value>) -> MetadataChanges {
    let effective_current = match (base, current) {
        (Some(base_schema), Some(current_schema)) if is_primitive(base_schema) => {
            array_items(current_schema).or(current)
        }
        _ => current,
    };

    let description_change = change(
        description(base).map(ToString::to_string),
        description(effective_current).map(ToString::to_string),
    );
    let deprecated_change = change(deprecated(base), deprecated(effective_current));
    let formula_change = change(
        formula_expression(base).map(ToString::to_string),
        formula_expression(effective_current).map(ToString::to_string),
    );
    let foreign_key_change = change(
        foreign_key(base).map(ToString::to_string),
        foreign_key(effective_current).map(ToString::to_string),
    );
    let default_change = change(
        default_value(base).cloned(),
        default_value(effective_current).cloned(),
    );

    let changed = [
        (MetadataField::Description, description_change.is_some()),
        (MetadataField::Deprecated, deprecated_change.is_some()),
        (MetadataField::Formula, formula_change.is_some()),
        (MetadataField::ForeignKey, foreign_key_change.is_some()),
        (MetadataField::Default, default_change.is_some()),
    ]
    .into_iter()
    .filter_map(|(field, differs)| differs.then_some(field))
    .collect();

    MetadataChanges {
        changed,
        description_change,
        deprecated_change,
        formula_change,
        foreign_key_change,
        default_change,
    }
}

/// Whether the display type differs between two versions
pub fn has_type_changed(base: Option<&Value>, current: Option<&Value>) -> bool {
    schema_type(base) != schema_type(current)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn schema_type_of_absent_is_unknown() {
        assert_eq!(schema_type(None), "unknown");
        assert_eq!(schema_type(Some(&json!({}))), "unknown");
        assert_eq!(schema_type(Some(&json!({ "type": 4 }))), "unknown");
    }

    #[test]
    fn schema_type_reports_ref_verbatim() {
        let schema = json!({ "$ref": "urn:jsonschema:file:1.0.0" });
        assert_eq!(schema_type(Some(&schema)), "urn:jsonschema:file:1.0.0");
    }

    #[test]
    fn schema_type_nests_arrays() {
        let schema = json!({
            "type": "array",
            "items": { "type": "array", "items": { "type": "string" } }
        });
        assert_eq!(schema_type(Some(&schema)), "array<array<string>>");
        assert_eq!(schema_type(Some(&json!({ "type": "array" }))), "array");
        assert_eq!(
            schema_type(Some(&json!({ "type": "array", "items": { "$ref": "File" } }))),
            "array<File>"
        );
    }

    #[test]
    fn getters_tolerate_mismatched_shapes() {
        let schema = json!({
            "description": 12,
            "deprecated": "no",
            "foreignKey": ["users"],
            "x-formula": "a + b"
        });
        assert_eq!(description(Some(&schema)), None);
        assert_eq!(deprecated(Some(&schema)), None);
        assert_eq!(foreign_key(Some(&schema)), None);
        assert_eq!(formula_expression(Some(&schema)), None);
        assert_eq!(default_value(None), None);
    }

    #[test]
    fn detects_each_annotation_change() {
        let base = json!({
            "type": "string",
            "default": "",
            "description": "old",
            "foreignKey": "users"
        });
        let current = json!({
            "type": "string",
            "default": "n/a",
            "description": "new",
            "deprecated": true,
            "foreignKey": "accounts",
            "x-formula": { "version": 1, "expression": "upper(name)" }
        });

        let changes = compute_metadata_changes(Some(&base), Some(&current));
        assert_eq!(
            changes.changed,
            vec![
                MetadataField::Description,
                MetadataField::Deprecated,
                MetadataField::Formula,
                MetadataField::ForeignKey,
                MetadataField::Default,
            ]
        );
        assert_eq!(
            changes.description_change,
            Some(FieldChange {
                from: Some("old".to_string()),
                to:   Some("new".to_string()),
            })
        );
        assert_eq!(
            changes.deprecated_change,
            Some(FieldChange {
                from: None,
                to:   Some(true),
            })
        );
        assert_eq!(
            changes.formula_change.and_then(|c| c.to),
            Some("upper(name)".to_string())
        );
        assert_eq!(
            changes.foreign_key_change.and_then(|c| c.from),
            Some("users".to_string())
        );
        assert_eq!(
            changes.default_change.and_then(|c| c.to),
            Some(json!("n/a"))
        );
    }

    #[test]
    fn unchanged_metadata_is_empty() {
        let schema = json!({ "type": "number", "default": 0, "description": "price" });
        let changes = compute_metadata_changes(Some(&schema), Some(&schema));
        assert!(changes.is_empty());
        assert_eq!(changes.description_change, None);
    }

    #[test]
    fn promoted_scalar_compares_against_items() {
        let base = json!({ "type": "string", "default": "", "description": "tag" });
        let current = json!({
            "type": "array",
            "items": { "type": "string", "default": "", "description": "tag" }
        });
        let changes = compute_metadata_changes(Some(&base), Some(&current));
        assert!(changes.is_empty());
        assert!(has_type_changed(Some(&base), Some(&current)));
    }

    #[test]
    fn added_field_reports_all_present_annotations() {
        let current = json!({ "type": "string", "default": "x", "description": "d" });
        let changes = compute_metadata_changes(None, Some(&current));
        assert_eq!(
            changes.changed,
            vec![MetadataField::Description, MetadataField::Default]
        );
    }

    #[test]
    fn type_change_detection() {
        let number = json!({ "type": "number" });
        let string = json!({ "type": "string" });
        assert!(has_type_changed(Some(&number), Some(&string)));
        assert!(!has_type_changed(Some(&number), Some(&json!({ "type": "number", "default": 1 }))));
        assert!(has_type_changed(None, Some(&number)));
    }
}
