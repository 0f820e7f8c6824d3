//! Extension trait for type-safe JSON field access
//!
//! Schema documents are plain `serde_json` values. This trait reads and writes their
//! keywords through [`SchemaField`] so lookups never depend on hand-typed strings.

use serde_json::{Map, Value};

use crate::json_schema::SchemaField;

/// Extension trait for type-safe JSON field access
pub trait JsonObjectAccess {
    /// Get field value using any type that can be a string reference
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value>;

    /// Get field value as string
    fn get_field_str<T: AsRef<str>>(&self, field: T) -> Option<&str> {
        self.get_field(field).and_then(Value::as_str)
    }

    /// Get field value as bool
    fn get_field_bool<T: AsRef<str>>(&self, field: T) -> Option<bool> {
        self.get_field(field).and_then(Value::as_bool)
    }

    /// Insert field with value using any type that converts to String and any value that can become
    /// JSON
    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>;

    /// Get Properties field as a Map
    fn get_properties(&self) -> Option<&Map<String, Value>> {
        self.get_field(SchemaField::Properties)
            .and_then(Value::as_object)
    }

    /// Get the items schema of an array schema
    fn get_items(&self) -> Option<&Value> {
        self.get_field(SchemaField::Items)
    }

    /// Get the `$ref` target
    fn get_ref(&self) -> Option<&str> {
        self.get_field_str(SchemaField::Ref)
    }

    /// Get the `type` tag as written in the document
    fn get_type_str(&self) -> Option<&str> {
        self.get_field_str(SchemaField::Type)
    }
}

impl JsonObjectAccess for Value {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Self> {
        self.get(field.as_ref())
    }

    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Self>,
    {
        if let Some(obj) = self.as_object_mut() {
            obj.insert(field.into(), value.into());
        }
    }
}

impl JsonObjectAccess for Map<String, Value> {
    fn get_field<T: AsRef<str>>(&self, field: T) -> Option<&Value> {
        self.get(field.as_ref())
    }

    fn insert_field<F, V>(&mut self, field: F, value: V)
    where
        F: Into<String>,
        V: Into<Value>,
    {
        self.insert(field.into(), value.into());
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn reads_keywords_through_schema_field() {
        let schema = json!({ "type": "array", "items": { "$ref": "File" } });
        assert_eq!(schema.get_type_str(), Some("array"));
        assert_eq!(schema.get_items().and_then(Value::get_ref), Some("File"));
        assert!(schema.get_properties().is_none());
    }

    #[test]
    fn mismatched_shapes_read_as_absent() {
        let schema = json!({ "type": 7, "deprecated": "yes" });
        assert_eq!(schema.get_type_str(), None);
        assert_eq!(schema.get_field_bool(SchemaField::Deprecated), None);
        assert_eq!(json!("scalar").get_type_str(), None);
    }

    #[test]
    fn insert_field_ignores_non_objects() {
        let mut scalar = json!(3);
        scalar.insert_field(SchemaField::Type, "string");
        assert_eq!(scalar, json!(3));

        let mut map = Map::new();
        map.insert_field(SchemaField::Type, "string");
        assert_eq!(Value::Object(map), json!({ "type": "string" }));
    }
}
