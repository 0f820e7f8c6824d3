//! Rule-driven default values
//!
//! A [`DefaultValueRegistry`] maps [`DefaultRule`]s to generators. Lookup order:
//! 1. the schema's own `default`, unconditionally
//! 2. the first registered rule that matches, in registration order
//! 3. nothing

mod generators;
mod rules;

use std::fmt;

use serde_json::Value;

pub use generators::{
    array_default_generator, boolean_default_generator, file_default_generator,
    number_default_generator, object_default_generator, string_default_generator,
    timestamp_default_generator, uuid_default_generator,
};
pub use rules::{DefaultRule, SchemaRefDefaultRule, SchemaTypeDefaultRule};

use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};

/// Produces a default value on each call
pub type DefaultGenerator = Box<dyn Fn() -> Value + Send + Sync>;

/// Ordered `(rule, generator)` pairs
#[derive(Default)]
pub struct DefaultValueRegistry {
    entries: Vec<(Box<dyn DefaultRule>, DefaultGenerator)>,
}

impl fmt::Debug for DefaultValueRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultValueRegistry")
            .field("rules", &self.entries.len())
            .finish()
    }
}

impl DefaultValueRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with generators for string, number, boolean, array, and object
    pub fn with_builtin_defaults() -> Self {
        Self::new()
            .with_rule(SchemaTypeDefaultRule::from(SchemaType::String), string_default_generator)
            .with_rule(SchemaTypeDefaultRule::from(SchemaType::Number), number_default_generator)
            .with_rule(SchemaTypeDefaultRule::from(SchemaType::Boolean), boolean_default_generator)
            .with_rule(SchemaTypeDefaultRule::from(SchemaType::Array), array_default_generator)
            .with_rule(SchemaTypeDefaultRule::from(SchemaType::Object), object_default_generator)
    }

    /// Append a rule; earlier rules take precedence
    pub fn register(
        &mut self,
        rule: impl DefaultRule + 'static,
        generator: impl Fn() -> Value + Send + Sync + 'static,
    ) {
        self.entries.push((Box::new(rule), Box::new(generator)));
        tracing::debug!("Registered default rule #{}", self.entries.len());
    }

    /// Builder form of [`register`](Self::register)
    #[must_use]
    pub fn with_rule(
        mut self,
        rule: impl DefaultRule + 'static,
        generator: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.register(rule, generator);
        self
    }

    /// Default for `schema`, or `None` when nothing applies
    pub fn get(&self, schema: &Value) -> Option<Value> {
        if let Some(explicit) = schema.get_field(SchemaField::Default) {
            return Some(explicit.clone());
        }
        self.entries
            .iter()
            .find(|(rule, _)| rule.matches(schema))
            .map(|(_, generator)| generator())
    }

    /// Whether [`get`](Self::get) would produce a value
    pub fn has(&self, schema: &Value) -> bool {
        schema.get_field(SchemaField::Default).is_some()
            || self.entries.iter().any(|(rule, _)| rule.matches(schema))
    }

    /// Number of registered rules
    pub const fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no rules are registered
    pub const fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn explicit_default_overrides_every_builtin() {
        let registry = DefaultValueRegistry::with_builtin_defaults();
        let cases = [
            json!({ "type": "string", "default": "preset" }),
            json!({ "type": "number", "default": 7 }),
            json!({ "type": "boolean", "default": true }),
            json!({ "type": "array", "items": { "type": "string" }, "default": ["x"] }),
            json!({ "type": "object", "properties": {}, "default": { "k": 1 } }),
        ];
        for schema in cases {
            assert_eq!(registry.get(&schema).as_ref(), schema.get("default"));
        }
    }

    #[test]
    fn builtin_generators_fill_missing_defaults() {
        let registry = DefaultValueRegistry::with_builtin_defaults();
        assert_eq!(registry.get(&json!({ "type": "string" })), Some(json!("")));
        assert_eq!(registry.get(&json!({ "type": "number" })), Some(json!(0)));
        assert_eq!(registry.get(&json!({ "type": "boolean" })), Some(json!(false)));
        assert_eq!(registry.get(&json!({ "type": "array" })), Some(json!([])));
        assert_eq!(registry.get(&json!({ "type": "object" })), Some(json!({})));
        assert_eq!(registry.get(&json!({ "$ref": "urn:file" })), None);
        assert!(!registry.has(&json!({ "$ref": "urn:file" })));
    }

    #[test]
    fn first_matching_rule_wins() {
        let registry = DefaultValueRegistry::new()
            .with_rule(SchemaTypeDefaultRule::new("string"), || json!("first"))
            .with_rule(SchemaTypeDefaultRule::new("string"), || json!("second"));
        assert_eq!(registry.get(&json!({ "type": "string" })), Some(json!("first")));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn ref_rule_drives_file_stub() {
        let registry = DefaultValueRegistry::new()
            .with_rule(SchemaRefDefaultRule::new("urn:file"), file_default_generator);
        assert!(registry.has(&json!({ "$ref": "urn:file" })));
        assert_eq!(
            registry.get(&json!({ "$ref": "urn:file" })),
            Some(json!({ "fileId": "", "url": "", "status": "ready" }))
        );
    }

    #[test]
    fn explicit_null_default_still_counts() {
        let registry = DefaultValueRegistry::new();
        assert!(registry.is_empty());
        assert!(registry.has(&json!({ "type": "string", "default": null })));
        assert_eq!(registry.get(&json!({ "default": null })), Some(Value::Null));
    }
}
