//! The configured entry point: one handle owning both registries
//!
//! Build a [`SchemaEngine`] once at startup, finish all registration through the
//! builder methods, then share it by reference. Nothing here is global.

use serde_json::Value;

use crate::defaults::{DefaultRule, DefaultValueRegistry};
use crate::diff::{JsonPatch, RichPatch};
use crate::error::Result;
use crate::json_schema::SchemaType;
use crate::types::{ParsedSchema, SchemaNode, TypeDescriptor, TypeRegistry};

/// Type and default-value configuration for one process
#[derive(Debug)]
pub struct SchemaEngine {
    types:    TypeRegistry,
    defaults: DefaultValueRegistry,
}

impl Default for SchemaEngine {
    fn default() -> Self {
        Self::new(
            TypeRegistry::default_registry(),
            DefaultValueRegistry::with_builtin_defaults(),
        )
    }
}

impl SchemaEngine {
    /// Engine over caller-built registries
    pub const fn new(types: TypeRegistry, defaults: DefaultValueRegistry) -> Self {
        Self { types, defaults }
    }

    /// Add a type descriptor
    ///
    /// # Errors
    ///
    /// Fails when the descriptor's type tag is already registered.
    pub fn with_descriptor(mut self, descriptor: impl TypeDescriptor + 'static) -> Result<Self> {
        self.types.register(descriptor)?;
        Ok(self)
    }

    /// Add a default-value rule after the existing ones
    #[must_use]
    pub fn with_default_rule(
        mut self,
        rule: impl DefaultRule + 'static,
        generator: impl Fn() -> Value + Send + Sync + 'static,
    ) -> Self {
        self.defaults.register(rule, generator);
        self
    }

    /// The type registry
    pub const fn types(&self) -> &TypeRegistry {
        &self.types
    }

    /// The default-value registry
    pub const fn defaults(&self) -> &DefaultValueRegistry {
        &self.defaults
    }

    /// Parse a schema document
    ///
    /// # Errors
    ///
    /// Fails when a sub-schema matches no registered descriptor.
    pub fn parse(&self, schema: &Value) -> Result<ParsedSchema> {
        self.types.parse(schema)
    }

    /// Serialize a node tree back to a schema document
    ///
    /// # Errors
    ///
    /// Fails when a node's type has no registered descriptor.
    pub fn serialize(&self, node: &SchemaNode) -> Result<Value> {
        self.types.serialize(node)
    }

    /// Resolve a schema's default value
    ///
    /// Authority order: the schema's explicit `default`, then the first matching
    /// default rule, then the claiming descriptor's built-in value, then `null`.
    pub fn default_value(&self, schema: &Value) -> Value {
        self.defaults
            .get(schema)
            .or_else(|| self.types.default_value(schema))
            .unwrap_or(Value::Null)
    }

    /// Parse user-entered default text for a field of `schema_type`
    pub fn parse_default_value_string(
        &self,
        schema_type: SchemaType,
        text: &str,
    ) -> Option<Value> {
        self.types
            .get_descriptor(schema_type)?
            .parse_default_value_string(text)
    }

    /// Classify a patch applied between two whole schema documents
    #[allow(
        clippy::unused_self,
        reason = "kept on the handle so callers need only the engine"
    )]
    pub fn rich_patch(
        &self,
        patch: JsonPatch,
        base_root: &Value,
        current_root: &Value,
    ) -> RichPatch {
        RichPatch::from_documents(patch, base_root, current_root)
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::defaults::{SchemaRefDefaultRule, SchemaTypeDefaultRule, file_default_generator};
    use crate::error::Error;
    use crate::types::StringDescriptor;

    #[test]
    fn engine_is_shareable_across_threads() {
        const fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SchemaEngine>();
    }

    #[test]
    fn explicit_default_has_highest_authority() {
        let engine = SchemaEngine::default()
            .with_default_rule(SchemaTypeDefaultRule::from(SchemaType::String), || json!("rule"));
        assert_eq!(
            engine.default_value(&json!({ "type": "string", "default": "explicit" })),
            json!("explicit")
        );
    }

    #[test]
    fn earlier_rules_beat_later_ones() {
        let engine =
            SchemaEngine::new(TypeRegistry::default_registry(), DefaultValueRegistry::new())
                .with_default_rule(SchemaTypeDefaultRule::from(SchemaType::String), || {
                    json!("first")
                })
                .with_default_rule(SchemaTypeDefaultRule::from(SchemaType::String), || {
                    json!("second")
                });
        assert_eq!(engine.default_value(&json!({ "type": "string" })), json!("first"));
    }

    #[test]
    fn descriptor_builtin_is_the_fallback() {
        let engine =
            SchemaEngine::new(TypeRegistry::default_registry(), DefaultValueRegistry::new());
        assert_eq!(engine.default_value(&json!({ "type": "number" })), json!(0));
        assert_eq!(engine.default_value(&json!({ "$ref": "urn:file" })), Value::Null);
        assert_eq!(engine.default_value(&json!({ "type": "mystery" })), Value::Null);
    }

    #[test]
    fn ref_rule_supplies_file_stub() {
        let engine = SchemaEngine::default()
            .with_default_rule(SchemaRefDefaultRule::new("urn:file"), file_default_generator);
        assert_eq!(
            engine.default_value(&json!({ "$ref": "urn:file" })),
            json!({ "fileId": "", "url": "", "status": "ready" })
        );
    }

    #[test]
    fn duplicate_descriptor_is_rejected() {
        let report = SchemaEngine::default()
            .with_descriptor(StringDescriptor)
            .expect_err("duplicate");
        assert_eq!(report.current_context(), &Error::duplicate_type("string"));
    }

    #[test]
    fn default_text_parses_through_descriptor() {
        let engine = SchemaEngine::default();
        assert_eq!(
            engine.parse_default_value_string(SchemaType::Number, "42"),
            Some(json!(42))
        );
        assert_eq!(engine.parse_default_value_string(SchemaType::Boolean, "1"), None);
        assert_eq!(engine.parse_default_value_string(SchemaType::String, ""), None);
    }
}
