//! Type-name to descriptor lookup
//!
//! The registry is filled once during startup and then only read. Dispatch for a raw
//! schema is "first descriptor that claims it wins", with one explicit rule on top:
//! a schema carrying `$ref` goes to the ref descriptor whenever one is registered,
//! regardless of registration order.

use std::fmt;

use error_stack::Report;
use serde_json::Value;

use super::context::{ParseContext, ParsedSchema, SerializeContext};
use super::descriptor::TypeDescriptor;
use super::descriptors::{
    ArrayDescriptor, BooleanDescriptor, NumberDescriptor, ObjectDescriptor, RefDescriptor,
    StringDescriptor,
};
use super::node::{NodeMetadata, SchemaNode};
use crate::error::{Error, Result};
use crate::json_object::JsonObjectAccess;
use crate::json_schema::SchemaType;

/// Registered descriptors, in registration order
pub struct TypeRegistry {
    descriptors: Vec<Box<dyn TypeDescriptor>>,
}

impl fmt::Debug for TypeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeRegistry")
            .field(
                "types",
                &self
                    .descriptors
                    .iter()
                    .map(|descriptor| descriptor.schema_type())
                    .collect::<Vec<_>>(),
            )
            .finish()
    }
}

impl Default for TypeRegistry {
    fn default() -> Self {
        Self::default_registry()
    }
}

impl TypeRegistry {
    /// An empty registry
    pub const fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// Registry with ref, object, array, string, number, and boolean, in that order
    pub fn default_registry() -> Self {
        let builtins: [Box<dyn TypeDescriptor>; 6] = [
            Box::new(RefDescriptor),
            Box::new(ObjectDescriptor),
            Box::new(ArrayDescriptor),
            Box::new(StringDescriptor),
            Box::new(NumberDescriptor),
            Box::new(BooleanDescriptor),
        ];
        let mut registry = Self::new();
        for descriptor in builtins {
            registry.push(descriptor);
        }
        registry
    }

    /// Append without the uniqueness check
    fn push(&mut self, descriptor: Box<dyn TypeDescriptor>) {
        tracing::debug!("Registered type descriptor '{}'", descriptor.schema_type());
        self.descriptors.push(descriptor);
    }

    /// Add a descriptor; a second descriptor for the same type is a configuration error
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateType`] when the type tag is already registered.
    pub fn register(&mut self, descriptor: impl TypeDescriptor + 'static) -> Result<()> {
        let schema_type = descriptor.schema_type();
        if self.has(schema_type) {
            return Err(Report::new(Error::duplicate_type(schema_type.as_ref())));
        }
        self.push(Box::new(descriptor));
        Ok(())
    }

    /// Builder form of [`register`](Self::register)
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateType`] when the type tag is already registered.
    pub fn with_descriptor(mut self, descriptor: impl TypeDescriptor + 'static) -> Result<Self> {
        self.register(descriptor)?;
        Ok(self)
    }

    /// Descriptor registered for `schema_type`
    pub fn get_descriptor(&self, schema_type: SchemaType) -> Option<&dyn TypeDescriptor> {
        self.descriptors
            .iter()
            .find(|descriptor| descriptor.schema_type() == schema_type)
            .map(AsRef::as_ref)
    }

    /// Whether `schema_type` has a descriptor
    pub fn has(&self, schema_type: SchemaType) -> bool {
        self.get_descriptor(schema_type).is_some()
    }

    /// Registered type tags, sorted by type name
    pub fn get_types(&self) -> Vec<SchemaType> {
        let mut types: Vec<SchemaType> = self
            .descriptors
            .iter()
            .map(|descriptor| descriptor.schema_type())
            .collect();
        types.sort_unstable_by(|left, right| left.as_ref().cmp(right.as_ref()));
        types
    }

    /// First descriptor that claims `schema`, with `$ref` schemas checked first
    pub fn find_descriptor_for_schema(&self, schema: &Value) -> Option<&dyn TypeDescriptor> {
        if schema.get_ref().is_some()
            && let Some(descriptor) = self.get_descriptor(SchemaType::Ref)
            && descriptor.can_parse(schema)
        {
            return Some(descriptor);
        }

        self.descriptors
            .iter()
            .find(|descriptor| descriptor.can_parse(schema))
            .map(AsRef::as_ref)
    }

    /// Parse a whole document in a fresh session; the root node is named `""`
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedSchema`] when no descriptor claims a sub-schema.
    pub fn parse(&self, schema: &Value) -> Result<ParsedSchema> {
        let mut ctx = ParseContext::new(self);
        let root = self.parse_node(schema, "", &mut ctx)?;
        let parsed = ctx.finish(root);
        tracing::debug!(
            "Parsed schema: {} nodes, {} pending formulas",
            parsed.node_count,
            parsed.pending_formulas.len()
        );
        Ok(parsed)
    }

    pub(super) fn parse_node(
        &self,
        schema: &Value,
        name: &str,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode> {
        let Some(descriptor) = self.find_descriptor_for_schema(schema) else {
            return Err(Report::new(Error::unsupported_schema(
                name,
                "no registered type descriptor matches",
            )));
        };
        tracing::trace!(
            "Dispatching field '{name}' to '{}' descriptor",
            descriptor.schema_type()
        );
        descriptor.parse(schema, name, NodeMetadata::from_schema(schema), ctx)
    }

    /// Serialize a node tree back to its wire form
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedNode`] when a node's type has no descriptor.
    pub fn serialize(&self, node: &SchemaNode) -> Result<Value> {
        SerializeContext::new(self).serialize(node)
    }

    pub(super) fn serialize_node(
        &self,
        node: &SchemaNode,
        ctx: &SerializeContext<'_>,
    ) -> Result<Value> {
        let Some(descriptor) = self.get_descriptor(node.node_type()) else {
            return Err(Report::new(Error::unsupported_node(
                node.name(),
                format!("no descriptor registered for '{}'", node.node_type()),
            )));
        };
        descriptor.serialize(node, ctx)
    }

    /// Default from the descriptor that claims `schema`: its explicit `default`, else
    /// the descriptor's built-in value
    pub fn default_value(&self, schema: &Value) -> Option<Value> {
        self.find_descriptor_for_schema(schema)
            .map(|descriptor| descriptor.default_value(schema))
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
    use crate::types::node::NodeKind;

    #[test]
    fn default_registry_holds_all_builtins() {
        let registry = TypeRegistry::default_registry();
        assert_eq!(
            registry.get_types(),
            vec![
                SchemaType::Array,
                SchemaType::Boolean,
                SchemaType::Number,
                SchemaType::Object,
                SchemaType::Ref,
                SchemaType::String,
            ]
        );
    }

    #[test]
    fn builtins_take_part_in_the_duplicate_check() {
        let report = TypeRegistry::default_registry()
            .with_descriptor(RefDescriptor)
            .expect_err("ref already registered");
        assert_eq!(report.current_context(), &Error::duplicate_type("ref"));
        assert!(
            TypeRegistry::default_registry()
                .with_descriptor(BooleanDescriptor)
                .is_err()
        );
    }

    #[test]
    fn duplicate_registration_fails() {
        let mut registry = TypeRegistry::new();
        registry.register(StringDescriptor).unwrap();
        let error = registry.register(StringDescriptor).unwrap_err();
        assert_eq!(
            error.current_context().to_string(),
            "Type \"string\" is already registered"
        );
    }

    #[test]
    fn get_types_ignores_registration_order() {
        let forward = TypeRegistry::new()
            .with_descriptor(StringDescriptor)
            .and_then(|r| r.with_descriptor(NumberDescriptor))
            .unwrap();
        let backward = TypeRegistry::new()
            .with_descriptor(NumberDescriptor)
            .and_then(|r| r.with_descriptor(StringDescriptor))
            .unwrap();
        assert_eq!(forward.get_types(), backward.get_types());
    }

    #[test]
    fn missing_descriptor_is_none() {
        let registry = TypeRegistry::new();
        assert!(registry.get_descriptor(SchemaType::String).is_none());
        assert!(!registry.has(SchemaType::String));
    }

    #[test]
    fn ref_wins_even_when_registered_last() {
        let registry = TypeRegistry::new()
            .with_descriptor(ObjectDescriptor)
            .and_then(|r| r.with_descriptor(RefDescriptor))
            .unwrap();
        let schema = json!({ "$ref": "urn:file", "type": "object", "properties": {} });
        let descriptor = registry.find_descriptor_for_schema(&schema).unwrap();
        assert_eq!(descriptor.schema_type(), SchemaType::Ref);
    }

    #[test]
    fn unknown_schema_has_no_descriptor() {
        let registry = TypeRegistry::default_registry();
        assert!(registry.find_descriptor_for_schema(&json!({ "type": "integer" })).is_none());
        assert!(registry.find_descriptor_for_schema(&json!({ "type": "array" })).is_none());
        assert!(registry.parse(&json!({ "type": "integer" })).is_err());
    }

    #[test]
    fn ids_are_pre_order_and_unique() {
        let registry = TypeRegistry::default_registry();
        let parsed = registry
            .parse(&json!({
                "type": "object",
                "properties": {
                    "title": { "type": "string", "default": "" },
                    "tags": { "type": "array", "items": { "type": "string", "default": "" } }
                },
                "required": ["title", "tags"],
                "additionalProperties": false
            }))
            .expect("parse");

        let ids: Vec<u64> = parsed.root.walk().map(|node| node.id().0).collect();
        assert_eq!(ids, vec![0, 1, 2, 3]);
        assert_eq!(parsed.node_count, 4);

        let tags = parsed.root.child("tags").unwrap();
        assert!(matches!(tags.kind(), NodeKind::Array { items: Some(_) }));
        assert_eq!(tags.items().unwrap().name(), "items");
    }

    #[test]
    fn sessions_restart_ids() {
        let registry = TypeRegistry::default_registry();
        let schema = json!({ "type": "string" });
        let first = registry.parse(&schema).unwrap();
        let second = registry.parse(&schema).unwrap();
        assert_eq!(first.root.id(), second.root.id());
    }

    #[test]
    fn formulas_are_registered_during_parse() {
        let registry = TypeRegistry::default_registry();
        let parsed = registry
            .parse(&json!({
                "type": "object",
                "properties": {
                    "price": { "type": "number", "default": 0 },
                    "total": {
                        "type": "number",
                        "default": 0,
                        "readOnly": true,
                        "x-formula": { "version": 1, "expression": "price * 2" }
                    }
                },
                "required": ["price", "total"],
                "additionalProperties": false
            }))
            .unwrap();

        assert_eq!(parsed.pending_formulas.len(), 1);
        let pending = &parsed.pending_formulas[0];
        assert_eq!(pending.expression, "price * 2");
        assert_eq!(pending.node_id, parsed.root.child("total").unwrap().id());
    }

    #[test]
    fn default_value_uses_claiming_descriptor() {
        let registry = TypeRegistry::default_registry();
        assert_eq!(registry.default_value(&json!({ "type": "number" })), Some(json!(0)));
        assert_eq!(
            registry.default_value(&json!({ "type": "array", "items": { "type": "string" } })),
            Some(json!([]))
        );
        assert_eq!(registry.default_value(&json!({ "$ref": "x" })), Some(Value::Null));
        assert_eq!(registry.default_value(&json!({ "type": "integer" })), None);
    }

    #[test]
    fn serializing_without_descriptor_fails() {
        let full = TypeRegistry::default_registry();
        let parsed = full.parse(&json!({ "type": "boolean" })).unwrap();
        let strings_only = TypeRegistry::new().with_descriptor(StringDescriptor).unwrap();
        let error = strings_only.serialize(&parsed.root).unwrap_err();
        assert!(matches!(error.current_context(), Error::UnsupportedNode(_)));
    }
}
