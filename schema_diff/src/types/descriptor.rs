//! The per-type contract every schema variant implements
//!
//! A descriptor owns everything the engine knows about one type tag: how to recognize
//! its schemas, how to turn them into [`SchemaNode`]s and back, and how to produce or
//! parse default values. The [`TypeRegistry`](super::TypeRegistry) dispatches to the
//! first descriptor that claims a schema.

use serde_json::Value;

use super::capabilities::TypeCapabilities;
use super::context::{ParseContext, SerializeContext};
use super::node::{NodeMetadata, SchemaNode};
use crate::error::{Error, Result};
use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};

/// Parse, serialize, and default-value behavior for exactly one type tag
pub trait TypeDescriptor: Send + Sync {
    /// The type tag this descriptor is registered under
    fn schema_type(&self) -> SchemaType;

    /// Shared structural capabilities of the type
    fn capabilities(&self) -> &'static TypeCapabilities {
        TypeCapabilities::for_type(self.schema_type())
    }

    /// Structural predicate: does this descriptor understand `schema`
    fn can_parse(&self, schema: &Value) -> bool;

    /// Build a node from a schema this descriptor claimed
    ///
    /// # Errors
    ///
    /// Fails when a child schema cannot be parsed.
    fn parse(
        &self,
        schema: &Value,
        name: &str,
        metadata: NodeMetadata,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode>;

    /// Write a node back to its wire form
    ///
    /// # Errors
    ///
    /// Fails when the node belongs to another type or a child cannot be serialized.
    fn serialize(&self, node: &SchemaNode, ctx: &SerializeContext<'_>) -> Result<Value>;

    /// Value used when a schema carries no explicit `default`
    fn builtin_default(&self) -> Value;

    /// The schema's own `default` if present, otherwise the built-in default
    fn default_value(&self, schema: &Value) -> Value {
        schema
            .get_field(SchemaField::Default)
            .cloned()
            .unwrap_or_else(|| self.builtin_default())
    }

    /// Parse user-entered default text; `None` when the text is not a valid value
    fn parse_default_value_string(&self, text: &str) -> Option<Value>;
}

/// Error for a node handed to a descriptor of a different type
pub(super) fn mismatched_node(
    descriptor: SchemaType,
    node: &SchemaNode,
) -> error_stack::Report<Error> {
    error_stack::Report::new(Error::unsupported_node(
        node.name(),
        format!(
            "{} descriptor cannot serialize a {} node",
            descriptor,
            node.node_type()
        ),
    ))
}
