//! Descriptor for array schemas
//!
//! **Recursion**: YES - the single `items` schema is parsed through the registry.

use serde_json::{Map, Value};

use super::super::context::{ParseContext, SerializeContext};
use super::super::descriptor::{TypeDescriptor, mismatched_node};
use super::super::node::{NodeKind, NodeMetadata, SchemaNode};
use crate::error::{Error, Result};
use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};

/// Name given to the items node of every array
pub const ITEMS_NODE_NAME: &str = "items";

/// Descriptor for `{ "type": "array", "items": {..} }`
pub struct ArrayDescriptor;

impl TypeDescriptor for ArrayDescriptor {
    fn schema_type(&self) -> SchemaType {
        SchemaType::Array
    }

    fn can_parse(&self, schema: &Value) -> bool {
        schema.get_type_str() == Some(SchemaType::Array.as_ref())
            && schema.get_items().is_some_and(Value::is_object)
    }

    fn parse(
        &self,
        schema: &Value,
        name: &str,
        metadata: NodeMetadata,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode> {
        let id = ctx.generate_id();
        let items = match schema.get_items() {
            Some(items_schema) => Some(Box::new(ctx.parse_node(items_schema, ITEMS_NODE_NAME)?)),
            None => None,
        };

        Ok(SchemaNode::new(id, name, metadata, NodeKind::Array { items }))
    }

    fn serialize(&self, node: &SchemaNode, ctx: &SerializeContext<'_>) -> Result<Value> {
        let NodeKind::Array { items } = node.kind() else {
            return Err(mismatched_node(SchemaType::Array, node));
        };
        let Some(items) = items else {
            return Err(error_stack::Report::new(Error::unsupported_node(
                node.name(),
                "array has no items schema",
            )));
        };

        let mut schema = Map::new();
        schema.insert_field(SchemaField::Type, SchemaType::Array);
        schema.insert_field(SchemaField::Items, ctx.serialize(items)?);
        node.metadata().write_to(&mut schema);
        Ok(Value::Object(schema))
    }

    fn builtin_default(&self) -> Value {
        Value::Array(Vec::new())
    }

    fn parse_default_value_string(&self, _text: &str) -> Option<Value> {
        None
    }
}
