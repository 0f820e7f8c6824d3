//! Descriptor for `$ref` schemas
//!
//! A ref schema is a plain object with no `type`, so it must be recognized before the
//! object and array descriptors get a chance to look at it.

use serde_json::{Map, Value};

use super::super::context::{ParseContext, SerializeContext};
use super::super::descriptor::{TypeDescriptor, mismatched_node};
use super::super::node::{NodeKind, NodeMetadata, SchemaNode};
use crate::error::{Error, Result};
use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};

/// Descriptor for `{ "$ref": "..." }`
pub struct RefDescriptor;

impl TypeDescriptor for RefDescriptor {
    fn schema_type(&self) -> SchemaType {
        SchemaType::Ref
    }

    fn can_parse(&self, schema: &Value) -> bool {
        schema.get_ref().is_some()
    }

    fn parse(
        &self,
        schema: &Value,
        name: &str,
        metadata: NodeMetadata,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode> {
        let Some(reference) = schema.get_ref() else {
            return Err(error_stack::Report::new(Error::unsupported_schema(
                name,
                "missing '$ref'",
            )));
        };
        let id = ctx.generate_id();
        Ok(SchemaNode::new(
            id,
            name,
            metadata,
            NodeKind::Ref {
                reference: reference.to_string(),
            },
        ))
    }

    fn serialize(&self, node: &SchemaNode, _ctx: &SerializeContext<'_>) -> Result<Value> {
        let NodeKind::Ref { reference } = node.kind() else {
            return Err(mismatched_node(SchemaType::Ref, node));
        };

        let mut schema = Map::new();
        schema.insert_field(SchemaField::Ref, reference.clone());
        node.metadata().write_to(&mut schema);
        Ok(Value::Object(schema))
    }

    fn builtin_default(&self) -> Value {
        Value::Null
    }

    fn parse_default_value_string(&self, _text: &str) -> Option<Value> {
        None
    }
}
