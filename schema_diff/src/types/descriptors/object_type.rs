//! Descriptor for object schemas
//!
//! **Recursion**: YES - every entry of `properties` is parsed through the registry, so
//! nested objects, arrays, and refs all resolve to their own descriptors. The node id
//! is issued before the children's, giving pre-order ids.

use serde_json::{Map, Value};

use super::super::context::{ParseContext, SerializeContext};
use super::super::descriptor::{TypeDescriptor, mismatched_node};
use super::super::node::{NodeKind, NodeMetadata, SchemaNode};
use crate::error::Result;
use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};

/// Descriptor for object schemas
///
/// Wire form: `{ "type": "object", "properties", "required", "additionalProperties" }`
///
/// `required` and `additionalProperties` are written back as parsed. When the input
/// had none, every child is required and `additionalProperties` is `false`.
pub struct ObjectDescriptor;

impl TypeDescriptor for ObjectDescriptor {
    fn schema_type(&self) -> SchemaType {
        SchemaType::Object
    }

    fn can_parse(&self, schema: &Value) -> bool {
        schema.get_type_str() == Some(SchemaType::Object.as_ref())
            && schema.get_properties().is_some()
    }

    fn parse(
        &self,
        schema: &Value,
        name: &str,
        metadata: NodeMetadata,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode> {
        let id = ctx.generate_id();

        let mut children = Vec::new();
        if let Some(properties) = schema.get_properties() {
            for (field_name, field_schema) in properties {
                children.push(ctx.parse_node(field_schema, field_name)?);
            }
        }

        Ok(SchemaNode::new(
            id,
            name,
            metadata,
            NodeKind::Object {
                children,
                required: schema.get_field(SchemaField::Required).cloned(),
                additional_properties: schema
                    .get_field(SchemaField::AdditionalProperties)
                    .cloned(),
            },
        ))
    }

    fn serialize(&self, node: &SchemaNode, ctx: &SerializeContext<'_>) -> Result<Value> {
        let NodeKind::Object {
            children,
            required,
            additional_properties,
        } = node.kind()
        else {
            return Err(mismatched_node(SchemaType::Object, node));
        };

        let mut properties = Map::new();
        for child in children {
            properties.insert(child.name().to_string(), ctx.serialize(child)?);
        }
        let required = required.clone().unwrap_or_else(|| {
            children
                .iter()
                .map(|child| Value::String(child.name().to_string()))
                .collect()
        });
        let additional_properties = additional_properties
            .clone()
            .unwrap_or(Value::Bool(false));

        let mut schema = Map::new();
        schema.insert_field(SchemaField::Type, SchemaType::Object);
        schema.insert_field(SchemaField::Properties, properties);
        schema.insert_field(SchemaField::Required, required);
        schema.insert_field(SchemaField::AdditionalProperties, additional_properties);
        node.metadata().write_to(&mut schema);
        Ok(Value::Object(schema))
    }

    fn builtin_default(&self) -> Value {
        Value::Object(Map::new())
    }

    fn parse_default_value_string(&self, _text: &str) -> Option<Value> {
        None
    }
}
