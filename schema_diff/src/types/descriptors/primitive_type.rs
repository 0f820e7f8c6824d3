//! Descriptors for the leaf types: string, number, and boolean
//!
//! **Recursion**: NO - leaves carry an optional explicit `default` and annotations.
//! A leaf with an `x-formula` block registers its expression with the parse session.

use serde_json::{Map, Value};

use super::super::context::{ParseContext, SerializeContext};
use super::super::descriptor::{TypeDescriptor, mismatched_node};
use super::super::node::{NodeKind, NodeMetadata, SchemaNode};
use crate::error::Result;
use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};

/// Shared parse path for every leaf type
fn parse_leaf(
    schema: &Value,
    name: &str,
    metadata: NodeMetadata,
    ctx: &mut ParseContext<'_>,
    make_kind: impl FnOnce(Option<Value>) -> NodeKind,
) -> SchemaNode {
    let id = ctx.generate_id();
    if let Some(formula) = &metadata.formula {
        ctx.add_pending_formula(id, formula.expression.clone());
    }
    let default = schema.get_field(SchemaField::Default).cloned();
    SchemaNode::new(id, name, metadata, make_kind(default))
}

/// Shared serialize path: `type`, then `default`, then annotations
fn serialize_leaf(schema_type: SchemaType, node: &SchemaNode) -> Value {
    let mut schema = Map::new();
    schema.insert_field(SchemaField::Type, schema_type);
    if let Some(default) = node.default_value() {
        schema.insert_field(SchemaField::Default, default.clone());
    }
    node.metadata().write_to(&mut schema);
    Value::Object(schema)
}

fn has_type(schema: &Value, schema_type: SchemaType) -> bool {
    schema.get_type_str() == Some(schema_type.as_ref())
}

/// 2^63, the first magnitude outside `i64`
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Parse numeric text, preferring an integer representation
///
/// Whole floats such as `"3.0"` collapse to integers so they compare equal to `3`.
#[allow(
    clippy::float_cmp,
    clippy::cast_possible_truncation,
    reason = "the value is whole and inside the i64 range"
)]
pub(crate) fn parse_number(text: &str) -> Option<Value> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if let Ok(integer) = text.parse::<i64>() {
        return Some(Value::from(integer));
    }
    let float = text.parse::<f64>().ok().filter(|value| value.is_finite())?;
    if float.fract() == 0.0 && float.abs() < I64_BOUND {
        return Some(Value::from(float as i64));
    }
    serde_json::Number::from_f64(float).map(Value::Number)
}

/// Descriptor for `{ "type": "string" }`
pub struct StringDescriptor;

impl TypeDescriptor for StringDescriptor {
    fn schema_type(&self) -> SchemaType {
        SchemaType::String
    }

    fn can_parse(&self, schema: &Value) -> bool {
        has_type(schema, SchemaType::String)
    }

    fn parse(
        &self,
        schema: &Value,
        name: &str,
        metadata: NodeMetadata,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode> {
        Ok(parse_leaf(schema, name, metadata, ctx, |default| {
            NodeKind::String { default }
        }))
    }

    fn serialize(&self, node: &SchemaNode, _ctx: &SerializeContext<'_>) -> Result<Value> {
        match node.kind() {
            NodeKind::String { .. } => Ok(serialize_leaf(SchemaType::String, node)),
            _ => Err(mismatched_node(SchemaType::String, node)),
        }
    }

    fn builtin_default(&self) -> Value {
        Value::String(String::new())
    }

    fn parse_default_value_string(&self, text: &str) -> Option<Value> {
        if text.is_empty() {
            None
        } else {
            Some(Value::String(text.to_string()))
        }
    }
}

/// Descriptor for `{ "type": "number" }`
pub struct NumberDescriptor;

impl TypeDescriptor for NumberDescriptor {
    fn schema_type(&self) -> SchemaType {
        SchemaType::Number
    }

    fn can_parse(&self, schema: &Value) -> bool {
        has_type(schema, SchemaType::Number)
    }

    fn parse(
        &self,
        schema: &Value,
        name: &str,
        metadata: NodeMetadata,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode> {
        Ok(parse_leaf(schema, name, metadata, ctx, |default| {
            NodeKind::Number { default }
        }))
    }

    fn serialize(&self, node: &SchemaNode, _ctx: &SerializeContext<'_>) -> Result<Value> {
        match node.kind() {
            NodeKind::Number { .. } => Ok(serialize_leaf(SchemaType::Number, node)),
            _ => Err(mismatched_node(SchemaType::Number, node)),
        }
    }

    fn builtin_default(&self) -> Value {
        Value::from(0)
    }

    fn parse_default_value_string(&self, text: &str) -> Option<Value> {
        parse_number(text)
    }
}

/// Descriptor for `{ "type": "boolean" }`
pub struct BooleanDescriptor;

impl TypeDescriptor for BooleanDescriptor {
    fn schema_type(&self) -> SchemaType {
        SchemaType::Boolean
    }

    fn can_parse(&self, schema: &Value) -> bool {
        has_type(schema, SchemaType::Boolean)
    }

    fn parse(
        &self,
        schema: &Value,
        name: &str,
        metadata: NodeMetadata,
        ctx: &mut ParseContext<'_>,
    ) -> Result<SchemaNode> {
        Ok(parse_leaf(schema, name, metadata, ctx, |default| {
            NodeKind::Boolean { default }
        }))
    }

    fn serialize(&self, node: &SchemaNode, _ctx: &SerializeContext<'_>) -> Result<Value> {
        match node.kind() {
            NodeKind::Boolean { .. } => Ok(serialize_leaf(SchemaType::Boolean, node)),
            _ => Err(mismatched_node(SchemaType::Boolean, node)),
        }
    }

    fn builtin_default(&self) -> Value {
        Value::Bool(false)
    }

    // Only the literal words are accepted; "1"/"0" are not booleans here
    fn parse_default_value_string(&self, text: &str) -> Option<Value> {
        if text.eq_ignore_ascii_case("true") {
            Some(Value::Bool(true))
        } else if text.eq_ignore_ascii_case("false") {
            Some(Value::Bool(false))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn string_default_text_is_kept_verbatim() {
        assert_eq!(
            StringDescriptor.parse_default_value_string(" hi "),
            Some(json!(" hi "))
        );
        assert_eq!(StringDescriptor.parse_default_value_string(""), None);
    }

    #[test]
    fn number_default_text_is_coerced() {
        assert_eq!(NumberDescriptor.parse_default_value_string("42"), Some(json!(42)));
        assert_eq!(
            NumberDescriptor.parse_default_value_string("2.75"),
            Some(json!(2.75))
        );
        assert_eq!(NumberDescriptor.parse_default_value_string("-7"), Some(json!(-7)));
        assert_eq!(NumberDescriptor.parse_default_value_string("3.0"), Some(json!(3)));
        assert_eq!(NumberDescriptor.parse_default_value_string("-2e3"), Some(json!(-2000)));
        assert_eq!(
            NumberDescriptor.parse_default_value_string("1e300"),
            Some(json!(1e300))
        );
        assert_eq!(NumberDescriptor.parse_default_value_string(""), None);
        assert_eq!(NumberDescriptor.parse_default_value_string("abc"), None);
        assert_eq!(NumberDescriptor.parse_default_value_string("NaN"), None);
        assert_eq!(NumberDescriptor.parse_default_value_string("inf"), None);
    }

    #[test]
    fn boolean_default_text_accepts_only_words() {
        assert_eq!(
            BooleanDescriptor.parse_default_value_string("TRUE"),
            Some(json!(true))
        );
        assert_eq!(
            BooleanDescriptor.parse_default_value_string("False"),
            Some(json!(false))
        );
        assert_eq!(BooleanDescriptor.parse_default_value_string("1"), None);
        assert_eq!(BooleanDescriptor.parse_default_value_string("yes"), None);
        assert_eq!(BooleanDescriptor.parse_default_value_string(""), None);
    }

    #[test]
    fn explicit_default_wins_over_builtin() {
        assert_eq!(
            StringDescriptor.default_value(&json!({ "type": "string", "default": "x" })),
            json!("x")
        );
        assert_eq!(
            NumberDescriptor.default_value(&json!({ "type": "number" })),
            json!(0)
        );
        assert_eq!(
            BooleanDescriptor.default_value(&json!({ "type": "boolean", "default": true })),
            json!(true)
        );
    }

    #[test]
    fn can_parse_matches_exact_type() {
        assert!(StringDescriptor.can_parse(&json!({ "type": "string" })));
        assert!(!StringDescriptor.can_parse(&json!({ "type": "number" })));
        assert!(!NumberDescriptor.can_parse(&json!({ "$ref": "x" })));
        assert!(BooleanDescriptor.can_parse(&json!({ "type": "boolean", "default": false })));
    }
}
