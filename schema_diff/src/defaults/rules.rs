//! Predicates selecting which generator produces a schema's default

use serde_json::Value;

use crate::json_object::JsonObjectAccess;
use crate::json_schema::SchemaType;

/// A predicate over a raw schema object
pub trait DefaultRule: Send + Sync {
    /// Whether this rule applies to `schema`
    fn matches(&self, schema: &Value) -> bool;
}

/// Matches schemas whose `type` equals a given tag exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaTypeDefaultRule {
    schema_type: String,
}

impl SchemaTypeDefaultRule {
    /// Rule for `{ "type": <schema_type> }`
    pub fn new(schema_type: impl Into<String>) -> Self {
        Self {
            schema_type: schema_type.into(),
        }
    }
}

impl From<SchemaType> for SchemaTypeDefaultRule {
    fn from(schema_type: SchemaType) -> Self {
        Self::new(schema_type.as_ref())
    }
}

impl DefaultRule for SchemaTypeDefaultRule {
    fn matches(&self, schema: &Value) -> bool {
        schema.get_type_str() == Some(self.schema_type.as_str())
    }
}

/// Matches schemas whose `$ref` equals a given reference exactly
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaRefDefaultRule {
    reference: String,
}

impl SchemaRefDefaultRule {
    /// Rule for `{ "$ref": <reference> }`
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
        }
    }
}

impl DefaultRule for SchemaRefDefaultRule {
    fn matches(&self, schema: &Value) -> bool {
        schema.get_ref() == Some(self.reference.as_str())
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn type_rule_matches_exactly() {
        let rule = SchemaTypeDefaultRule::from(SchemaType::String);
        assert!(rule.matches(&json!({ "type": "string" })));
        assert!(!rule.matches(&json!({ "type": "String" })));
        assert!(!rule.matches(&json!({ "$ref": "string" })));
    }

    #[test]
    fn ref_rule_matches_exactly() {
        let rule = SchemaRefDefaultRule::new("urn:file");
        assert!(rule.matches(&json!({ "$ref": "urn:file" })));
        assert!(!rule.matches(&json!({ "$ref": "urn:file:v2" })));
        assert!(!rule.matches(&json!({ "type": "string" })));
    }
}
