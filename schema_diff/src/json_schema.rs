//! JSON schema type tags and keyword names
//!
//! This module provides the closed set of schema type tags the engine models and
//! type-safe names for every schema keyword it reads or writes, so the rest of the
//! crate never spells a keyword as a raw string.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

/// Schema type tags handled by the built-in descriptors
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    AsRefStr,
    EnumString,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SchemaType {
    /// `{ "$ref": "..." }` reference to a shared schema
    Ref,
    /// Object with named properties
    Object,
    /// Array with a single items schema
    Array,
    /// UTF-8 string
    String,
    /// JSON number
    Number,
    /// JSON boolean
    Boolean,
}

impl SchemaType {
    /// Whether this tag is a leaf value type
    pub const fn is_primitive(self) -> bool {
        matches!(self, Self::String | Self::Number | Self::Boolean)
    }
}

impl From<SchemaType> for Value {
    fn from(schema_type: SchemaType) -> Self {
        Self::String(schema_type.as_ref().to_string())
    }
}

/// Schema field names
///
/// Type-safe keyword names for JSON schema documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, AsRefStr)]
#[strum(serialize_all = "camelCase")]
pub enum SchemaField {
    /// The additionalProperties field for object types
    AdditionalProperties,
    /// The contentMediaType field for string payloads
    ContentMediaType,
    /// The default field
    Default,
    /// The deprecated flag
    Deprecated,
    /// The description field
    Description,
    /// The expression inside an `x-formula` block
    Expression,
    /// The foreignKey field naming a referenced table
    ForeignKey,
    /// The items field for array types
    Items,
    /// The properties field for object types
    Properties,
    /// The readOnly flag
    ReadOnly,
    /// The $ref field for type references
    #[strum(serialize = "$ref")]
    Ref,
    /// The required field for object types
    Required,
    /// The type field
    Type,
    /// The version inside an `x-formula` block
    Version,
    /// The computed-field formula block
    #[strum(serialize = "x-formula")]
    XFormula,
}

impl From<SchemaField> for String {
    fn from(field: SchemaField) -> Self {
        field.as_ref().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keyword_names_match_the_wire_format() {
        assert_eq!(SchemaField::Ref.as_ref(), "$ref");
        assert_eq!(SchemaField::XFormula.as_ref(), "x-formula");
        assert_eq!(SchemaField::AdditionalProperties.as_ref(), "additionalProperties");
        assert_eq!(SchemaField::ContentMediaType.as_ref(), "contentMediaType");
        assert_eq!(SchemaField::ForeignKey.as_ref(), "foreignKey");
    }

    #[test]
    fn schema_type_parses_lowercase_tags() {
        assert_eq!("number".parse::<SchemaType>().ok(), Some(SchemaType::Number));
        assert!("Number".parse::<SchemaType>().is_err());
        assert_eq!(SchemaType::Boolean.to_string(), "boolean");
    }
}
