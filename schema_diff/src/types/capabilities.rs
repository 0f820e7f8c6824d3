//! Static structural capabilities shared by descriptors of the same shape

use serde::Serialize;

use crate::json_schema::SchemaType;

/// What a type variant structurally supports
///
/// There are exactly four instances; descriptors hand out `&'static` references to them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCapabilities {
    /// Named child nodes
    pub has_children: bool,
    /// A single items node
    pub has_items:    bool,
    /// May carry an `x-formula`
    pub has_formula:  bool,
    /// Leaf value
    pub is_primitive: bool,
    /// Holds other nodes
    pub is_container: bool,
}

/// Capabilities of string, number, and boolean
pub static PRIMITIVE_CAPABILITIES: TypeCapabilities = TypeCapabilities {
    has_children: false,
    has_items:    false,
    has_formula:  true,
    is_primitive: true,
    is_container: false,
};

/// Capabilities of object
pub static OBJECT_CAPABILITIES: TypeCapabilities = TypeCapabilities {
    has_children: true,
    has_items:    false,
    has_formula:  false,
    is_primitive: false,
    is_container: true,
};

/// Capabilities of array
pub static ARRAY_CAPABILITIES: TypeCapabilities = TypeCapabilities {
    has_children: false,
    has_items:    true,
    has_formula:  false,
    is_primitive: false,
    is_container: true,
};

/// Capabilities of `$ref`
pub static REF_CAPABILITIES: TypeCapabilities = TypeCapabilities {
    has_children: false,
    has_items:    false,
    has_formula:  false,
    is_primitive: false,
    is_container: false,
};

impl TypeCapabilities {
    /// The shared capability set for a schema type
    pub const fn for_type(schema_type: SchemaType) -> &'static Self {
        match schema_type {
            SchemaType::String | SchemaType::Number | SchemaType::Boolean => {
                &PRIMITIVE_CAPABILITIES
            }
            SchemaType::Object => &OBJECT_CAPABILITIES,
            SchemaType::Array => &ARRAY_CAPABILITIES,
            SchemaType::Ref => &REF_CAPABILITIES,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitives_share_one_instance() {
        let string = TypeCapabilities::for_type(SchemaType::String);
        let boolean = TypeCapabilities::for_type(SchemaType::Boolean);
        assert!(std::ptr::eq(string, boolean));
        assert!(string.has_formula);
    }

    #[test]
    fn containers_are_flagged() {
        assert!(OBJECT_CAPABILITIES.is_container && OBJECT_CAPABILITIES.has_children);
        assert!(ARRAY_CAPABILITIES.is_container && ARRAY_CAPABILITIES.has_items);
        assert!(!REF_CAPABILITIES.is_container && !REF_CAPABILITIES.is_primitive);
    }
}
