//! The in-memory schema tree produced by parsing
//!
//! A [`SchemaNode`] is one field of a schema document: an id unique within its parse
//! session, the field name, shared annotations in [`NodeMetadata`], and a
//! [`NodeKind`] carrying the variant-specific shape.

use std::fmt::{self, Display};

use serde::Serialize;
use serde_json::{Map, Value};

use super::capabilities::TypeCapabilities;
use crate::json_object::JsonObjectAccess;
use crate::json_schema::{SchemaField, SchemaType};
use crate::path::{Path, PathSegment};

/// Identifier of a node, unique within one parse session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u64);

impl Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// A computed-field formula attached to a primitive field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Formula {
    /// Formula language version, kept verbatim
    pub version:    Value,
    /// Expression source handed to the formula compiler
    pub expression: String,
}

impl Formula {
    /// Read an `x-formula` block; `None` unless it holds a string expression
    pub fn from_schema(schema: &Value) -> Option<Self> {
        let block = schema.get_field(SchemaField::XFormula)?;
        let expression = block.get_field_str(SchemaField::Expression)?;
        Some(Self {
            version:    block
                .get_field(SchemaField::Version)
                .cloned()
                .unwrap_or(Value::Null),
            expression: expression.to_string(),
        })
    }

    fn to_value(&self) -> Value {
        let mut block = Map::new();
        if !self.version.is_null() {
            block.insert_field(SchemaField::Version, self.version.clone());
        }
        block.insert_field(SchemaField::Expression, self.expression.clone());
        Value::Object(block)
    }
}

/// Annotations any schema node may carry
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    /// Free-text description
    pub description:        Option<String>,
    /// Deprecation flag, kept even when `false`
    pub deprecated:         Option<bool>,
    /// Name of the table a string field references
    pub foreign_key:        Option<String>,
    /// Media type of string content
    pub content_media_type: Option<String>,
    /// Read-only flag
    pub read_only:          Option<bool>,
    /// Computed-field formula
    pub formula:            Option<Formula>,
}

impl NodeMetadata {
    /// Collect every annotation present on `schema`
    pub fn from_schema(schema: &Value) -> Self {
        Self {
            description:        schema
                .get_field_str(SchemaField::Description)
                .map(ToString::to_string),
            deprecated:         schema.get_field_bool(SchemaField::Deprecated),
            foreign_key:        schema
                .get_field_str(SchemaField::ForeignKey)
                .map(ToString::to_string),
            content_media_type: schema
                .get_field_str(SchemaField::ContentMediaType)
                .map(ToString::to_string),
            read_only:          schema.get_field_bool(SchemaField::ReadOnly),
            formula:            Formula::from_schema(schema),
        }
    }

    /// Write the annotations back in wire order
    pub fn write_to(&self, schema: &mut Map<String, Value>) {
        if let Some(foreign_key) = &self.foreign_key {
            schema.insert_field(SchemaField::ForeignKey, foreign_key.clone());
        }
        if let Some(read_only) = self.read_only {
            schema.insert_field(SchemaField::ReadOnly, read_only);
        }
        if let Some(description) = &self.description {
            schema.insert_field(SchemaField::Description, description.clone());
        }
        if let Some(deprecated) = self.deprecated {
            schema.insert_field(SchemaField::Deprecated, deprecated);
        }
        if let Some(media_type) = &self.content_media_type {
            schema.insert_field(SchemaField::ContentMediaType, media_type.clone());
        }
        if let Some(formula) = &self.formula {
            schema.insert_field(SchemaField::XFormula, formula.to_value());
        }
    }
}

/// Variant-specific shape of a node
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// `$ref` to a shared schema
    Ref {
        /// The reference string, verbatim
        reference: String,
    },
    /// Object with uniquely named children in document order
    Object {
        /// Child fields
        children:              Vec<SchemaNode>,
        /// Parsed `required` list, verbatim
        required:              Option<Value>,
        /// Parsed `additionalProperties`, verbatim
        additional_properties: Option<Value>,
    },
    /// Array with zero or one items node
    Array {
        /// Schema of every element
        items: Option<Box<SchemaNode>>,
    },
    /// String leaf
    String {
        /// Explicit `default`, verbatim
        default: Option<Value>,
    },
    /// Number leaf
    Number {
        /// Explicit `default`, verbatim
        default: Option<Value>,
    },
    /// Boolean leaf
    Boolean {
        /// Explicit `default`, verbatim
        default: Option<Value>,
    },
}

/// One field of a parsed schema
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaNode {
    id:       NodeId,
    name:     String,
    metadata: NodeMetadata,
    kind:     NodeKind,
}

impl SchemaNode {
    /// Assemble a node; object children must carry unique names
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        metadata: NodeMetadata,
        kind: NodeKind,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            metadata,
            kind,
        }
    }

    /// Session-unique id
    pub const fn id(&self) -> NodeId {
        self.id
    }

    /// Field name; the root is named `""`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Annotations
    pub const fn metadata(&self) -> &NodeMetadata {
        &self.metadata
    }

    /// Variant-specific shape
    pub const fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Type tag
    pub const fn node_type(&self) -> SchemaType {
        match self.kind {
            NodeKind::Ref { .. } => SchemaType::Ref,
            NodeKind::Object { .. } => SchemaType::Object,
            NodeKind::Array { .. } => SchemaType::Array,
            NodeKind::String { .. } => SchemaType::String,
            NodeKind::Number { .. } => SchemaType::Number,
            NodeKind::Boolean { .. } => SchemaType::Boolean,
        }
    }

    /// Structural capabilities of this node's type
    pub fn capabilities(&self) -> &'static TypeCapabilities {
        TypeCapabilities::for_type(self.node_type())
    }

    /// Explicit default of a primitive node
    pub const fn default_value(&self) -> Option<&Value> {
        match &self.kind {
            NodeKind::String { default }
            | NodeKind::Number { default }
            | NodeKind::Boolean { default } => default.as_ref(),
            NodeKind::Ref { .. } | NodeKind::Object { .. } | NodeKind::Array { .. } => None,
        }
    }

    /// Children of an object node; empty for everything else
    pub fn children(&self) -> &[Self] {
        match &self.kind {
            NodeKind::Object { children, .. } => children,
            _ => &[],
        }
    }

    /// Items node of an array
    pub fn items(&self) -> Option<&Self> {
        match &self.kind {
            NodeKind::Array { items } => items.as_deref(),
            _ => None,
        }
    }

    /// Reference string of a `$ref` node
    pub fn reference(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::Ref { reference } => Some(reference),
            _ => None,
        }
    }

    /// Named child of an object node
    pub fn child(&self, name: &str) -> Option<&Self> {
        self.children().iter().find(|child| child.name == name)
    }

    /// Resolve a path relative to this node
    ///
    /// Property segments select object children; index and items segments both
    /// select the items node, since every element shares one schema.
    pub fn find(&self, path: &Path) -> Option<&Self> {
        path.segments()
            .iter()
            .try_fold(self, |node, segment| match segment {
                PathSegment::Property(name) => node.child(name),
                PathSegment::Index(_) | PathSegment::Items => node.items(),
            })
    }

    /// Depth-first pre-order iteration over this node and its descendants
    pub fn walk(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            match &node.kind {
                NodeKind::Object { children, .. } => stack.extend(children.iter().rev()),
                NodeKind::Array { items: Some(items) } => stack.push(items),
                _ => {}
            }
            Some(node)
        })
    }
}
