//! Typed schema tree and the descriptors that build it
//!
//! Raw JSON-Schema documents are parsed into [`SchemaNode`] trees by dispatching each
//! sub-schema to a [`TypeDescriptor`] from a [`TypeRegistry`], and serialized back the
//! same way.

mod capabilities;
mod context;
mod descriptor;
mod descriptors;
mod node;
mod registry;

pub use capabilities::{
    ARRAY_CAPABILITIES, OBJECT_CAPABILITIES, PRIMITIVE_CAPABILITIES, REF_CAPABILITIES,
    TypeCapabilities,
};
pub use context::{ParseContext, ParsedSchema, PendingFormula, SerializeContext};
pub use descriptor::TypeDescriptor;
pub(crate) use descriptors::parse_number;
pub use descriptors::{
    ArrayDescriptor, BooleanDescriptor, ITEMS_NODE_NAME, NumberDescriptor, ObjectDescriptor,
    RefDescriptor, StringDescriptor,
};
pub use node::{Formula, NodeId, NodeKind, NodeMetadata, SchemaNode};
pub use registry::TypeRegistry;
