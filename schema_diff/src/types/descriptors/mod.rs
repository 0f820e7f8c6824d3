//! Built-in descriptors, one per schema type

mod array_type;
mod object_type;
mod primitive_type;
mod ref_type;

pub use array_type::{ArrayDescriptor, ITEMS_NODE_NAME};
pub use object_type::ObjectDescriptor;
pub(crate) use primitive_type::parse_number;
pub use primitive_type::{BooleanDescriptor, NumberDescriptor, StringDescriptor};
pub use ref_type::RefDescriptor;
