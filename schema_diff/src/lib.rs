//! # Schema Diff
//!
//! Typed modeling of JSON-Schema documents and classification of the patches an
//! editor applies to them.
//!
//! - [`types`]: parse raw schemas into [`SchemaNode`] trees through a [`TypeRegistry`]
//!   of per-type descriptors, and serialize them back losslessly
//! - [`defaults`]: rule-driven default values through a [`DefaultValueRegistry`]
//! - [`path`]: the dotted field [`Path`] language and its JSON-Pointer forms
//! - [`diff`]: metadata comparison, type-change planning, and [`RichPatch`] records
//!
//! [`SchemaEngine`] bundles both registries into one handle built at startup.
//!
//! ```
//! use schema_diff::SchemaEngine;
//! use serde_json::json;
//!
//! let engine = SchemaEngine::default();
//! let schema = json!({
//!     "type": "object",
//!     "properties": { "price": { "type": "number", "default": 0 } },
//!     "required": ["price"],
//!     "additionalProperties": false
//! });
//! let parsed = engine.parse(&schema)?;
//! assert_eq!(engine.serialize(&parsed.root)?, schema);
//! # Ok::<(), error_stack::Report<schema_diff::Error>>(())
//! ```
//!
//! The library logs through `tracing` and never installs a subscriber.

pub mod defaults;
pub mod diff;
mod engine;
mod error;
mod json_object;
mod json_schema;
pub mod path;
pub mod types;

pub use defaults::DefaultValueRegistry;
pub use diff::{DataLossSeverity, JsonPatch, PatchOp, RichPatch, TransformationInfo};
pub use engine::SchemaEngine;
pub use error::{Error, Result};
pub use json_object::JsonObjectAccess;
pub use json_schema::{SchemaField, SchemaType};
pub use path::{Path, PathSegment};
pub use types::{ParsedSchema, SchemaNode, TypeRegistry};
