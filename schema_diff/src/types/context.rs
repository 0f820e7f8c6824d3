//! Per-session state threaded through descriptor `parse` and `serialize`

use serde::Serialize;
use serde_json::Value;

use super::node::{NodeId, SchemaNode};
use super::registry::TypeRegistry;
use crate::error::Result;

/// A formula awaiting compilation, recorded while parsing
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PendingFormula {
    /// Node the formula computes
    pub node_id:    NodeId,
    /// Expression source
    pub expression: String,
}

/// Result of one parse session
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedSchema {
    /// Root node, named `""`
    pub root:             SchemaNode,
    /// Formulas registered during the session, in parse order
    pub pending_formulas: Vec<PendingFormula>,
    /// Number of ids issued
    pub node_count:       u64,
}

/// Parse session: id allocation, recursive dispatch, and formula registration
///
/// A fresh context is created for every top-level parse, so ids restart per session
/// and never leak between documents.
pub struct ParseContext<'r> {
    registry:         &'r TypeRegistry,
    next_id:          u64,
    pending_formulas: Vec<PendingFormula>,
}

impl<'r> ParseContext<'r> {
    pub(crate) const fn new(registry: &'r TypeRegistry) -> Self {
        Self {
            registry,
            next_id: 0,
            pending_formulas: Vec::new(),
        }
    }

    /// Issue the next id of this session
    pub const fn generate_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Parse a child schema by dispatching back through the registry
    ///
    /// # Errors
    ///
    /// Propagates the registry's parse failure for the child.
    pub fn parse_node(&mut self, schema: &Value, name: &str) -> Result<SchemaNode> {
        let registry = self.registry;
        registry.parse_node(schema, name, self)
    }

    /// Record a formula for the compiler to pick up once parsing completes
    pub fn add_pending_formula(&mut self, node_id: NodeId, expression: impl Into<String>) {
        let expression = expression.into();
        tracing::trace!("Pending formula for {node_id}: {expression}");
        self.pending_formulas.push(PendingFormula {
            node_id,
            expression,
        });
    }

    pub(crate) fn finish(self, root: SchemaNode) -> ParsedSchema {
        ParsedSchema {
            root,
            pending_formulas: self.pending_formulas,
            node_count: self.next_id,
        }
    }
}

/// Serialization pass over a node tree
pub struct SerializeContext<'r> {
    registry: &'r TypeRegistry,
}

impl<'r> SerializeContext<'r> {
    pub(crate) const fn new(registry: &'r TypeRegistry) -> Self {
        Self { registry }
    }

    /// Serialize a child node by dispatching back through the registry
    ///
    /// # Errors
    ///
    /// Propagates the registry's serialize failure for the child.
    pub fn serialize(&self, node: &SchemaNode) -> Result<Value> {
        self.registry.serialize_node(node, self)
    }
}
