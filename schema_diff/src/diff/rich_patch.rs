//! Classified patch records for presentation code

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{AsRefStr, Display, EnumString};

use super::metadata::{MetadataChanges, compute_metadata_changes, has_type_changed, schema_type};
use super::patch_path::{field_name_from_path, is_rename_move, moves_into_array_boundary};
use super::transformations::{TransformationInfo, plan_transformation};

/// JSON-Patch operation kinds produced by the schema editor
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PatchOp {
    /// Insert a field
    Add,
    /// Delete a field
    Remove,
    /// Swap a field's schema
    Replace,
    /// Relocate a field, possibly renaming it
    Move,
}

/// A raw JSON-Patch operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonPatch {
    /// Operation kind
    pub op:    PatchOp,
    /// Target pointer
    pub path:  String,
    /// Source pointer of a `move`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from:  Option<String>,
    /// Schema written by `add`/`replace`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl JsonPatch {
    /// A patch without `from` or `value`
    pub fn new(op: PatchOp, path: impl Into<String>) -> Self {
        Self {
            op,
            path: path.into(),
            from: None,
            value: None,
        }
    }

    /// Set the source pointer
    #[must_use]
    pub fn with_from(mut self, from: impl Into<String>) -> Self {
        self.from = Some(from.into());
        self
    }

    /// Set the written schema
    #[must_use]
    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Display types on both sides of a type change and the planned conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeChange {
    /// Type before the patch
    pub from_type:      String,
    /// Type after the patch
    pub to_type:        String,
    /// Conversion plan, absent when either side is unknown
    pub transformation: Option<TransformationInfo>,
}

/// A patch together with everything derived from it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RichPatch {
    /// The raw operation
    pub patch:            JsonPatch,
    /// Dotted field name of the target, `""` when not a field pointer
    pub field_name:       String,
    /// Annotation differences between base and current
    pub metadata_changes: MetadataChanges,
    /// Present only when the display type changed
    pub type_change:      Option<TypeChange>,
    /// A `move` within one parent object
    pub is_rename:        bool,
    /// A `move` to a deeper array level
    pub moves_into_array: bool,
}

impl RichPatch {
    /// Classify `patch` given the affected field's schema before and after it
    pub fn new(patch: JsonPatch, base: Option<&Value>, current: Option<&Value>) -> Self {
        let field_name = field_name_from_path(&patch.path);
        let metadata_changes = compute_metadata_changes(base, current);

        let type_change = has_type_changed(base, current).then(|| {
            let from_type = schema_type(base);
            let to_type = schema_type(current);
            let transformation = plan_transformation(&from_type, &to_type);
            TypeChange {
                from_type,
                to_type,
                transformation,
            }
        });

        let (is_rename, moves_into_array) = match (patch.op, patch.from.as_deref()) {
            (PatchOp::Move, Some(from)) => (
                is_rename_move(from, &patch.path),
                moves_into_array_boundary(from, &patch.path),
            ),
            _ => (false, false),
        };

        tracing::trace!(
            "Classified {} at '{}': rename={is_rename}, into_array={moves_into_array}",
            patch.op,
            patch.path
        );

        Self {
            patch,
            field_name,
            metadata_changes,
            type_change,
            is_rename,
            moves_into_array,
        }
    }

    /// Classify `patch` by resolving the affected field in whole schema documents
    ///
    /// `remove` reads the base at `path`, `add` reads the current at `path`,
    /// `replace` reads both at `path`, and `move` reads the base at `from` and the
    /// current at `path`.
    pub fn from_documents(patch: JsonPatch, base_root: &Value, current_root: &Value) -> Self {
        let base_pointer = match patch.op {
            PatchOp::Add => None,
            PatchOp::Remove | PatchOp::Replace => Some(patch.path.as_str()),
            PatchOp::Move => patch.from.as_deref(),
        };
        let base = base_pointer.and_then(|pointer| base_root.pointer(pointer));
        let current = match patch.op {
            PatchOp::Remove => None,
            PatchOp::Add | PatchOp::Replace | PatchOp::Move => current_root.pointer(&patch.path),
        };
        Self::new(patch, base, current)
    }

    /// Whether the patch changes the field's display type
    pub const fn changes_type(&self) -> bool {
        self.type_change.is_some()
    }
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::diff::metadata::MetadataField;
    use crate::diff::transformations::DataLossSeverity;

    #[test]
    fn replace_with_type_change_plans_transformation() {
        let base = json!({ "type": "number", "default": 0 });
        let current = json!({ "type": "string", "default": "0" });
        let patch =
            JsonPatch::new(PatchOp::Replace, "/properties/price").with_value(current.clone());

        let rich = RichPatch::new(patch, Some(&base), Some(&current));
        assert_eq!(rich.field_name, "price");
        assert_eq!(rich.metadata_changes.changed, vec![MetadataField::Default]);

        let type_change = rich.type_change.expect("type change");
        assert_eq!(type_change.from_type, "number");
        assert_eq!(type_change.to_type, "string");
        assert_eq!(
            type_change.transformation.map(|t| t.data_loss_severity),
            Some(DataLossSeverity::None)
        );
        assert!(!rich.is_rename);
    }

    #[test]
    fn same_type_has_no_type_change() {
        let base = json!({ "type": "string", "description": "a" });
        let current = json!({ "type": "string", "description": "b" });
        let rich = RichPatch::new(
            JsonPatch::new(PatchOp::Replace, "/properties/name"),
            Some(&base),
            Some(&current),
        );
        assert!(!rich.changes_type());
        assert_eq!(rich.metadata_changes.changed, vec![MetadataField::Description]);
    }

    #[test]
    fn add_reports_unknown_base_without_plan() {
        let current = json!({ "type": "boolean" });
        let rich = RichPatch::new(
            JsonPatch::new(PatchOp::Add, "/properties/done"),
            None,
            Some(&current),
        );
        let type_change = rich.type_change.expect("type change");
        assert_eq!(type_change.from_type, "unknown");
        assert_eq!(type_change.transformation, None);
    }

    #[test]
    fn move_flags_rename_and_array_boundary() {
        let schema = json!({ "type": "string" });
        let rename = RichPatch::new(
            JsonPatch::new(PatchOp::Move, "/properties/newName").with_from("/properties/oldName"),
            Some(&schema),
            Some(&schema),
        );
        assert!(rename.is_rename);
        assert!(!rename.moves_into_array);
        assert_eq!(rename.field_name, "newName");

        let nested = RichPatch::new(
            JsonPatch::new(PatchOp::Move, "/properties/list/items/properties/title")
                .with_from("/properties/title"),
            Some(&schema),
            Some(&schema),
        );
        assert!(!nested.is_rename);
        assert!(nested.moves_into_array);
        assert_eq!(nested.field_name, "list[*].title");
    }

    #[test]
    fn resolves_schemas_from_documents() {
        let base_root = json!({
            "type": "object",
            "properties": { "tag": { "type": "string", "description": "label" } },
            "required": ["tag"],
            "additionalProperties": false
        });
        let current_root = json!({
            "type": "object",
            "properties": {
                "tag": {
                    "type": "array",
                    "items": { "type": "string", "description": "label" }
                }
            },
            "required": ["tag"],
            "additionalProperties": false
        });

        let rich = RichPatch::from_documents(
            JsonPatch::new(PatchOp::Replace, "/properties/tag"),
            &base_root,
            &current_root,
        );
        assert!(rich.metadata_changes.is_empty());
        let plan = rich
            .type_change
            .and_then(|change| change.transformation)
            .expect("plan");
        assert_eq!(plan.steps.len(), 1);
        assert_eq!(plan.steps[0].name, "wrap in array");
    }

    #[test]
    fn remove_reads_only_the_base() {
        let base_root = json!({ "properties": { "gone": { "type": "number" } } });
        let rich = RichPatch::from_documents(
            JsonPatch::new(PatchOp::Remove, "/properties/gone"),
            &base_root,
            &base_root,
        );
        let type_change = rich.type_change.expect("type change");
        assert_eq!(type_change.from_type, "number");
        assert_eq!(type_change.to_type, "unknown");
    }

    #[test]
    fn patch_deserializes_from_wire_format() {
        let patch: JsonPatch = serde_json::from_value(json!({
            "op": "move",
            "from": "/properties/a",
            "path": "/properties/b"
        }))
        .unwrap();
        assert_eq!(patch.op, PatchOp::Move);
        assert_eq!(patch.from.as_deref(), Some("/properties/a"));
        assert_eq!(patch.value, None);
    }
}
