//! Schema-version comparison: metadata extraction, patch pointer analysis, type-change
//! planning, and the [`RichPatch`] read-model that combines them

mod metadata;
mod patch_path;
mod rich_patch;
mod transformations;

pub use metadata::{
    FieldChange, MetadataChanges, MetadataField, UNKNOWN_TYPE, compute_metadata_changes,
    default_value, deprecated, description, foreign_key, formula_expression, has_type_changed,
    is_primitive, schema_type,
};
pub use patch_path::{field_name_from_path, is_rename_move, moves_into_array_boundary};
pub use rich_patch::{JsonPatch, PatchOp, RichPatch, TypeChange};
pub use transformations::{
    DataLossSeverity, TransformStep, TransformationExample, TransformationInfo,
    UNWRAP_ARRAY_STEP, WRAP_IN_ARRAY_STEP, plan_transformation,
};
