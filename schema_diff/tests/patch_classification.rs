//! Classifying editor patches between two versions of a schema document

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]

use schema_diff::diff::{MetadataField, plan_transformation};
use schema_diff::{DataLossSeverity, JsonPatch, PatchOp, SchemaEngine};
use serde_json::{Value, json};

fn base_document() -> Value {
    json!({
        "type": "object",
        "properties": {
            "title": { "type": "string", "default": "", "description": "Headline" },
            "score": { "type": "number", "default": 0 },
            "tags": {
                "type": "array",
                "items": { "type": "string", "default": "" }
            },
            "author": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "default": "", "foreignKey": "users" }
                },
                "required": ["name"],
                "additionalProperties": false
            }
        },
        "required": ["title", "score", "tags", "author"],
        "additionalProperties": false
    })
}

fn current_document() -> Value {
    json!({
        "type": "object",
        "properties": {
            "headline": { "type": "string", "default": "", "description": "Headline" },
            "score": { "type": "string", "default": "0" },
            "tags": { "type": "string", "default": "" },
            "author": {
                "type": "object",
                "properties": {
                    "name": { "type": "string", "default": "", "foreignKey": "accounts" }
                },
                "required": ["name"],
                "additionalProperties": false
            }
        },
        "required": ["headline", "score", "tags", "author"],
        "additionalProperties": false
    })
}

#[test]
fn rename_is_detected_without_type_change() {
    let engine = SchemaEngine::default();
    let patch = JsonPatch::new(PatchOp::Move, "/properties/headline").with_from("/properties/title");
    let rich = engine.rich_patch(patch, &base_document(), &current_document());

    assert!(rich.is_rename);
    assert!(!rich.moves_into_array);
    assert_eq!(rich.field_name, "headline");
    assert!(rich.metadata_changes.is_empty());
    assert!(rich.type_change.is_none());
}

#[test]
fn number_to_string_replace_is_lossless() {
    let engine = SchemaEngine::default();
    let patch = JsonPatch::new(PatchOp::Replace, "/properties/score");
    let rich = engine.rich_patch(patch, &base_document(), &current_document());

    let change = rich.type_change.expect("type change");
    let plan = change.transformation.expect("plan");
    assert_eq!(plan.data_loss_severity, DataLossSeverity::None);
    assert_eq!(plan.example.before, json!(123));
    assert_eq!(plan.example.after, json!("123"));
    assert_eq!(rich.metadata_changes.changed, vec![MetadataField::Default]);
}

#[test]
fn collapsing_an_array_unwraps_the_first_element() {
    let engine = SchemaEngine::default();
    let patch = JsonPatch::new(PatchOp::Replace, "/properties/tags");
    let rich = engine.rich_patch(patch, &base_document(), &current_document());

    let change = rich.type_change.expect("type change");
    assert_eq!(change.from_type, "array<string>");
    assert_eq!(change.to_type, "string");
    let plan = change.transformation.expect("plan");
    assert_eq!(plan.steps.len(), 1);
    assert_eq!(plan.steps[0].name, "unwrap array (first element)");
    assert_eq!(plan.data_loss_severity, DataLossSeverity::Possible);
}

#[test]
fn nested_foreign_key_change_carries_both_sides() {
    let engine = SchemaEngine::default();
    let patch = JsonPatch::new(PatchOp::Replace, "/properties/author/properties/name");
    let rich = engine.rich_patch(patch, &base_document(), &current_document());

    assert_eq!(rich.field_name, "author.name");
    assert_eq!(rich.metadata_changes.changed, vec![MetadataField::ForeignKey]);
    let change = rich.metadata_changes.foreign_key_change.expect("foreign key pair");
    assert_eq!(change.from.as_deref(), Some("users"));
    assert_eq!(change.to.as_deref(), Some("accounts"));
}

#[test]
fn rich_patch_serializes_for_presentation() {
    let engine = SchemaEngine::default();
    let patch = JsonPatch::new(PatchOp::Replace, "/properties/score");
    let rich = engine.rich_patch(patch, &base_document(), &current_document());

    let wire = serde_json::to_value(&rich).unwrap();
    assert_eq!(wire["patch"], json!({ "op": "replace", "path": "/properties/score" }));
    assert_eq!(wire["fieldName"], json!("score"));
    assert_eq!(wire["isRename"], json!(false));
    assert_eq!(wire["metadataChanges"]["changed"], json!(["default"]));
    assert_eq!(
        wire["typeChange"]["transformation"]["dataLossSeverity"],
        json!("none")
    );
    assert_eq!(
        wire["typeChange"]["transformation"]["steps"][0],
        json!({ "name": "number→string", "severity": "none" })
    );
}

#[test]
fn planner_properties_hold() {
    let severity = |from, to| plan_transformation(from, to).map(|plan| plan.data_loss_severity);
    assert_eq!(severity("string", "number"), Some(DataLossSeverity::Possible));
    assert_eq!(severity("object", "array"), Some(DataLossSeverity::Certain));
    assert_eq!(severity("string", "string"), None);

    let wrap = plan_transformation("string", "array<string>").unwrap();
    assert_eq!(wrap.steps.len(), 1);
    assert_eq!(wrap.steps[0].name, "wrap in array");
    assert_eq!(wrap.steps[0].severity, DataLossSeverity::None);

    let unwrap = plan_transformation("array<number>", "string").unwrap();
    assert_eq!(unwrap.steps[0].name, "unwrap array (first element)");
    assert_eq!(unwrap.steps[0].severity, DataLossSeverity::Possible);
}
