//! Parse → serialize fidelity through the default engine

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    reason = "tests should panic on unexpected values"
)]

use schema_diff::types::{NodeId, NodeKind};
use schema_diff::{Error, Path, SchemaEngine, SchemaType};
use serde_json::json;

#[test]
fn price_schema_round_trips() {
    let engine = SchemaEngine::default();
    let schema = json!({
        "type": "object",
        "properties": { "price": { "type": "number", "default": 0 } },
        "required": ["price"],
        "additionalProperties": false
    });

    let parsed = engine.parse(&schema).unwrap();
    assert_eq!(engine.serialize(&parsed.root).unwrap(), schema);
}

#[test]
fn partial_required_and_open_objects_round_trip() {
    let engine = SchemaEngine::default();
    let schema = json!({
        "type": "object",
        "properties": {
            "a": { "type": "string" },
            "b": {
                "type": "object",
                "properties": { "c": { "type": "boolean" } },
                "required": [],
                "additionalProperties": true
            }
        },
        "required": ["a"],
        "additionalProperties": false
    });

    let parsed = engine.parse(&schema).unwrap();
    assert_eq!(engine.serialize(&parsed.root).unwrap(), schema);
}

#[test]
fn missing_required_is_synthesized_from_children() {
    let engine = SchemaEngine::default();
    let parsed = engine
        .parse(&json!({
            "type": "object",
            "properties": { "a": { "type": "string" }, "b": { "type": "number" } }
        }))
        .unwrap();
    let serialized = engine.serialize(&parsed.root).unwrap();
    assert_eq!(serialized["required"], json!(["a", "b"]));
    assert_eq!(serialized["additionalProperties"], json!(false));
}

#[test]
fn every_documented_key_round_trips() {
    let engine = SchemaEngine::default();
    let schema = json!({
        "type": "object",
        "properties": {
            "id": {
                "type": "string",
                "default": "",
                "readOnly": true,
                "description": "Row identifier"
            },
            "owner": {
                "type": "string",
                "default": "",
                "foreignKey": "users",
                "deprecated": true
            },
            "body": {
                "type": "string",
                "default": "",
                "contentMediaType": "text/markdown"
            },
            "total": {
                "type": "number",
                "default": 0,
                "readOnly": true,
                "x-formula": { "version": 1, "expression": "price * quantity" }
            },
            "done": { "type": "boolean", "default": false },
            "attachments": {
                "type": "array",
                "items": { "$ref": "urn:jsonschema:file:1.0.0" },
                "description": "Uploaded files"
            },
            "matrix": {
                "type": "array",
                "items": { "type": "array", "items": { "type": "number", "default": 0 } }
            },
            "address": {
                "type": "object",
                "properties": { "city": { "type": "string", "default": "" } },
                "required": ["city"],
                "additionalProperties": false
            }
        },
        "required": ["id", "owner", "body", "total", "done", "attachments", "matrix", "address"],
        "additionalProperties": false
    });

    let parsed = engine.parse(&schema).unwrap();
    assert_eq!(engine.serialize(&parsed.root).unwrap(), schema);
}

#[test]
fn parse_session_assigns_unique_ids_and_collects_formulas() {
    let engine = SchemaEngine::default();
    let schema = json!({
        "type": "object",
        "properties": {
            "a": { "type": "number", "default": 1 },
            "b": {
                "type": "number",
                "default": 0,
                "x-formula": { "version": 1, "expression": "a * 2" }
            }
        },
        "required": ["a", "b"],
        "additionalProperties": false
    });

    let parsed = engine.parse(&schema).unwrap();
    let mut ids: Vec<NodeId> = parsed.root.walk().map(|node| node.id()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    assert_eq!(parsed.node_count, 3);

    let formula_node = parsed.root.child("b").expect("child b");
    assert_eq!(parsed.pending_formulas.len(), 1);
    assert_eq!(parsed.pending_formulas[0].node_id, formula_node.id());
    assert_eq!(parsed.pending_formulas[0].expression, "a * 2");

    let again = engine.parse(&schema).unwrap();
    assert_eq!(again.root.id(), parsed.root.id());
}

#[test]
fn nodes_are_reachable_by_path() {
    let engine = SchemaEngine::default();
    let schema = json!({
        "type": "object",
        "properties": {
            "tags": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": { "label": { "type": "string", "default": "" } },
                    "required": ["label"],
                    "additionalProperties": false
                }
            }
        },
        "required": ["tags"],
        "additionalProperties": false
    });

    let parsed = engine.parse(&schema).unwrap();
    let path: Path = "tags[*].label".parse().unwrap();
    let label = parsed.root.find(&path).expect("label node");
    assert_eq!(label.node_type(), SchemaType::String);
    assert!(label.capabilities().is_primitive);
    assert_eq!(
        path.as_schema_pointer(),
        "/properties/tags/items/properties/label"
    );

    let tags = parsed.root.child("tags").expect("tags node");
    assert!(matches!(tags.kind(), NodeKind::Array { items: Some(_) }));
    assert!(tags.capabilities().has_items);
}

#[test]
fn ref_schema_is_claimed_by_ref_descriptor() {
    let engine = SchemaEngine::default();
    let schema = json!({ "$ref": "urn:jsonschema:file:1.0.0", "description": "Avatar" });
    let parsed = engine.parse(&schema).unwrap();
    assert_eq!(parsed.root.node_type(), SchemaType::Ref);
    assert_eq!(parsed.root.reference(), Some("urn:jsonschema:file:1.0.0"));
    assert_eq!(engine.serialize(&parsed.root).unwrap(), schema);
}

#[test]
fn unclaimed_schema_is_rejected() {
    let engine = SchemaEngine::default();
    let schema = json!({
        "type": "object",
        "properties": { "mystery": { "type": "integer" } },
        "required": ["mystery"],
        "additionalProperties": false
    });
    let report = engine.parse(&schema).expect_err("integer is not a registered type");
    assert!(matches!(
        report.current_context(),
        Error::UnsupportedSchema(message) if message.contains("mystery")
    ));
}
