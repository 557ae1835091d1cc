//! BDD harness (cucumber-rs).
//!
//! This crate exists to keep scenario tests isolated from the production crates.
//! The document fixtures the scenarios start from live here.

use paintfix_types::schema::PAINTFIX_DOCUMENT_V1;
use serde_json::{Value, json};

fn solid(r: f32, g: f32, b: f32) -> Value {
    json!({ "type": "SOLID", "color": { "r": r, "g": g, "b": b } })
}

fn bound_solid(r: f32, g: f32, b: f32, variable: &str) -> Value {
    json!({
        "type": "SOLID",
        "color": { "r": r, "g": g, "b": b },
        "boundVariables": { "color": { "type": "VARIABLE_ALIAS", "id": variable } }
    })
}

fn document(selection: Vec<Value>) -> Value {
    json!({ "schema": PAINTFIX_DOCUMENT_V1, "selection": selection })
}

pub fn empty_document() -> Value {
    document(vec![])
}

/// A frame with a styled fill around a rectangle with a variable-bound fill
/// and a literal stroke.
pub fn card_document() -> Value {
    document(vec![json!({
        "id": "1:1",
        "type": "FRAME",
        "name": "Card",
        "fills": [solid(1.0, 1.0, 1.0)],
        "fillStyleId": "S:surface",
        "children": [{
            "id": "1:2",
            "type": "RECTANGLE",
            "name": "Icon/close",
            "fills": [bound_solid(0.0, 0.0, 0.0, "VariableID:1:7")],
            "strokes": [solid(1.0, 0.0, 0.0)]
        }]
    })])
}

/// `Icon/Logo` frame containing `bg` and `Icon/Logo copy`, all filled.
pub fn logo_document() -> Value {
    document(vec![json!({
        "id": "2:1",
        "type": "FRAME",
        "name": "Icon/Logo",
        "fills": [solid(0.9, 0.9, 0.9)],
        "children": [
            { "id": "2:2", "type": "RECTANGLE", "name": "bg", "fills": [solid(0.2, 0.2, 0.2)] },
            {
                "id": "2:3",
                "type": "RECTANGLE",
                "name": "Icon/Logo copy",
                "fills": [solid(0.5, 0.5, 0.5)]
            }
        ]
    })])
}

/// Text whose first five characters use style `s1` and whose last five are
/// filled with a variable-bound paint.
pub fn heading_document() -> Value {
    document(vec![json!({
        "id": "3:1",
        "type": "TEXT",
        "name": "Heading",
        "fills": "MIXED",
        "textRanges": [
            { "start": 0, "end": 5, "fills": [solid(0.0, 0.0, 0.0)], "fillStyleId": "s1" },
            { "start": 5, "end": 10, "fills": [bound_solid(1.0, 0.0, 0.431, "VariableID:5:1")] }
        ]
    })])
}

/// Depth-first search for the first node called `name`.
pub fn find_node<'a>(nodes: &'a Value, name: &str) -> Option<&'a Value> {
    nodes.as_array()?.iter().find_map(|node| {
        if node["name"] == name {
            Some(node)
        } else {
            find_node(&node["children"], name)
        }
    })
}

/// Length of a paint or effect array; absent means empty.
pub fn entry_count(value: &Value) -> usize {
    value.as_array().map_or(0, Vec::len)
}
