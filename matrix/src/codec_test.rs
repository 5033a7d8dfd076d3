#![allow(clippy::float_cmp)]

use super::*;
use crate::coords::Position;

fn item(id: &str, title: &str, x: f64, y: f64) -> PriorityItem {
    PriorityItem { id: id.to_owned(), title: title.to_owned(), position: Position::new(x, y) }
}

#[test]
fn encode_writes_documented_shape() {
    let raw = encode(&[item("aB3", "Ship it", 120.0, 80.5)]).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(
        value,
        serde_json::json!([{ "id": "aB3", "title": "Ship it", "position": { "x": 120.0, "y": 80.5 } }])
    );
}

#[test]
fn encode_empty_list() {
    assert_eq!(encode(&[]).unwrap(), "[]");
}

#[test]
fn decode_restores_encoded_items() {
    let items = vec![item("a", "First", 1.0, 2.0), item("b", "Second", 300.25, 499.0)];
    let decoded = decode(&encode(&items).unwrap()).unwrap();
    assert_eq!(decoded, items);
}

#[test]
fn decode_preserves_order() {
    let raw = r#"[{"id":"z","title":"Z","position":{"x":0,"y":0}},{"id":"a","title":"A","position":{"x":1,"y":1}}]"#;
    let ids: Vec<String> = decode(raw).unwrap().into_iter().map(|i| i.id).collect();
    assert_eq!(ids, vec!["z", "a"]);
}

#[test]
fn decode_accepts_integer_coordinates() {
    let raw = r#"[{"id":"a","title":"A","position":{"x":10,"y":20}}]"#;
    let items = decode(raw).unwrap();
    assert_eq!(items[0].position, Position::new(10.0, 20.0));
}

#[test]
fn decode_ignores_unknown_fields() {
    let raw = r#"[{"id":"a","title":"A","icon":"star","position":{"x":1,"y":2}}]"#;
    assert_eq!(decode(raw).unwrap().len(), 1);
}

#[test]
fn decode_rejects_non_json() {
    let err = decode("not json {").unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn decode_rejects_object_root() {
    let err = decode(r#"{"id":"a"}"#).unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn decode_rejects_missing_position() {
    let err = decode(r#"[{"id":"a","title":"A"}]"#).unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn decode_rejects_missing_title() {
    let err = decode(r#"[{"id":"a","position":{"x":1,"y":2}}]"#).unwrap_err();
    assert!(matches!(err, CodecError::Json(_)));
}

#[test]
fn decode_rejects_empty_title() {
    let err = decode(r#"[{"id":"a","title":"  ","position":{"x":1,"y":2}}]"#).unwrap_err();
    assert!(matches!(err, CodecError::EmptyTitle { ref id } if id == "a"));
}

#[test]
fn decode_rejects_empty_id() {
    let raw = r#"[{"id":"a","title":"A","position":{"x":1,"y":2}},{"id":"","title":"B","position":{"x":1,"y":2}}]"#;
    let err = decode(raw).unwrap_err();
    assert!(matches!(err, CodecError::EmptyId { index: 1 }));
}

#[test]
fn decode_rejects_duplicate_ids() {
    let raw = r#"[{"id":"a","title":"A","position":{"x":1,"y":2}},{"id":"a","title":"B","position":{"x":3,"y":4}}]"#;
    let err = decode(raw).unwrap_err();
    assert!(matches!(err, CodecError::DuplicateId(ref id) if id == "a"));
}

#[test]
fn decode_empty_array_is_empty() {
    assert!(decode("[]").unwrap().is_empty());
}
