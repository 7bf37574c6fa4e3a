// src/domain/audit/diff_tests.rs
use crate::domain::audit::diff::diff;
use serde_json::{Map, Value, json};

fn map(value: Value) -> Map<String, Value> {
    value.as_object().expect("object literal").clone()
}

#[test]
fn unchanged_keys_are_not_recorded() {
    let old = map(json!({"a": 1, "b": 2}));
    let new = map(json!({"a": 1, "b": 3}));

    let changed = diff(Some(&old), Some(&new));

    assert_eq!(changed.len(), 1);
    let b = changed.get("b").expect("b changed");
    assert_eq!(b.old, Some(json!(2)));
    assert_eq!(b.new, Some(json!(3)));
}

#[test]
fn missing_old_snapshot_records_every_new_key_as_addition() {
    let new = map(json!({"a": 1, "nested": {"x": true}}));

    let changed = diff(None, Some(&new));

    assert_eq!(changed.len(), 2);
    let a = changed.get("a").expect("a added");
    assert_eq!(a.old, None);
    assert_eq!(a.new, Some(json!(1)));
    let nested = changed.get("nested").expect("nested added");
    assert_eq!(nested.new, Some(json!({"x": true})));
}

#[test]
fn removed_keys_record_only_an_old_side() {
    let old = map(json!({"gone": "yes", "kept": 1}));
    let new = map(json!({"kept": 1}));

    let changed = diff(Some(&old), Some(&new));

    assert_eq!(changed.len(), 1);
    let gone = changed.get("gone").expect("gone removed");
    assert_eq!(gone.old, Some(json!("yes")));
    assert_eq!(gone.new, None);
}

#[test]
fn explicit_null_differs_from_absent_key() {
    let old = map(json!({"a": null}));
    let new = map(json!({}));

    let changed = diff(Some(&old), Some(&new));

    let a = changed.get("a").expect("a changed");
    assert_eq!(a.old, Some(Value::Null));
    assert_eq!(a.new, None);
}

#[test]
fn identical_snapshots_produce_no_changes() {
    let snapshot = map(json!({"a": 1, "b": {"c": [1, 2]}}));

    assert!(diff(Some(&snapshot), Some(&snapshot)).is_empty());
    assert!(diff(None, None).is_empty());
}
