// src/domain/audit/diff.rs
use crate::domain::audit::entity::{ChangedFields, FieldChange};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Compute the field-level difference between two value snapshots.
///
/// Every key present in either snapshot whose value differs is recorded
/// with its old and new side. A key absent from one side is treated as a
/// distinguished missing value, so `{"a": null}` against `{}` still
/// produces a change for `"a"`. Pure function, no knowledge of how the
/// snapshots were obtained.
pub fn diff(
    old: Option<&Map<String, Value>>,
    new: Option<&Map<String, Value>>,
) -> ChangedFields {
    let mut keys: BTreeSet<&str> = BTreeSet::new();
    if let Some(old) = old {
        keys.extend(old.keys().map(String::as_str));
    }
    if let Some(new) = new {
        keys.extend(new.keys().map(String::as_str));
    }

    let mut changed = ChangedFields::new();
    for key in keys {
        let old_value = old.and_then(|m| m.get(key));
        let new_value = new.and_then(|m| m.get(key));
        if old_value != new_value {
            changed.insert(
                key.to_string(),
                FieldChange {
                    old: old_value.cloned(),
                    new: new_value.cloned(),
                },
            );
        }
    }
    changed
}
