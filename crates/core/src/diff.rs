//! Field-level change detection between two snapshots of the same record.
//!
//! Snapshots are the `serde_json` serialization of the row, so every column
//! that the row type serializes takes part in the comparison. Comparison is
//! plain JSON equality; there is no per-field special casing beyond the
//! [`EXCLUDED_FIELDS`] list.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Columns never reported as changes: the primary key and write bookkeeping.
pub const EXCLUDED_FIELDS: &[&str] = &["id", "created_at", "updated_at"];

/// The before/after pair for one changed field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub before: Value,
    pub after: Value,
}

/// Changed fields keyed by column name, in stable (sorted) order.
pub type FieldDiff = BTreeMap<String, FieldChange>;

/// Compare two object snapshots and return every field whose value differs.
///
/// A field present on only one side is reported with `null` on the other.
/// Non-object inputs produce an empty diff.
pub fn diff_fields(before: &Value, after: &Value) -> FieldDiff {
    diff_fields_ignoring(before, after, &[])
}

/// [`diff_fields`] with additional columns left out of the comparison.
pub fn diff_fields_ignoring(before: &Value, after: &Value, ignored: &[&str]) -> FieldDiff {
    let (Value::Object(before), Value::Object(after)) = (before, after) else {
        return FieldDiff::new();
    };

    let mut diff = FieldDiff::new();
    let keys = before.keys().chain(after.keys());

    for key in keys {
        if EXCLUDED_FIELDS.contains(&key.as_str())
            || ignored.contains(&key.as_str())
            || diff.contains_key(key)
        {
            continue;
        }
        let old = before.get(key).unwrap_or(&Value::Null);
        let new = after.get(key).unwrap_or(&Value::Null);
        if old != new {
            diff.insert(
                key.clone(),
                FieldChange {
                    before: old.clone(),
                    after: new.clone(),
                },
            );
        }
    }

    diff
}

/// Change detection entry point.
///
/// `prior` is `None` when the record is being created or when its prior row
/// could not be read; both cases yield an empty diff.
pub fn detect_changes(prior: Option<&Value>, current: &Value, ignored: &[&str]) -> FieldDiff {
    match prior {
        Some(prior) => diff_fields_ignoring(prior, current, ignored),
        None => FieldDiff::new(),
    }
}

/// Serialize a diff into the JSON payload stored on history rows.
pub fn diff_to_json(diff: &FieldDiff) -> Value {
    // A BTreeMap of serializable values cannot fail to serialize.
    serde_json::to_value(diff).unwrap_or(Value::Null)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
