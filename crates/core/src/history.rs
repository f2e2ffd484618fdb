//! History entry kinds and the text/payload written for each.

use serde::Serialize;
use serde_json::Value;

use crate::diff::{diff_to_json, FieldDiff};
use crate::error::CoreError;
use crate::movement::{DeviceIdentity, MovementDraft};
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Kind constants
// ---------------------------------------------------------------------------

pub const KIND_MOVEMENT_REGISTERED: &str = "movement_registered";
pub const KIND_FIELD_MODIFIED: &str = "field_modified";
pub const KIND_ASSIGNMENT_CHANGED: &str = "assignment_changed";
pub const KIND_OTHER: &str = "other";

/// All valid history kinds. Must match the CHECK constraint on `history.kind`.
pub const VALID_KINDS: &[&str] = &[
    KIND_MOVEMENT_REGISTERED,
    KIND_FIELD_MODIFIED,
    KIND_ASSIGNMENT_CHANGED,
    KIND_OTHER,
];

/// Category tag of a history entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    MovementRegistered,
    FieldModified,
    AssignmentChanged,
    Other,
}

impl HistoryKind {
    /// Return the database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::MovementRegistered => KIND_MOVEMENT_REGISTERED,
            Self::FieldModified => KIND_FIELD_MODIFIED,
            Self::AssignmentChanged => KIND_ASSIGNMENT_CHANGED,
            Self::Other => KIND_OTHER,
        }
    }

    /// Parse from a string, returning an error for unknown kinds.
    pub fn from_str(s: &str) -> Result<Self, CoreError> {
        match s {
            KIND_MOVEMENT_REGISTERED => Ok(Self::MovementRegistered),
            KIND_FIELD_MODIFIED => Ok(Self::FieldModified),
            KIND_ASSIGNMENT_CHANGED => Ok(Self::AssignmentChanged),
            KIND_OTHER => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown history kind: '{other}'. Valid kinds: {}",
                VALID_KINDS.join(", ")
            ))),
        }
    }
}

impl std::fmt::Display for HistoryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Drafts
// ---------------------------------------------------------------------------

/// A history entry ready to be persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryDraft {
    pub device_id: DbId,
    pub user_id: Option<DbId>,
    pub kind: HistoryKind,
    pub description: String,
    pub changes: Option<Value>,
}

/// History entry for a newly created movement, attributed to its responsible
/// party.
pub fn for_movement(device: &DeviceIdentity, movement: &MovementDraft, unknown: &str) -> HistoryDraft {
    let who = movement
        .responsible
        .as_ref()
        .map_or(unknown, |u| u.display_name.as_str());
    let description = format!(
        "El dispositivo {} ({} {}) fue movido de {} a {} por {who}.",
        device.serial, device.manufacturer, device.model, movement.origin, movement.destination
    );
    HistoryDraft {
        device_id: device.id,
        user_id: movement.responsible_id(),
        kind: HistoryKind::MovementRegistered,
        description,
        changes: None,
    }
}

/// History entry for a field-level diff, attributed to the device's assigned
/// user. `None` when nothing changed.
pub fn for_field_diff(
    device: &DeviceIdentity,
    assigned_user_id: Option<DbId>,
    diff: &FieldDiff,
) -> Option<HistoryDraft> {
    if diff.is_empty() {
        return None;
    }
    let fields: Vec<&str> = diff.keys().map(String::as_str).collect();
    Some(HistoryDraft {
        device_id: device.id,
        user_id: assigned_user_id,
        kind: HistoryKind::FieldModified,
        description: format!("Campos modificados: {}.", fields.join(", ")),
        changes: Some(diff_to_json(diff)),
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
