//! Device tracking pipeline.
//!
//! One explicit, ordered pass replaces the save hooks of a classic ORM: the
//! caller reads the prior state, persists the device, then asks
//! [`on_device_updated`] what audit records the save produces. The returned
//! [`AuditPlan`] is pure data; persisting it is the caller's job.
//!
//! Fan-out per save:
//!
//! ```text
//! position changed?  --yes-->  MovementDraft + HistoryDraft(movement_registered)
//! other fields diff? --yes-->  HistoryDraft(field_modified)
//! ```
//!
//! Both branches are evaluated independently and never merged, so a save that
//! changes the position and another field yields two history entries. The
//! position column and the columns derived from it belong to the movement
//! branch and are left out of the field diff.

use serde_json::Value;

use crate::diff::detect_changes;
use crate::directory::{RoleDirectory, UserRef};
use crate::error::CoreError;
use crate::history::{self, HistoryDraft};
use crate::movement::{
    self, check_location_categories, location_label, observation_or_default, position_changed,
    DeviceIdentity, MovementDraft, PositionRef,
};
use crate::types::DbId;

/// Device columns owned by the movement branch.
pub const POSITION_FIELDS: &[&str] = &["position_id", "floor"];

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Knobs that differ between deployments of the inventory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingPolicy {
    /// Label used for a missing position or responsible party.
    pub unknown_label: String,
    /// Record a movement when a device is taken off its position.
    pub record_unassignment: bool,
    /// Reject direct movements whose origin and destination share a location
    /// category.
    pub enforce_location_guard: bool,
}

impl Default for TrackingPolicy {
    fn default() -> Self {
        Self {
            unknown_label: movement::UNKNOWN_LABEL.to_string(),
            record_unassignment: true,
            enforce_location_guard: true,
        }
    }
}

// ---------------------------------------------------------------------------
// Inputs / outputs
// ---------------------------------------------------------------------------

/// Everything the pipeline needs to know about one device update.
#[derive(Debug, Clone)]
pub struct DeviceUpdate<'a> {
    pub device: &'a DeviceIdentity,
    /// Assigned user after the save.
    pub assigned_user_id: Option<DbId>,
    /// Row snapshot read before the save. `None` if the row could not be read.
    pub prior_snapshot: Option<&'a Value>,
    /// Row snapshot after the save.
    pub current_snapshot: &'a Value,
    /// Position read by an independent lookup before the save.
    pub previous_position: Option<&'a PositionRef>,
    /// Position after the save.
    pub new_position: Option<&'a PositionRef>,
    /// Caller-supplied movement observation.
    pub observation: Option<&'a str>,
}

/// Audit records produced by one save, in write order.
///
/// `movement_error` is set when the movement branch could not be planned; the
/// field branch is planned regardless.
#[derive(Debug, Default)]
pub struct AuditPlan {
    pub movement: Option<MovementDraft>,
    pub history: Vec<HistoryDraft>,
    pub movement_error: Option<CoreError>,
}

impl AuditPlan {
    pub fn is_empty(&self) -> bool {
        self.movement.is_none() && self.history.is_empty()
    }
}

/// A caller-initiated movement (not position driven).
#[derive(Debug, Clone)]
pub struct ManualMovement<'a> {
    pub device: &'a DeviceIdentity,
    pub responsible: Option<UserRef>,
    pub origin: &'a str,
    pub destination: &'a str,
    pub observation: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Pipeline
// ---------------------------------------------------------------------------

/// Creation is not an auditable change.
pub fn on_device_created() -> AuditPlan {
    AuditPlan::default()
}

/// Compute the audit records for a device update.
///
/// Never fails as a whole: a directory error while resolving the movement's
/// responsible party drops the movement and is reported in
/// [`AuditPlan::movement_error`], while the field history is still planned.
pub async fn on_device_updated<D: RoleDirectory>(
    update: &DeviceUpdate<'_>,
    directory: &D,
    policy: &TrackingPolicy,
) -> AuditPlan {
    let diff = detect_changes(
        update.prior_snapshot,
        update.current_snapshot,
        POSITION_FIELDS,
    );
    let field_entry = history::for_field_diff(update.device, update.assigned_user_id, &diff);

    let mut plan = AuditPlan::default();
    match plan_position_movement(update, directory, policy).await {
        Ok(Some(movement)) => {
            plan.history
                .push(history::for_movement(update.device, &movement, &policy.unknown_label));
            plan.movement = Some(movement);
        }
        Ok(None) => {}
        Err(e) => plan.movement_error = Some(e),
    }
    plan.history.extend(field_entry);

    plan
}

/// Movement recorder step. `None` when the position did not change, or when
/// the device was unassigned and the policy skips unassignments.
async fn plan_position_movement<D: RoleDirectory>(
    update: &DeviceUpdate<'_>,
    directory: &D,
    policy: &TrackingPolicy,
) -> Result<Option<MovementDraft>, CoreError> {
    if !position_changed(update.previous_position, update.new_position) {
        return Ok(None);
    }
    if update.new_position.is_none() && !policy.record_unassignment {
        return Ok(None);
    }

    let origin = location_label(update.previous_position, &policy.unknown_label);
    let destination = location_label(update.new_position, &policy.unknown_label);
    let responsible =
        movement::resolve_responsible(directory, update.assigned_user_id, update.new_position)
            .await?;
    let observation = observation_or_default(
        update.observation,
        update.device,
        &origin,
        &destination,
        responsible.as_ref(),
        &policy.unknown_label,
    );

    Ok(Some(MovementDraft {
        device_id: update.device.id,
        responsible,
        origin,
        destination,
        observation,
    }))
}

/// Validate a caller-initiated movement and derive its history entry.
///
/// The location-category guard only runs here: position-driven movements
/// compare position identity and never reach it.
pub fn plan_manual_movement(
    input: &ManualMovement<'_>,
    policy: &TrackingPolicy,
) -> Result<(MovementDraft, HistoryDraft), CoreError> {
    let origin = input.origin.trim();
    let destination = input.destination.trim();
    if origin.is_empty() || destination.is_empty() {
        return Err(CoreError::Validation(
            "origin and destination must not be empty".to_string(),
        ));
    }
    if policy.enforce_location_guard {
        check_location_categories(origin, destination)?;
    }

    let observation = observation_or_default(
        input.observation,
        input.device,
        origin,
        destination,
        input.responsible.as_ref(),
        &policy.unknown_label,
    );
    let movement = MovementDraft {
        device_id: input.device.id,
        responsible: input.responsible.clone(),
        origin: origin.to_string(),
        destination: destination.to_string(),
        observation,
    };
    let entry = history::for_movement(input.device, &movement, &policy.unknown_label);
    Ok((movement, entry))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
