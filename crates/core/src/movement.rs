//! Movement recording: location labels, responsible-party resolution,
//! observation text and the location-category guard.

use serde::Serialize;

use crate::catalog::LOCATION_CATEGORIES;
use crate::directory::{RoleDirectory, UserRef};
use crate::error::CoreError;
use crate::roles::ROLE_ADMIN;
use crate::types::DbId;

/// Label used for a missing position or a missing responsible party.
pub const UNKNOWN_LABEL: &str = "Desconocido";

/// The identifying attributes of a device that appear in audit text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceIdentity {
    pub id: DbId,
    pub serial: String,
    pub manufacturer: String,
    pub model: String,
}

/// The parts of a position the recorder needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PositionRef {
    pub id: DbId,
    pub name: String,
    pub site_id: DbId,
}

/// A movement ready to be persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovementDraft {
    pub device_id: DbId,
    pub responsible: Option<UserRef>,
    pub origin: String,
    pub destination: String,
    pub observation: String,
}

impl MovementDraft {
    pub fn responsible_id(&self) -> Option<DbId> {
        self.responsible.as_ref().map(|u| u.id)
    }
}

/// Label for a position, or `unknown` when there is none.
pub fn location_label(position: Option<&PositionRef>, unknown: &str) -> String {
    position
        .map(|p| p.name.clone())
        .unwrap_or_else(|| unknown.to_string())
}

/// Whether the device's position reference changed. Compares identity only.
pub fn position_changed(previous: Option<&PositionRef>, new: Option<&PositionRef>) -> bool {
    previous.map(|p| p.id) != new.map(|p| p.id)
}

/// Resolve who is accountable for a movement.
///
/// First match wins:
/// 1. the device's assigned user (if the user still exists);
/// 2. the first user linked to the destination position's site;
/// 3. the first admin;
/// 4. nobody.
pub async fn resolve_responsible<D: RoleDirectory>(
    directory: &D,
    assigned_user_id: Option<DbId>,
    destination: Option<&PositionRef>,
) -> Result<Option<UserRef>, CoreError> {
    if let Some(user_id) = assigned_user_id {
        if let Some(user) = directory.find_user(user_id).await? {
            return Ok(Some(user));
        }
    }

    if let Some(position) = destination {
        if let Some(user) = directory.first_user_for_site(position.site_id).await? {
            return Ok(Some(user));
        }
    }

    directory.first_user_with_role(ROLE_ADMIN).await
}

/// Default observation text for a movement.
pub fn synthesize_observation(
    device: &DeviceIdentity,
    origin: &str,
    destination: &str,
    responsible: Option<&UserRef>,
    unknown: &str,
) -> String {
    let who = responsible.map_or(unknown, |u| u.display_name.as_str());
    format!(
        "Dispositivo {} ({} {}) movido de {origin} a {destination} por {who}.",
        device.serial, device.manufacturer, device.model
    )
}

/// Reject a movement whose origin and destination are the same location
/// category (`CASA`, `CLIENTE`, `SEDE`, `OTRO`).
///
/// Labels that are not category codes, such as position names, are never
/// rejected.
pub fn check_location_categories(origin: &str, destination: &str) -> Result<(), CoreError> {
    if origin == destination && LOCATION_CATEGORIES.contains(&origin) {
        return Err(CoreError::Validation(
            "Origin and destination locations must differ".to_string(),
        ));
    }
    Ok(())
}

/// Pick the caller's observation if it has content, otherwise synthesize one.
pub fn observation_or_default(
    supplied: Option<&str>,
    device: &DeviceIdentity,
    origin: &str,
    destination: &str,
    responsible: Option<&UserRef>,
    unknown: &str,
) -> String {
    match supplied.map(str::trim) {
        Some(text) if !text.is_empty() => text.to_string(),
        _ => synthesize_observation(device, origin, destination, responsible, unknown),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
