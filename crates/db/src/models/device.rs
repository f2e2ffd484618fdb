//! Device entity model and DTOs.

use sedes_core::catalog::DeviceChoices;
use sedes_core::movement::DeviceIdentity;
use sedes_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `devices` table.
///
/// The serialized form of this struct is the snapshot the change detector
/// compares, so every field here is an auditable column.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Device {
    pub id: DbId,
    pub device_type: String,
    pub manufacturer: String,
    pub model: String,
    pub serial: String,
    pub asset_tag: Option<String>,
    pub state: Option<String>,
    pub company_name: Option<String>,
    pub regime: Option<String>,
    pub disk_type: Option<String>,
    pub disk_capacity: Option<String>,
    pub ram_type: Option<String>,
    pub ram_capacity: Option<String>,
    pub operating_system: Option<String>,
    pub processor: Option<String>,
    pub ownership: Option<String>,
    pub location_category: Option<String>,
    pub supplier: Option<String>,
    pub available: bool,
    /// Copied from the assigned position.
    pub floor: Option<String>,
    /// Copied from the assigned service.
    pub analytic_code: Option<String>,
    pub position_id: Option<DbId>,
    pub assigned_user_id: Option<DbId>,
    pub site_id: Option<DbId>,
    pub service_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Device {
    pub fn identity(&self) -> DeviceIdentity {
        DeviceIdentity {
            id: self.id,
            serial: self.serial.clone(),
            manufacturer: self.manufacturer.clone(),
            model: self.model.clone(),
        }
    }
}

/// DTO for creating a new device.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDevice {
    pub device_type: String,
    pub manufacturer: String,
    pub model: String,
    pub serial: String,
    pub asset_tag: Option<String>,
    pub state: Option<String>,
    pub company_name: Option<String>,
    pub regime: Option<String>,
    pub disk_type: Option<String>,
    pub disk_capacity: Option<String>,
    pub ram_type: Option<String>,
    pub ram_capacity: Option<String>,
    pub operating_system: Option<String>,
    pub processor: Option<String>,
    pub ownership: Option<String>,
    pub location_category: Option<String>,
    pub supplier: Option<String>,
    /// Defaults to `true` if omitted.
    pub available: Option<bool>,
    pub position_id: Option<DbId>,
    pub assigned_user_id: Option<DbId>,
    pub site_id: Option<DbId>,
    pub service_id: Option<DbId>,
}

impl CreateDevice {
    pub fn choices(&self) -> DeviceChoices<'_> {
        DeviceChoices {
            device_type: Some(&self.device_type),
            manufacturer: Some(&self.manufacturer),
            state: self.state.as_deref(),
            regime: self.regime.as_deref(),
            disk_type: self.disk_type.as_deref(),
            disk_capacity: self.disk_capacity.as_deref(),
            ram_type: self.ram_type.as_deref(),
            ram_capacity: self.ram_capacity.as_deref(),
            operating_system: self.operating_system.as_deref(),
            processor: self.processor.as_deref(),
            location_category: self.location_category.as_deref(),
            ownership: self.ownership.as_deref(),
        }
    }
}

/// DTO for updating an existing device. All fields are optional.
///
/// `serial` is the device's identity key and cannot be changed. Nullable
/// references are cleared with the `unassign_*` flags, since `None` means
/// "leave as is".
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDevice {
    pub device_type: Option<String>,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub asset_tag: Option<String>,
    pub state: Option<String>,
    pub company_name: Option<String>,
    pub regime: Option<String>,
    pub disk_type: Option<String>,
    pub disk_capacity: Option<String>,
    pub ram_type: Option<String>,
    pub ram_capacity: Option<String>,
    pub operating_system: Option<String>,
    pub processor: Option<String>,
    pub ownership: Option<String>,
    pub location_category: Option<String>,
    pub supplier: Option<String>,
    pub available: Option<bool>,
    pub position_id: Option<DbId>,
    pub assigned_user_id: Option<DbId>,
    pub site_id: Option<DbId>,
    pub service_id: Option<DbId>,
    /// Take the device off its position.
    pub unassign_position: Option<bool>,
    /// Clear the device's assigned user.
    pub unassign_user: Option<bool>,
    /// Movement observation used if this update moves the device. Not stored
    /// on the device row.
    pub observation: Option<String>,
}

impl UpdateDevice {
    pub fn choices(&self) -> DeviceChoices<'_> {
        DeviceChoices {
            device_type: self.device_type.as_deref(),
            manufacturer: self.manufacturer.as_deref(),
            state: self.state.as_deref(),
            regime: self.regime.as_deref(),
            disk_type: self.disk_type.as_deref(),
            disk_capacity: self.disk_capacity.as_deref(),
            ram_type: self.ram_type.as_deref(),
            ram_capacity: self.ram_capacity.as_deref(),
            operating_system: self.operating_system.as_deref(),
            processor: self.processor.as_deref(),
            location_category: self.location_category.as_deref(),
            ownership: self.ownership.as_deref(),
        }
    }
}
