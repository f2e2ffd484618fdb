//! Device catalogue: enumerated column values and their validators.
//!
//! Every enumerated device attribute is stored as its upper-case code. The
//! lists below are the single source of truth for those codes; the database
//! stores plain text and relies on these validators at the write boundary.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Device type / manufacturer / state
// ---------------------------------------------------------------------------

pub const DEVICE_TYPES: &[&str] = &["COMPUTADOR", "DESKTOP", "MONITOR", "TABLET", "MOVIL"];

pub const MANUFACTURERS: &[&str] = &["DELL", "HP", "LENOVO", "APPLE", "SAMSUNG"];

/// Device condition codes: in repair, good, lost/stolen, purchased, bad.
pub const DEVICE_STATES: &[&str] = &["REPARAR", "BUENO", "PERDIDO", "COMPRADO", "MALO"];

pub const REGIMES: &[&str] = &["ECCC", "ECOL", "CNC"];

// ---------------------------------------------------------------------------
// Hardware descriptors
// ---------------------------------------------------------------------------

pub const DISK_TYPES: &[&str] = &["HDD", "SSD", "HYBRID"];

pub const DISK_CAPACITIES: &[&str] = &["120GB", "250GB", "500GB", "1TB", "2TB", "4TB", "8TB"];

pub const RAM_TYPES: &[&str] = &["DDR", "DDR2", "DDR3", "DDR4", "LPDDR4", "LPDDR5"];

pub const RAM_CAPACITIES: &[&str] = &["2GB", "4GB", "8GB", "16GB", "32GB", "64GB"];

pub const OPERATING_SYSTEMS: &[&str] = &["NA", "SERVER", "WIN10", "WIN11", "WIN7", "VACIO", "MACOS"];

pub const PROCESSORS: &[&str] = &[
    "AMD_A12",
    "AMD_A8_5500B",
    "AMD_RYZEN",
    "AMD_RYZEN_3_2200GE",
    "I3_2100",
    "I3_6200U",
    "I5_4430S",
    "I5_4460",
    "I5_4590",
    "I5_4600",
    "I5_4670",
    "I5_4750",
    "I5_6500",
    "I5_6500T",
    "I5_7500",
    "I5_8400T",
    "I5_8500",
    "I5_10TH",
    "I5_11TH",
    "I5_12TH",
    "I7_8TH",
    "I7_12TH",
    "I7_13TH",
    "I7_7TH",
    "I7_8565U",
    "CORE_2_DUO_E7400",
    "CORE_2_DUO_E7500",
];

// ---------------------------------------------------------------------------
// Location / ownership
// ---------------------------------------------------------------------------

/// Coarse location categories (home, client, site, other).
pub const LOCATION_CATEGORIES: &[&str] = &["CASA", "CLIENTE", "SEDE", "OTRO"];

pub const OWNERSHIP_STATUSES: &[&str] = &["PROPIO", "ARRENDADO", "DONADO", "OTRO"];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MAX_SERIAL_LEN: usize = 50;
pub const MAX_MODEL_LEN: usize = 50;
pub const MAX_ASSET_TAG_LEN: usize = 50;

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

/// Check that `value` is one of `allowed` for the named field.
pub fn validate_choice(field: &str, value: &str, allowed: &[&str]) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid value for {field}: '{value}'. Valid values: {}",
            allowed.join(", ")
        )))
    }
}

/// Like [`validate_choice`] but accepts `None`.
pub fn validate_optional_choice(
    field: &str,
    value: Option<&str>,
    allowed: &[&str],
) -> Result<(), CoreError> {
    match value {
        Some(v) => validate_choice(field, v, allowed),
        None => Ok(()),
    }
}

/// Validate a required, length-bounded text field. Whitespace-only is empty.
pub fn validate_required_text(field: &str, value: &str, max_len: usize) -> Result<(), CoreError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(CoreError::Validation(format!("{field} must not be empty")));
    }
    if trimmed.chars().count() > max_len {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// The enumerated attributes of a device write, borrowed for validation.
///
/// Both the create and the update DTOs project onto this so the same rules
/// apply on either path. `None` means "not set" (create) or "unchanged"
/// (update).
#[derive(Debug, Default, Clone, Copy)]
pub struct DeviceChoices<'a> {
    pub device_type: Option<&'a str>,
    pub manufacturer: Option<&'a str>,
    pub state: Option<&'a str>,
    pub regime: Option<&'a str>,
    pub disk_type: Option<&'a str>,
    pub disk_capacity: Option<&'a str>,
    pub ram_type: Option<&'a str>,
    pub ram_capacity: Option<&'a str>,
    pub operating_system: Option<&'a str>,
    pub processor: Option<&'a str>,
    pub location_category: Option<&'a str>,
    pub ownership: Option<&'a str>,
}

/// Validate every enumerated attribute that is present.
pub fn validate_device_choices(choices: &DeviceChoices<'_>) -> Result<(), CoreError> {
    validate_optional_choice("device_type", choices.device_type, DEVICE_TYPES)?;
    validate_optional_choice("manufacturer", choices.manufacturer, MANUFACTURERS)?;
    validate_optional_choice("state", choices.state, DEVICE_STATES)?;
    validate_optional_choice("regime", choices.regime, REGIMES)?;
    validate_optional_choice("disk_type", choices.disk_type, DISK_TYPES)?;
    validate_optional_choice("disk_capacity", choices.disk_capacity, DISK_CAPACITIES)?;
    validate_optional_choice("ram_type", choices.ram_type, RAM_TYPES)?;
    validate_optional_choice("ram_capacity", choices.ram_capacity, RAM_CAPACITIES)?;
    validate_optional_choice(
        "operating_system",
        choices.operating_system,
        OPERATING_SYSTEMS,
    )?;
    validate_optional_choice("processor", choices.processor, PROCESSORS)?;
    validate_optional_choice(
        "location_category",
        choices.location_category,
        LOCATION_CATEGORIES,
    )?;
    validate_optional_choice("ownership", choices.ownership, OWNERSHIP_STATUSES)?;
    Ok(())
}

/// Validate the identity fields required to catalogue a new device.
pub fn validate_device_identity(serial: &str, model: &str) -> Result<(), CoreError> {
    validate_required_text("serial", serial, MAX_SERIAL_LEN)?;
    validate_required_text("model", model, MAX_MODEL_LEN)?;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
