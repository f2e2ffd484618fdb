//! Position (seat map) rules: floors, occupancy statuses, grid cells and the
//! service color palette.

use crate::catalog::{validate_choice, validate_optional_choice, validate_required_text};
use crate::error::CoreError;

/// Maximum length of a position name.
pub const MAX_NAME_LEN: usize = 100;

pub const FLOORS: &[&str] = &["PISO1", "PISO2", "PISO3", "PISO4", "TORRE1"];

pub const STATUS_AVAILABLE: &str = "disponible";
pub const STATUS_OCCUPIED: &str = "ocupado";
pub const STATUS_RESERVED: &str = "reservado";
pub const STATUS_INACTIVE: &str = "inactivo";

pub const POSITION_STATUSES: &[&str] = &[
    STATUS_AVAILABLE,
    STATUS_OCCUPIED,
    STATUS_RESERVED,
    STATUS_INACTIVE,
];

/// Color used when a position has no service or the service is not in the
/// palette.
pub const DEFAULT_COLOR: &str = "#B0BEC5";

/// Service name (or analytic code) to seat color.
const SERVICE_PALETTE: &[(&str, &str)] = &[
    ("530001", "#0094FF"),
    ("530013", "#00FF00"),
    ("530014", "#FF9900"),
    ("152001", "#9900FF"),
    ("320026", "#6600CC"),
    ("221003", "#FFD700"),
    ("390001", "#008080"),
    ("153001", "#FF66B2"),
    ("269001", "#FF0000"),
    ("186020", "#FF4500"),
    ("Desarrollo", "#FF0000"),
    ("Soporte", "#8B0000"),
    ("Selección", "#808000"),
    ("Leroy Merli", "#8A2BE2"),
];

/// Resolve the seat color for a position given its service name.
pub fn color_for_service(service_name: Option<&str>) -> &'static str {
    service_name
        .and_then(|name| {
            SERVICE_PALETTE
                .iter()
                .find(|(key, _)| *key == name)
                .map(|(_, color)| *color)
        })
        .unwrap_or(DEFAULT_COLOR)
}

/// Validate a spreadsheet-style grid cell: row is 1-based, column is letters.
pub fn validate_grid_cell(row: Option<i32>, column: Option<&str>) -> Result<(), CoreError> {
    if let Some(row) = row {
        if row < 1 {
            return Err(CoreError::Validation(
                "grid_row must be a positive number".to_string(),
            ));
        }
    }
    if let Some(column) = column {
        if column.is_empty() || !column.chars().all(|c| c.is_alphabetic()) {
            return Err(CoreError::Validation(
                "grid_column must contain only letters".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate a new position's name, floor, status and grid cell.
pub fn validate_position(
    name: &str,
    floor: &str,
    status: Option<&str>,
    grid_row: Option<i32>,
    grid_column: Option<&str>,
) -> Result<(), CoreError> {
    validate_required_text("name", name, MAX_NAME_LEN)?;
    validate_choice("floor", floor, FLOORS)?;
    validate_optional_choice("status", status, POSITION_STATUSES)?;
    validate_grid_cell(grid_row, grid_column)
}
