//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where rows are patched

pub mod dashboard;
pub mod device;
pub mod history;
pub mod movement;
pub mod position;
pub mod service;
pub mod site;
pub mod user;
