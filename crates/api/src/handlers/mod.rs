pub mod dashboard;
pub mod devices;
pub mod movements;
