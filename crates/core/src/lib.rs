//! Domain logic for the sedes device inventory.
//!
//! Everything in this crate is free of database dependencies: catalogue
//! constants, validators, the change detector, the movement and history
//! recorders, and the tracking pipeline that ties them together. Lookups the
//! pipeline needs (users, roles, site links) come in through the
//! [`directory::RoleDirectory`] capability.

pub mod catalog;
pub mod diff;
pub mod directory;
pub mod error;
pub mod history;
pub mod movement;
pub mod position;
pub mod roles;
pub mod tracking;
pub mod types;
pub mod user;
