//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod dashboard_repo;
pub mod device_repo;
pub mod history_repo;
pub mod movement_repo;
pub mod position_repo;
pub mod service_repo;
pub mod site_repo;
pub mod user_repo;

pub use dashboard_repo::DashboardRepo;
pub use device_repo::DeviceRepo;
pub use history_repo::HistoryRepo;
pub use movement_repo::MovementRepo;
pub use position_repo::PositionRepo;
pub use service_repo::ServiceRepo;
pub use site_repo::SiteRepo;
pub use user_repo::UserRepo;
