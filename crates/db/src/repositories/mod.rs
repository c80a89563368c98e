//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that
//! accept `&SqlitePool` as the first argument. Multi-statement writes run
//! inside a single transaction.

pub mod activity_field_repo;
pub mod appointment_repo;
pub mod backup_repo;
pub mod client_repo;
pub mod collaborator_repo;
pub mod service_repo;
pub mod setting_repo;
pub mod visit_repo;

pub use activity_field_repo::ActivityFieldRepo;
pub use appointment_repo::AppointmentRepo;
pub use backup_repo::BackupRepo;
pub use client_repo::ClientRepo;
pub use collaborator_repo::CollaboratorRepo;
pub use service_repo::ServiceRepo;
pub use setting_repo::SettingRepo;
pub use visit_repo::VisitRepo;
