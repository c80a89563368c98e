pub mod activity_field;
pub mod appointment;
pub mod backup;
pub mod client;
pub mod collaborator;
pub mod service;
pub mod setting;
pub mod slot;
pub mod visit;
