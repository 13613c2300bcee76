//! CLI command implementations.

pub mod build;
pub mod clean;
pub mod doctor;
pub mod init;
pub mod platform;
pub mod tables;
pub mod transform;
pub mod update;
