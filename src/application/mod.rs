//! Application Layer
//!
//! Use cases that orchestrate the domain through its ports.

mod rename_service;

pub use rename_service::RenameService;
