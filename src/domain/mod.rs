//! Domain Layer
//!
//! Rename rules with no I/O: entities, address classification, name
//! formatting, link parsing and the outbound ports the application needs.

pub mod codec;
pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
