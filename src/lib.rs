//! node-renamer Library
//!
//! This module exposes the node-renamer components for use in integration
//! tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use adapters::inbound::{router, AppState, HttpServer};
pub use adapters::outbound::{DohHostResolver, HttpGeoResolver, HttpSubscriptionFetcher, ResolutionCache};
pub use application::RenameService;
pub use config::load_config;
pub use domain::entities::{DisplayOptions, DnsAnswer, GeoInfo};
pub use domain::ports::{GeoResolver, HostResolver, SubscriptionFetcher};
pub use domain::services::{format_name, ParsedLink, Rewrite};
