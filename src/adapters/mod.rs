//! Adapters Layer
//!
//! Inbound (HTTP shell) and outbound (resolvers, cache, fetcher) adapters.

pub mod inbound;
pub mod outbound;
