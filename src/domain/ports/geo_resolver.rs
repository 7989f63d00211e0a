//! GeoIP Resolver Port
//!
//! Defines the interface for resolving IP addresses to geographic locations.

use crate::domain::entities::GeoInfo;
use async_trait::async_trait;

/// Resolver for IP address to country and organization.
///
/// This is an outbound port. Implementations may call remote IP-info
/// services or a local database; either way the call never fails and
/// missing fields come back as the unknown sentinels.
#[async_trait]
pub trait GeoResolver: Send + Sync {
    /// Resolve an IP address (as it appeared in the link) to geo information.
    async fn resolve_geo(&self, ip: &str) -> GeoInfo;
}
