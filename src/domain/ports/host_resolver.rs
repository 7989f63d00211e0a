//! Host Resolver Port
//!
//! Defines the interface for turning node hostnames into IP addresses.

use crate::domain::entities::DnsAnswer;
use async_trait::async_trait;

/// Resolver for hostname to IP address.
///
/// Never fails: when no answer can be obtained the implementation returns
/// [`DnsAnswer::unresolved`].
#[async_trait]
pub trait HostResolver: Send + Sync {
    async fn resolve_host(&self, hostname: &str) -> DnsAnswer;
}
