//! DashMap Resolution Cache
//!
//! Process-lifetime memo tables for DNS answers and geolocation results.

use crate::domain::entities::{DnsAnswer, GeoInfo};
use dashmap::DashMap;

/// Two independent memo tables: `hostname -> DnsAnswer` and `ip -> GeoInfo`.
///
/// Keys are matched exactly as given. Failed lookups are stored as their
/// sentinel values and served from the cache like any other entry. There is
/// no eviction and no TTL. Values are pure functions of their key, so
/// concurrent inserts for the same key need no coordination.
#[derive(Debug, Default)]
pub struct ResolutionCache {
    hosts: DashMap<String, DnsAnswer>,
    geo: DashMap<String, GeoInfo>,
}

impl ResolutionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn host(&self, hostname: &str) -> Option<DnsAnswer> {
        self.hosts.get(hostname).map(|e| e.value().clone())
    }

    pub fn insert_host(&self, hostname: &str, answer: DnsAnswer) {
        self.hosts.insert(hostname.to_string(), answer);
    }

    pub fn geo(&self, ip: &str) -> Option<GeoInfo> {
        self.geo.get(ip).map(|e| e.value().clone())
    }

    pub fn insert_geo(&self, ip: &str, info: GeoInfo) {
        self.geo.insert(ip.to_string(), info);
    }

    /// Number of cached hostnames.
    pub fn host_entries(&self) -> usize {
        self.hosts.len()
    }

    /// Number of cached IP addresses.
    pub fn geo_entries(&self) -> usize {
        self.geo.len()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_empty_on_creation() {
        let cache = ResolutionCache::new();
        assert_eq!(cache.host_entries(), 0);
        assert_eq!(cache.geo_entries(), 0);
        assert!(cache.host("example.com").is_none());
        assert!(cache.geo("1.1.1.1").is_none());
    }

    #[test]
    fn test_host_roundtrip() {
        let cache = ResolutionCache::new();
        cache.insert_host("example.com", DnsAnswer::new("93.184.216.34", "aliyun"));

        let cached = cache.host("example.com").unwrap();
        assert_eq!(cached.ip, "93.184.216.34");
        assert_eq!(cached.source, "aliyun");
        assert_eq!(cache.host_entries(), 1);
    }

    #[test]
    fn test_negative_entries_are_kept() {
        let cache = ResolutionCache::new();
        cache.insert_host("nx.invalid", DnsAnswer::unresolved());
        cache.insert_geo("unknown", GeoInfo::unknown());

        assert_eq!(cache.host("nx.invalid"), Some(DnsAnswer::unresolved()));
        assert_eq!(cache.geo("unknown"), Some(GeoInfo::unknown()));
    }

    #[test]
    fn test_keys_are_exact_match() {
        let cache = ResolutionCache::new();
        cache.insert_host("Example.com", DnsAnswer::new("1.1.1.1", "aliyun"));
        assert!(cache.host("example.com").is_none());
    }

    #[test]
    fn test_tables_are_independent() {
        let cache = ResolutionCache::new();
        cache.insert_geo("1.1.1.1", GeoInfo::new("AU", "Cloudflare"));
        assert!(cache.host("1.1.1.1").is_none());
        assert_eq!(cache.geo_entries(), 1);
        assert_eq!(cache.host_entries(), 0);
    }

    #[test]
    fn test_concurrent_writers_same_key() {
        let cache = Arc::new(ResolutionCache::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let cache = cache.clone();
                std::thread::spawn(move || {
                    cache.insert_geo("8.8.8.8", GeoInfo::new("US", "Google"));
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(cache.geo_entries(), 1);
        assert_eq!(cache.geo("8.8.8.8"), Some(GeoInfo::new("US", "Google")));
    }
}
