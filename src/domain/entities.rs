//! Domain Entities - Core rename objects
//!
//! Resolution results and per-request display options. They carry no I/O
//! and are always fully populated once they leave a resolver.

use serde::{Deserialize, Serialize};

/// IP placeholder when no DNS provider produced an answer.
pub const UNRESOLVED_IP: &str = "unknown";
/// Source placeholder when no DNS provider produced an answer.
pub const UNRESOLVED_SOURCE: &str = "none";
/// Country placeholder when no geolocation provider knew the country.
pub const UNKNOWN_COUNTRY: &str = "Unknown Country";
/// Organization placeholder when no geolocation provider knew the org.
pub const UNKNOWN_ORG: &str = "Unknown";

/// Result of resolving a hostname to an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsAnswer {
    /// Resolved address, or [`UNRESOLVED_IP`]
    pub ip: String,
    /// Name of the provider that answered, or [`UNRESOLVED_SOURCE`]
    pub source: String,
}

impl DnsAnswer {
    pub fn new(ip: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            ip: ip.into(),
            source: source.into(),
        }
    }

    /// The sentinel answer stored when every provider failed.
    pub fn unresolved() -> Self {
        Self::new(UNRESOLVED_IP, UNRESOLVED_SOURCE)
    }

    pub fn is_resolved(&self) -> bool {
        self.ip != UNRESOLVED_IP
    }
}

/// Geographic information resolved from an IP address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeoInfo {
    /// Country code (ISO 3166-1 alpha-2), or [`UNKNOWN_COUNTRY`]
    pub country: String,
    /// Short organization / ASN holder name, or [`UNKNOWN_ORG`]
    pub org: String,
}

impl GeoInfo {
    pub fn new(country: impl Into<String>, org: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            org: org.into(),
        }
    }

    pub fn unknown() -> Self {
        Self::new(UNKNOWN_COUNTRY, UNKNOWN_ORG)
    }

    /// Build from partially known fields, filling gaps with the sentinels.
    pub fn from_parts(country: Option<String>, org: Option<String>) -> Self {
        Self {
            country: country.unwrap_or_else(|| UNKNOWN_COUNTRY.to_string()),
            org: org.unwrap_or_else(|| UNKNOWN_ORG.to_string()),
        }
    }
}

/// Which segments go into a rewritten node name.
///
/// Supplied per request, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DisplayOptions {
    pub use_flag: bool,
    pub use_suffix: bool,
    pub use_org: bool,
}

impl DisplayOptions {
    pub fn new(use_flag: bool, use_suffix: bool, use_org: bool) -> Self {
        Self {
            use_flag,
            use_suffix,
            use_org,
        }
    }

    /// Options used for single-link GET requests: flag and suffix, no org.
    pub fn single_link() -> Self {
        Self::new(true, true, false)
    }

    pub fn is_bare(&self) -> bool {
        !self.use_flag && !self.use_suffix && !self.use_org
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dns_answer_unresolved() {
        let answer = DnsAnswer::unresolved();
        assert_eq!(answer.ip, "unknown");
        assert_eq!(answer.source, "none");
        assert!(!answer.is_resolved());
    }

    #[test]
    fn test_dns_answer_resolved() {
        let answer = DnsAnswer::new("1.2.3.4", "aliyun");
        assert!(answer.is_resolved());
    }

    #[test]
    fn test_geo_sentinels_differ_from_dns_sentinel() {
        let geo = GeoInfo::unknown();
        assert_ne!(geo.country, UNRESOLVED_IP);
        assert_eq!(geo.org, "Unknown");
    }

    #[test]
    fn test_geo_from_parts_fills_missing() {
        let geo = GeoInfo::from_parts(Some("JP".to_string()), None);
        assert_eq!(geo, GeoInfo::new("JP", UNKNOWN_ORG));

        let geo = GeoInfo::from_parts(None, Some("Akamai".to_string()));
        assert_eq!(geo, GeoInfo::new(UNKNOWN_COUNTRY, "Akamai"));
    }

    #[test]
    fn test_display_options() {
        assert!(DisplayOptions::default().is_bare());
        let single = DisplayOptions::single_link();
        assert!(single.use_flag);
        assert!(single.use_suffix);
        assert!(!single.use_org);
        assert!(!single.is_bare());
    }
}
