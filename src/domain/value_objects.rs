//! Value Objects - Immutable domain primitives
//!
//! Node address classification and country-code flag rendering.

/// Glyph used when a country cannot be turned into a flag.
pub const PLACEHOLDER_FLAG: &str = "🏳";

/// Offset between an uppercase ASCII letter and its regional indicator symbol.
const REGIONAL_INDICATOR_OFFSET: u32 = 127397;

/// A node's server address, classified as a literal IP or a hostname.
///
/// Classification is a best-effort heuristic and not RFC-strict: anything
/// that contains a `:` is taken to be an IPv6 literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeAddress {
    /// Literal address, brackets removed
    Ip(String),
    /// Hostname that still needs DNS resolution
    Hostname(String),
}

impl NodeAddress {
    /// Classify a raw host string.
    ///
    /// # Examples
    /// ```
    /// use node_renamer::domain::value_objects::NodeAddress;
    ///
    /// assert_eq!(NodeAddress::classify("[2001:db8::1]"), NodeAddress::Ip("2001:db8::1".into()));
    /// assert_eq!(NodeAddress::classify("example.com"), NodeAddress::Hostname("example.com".into()));
    /// ```
    pub fn classify(address: &str) -> Self {
        let unwrapped = address
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .unwrap_or(address);

        if is_dotted_quad(unwrapped) || unwrapped.contains(':') {
            Self::Ip(unwrapped.to_string())
        } else {
            Self::Hostname(unwrapped.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Ip(s) | Self::Hostname(s) => s,
        }
    }

    pub fn is_ip(&self) -> bool {
        matches!(self, Self::Ip(_))
    }
}

/// Four dot-separated groups of ASCII digits. Octet ranges are not checked.
fn is_dotted_quad(s: &str) -> bool {
    let groups: Vec<&str> = s.split('.').collect();
    groups.len() == 4
        && groups
            .iter()
            .all(|g| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit()))
}

/// Country code as reported by a geolocation provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryCode<'a>(pub &'a str);

impl CountryCode<'_> {
    /// Flag emoji for a two-letter code, case-insensitive.
    ///
    /// Anything that is not exactly two ASCII letters (including the
    /// unknown-country placeholder) yields [`PLACEHOLDER_FLAG`].
    pub fn flag_emoji(&self) -> String {
        let code = self.0;
        if code.len() != 2 || !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return PLACEHOLDER_FLAG.to_string();
        }

        code.chars()
            .filter_map(|c| char::from_u32(c.to_ascii_uppercase() as u32 + REGIONAL_INDICATOR_OFFSET))
            .collect()
    }
}
