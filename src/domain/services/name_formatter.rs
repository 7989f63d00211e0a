//! Name Formatter - Domain Service
//!
//! Composes the display name written back into a rewritten link.

use crate::domain::entities::{DisplayOptions, GeoInfo};
use crate::domain::value_objects::CountryCode;

/// Separator between name segments.
pub const SEGMENT_DELIMITER: &str = " | ";

/// Build the node display name.
///
/// With no option enabled the bare country is returned. Otherwise the
/// segments are, in order: flag, country, org, suffix. Empty segments are
/// dropped.
///
/// # Examples
/// ```
/// use node_renamer::domain::entities::{DisplayOptions, GeoInfo};
/// use node_renamer::domain::services::format_name;
///
/// let geo = GeoInfo::new("US", "Google");
/// let name = format_name(&geo, &DisplayOptions::new(true, true, true), "MyNode");
/// assert_eq!(name, "🇺🇸 | US | Google | MyNode");
/// ```
pub fn format_name(geo: &GeoInfo, options: &DisplayOptions, suffix: &str) -> String {
    if options.is_bare() {
        return geo.country.clone();
    }

    let mut parts: Vec<String> = Vec::with_capacity(4);
    if options.use_flag {
        parts.push(CountryCode(&geo.country).flag_emoji());
    }
    parts.push(geo.country.clone());
    if options.use_org {
        parts.push(geo.org.clone());
    }
    if options.use_suffix {
        parts.push(suffix.to_string());
    }

    parts.retain(|p| !p.is_empty());
    parts.join(SEGMENT_DELIMITER)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UNKNOWN_COUNTRY;
    use crate::domain::value_objects::PLACEHOLDER_FLAG;

    fn geo() -> GeoInfo {
        GeoInfo::new("DE", "Hetzner")
    }

    #[test]
    fn test_bare_country_when_no_options() {
        let name = format_name(&geo(), &DisplayOptions::default(), "MyNode");
        assert_eq!(name, "DE");
    }

    #[test]
    fn test_all_segments_in_order() {
        let name = format_name(&geo(), &DisplayOptions::new(true, true, true), "MyNode");
        assert_eq!(name, "🇩🇪 | DE | Hetzner | MyNode");
    }

    #[test]
    fn test_single_link_options() {
        let name = format_name(&geo(), &DisplayOptions::single_link(), "Edge");
        assert_eq!(name, "🇩🇪 | DE | Edge");
    }

    #[test]
    fn test_org_only() {
        let name = format_name(&geo(), &DisplayOptions::new(false, false, true), "MyNode");
        assert_eq!(name, "DE | Hetzner");
    }

    #[test]
    fn test_empty_suffix_dropped() {
        let name = format_name(&geo(), &DisplayOptions::new(false, true, false), "");
        assert_eq!(name, "DE");
    }

    #[test]
    fn test_unknown_country_uses_placeholder_flag() {
        let geo = GeoInfo::unknown();
        let name = format_name(&geo, &DisplayOptions::new(true, false, false), "MyNode");
        assert_eq!(name, format!("{} | {}", PLACEHOLDER_FLAG, UNKNOWN_COUNTRY));
    }
}
