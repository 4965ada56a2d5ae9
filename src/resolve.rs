//! Locale resolution - the priority chain that picks the active locale.
//!
//! Priority order, first match wins:
//!
//! 1. A stored preference whose value parses as a supported tag
//! 2. A reported language (browser setting or `Accept-Language` header)
//!    that mentions the non-default locale's tag
//! 3. The fixed default
//!
//! Unsupported values never travel past this module: the chain always
//! emits a member of the closed locale set.

use crate::locale::Locale;

/// Resolve the active locale from a stored preference and a reported
/// language, in that order, falling back to [`Locale::DEFAULT`].
pub fn resolve_locale(stored: Option<&str>, reported: Option<&str>) -> Locale {
    if let Some(tag) = stored {
        if let Some(locale) = Locale::from_tag(tag) {
            return locale;
        }
        // A corrupt or unsupported stored value falls through silently.
    }
    reported_locale(reported)
}

/// Resolve a locale from a reported language alone - the lower two tiers
/// of the chain. This is all the decision the request boundary can make,
/// since it has no access to client storage.
pub fn reported_locale(reported: Option<&str>) -> Locale {
    match reported {
        Some(value) if mentions_non_default(value) => Locale::NON_DEFAULT,
        _ => Locale::DEFAULT,
    }
}

/// Whether a reported language string mentions the non-default locale's
/// tag anywhere, case-insensitively. A plain substring scan on purpose:
/// `es-CR,es;q=0.9` and `ca-ES` both count as a mention.
fn mentions_non_default(reported: &str) -> bool {
    reported
        .to_ascii_lowercase()
        .contains(Locale::NON_DEFAULT.tag())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_supported_tag_wins() {
        assert_eq!(resolve_locale(Some("es"), Some("en-US")), Locale::Es);
        assert_eq!(resolve_locale(Some("en"), Some("es-CR,es;q=0.9")), Locale::En);
    }

    #[test]
    fn test_stored_qualified_tag_normalizes() {
        assert_eq!(resolve_locale(Some("es-MX"), None), Locale::Es);
        assert_eq!(resolve_locale(Some("EN_GB"), None), Locale::En);
    }

    #[test]
    fn test_corrupt_stored_value_falls_through() {
        assert_eq!(resolve_locale(Some("fr"), Some("es")), Locale::Es);
        assert_eq!(resolve_locale(Some("garbage!!"), None), Locale::En);
        assert_eq!(resolve_locale(Some(""), Some("es-ES")), Locale::Es);
    }

    #[test]
    fn test_reported_language_scan() {
        assert_eq!(reported_locale(Some("es-CR,es;q=0.9")), Locale::Es);
        assert_eq!(reported_locale(Some("ES")), Locale::Es);
        assert_eq!(reported_locale(Some("en-US,en;q=0.5")), Locale::En);
        assert_eq!(reported_locale(Some("de-DE,fr;q=0.8")), Locale::En);
        assert_eq!(reported_locale(None), Locale::En);
    }

    #[test]
    fn test_reported_scan_is_substring_based() {
        // Any mention of the tag counts, even inside another subtag.
        assert_eq!(reported_locale(Some("ca-ES")), Locale::Es);
    }

    #[test]
    fn test_everything_absent_yields_default() {
        assert_eq!(resolve_locale(None, None), Locale::DEFAULT);
    }
}
