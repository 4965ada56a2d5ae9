//! The closed set of locales the site can render in.
//!
//! Everything downstream works with `Locale` values only; arbitrary strings
//! never travel past the conversion functions in this module.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A supported locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English - the default locale, served without a URL prefix.
    En,
    /// Spanish - reachable through an explicit `/es` path segment.
    Es,
}

impl Locale {
    /// The fixed fallback locale.
    pub const DEFAULT: Locale = Locale::En;

    /// The sole locale outside the default; the one the resolver and the
    /// edge redirector look for in reported language strings.
    pub const NON_DEFAULT: Locale = Locale::Es;

    /// Every supported locale, default first.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Es];

    /// The bare language tag.
    pub fn tag(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Es => "es",
        }
    }

    /// Parse a language tag into a supported locale.
    ///
    /// Accepts region-qualified and underscore forms (`es-CR`, `en_US`) by
    /// matching the primary subtag case-insensitively. Returns `None` for
    /// anything outside the supported set.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let primary = tag.trim().split(['-', '_']).next().unwrap_or("");
        Locale::ALL
            .into_iter()
            .find(|locale| primary.eq_ignore_ascii_case(locale.tag()))
    }

    /// Parse a URL path segment into a supported locale.
    ///
    /// Unlike [`Locale::from_tag`], segments must match a bare tag exactly:
    /// `/es/about` carries a locale segment, `/es-CR/about` does not.
    pub fn from_path_segment(segment: &str) -> Option<Locale> {
        Locale::ALL.into_iter().find(|locale| locale.tag() == segment)
    }

    /// The URL prefix for this locale.
    ///
    /// Prefixing is "as-needed": the default locale's pages live at
    /// unprefixed paths, so its prefix is the empty string.
    pub fn path_prefix(self) -> &'static str {
        match self {
            Locale::En => "",
            Locale::Es => "/es",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_accepts_qualified_forms() {
        assert_eq!(Locale::from_tag("es"), Some(Locale::Es));
        assert_eq!(Locale::from_tag("es-CR"), Some(Locale::Es));
        assert_eq!(Locale::from_tag("ES_MX"), Some(Locale::Es));
        assert_eq!(Locale::from_tag("en-US"), Some(Locale::En));
        assert_eq!(Locale::from_tag("EN"), Some(Locale::En));
    }

    #[test]
    fn test_from_tag_rejects_unsupported() {
        assert_eq!(Locale::from_tag("fr"), None);
        assert_eq!(Locale::from_tag("de-DE"), None);
        assert_eq!(Locale::from_tag(""), None);
        assert_eq!(Locale::from_tag("   "), None);
    }

    #[test]
    fn test_path_segments_are_exact() {
        assert_eq!(Locale::from_path_segment("es"), Some(Locale::Es));
        assert_eq!(Locale::from_path_segment("en"), Some(Locale::En));
        assert_eq!(Locale::from_path_segment("es-CR"), None);
        assert_eq!(Locale::from_path_segment("ES"), None);
    }

    #[test]
    fn test_default_locale_has_no_prefix() {
        assert_eq!(Locale::DEFAULT.path_prefix(), "");
        assert_eq!(Locale::Es.path_prefix(), "/es");
    }

    #[test]
    fn test_serde_round_trips_as_bare_tag() {
        assert_eq!(serde_json::to_string(&Locale::En).unwrap(), "\"en\"");
        assert_eq!(serde_json::to_string(&Locale::Es).unwrap(), "\"es\"");
        assert_eq!(serde_json::from_str::<Locale>("\"es\"").unwrap(), Locale::Es);
        assert_eq!(serde_json::from_str::<Locale>("\"en\"").unwrap(), Locale::En);
        assert!(serde_json::from_str::<Locale>("\"fr\"").is_err());
    }
}
