//! The client-scoped persistence boundary for the locale preference.
//!
//! One fixed key, one raw tag value. Reads and writes are synchronous and
//! infallible at this boundary; a stored value that does not parse as a
//! supported locale is handled upstream by the resolution chain, never
//! here.

use parking_lot::RwLock;

/// The fixed key the locale preference is stored under. The web layer
/// uses it as the preference cookie name.
pub const PREFERENCE_KEY: &str = "hermeneia_locale";

/// What the locale context can see of the client it runs for: the
/// persisted locale preference and the environment-reported language.
pub trait ClientEnvironment: Send + Sync {
    /// The persisted locale preference, if any, as the raw stored string.
    fn stored_preference(&self) -> Option<String>;

    /// Persist a new preference, overwriting any previous value.
    fn store_preference(&self, tag: &str);

    /// The language the environment reports for this client - a browser
    /// setting or an `Accept-Language` header value.
    fn reported_language(&self) -> Option<String>;
}

/// In-process environment, for tests and for embedding outside a server.
#[derive(Debug, Default)]
pub struct MemoryEnvironment {
    preference: RwLock<Option<String>>,
    reported: Option<String>,
}

impl MemoryEnvironment {
    /// An environment with no stored preference and no reported language.
    pub fn new() -> Self {
        Self::default()
    }

    /// An environment reporting `language`, with nothing stored.
    pub fn with_reported(language: &str) -> Self {
        Self::with_state(None, Some(language))
    }

    /// An environment with a pre-existing stored preference.
    pub fn with_preference(tag: &str) -> Self {
        Self::with_state(Some(tag), None)
    }

    /// An environment with both slots set explicitly.
    pub fn with_state(preference: Option<&str>, reported: Option<&str>) -> Self {
        Self {
            preference: RwLock::new(preference.map(str::to_string)),
            reported: reported.map(str::to_string),
        }
    }
}

impl ClientEnvironment for MemoryEnvironment {
    fn stored_preference(&self) -> Option<String> {
        self.preference.read().clone()
    }

    fn store_preference(&self, tag: &str) {
        *self.preference.write() = Some(tag.to_string());
    }

    fn reported_language(&self) -> Option<String> {
        self.reported.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_overwrites_previous_value() {
        let env = MemoryEnvironment::with_preference("en");
        env.store_preference("es");
        assert_eq!(env.stored_preference(), Some("es".to_string()));
    }

    #[test]
    fn test_empty_environment_reports_nothing() {
        let env = MemoryEnvironment::new();
        assert_eq!(env.stored_preference(), None);
        assert_eq!(env.reported_language(), None);
    }

    #[test]
    fn test_stored_value_is_kept_raw() {
        // The boundary does not validate; the resolver does.
        let env = MemoryEnvironment::new();
        env.store_preference("not-a-locale");
        assert_eq!(env.stored_preference(), Some("not-a-locale".to_string()));
    }
}
