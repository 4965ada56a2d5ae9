//! The request-backed client environment.
//!
//! Adapts one HTTP exchange to the [`ClientEnvironment`] boundary: the
//! preference cookie on the way in, a staged `Set-Cookie` on the way out,
//! and the `Accept-Language` header as the reported language. Handlers
//! that change the preference must flush the staged cookie onto their
//! response themselves.

use axum::http::header::{ACCEPT_LANGUAGE, COOKIE};
use axum::http::HeaderMap;
use parking_lot::RwLock;

use crate::store::{ClientEnvironment, PREFERENCE_KEY};

/// One year. The preference never expires on its own; every write
/// refreshes the clock anyway.
const PREFERENCE_MAX_AGE: u32 = 31_536_000;

/// [`ClientEnvironment`] scoped to a single request/response pair.
#[derive(Debug)]
pub struct RequestEnvironment {
    cookie: Option<String>,
    accept_language: Option<String>,
    staged: RwLock<Option<String>>,
}

impl RequestEnvironment {
    /// Capture the locale-relevant parts of a request's headers.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        Self {
            cookie: read_cookie(headers, PREFERENCE_KEY),
            accept_language: headers
                .get(ACCEPT_LANGUAGE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string),
            staged: RwLock::new(None),
        }
    }

    /// The `Set-Cookie` value for a staged preference write, if any.
    pub fn staged_cookie(&self) -> Option<String> {
        self.staged.read().as_ref().map(|tag| {
            format!("{PREFERENCE_KEY}={tag}; Path=/; Max-Age={PREFERENCE_MAX_AGE}; SameSite=Lax")
        })
    }
}

impl ClientEnvironment for RequestEnvironment {
    fn stored_preference(&self) -> Option<String> {
        // A staged write shadows the incoming cookie within one exchange.
        self.staged.read().clone().or_else(|| self.cookie.clone())
    }

    fn store_preference(&self, tag: &str) {
        *self.staged.write() = Some(tag.to_string());
    }

    fn reported_language(&self) -> Option<String> {
        self.accept_language.clone()
    }
}

/// The raw value of cookie `name`, if the `Cookie` header carries it.
fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    let header = headers.get(COOKIE)?.to_str().ok()?;
    for pair in header.split(';') {
        let mut parts = pair.trim().splitn(2, '=');
        if parts.next() == Some(name) {
            return parts.next().map(str::to_string);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(pairs: &[(&'static str, &str)]) -> HeaderMap {
        let mut map = HeaderMap::new();
        for (name, value) in pairs {
            map.insert(*name, HeaderValue::from_str(value).unwrap());
        }
        map
    }

    #[test]
    fn test_reads_preference_cookie_among_others() {
        let env = RequestEnvironment::from_headers(&headers(&[(
            "cookie",
            "session=abc123; hermeneia_locale=es; theme=dark",
        )]));
        assert_eq!(env.stored_preference(), Some("es".to_string()));
    }

    #[test]
    fn test_missing_cookie_reads_as_none() {
        let env = RequestEnvironment::from_headers(&headers(&[("cookie", "session=abc123")]));
        assert_eq!(env.stored_preference(), None);

        let env = RequestEnvironment::from_headers(&HeaderMap::new());
        assert_eq!(env.stored_preference(), None);
    }

    #[test]
    fn test_reported_language_comes_from_accept_language() {
        let env = RequestEnvironment::from_headers(&headers(&[(
            "accept-language",
            "es-CR,es;q=0.9,en;q=0.5",
        )]));
        assert_eq!(env.reported_language(), Some("es-CR,es;q=0.9,en;q=0.5".to_string()));
    }

    #[test]
    fn test_staged_write_shadows_incoming_cookie() {
        let env = RequestEnvironment::from_headers(&headers(&[(
            "cookie",
            "hermeneia_locale=en",
        )]));
        env.store_preference("es");
        assert_eq!(env.stored_preference(), Some("es".to_string()));
    }

    #[test]
    fn test_staged_cookie_is_formatted_for_set_cookie() {
        let env = RequestEnvironment::from_headers(&HeaderMap::new());
        assert_eq!(env.staged_cookie(), None);

        env.store_preference("es");
        let cookie = env.staged_cookie().unwrap();
        assert!(cookie.starts_with("hermeneia_locale=es; "));
        assert!(cookie.contains("Max-Age=31536000"));
        assert!(cookie.contains("Path=/"));
    }
}
