//! Edge-level locale redirection.
//!
//! Runs in front of every page handler. A request whose path carries no
//! locale segment gets the lower tiers of the resolution chain applied to
//! its `Accept-Language` header: a non-default resolution redirects (307)
//! to the locale-prefixed form of the same path, a default resolution
//! passes through, because the unprefixed form already is the default
//! form. Locale-qualified requests, excluded routes, and paths that look
//! like static assets are never touched.
//!
//! This layer sees only the request, not client storage, so the stored
//! preference plays no part in the decision here.

use axum::extract::Request;
use axum::http::header::ACCEPT_LANGUAGE;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use tracing::debug;

use crate::locale::Locale;
use crate::resolve::reported_locale;

/// Path prefixes the redirector never intercepts: the API, static assets,
/// and the locale switcher itself.
const EXCLUDED_PREFIXES: &[&str] = &["/api", "/assets", "/locale"];

/// axum middleware wrapping [`redirect_target`].
pub async fn locale_redirect(request: Request, next: Next) -> Response {
    let accept_language = request
        .headers()
        .get(ACCEPT_LANGUAGE)
        .and_then(|value| value.to_str().ok());

    let path = request.uri().path();
    let query = request.uri().query();
    if let Some(target) = redirect_target(path, query, accept_language) {
        debug!(%path, to = %target, "redirecting to locale-qualified path");
        return Redirect::temporary(&target).into_response();
    }
    next.run(request).await
}

/// Decide whether a request must be redirected, and to where.
///
/// Returns `None` when the request should pass through: the path already
/// carries a locale segment, matches an excluded prefix, looks like a
/// static asset, or resolves to the default locale (whose form is the
/// unprefixed path itself).
pub fn redirect_target(
    path: &str,
    query: Option<&str>,
    accept_language: Option<&str>,
) -> Option<String> {
    if !intercepts(path) {
        return None;
    }
    let locale = reported_locale(accept_language);
    if locale == Locale::DEFAULT {
        return None;
    }

    let prefixed = if path == "/" {
        locale.path_prefix().to_string()
    } else {
        format!("{}{}", locale.path_prefix(), path)
    };
    Some(match query {
        Some(query) => format!("{prefixed}?{query}"),
        None => prefixed,
    })
}

/// Whether the redirector considers `path` at all.
fn intercepts(path: &str) -> bool {
    if leading_locale(path).is_some() {
        return false;
    }
    if EXCLUDED_PREFIXES
        .iter()
        .any(|prefix| matches_prefix(path, prefix))
    {
        return false;
    }
    // Any dotted segment is treated as a static-asset path.
    if path.split('/').any(|segment| segment.contains('.')) {
        return false;
    }
    true
}

/// The supported locale in the first path segment, if any.
fn leading_locale(path: &str) -> Option<Locale> {
    let first = path.trim_start_matches('/').split('/').next().unwrap_or("");
    Locale::from_path_segment(first)
}

/// Prefix match on whole segments: `/api` matches `/api` and `/api/x`,
/// never `/apiary`.
fn matches_prefix(path: &str, prefix: &str) -> bool {
    path == prefix || path.strip_prefix(prefix).is_some_and(|rest| rest.starts_with('/'))
}
