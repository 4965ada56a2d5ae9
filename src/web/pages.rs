//! Page handlers - the localized site surface.
//!
//! Unprefixed pages resolve the full preference chain per request (cookie,
//! then `Accept-Language`, then the default) through a request-scoped
//! locale context. Locale-prefixed pages trust the URL: the path segment
//! is the locale, and client storage is not consulted. The switcher
//! endpoint is the one place a preference gets written.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, StatusCode, Uri};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Json;
use serde::{Deserialize, Serialize};

use super::client::RequestEnvironment;
use super::AppState;
use crate::context::I18nProvider;
use crate::locale::Locale;
use crate::translate::Translator;

/// The site's pages. Each renders from its own catalog namespace, which
/// doubles as its navigation label key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Page {
    Home,
    About,
    Journal,
    Contact,
}

impl Page {
    const ALL: [Page; 4] = [Page::Home, Page::About, Page::Journal, Page::Contact];

    fn namespace(self) -> &'static str {
        match self {
            Page::Home => "home",
            Page::About => "about",
            Page::Journal => "journal",
            Page::Contact => "contact",
        }
    }

    /// The unprefixed (default-form) path.
    fn path(self) -> &'static str {
        match self {
            Page::Home => "/",
            Page::About => "/about",
            Page::Journal => "/journal",
            Page::Contact => "/contact",
        }
    }
}

/// `GET /` - home in the resolved locale.
pub async fn home(State(app): State<AppState>, headers: HeaderMap) -> Html<String> {
    resolved_page(&app, &headers, Page::Home).await
}

/// `GET /about`
pub async fn about(State(app): State<AppState>, headers: HeaderMap) -> Html<String> {
    resolved_page(&app, &headers, Page::About).await
}

/// `GET /journal`
pub async fn journal(State(app): State<AppState>, headers: HeaderMap) -> Html<String> {
    resolved_page(&app, &headers, Page::Journal).await
}

/// `GET /contact`
pub async fn contact(State(app): State<AppState>, headers: HeaderMap) -> Html<String> {
    resolved_page(&app, &headers, Page::Contact).await
}

/// `GET /{locale}` - home in the locale named by the path.
pub async fn localized_home(
    State(app): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Response {
    prefixed_page(&app, &headers, &segment, Page::Home).await
}

/// `GET /{locale}/about`
pub async fn localized_about(
    State(app): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Response {
    prefixed_page(&app, &headers, &segment, Page::About).await
}

/// `GET /{locale}/journal`
pub async fn localized_journal(
    State(app): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Response {
    prefixed_page(&app, &headers, &segment, Page::Journal).await
}

/// `GET /{locale}/contact`
pub async fn localized_contact(
    State(app): State<AppState>,
    Path(segment): Path<String>,
    headers: HeaderMap,
) -> Response {
    prefixed_page(&app, &headers, &segment, Page::Contact).await
}

#[derive(Debug, Deserialize)]
pub struct SwitchQuery {
    /// Path to send the visitor back to after switching.
    pub from: Option<String>,
}

/// `GET /locale/{tag}` - persist a locale choice and bounce back.
///
/// The target page comes back in the chosen locale's URL form. An
/// unsupported tag changes nothing and bounces back as-is.
pub async fn switch_locale(
    State(app): State<AppState>,
    Path(tag): Path<String>,
    Query(params): Query<SwitchQuery>,
    headers: HeaderMap,
) -> Response {
    let environment = Arc::new(RequestEnvironment::from_headers(&headers));
    let provider = I18nProvider::new(app.catalog.clone(), environment.clone());
    provider.init().await;
    let i18n = provider.handle();

    if let Some(locale) = Locale::from_tag(&tag) {
        i18n.set_locale(locale);
    }

    // Off-site or malformed targets fall back to the home page.
    let from = params
        .from
        .as_deref()
        .filter(|path| site_local(path))
        .unwrap_or("/");
    let target = localized_path(i18n.locale(), from);

    let mut response = Redirect::to(&target).into_response();
    if let Some(cookie) = environment.staged_cookie() {
        if let Ok(value) = HeaderValue::from_str(&cookie) {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub default_locale: Locale,
    pub locales: Vec<Locale>,
}

/// `GET /api/health` - liveness check with the locale inventory.
pub async fn health(State(app): State<AppState>) -> Json<Health> {
    Json(Health {
        status: "ok",
        default_locale: Locale::DEFAULT,
        locales: app.catalog.locales().collect(),
    })
}

/// Fallback for unknown paths. A locale-prefixed miss renders in the
/// path's locale; a bare miss resolves the chain like any unprefixed page.
pub async fn not_found(State(app): State<AppState>, headers: HeaderMap, uri: Uri) -> Response {
    let first = uri.path().trim_start_matches('/').split('/').next().unwrap_or("");
    not_found_page(&app, &headers, Locale::from_path_segment(first)).await
}

async fn resolved_page(app: &AppState, headers: &HeaderMap, page: Page) -> Html<String> {
    let environment = Arc::new(RequestEnvironment::from_headers(headers));
    let provider = I18nProvider::new(app.catalog.clone(), environment);
    let locale = provider.init().await;
    Html(render_page(page, locale, &app.catalog.translator(locale)))
}

async fn prefixed_page(
    app: &AppState,
    headers: &HeaderMap,
    segment: &str,
    page: Page,
) -> Response {
    match Locale::from_path_segment(segment) {
        Some(locale) => {
            Html(render_page(page, locale, &app.catalog.translator(locale))).into_response()
        }
        None => not_found_page(app, headers, None).await,
    }
}

async fn not_found_page(app: &AppState, headers: &HeaderMap, explicit: Option<Locale>) -> Response {
    let locale = match explicit {
        Some(locale) => locale,
        None => {
            let environment = Arc::new(RequestEnvironment::from_headers(headers));
            I18nProvider::new(app.catalog.clone(), environment).init().await
        }
    };
    let body = render_not_found(locale, &app.catalog.translator(locale));
    (StatusCode::NOT_FOUND, Html(body)).into_response()
}

/// Whether a bounce-back target stays inside the site. Browsers parse
/// `\` as `/` in http(s) URLs, so backslash paths escape the site the
/// same way protocol-relative ones do.
fn site_local(path: &str) -> bool {
    path.starts_with('/')
        && !path.starts_with("//")
        && !path.contains('\\')
        && !path.bytes().any(|b| b.is_ascii_control())
}

/// Rewrite `path` into `locale`'s URL form: strip any leading locale
/// segment, then apply as-needed prefixing.
pub fn localized_path(locale: Locale, path: &str) -> String {
    let bare = strip_locale_prefix(path);
    let prefix = locale.path_prefix();
    if prefix.is_empty() {
        bare.to_string()
    } else if bare == "/" {
        prefix.to_string()
    } else {
        format!("{prefix}{bare}")
    }
}

fn strip_locale_prefix(path: &str) -> &str {
    let trimmed = path.trim_start_matches('/');
    let first = trimmed.split('/').next().unwrap_or("");
    if Locale::from_path_segment(first).is_none() {
        return path;
    }
    match &trimmed[first.len()..] {
        "" => "/",
        rest => rest,
    }
}

fn render_page(page: Page, locale: Locale, t: &Translator<'_>) -> String {
    let nav = t.scoped("nav");
    let body = t.scoped(page.namespace());
    let switcher = t.scoped("switcher");

    let mut nav_links = String::new();
    for target in Page::ALL {
        nav_links.push_str(&format!(
            "<a href=\"{}\">{}</a>\n",
            localized_path(locale, target.path()),
            nav.translate(target.namespace()),
        ));
    }

    let current = localized_path(locale, page.path());
    let mut switch_links = String::new();
    for option in Locale::ALL {
        switch_links.push_str(&format!(
            "<a href=\"/locale/{tag}?from={current}\" hreflang=\"{tag}\">{label}</a>\n",
            tag = option.tag(),
            label = switcher.translate(option.tag()),
        ));
    }

    let extra = match page {
        Page::Home => format!(
            "<p><a href=\"{}\">{}</a></p>",
            localized_path(locale, Page::Contact.path()),
            body.translate("cta"),
        ),
        Page::About => format!("<p>{}</p>", body.translate("body")),
        Page::Journal => format!("<p>{}</p>", body.translate("empty")),
        Page::Contact => format!(
            "<p><a href=\"mailto:studio@hermeneia.dev\">{}</a></p>",
            body.translate("cta"),
        ),
    };

    format!(
        "<!doctype html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} · {site}</title>\n\
         </head>\n\
         <body>\n\
         <header>\n\
         <strong>{site}</strong>\n\
         <nav>\n{nav_links}</nav>\n\
         <div class=\"switcher\">{switch_label}:\n{switch_links}</div>\n\
         </header>\n\
         <main>\n\
         <h1>{heading}</h1>\n\
         <p>{intro}</p>\n\
         {extra}\n\
         </main>\n\
         <footer><p>{footer}</p></footer>\n\
         </body>\n\
         </html>\n",
        lang = locale.tag(),
        title = body.translate("title"),
        site = t.translate("site.name"),
        switch_label = switcher.translate("label"),
        heading = body.translate("heading"),
        intro = body.translate("intro"),
        footer = t.translate("footer.note"),
    )
}

fn render_not_found(locale: Locale, t: &Translator<'_>) -> String {
    let error = t.scoped("error.not_found");
    format!(
        "<!doctype html>\n\
         <html lang=\"{lang}\">\n\
         <head><meta charset=\"utf-8\"><title>{title} · {site}</title></head>\n\
         <body>\n\
         <main>\n\
         <h1>{title}</h1>\n\
         <p>{body}</p>\n\
         <p><a href=\"{home}\">{home_label}</a></p>\n\
         </main>\n\
         </body>\n\
         </html>\n",
        lang = locale.tag(),
        title = error.translate("title"),
        site = t.translate("site.name"),
        body = error.translate("body"),
        home = localized_path(locale, "/"),
        home_label = t.translate("nav.home"),
    )
}
