//! Hermeneia - locale resolution and translation delivery.
//!
//! The i18n engine behind a small multilingual site: a closed locale set,
//! per-locale message trees, a priority-chain resolver, a context that
//! propagates locale changes to every consumer, and an edge middleware
//! that rewrites locale-less URLs before any page runs.
//!
//! ## Architecture
//!
//! - `locale` - The closed set of supported locales
//! - `catalog` - Per-locale message trees (nested JSON)
//! - `translate` - Dotted-key accessors with the key-echo miss policy
//! - `resolve` - Preference chain: stored choice, reported language, default
//! - `store` - Client-scoped persistence boundary for the preference
//! - `context` - Locale context: one-time init, atomic locale switching
//! - `web` - axum site shell: edge redirector, pages, locale switcher
//! - `config` - Environment configuration

pub mod catalog;
pub mod config;
pub mod context;
pub mod locale;
pub mod resolve;
pub mod store;
pub mod translate;
pub mod web;

pub use catalog::{CatalogError, MessageCatalog};
pub use context::{I18n, I18nProvider, ScopedI18n};
pub use locale::Locale;
pub use resolve::resolve_locale;
pub use store::{ClientEnvironment, MemoryEnvironment, PREFERENCE_KEY};
pub use translate::{ScopedTranslator, Translator};
