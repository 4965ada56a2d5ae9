//! Message catalogs - per-locale trees of translatable strings.
//!
//! Each locale owns one nested JSON tree: string keys, string leaves,
//! objects for namespaces. The built-in site catalogs are embedded at
//! compile time; additional trees can be registered from JSON text. Trees
//! are immutable once registered, so lookups never need a lock.

use std::collections::HashMap;
use std::sync::Arc;

use once_cell::sync::Lazy;
use serde_json::Value;
use thiserror::Error;

use crate::locale::Locale;
use crate::translate::Translator;

/// Error raised when registering a catalog tree.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The JSON text for a locale failed to parse.
    #[error("catalog for '{locale}' is not valid JSON: {source}")]
    Parse {
        locale: Locale,
        #[source]
        source: serde_json::Error,
    },
    /// The JSON parsed, but the top level is not an object.
    #[error("catalog for '{locale}' must be a JSON object at the top level")]
    NotAnObject { locale: Locale },
}

static BUILTIN: Lazy<MessageCatalog> = Lazy::new(|| {
    let mut catalog = MessageCatalog::new();
    catalog
        .register(Locale::En, include_str!("locales/en.json"))
        .expect("embedded en catalog must parse");
    catalog
        .register(Locale::Es, include_str!("locales/es.json"))
        .expect("embedded es catalog must parse");
    catalog
});

/// The set of message trees for the supported locales.
#[derive(Debug, Clone, Default)]
pub struct MessageCatalog {
    trees: HashMap<Locale, Arc<Value>>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            trees: HashMap::new(),
        }
    }

    /// The built-in site catalog, with the embedded `en` and `es` trees.
    ///
    /// The embedded trees are parsed once per process; this hands out a
    /// cheap clone sharing them.
    pub fn builtin() -> MessageCatalog {
        BUILTIN.clone()
    }

    /// Register (or replace) a locale's tree from JSON text.
    pub fn register(&mut self, locale: Locale, json: &str) -> Result<(), CatalogError> {
        let tree: Value =
            serde_json::from_str(json).map_err(|source| CatalogError::Parse { locale, source })?;
        if !tree.is_object() {
            return Err(CatalogError::NotAnObject { locale });
        }
        self.trees.insert(locale, Arc::new(tree));
        Ok(())
    }

    /// The message tree for a locale, if one is registered.
    pub fn tree(&self, locale: Locale) -> Option<Arc<Value>> {
        self.trees.get(&locale).cloned()
    }

    /// A borrowing accessor over `locale`'s tree.
    ///
    /// A locale without a registered tree translates nothing: every lookup
    /// falls back to the key itself.
    pub fn translator(&self, locale: Locale) -> Translator<'_> {
        Translator::new(self.trees.get(&locale).map(Arc::as_ref))
    }

    /// Locales that currently have a registered tree, in declaration order.
    pub fn locales(&self) -> impl Iterator<Item = Locale> + '_ {
        Locale::ALL
            .into_iter()
            .filter(|locale| self.trees.contains_key(locale))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_all_locales() {
        let catalog = MessageCatalog::builtin();
        let locales: Vec<Locale> = catalog.locales().collect();
        assert_eq!(locales, vec![Locale::En, Locale::Es]);
    }

    #[test]
    fn test_register_rejects_invalid_json() {
        let mut catalog = MessageCatalog::new();
        let err = catalog.register(Locale::En, "{ not json").unwrap_err();
        assert!(matches!(err, CatalogError::Parse { locale: Locale::En, .. }));
    }

    #[test]
    fn test_register_rejects_non_object_top_level() {
        let mut catalog = MessageCatalog::new();
        let err = catalog.register(Locale::En, "[\"a\", \"b\"]").unwrap_err();
        assert!(matches!(err, CatalogError::NotAnObject { locale: Locale::En }));
    }

    #[test]
    fn test_register_replaces_existing_tree() {
        let mut catalog = MessageCatalog::new();
        catalog.register(Locale::En, r#"{"greeting": "old"}"#).unwrap();
        catalog.register(Locale::En, r#"{"greeting": "new"}"#).unwrap();
        assert_eq!(catalog.translator(Locale::En).translate("greeting"), "new");
    }

    #[test]
    fn test_missing_locale_has_no_tree() {
        let catalog = MessageCatalog::new();
        assert!(catalog.tree(Locale::Es).is_none());
        // An accessor over nothing echoes every key.
        assert_eq!(catalog.translator(Locale::Es).translate("nav.home"), "nav.home");
    }
}
