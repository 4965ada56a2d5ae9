//! The locale context - owns the active locale and propagates changes.
//!
//! [`I18nProvider`] is the single owned state container. It starts
//! uninitialized, transitions exactly once to initialized via
//! [`I18nProvider::init`], and afterwards switches locale synchronously on
//! demand. Consumers never touch the provider directly; they hold cheap
//! [`I18n`] handles cloned off it.
//!
//! The active locale and its message tree live behind one lock and are
//! swapped together in the same write section, so no consumer can observe
//! a locale paired with the wrong tree. Before `init` runs, reads see the
//! default locale and its tree.

use std::fmt;
use std::sync::{Arc, Weak};

use parking_lot::RwLock;
use serde_json::Value;
use tracing::debug;

use crate::catalog::MessageCatalog;
use crate::locale::Locale;
use crate::resolve::resolve_locale;
use crate::store::ClientEnvironment;
use crate::translate::Translator;

/// Lifecycle of the locale context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Created but not yet resolved; reads fall back to the default locale.
    Uninitialized,
    /// Resolution ran; the active locale is authoritative.
    Initialized,
}

/// Interior state guarded by one lock. The locale and its tree only ever
/// change together.
struct ContextState {
    phase: Phase,
    locale: Locale,
    tree: Option<Arc<Value>>,
}

/// The owned locale/translation state container.
pub struct I18nProvider {
    catalog: Arc<MessageCatalog>,
    environment: Arc<dyn ClientEnvironment>,
    state: Arc<RwLock<ContextState>>,
}

impl I18nProvider {
    /// Create an uninitialized context over `catalog` for the client
    /// described by `environment`.
    pub fn new(catalog: Arc<MessageCatalog>, environment: Arc<dyn ClientEnvironment>) -> Self {
        let state = ContextState {
            phase: Phase::Uninitialized,
            locale: Locale::DEFAULT,
            tree: catalog.tree(Locale::DEFAULT),
        };
        Self {
            catalog,
            environment,
            state: Arc::new(RwLock::new(state)),
        }
    }

    /// Run the resolution chain and activate the resolved locale.
    ///
    /// The transition happens once: calling `init` on an initialized
    /// context is a no-op that returns the already-active locale. Until
    /// this completes, reads through handles see the default locale.
    pub async fn init(&self) -> Locale {
        {
            let state = self.state.read();
            if state.phase == Phase::Initialized {
                return state.locale;
            }
        }

        let stored = self.environment.stored_preference();
        let reported = self.environment.reported_language();
        let locale = resolve_locale(stored.as_deref(), reported.as_deref());

        let mut state = self.state.write();
        if state.phase == Phase::Initialized {
            // Another task completed the transition first.
            return state.locale;
        }
        state.phase = Phase::Initialized;
        state.locale = locale;
        state.tree = self.catalog.tree(locale);
        debug!(locale = %locale, "locale context initialized");
        locale
    }

    /// Whether [`I18nProvider::init`] has run (or an explicit locale change
    /// initialized the context).
    pub fn initialized(&self) -> bool {
        self.state.read().phase == Phase::Initialized
    }

    /// The currently active locale.
    pub fn locale(&self) -> Locale {
        self.state.read().locale
    }

    /// A consumer handle onto this context.
    ///
    /// Handles are cheap to clone and share, but they borrow the context's
    /// lifetime: using one after the provider is dropped panics.
    pub fn handle(&self) -> I18n {
        I18n {
            catalog: self.catalog.clone(),
            environment: self.environment.clone(),
            state: Arc::downgrade(&self.state),
        }
    }
}

impl fmt::Debug for I18nProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state.read();
        f.debug_struct("I18nProvider")
            .field("phase", &state.phase)
            .field("locale", &state.locale)
            .finish()
    }
}

/// A consumer handle onto a locale context.
///
/// Everything the UI layer needs: read the locale, change it, and resolve
/// translation keys against the active tree. All handles cloned from one
/// provider observe the same state.
#[derive(Clone)]
pub struct I18n {
    catalog: Arc<MessageCatalog>,
    environment: Arc<dyn ClientEnvironment>,
    state: Weak<RwLock<ContextState>>,
}

impl I18n {
    /// The currently active locale.
    ///
    /// # Panics
    /// Panics if the owning [`I18nProvider`] has been dropped.
    pub fn locale(&self) -> Locale {
        self.state().read().locale
    }

    /// Switch the active locale: swap the in-memory locale and tree, then
    /// persist the new preference. Every handle on the same context
    /// observes the new locale as soon as this returns.
    ///
    /// Switching an uninitialized context initializes it with the chosen
    /// locale.
    ///
    /// # Panics
    /// Panics if the owning [`I18nProvider`] has been dropped.
    pub fn set_locale(&self, locale: Locale) {
        let state = self.state();
        {
            let mut state = state.write();
            state.phase = Phase::Initialized;
            state.locale = locale;
            state.tree = self.catalog.tree(locale);
        }
        self.environment.store_preference(locale.tag());
        debug!(locale = %locale, "locale changed");
    }

    /// Resolve a dot-delimited key against the active locale's tree, with
    /// the usual key-echo fallback on a miss.
    ///
    /// # Panics
    /// Panics if the owning [`I18nProvider`] has been dropped.
    pub fn t(&self, key: &str) -> String {
        let tree = { self.state().read().tree.clone() };
        Translator::new(tree.as_deref()).translate(key)
    }

    /// A handle that resolves every key under `namespace`.
    pub fn scoped(&self, namespace: &str) -> ScopedI18n {
        ScopedI18n {
            inner: self.clone(),
            namespace: namespace.to_string(),
        }
    }

    fn state(&self) -> Arc<RwLock<ContextState>> {
        self.state
            .upgrade()
            .expect("i18n handle used outside an active locale context")
    }
}

impl fmt::Debug for I18n {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("I18n")
            .field("attached", &(self.state.strong_count() > 0))
            .finish()
    }
}

/// An [`I18n`] handle bound to a key namespace.
///
/// Re-reads the context on every lookup, so locale changes propagate to
/// scoped handles created before the change.
#[derive(Debug, Clone)]
pub struct ScopedI18n {
    inner: I18n,
    namespace: String,
}

impl ScopedI18n {
    /// Resolve `key` under this namespace; a miss echoes the full
    /// namespaced key.
    ///
    /// # Panics
    /// Panics if the owning [`I18nProvider`] has been dropped.
    pub fn t(&self, key: &str) -> String {
        self.inner.t(&format!("{}.{}", self.namespace, key))
    }
}
