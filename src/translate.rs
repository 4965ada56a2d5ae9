//! Translation accessors - dotted-key lookup into a locale's message tree.
//!
//! A lookup walks the tree one dot-delimited segment at a time. Any dead
//! end (absent segment, non-object intermediate, empty or non-string leaf)
//! returns the key itself instead of an error, which keeps rendering alive
//! and makes the missing entry visible on the page during development.

use serde_json::Value;

/// Read-only accessor over one locale's message tree.
#[derive(Debug, Clone, Copy)]
pub struct Translator<'a> {
    tree: Option<&'a Value>,
}

impl<'a> Translator<'a> {
    /// An accessor over `tree`; `None` translates nothing.
    pub fn new(tree: Option<&'a Value>) -> Self {
        Self { tree }
    }

    /// Resolve a dot-delimited key to its translated string.
    ///
    /// Returns the key unchanged when it does not resolve to a non-empty
    /// string leaf.
    pub fn translate(&self, key: &str) -> String {
        match self.tree.and_then(|tree| resolve_path(tree, key)) {
            Some(text) => text.to_string(),
            None => key.to_string(),
        }
    }

    /// An accessor that prepends `namespace` and a dot to every key.
    pub fn scoped(&self, namespace: &str) -> ScopedTranslator<'a> {
        ScopedTranslator {
            inner: *self,
            namespace: namespace.to_string(),
        }
    }
}

/// A [`Translator`] bound to a key namespace.
///
/// A miss echoes the full namespaced key, so `scoped("nav")` looking up
/// `missingKey` renders as `nav.missingKey`.
#[derive(Debug, Clone)]
pub struct ScopedTranslator<'a> {
    inner: Translator<'a>,
    namespace: String,
}

impl ScopedTranslator<'_> {
    /// Resolve `key` under this namespace.
    pub fn translate(&self, key: &str) -> String {
        self.inner.translate(&format!("{}.{}", self.namespace, key))
    }
}

/// Walk `key` segment by segment; `None` on any dead end.
fn resolve_path<'t>(tree: &'t Value, key: &str) -> Option<&'t str> {
    let mut current = tree;
    for segment in key.split('.') {
        match current.get(segment) {
            Some(next) => current = next,
            None => return None,
        }
    }
    match current.as_str() {
        Some(text) if !text.is_empty() => Some(text),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tree() -> Value {
        json!({
            "greeting": "Hello",
            "nav": {
                "home": "Home",
                "deep": { "leaf": "Found" }
            },
            "empty": "",
            "number": 42,
            "list": ["a", "b"]
        })
    }

    #[test]
    fn test_translate_top_level_key() {
        let tree = tree();
        let t = Translator::new(Some(&tree));
        assert_eq!(t.translate("greeting"), "Hello");
    }

    #[test]
    fn test_translate_nested_key() {
        let tree = tree();
        let t = Translator::new(Some(&tree));
        assert_eq!(t.translate("nav.home"), "Home");
        assert_eq!(t.translate("nav.deep.leaf"), "Found");
    }

    #[test]
    fn test_missing_key_echoes_key() {
        let tree = tree();
        let t = Translator::new(Some(&tree));
        assert_eq!(t.translate("nav.missingKey"), "nav.missingKey");
        assert_eq!(t.translate("nope"), "nope");
        // Echoes are stable: translating an echo misses the same way.
        let echoed = t.translate("nav.missingKey");
        assert_eq!(t.translate(&echoed), echoed);
    }

    #[test]
    fn test_walk_through_non_object_echoes_key() {
        let tree = tree();
        let t = Translator::new(Some(&tree));
        // "greeting" is a string, so there is nothing under it to walk into.
        assert_eq!(t.translate("greeting.deeper"), "greeting.deeper");
        assert_eq!(t.translate("number.x"), "number.x");
    }

    #[test]
    fn test_non_string_and_empty_leaves_echo_key() {
        let tree = tree();
        let t = Translator::new(Some(&tree));
        assert_eq!(t.translate("empty"), "empty");
        assert_eq!(t.translate("number"), "number");
        assert_eq!(t.translate("list"), "list");
        // An intermediate object is not a leaf either.
        assert_eq!(t.translate("nav"), "nav");
    }

    #[test]
    fn test_absent_tree_echoes_everything() {
        let t = Translator::new(None);
        assert_eq!(t.translate("nav.home"), "nav.home");
    }

    #[test]
    fn test_scoped_prepends_namespace() {
        let tree = tree();
        let t = Translator::new(Some(&tree));
        let nav = t.scoped("nav");
        assert_eq!(nav.translate("home"), "Home");
        assert_eq!(nav.translate("deep.leaf"), "Found");
    }

    #[test]
    fn test_scoped_miss_echoes_full_key() {
        let tree = tree();
        let nav = Translator::new(Some(&tree)).scoped("nav");
        assert_eq!(nav.translate("missingKey"), "nav.missingKey");
    }
}
