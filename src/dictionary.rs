use log::warn;
use serde_json::Value;

/// A whole-language dictionary: one nested JSON object whose leaves are the
/// display values.
///
/// A load replaces the dictionary wholesale. Keys absent from the new tree
/// are not backfilled from the old one.
#[derive(Debug, Clone)]
pub struct Dictionary {
    root: Value,
}

impl Default for Dictionary {
    fn default() -> Self {
        Self {
            root: Value::Object(serde_json::Map::new()),
        }
    }
}

impl Dictionary {
    /// Wraps an already parsed JSON body. Nothing is validated beyond what
    /// key lookup does later; a body of the wrong shape just makes every
    /// lookup miss.
    pub fn from_value(root: Value) -> Self {
        Self { root }
    }

    /// Resolves a dot-delimited key to the node it addresses.
    ///
    /// Walks the tree one segment at a time; the walk stops with `None` as
    /// soon as the current node is not an object or lacks the next segment.
    pub fn resolve(&self, key: &str) -> Option<&Value> {
        let mut node = &self.root;
        for segment in key.split('.') {
            node = node.as_object()?.get(segment)?;
        }
        Some(node)
    }

    /// Like [`Dictionary::resolve`], but a miss logs a warning so missing
    /// translations show up in diagnostics, not just as stale text.
    pub fn resolve_or_warn(&self, key: &str) -> Option<&Value> {
        let found = self.resolve(key);
        if found.is_none() {
            warn!("translation key not found: {key}");
        }
        found
    }

    /// Resolves a key to its stored leaf, whatever type that is.
    ///
    /// A miss at any segment returns the key itself as a string, so an
    /// untranslated spot is visually distinguishable as the literal key.
    pub fn translate(&self, key: &str) -> Value {
        match self.resolve_or_warn(key) {
            Some(value) => value.clone(),
            None => Value::String(key.to_string()),
        }
    }
}
