use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};

/// What actually sits in the preference file: a single key, named after the
/// storage key the page has always used.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredPreferences {
    #[serde(rename = "preferredLanguage", default, skip_serializing_if = "Option::is_none")]
    preferred_language: Option<String>,
}

/// Durable storage for the last explicitly chosen language.
///
/// Read once at startup as a fallback source, written on every explicit
/// change. The stored code is handed back as-is; validation happens (or
/// deliberately does not happen) at the point of use.
#[derive(Debug, Clone)]
pub struct PreferenceStore {
    path: PathBuf,
}

impl PreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The stored language code, if any. A missing or malformed file reads
    /// as "nothing stored" rather than an error.
    pub fn preferred_language(&self) -> Option<String> {
        let raw = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str::<StoredPreferences>(&raw) {
            Ok(prefs) => prefs.preferred_language,
            Err(err) => {
                warn!(
                    "ignoring malformed preference file {}: {err}",
                    self.path.display()
                );
                None
            }
        }
    }

    /// Overwrites the stored preference with `code`.
    pub fn remember_language(&self, code: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("failed to create preference directory {}", parent.display())
                })?;
            }
        }
        let prefs = StoredPreferences {
            preferred_language: Some(code.to_string()),
        };
        let body = serde_json::to_string_pretty(&prefs)?;
        fs::write(&self.path, body)
            .with_context(|| format!("failed to write preferences to {}", self.path.display()))
    }
}
