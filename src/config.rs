use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::lang::Lang;
use crate::source::{DictionarySource, FsSource, HttpSource};

/// 示範程式的頂層設定，通常從 `config/i18n.toml` 載入。
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// 字典來源：遠端網址或本地目錄。
    #[serde(default)]
    pub source: SourceSettings,
    /// 語言偏好設定檔的儲存位置。
    #[serde(default = "default_storage_path")]
    pub storage_path: PathBuf,
    /// 後備的預設語言。
    #[serde(default)]
    pub default_language: Lang,
    /// 是否追蹤 URL 片段（片段優先於儲存的偏好）。
    #[serde(default = "default_track_fragment")]
    pub track_fragment: bool,
    /// 啟動時的 URL 片段，模擬以 `#<code>` 開啟頁面。
    #[serde(default)]
    pub initial_fragment: Option<String>,
}

/// 字典來源的設定。
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SourceSettings {
    /// 透過 HTTP 從 `<base_url>/lang/<code>.json` 取得。
    Http { base_url: String },
    /// 從 `<root>/lang/<code>.json` 讀取。
    Fs { root: PathBuf },
}

impl Default for SourceSettings {
    fn default() -> Self {
        SourceSettings::Fs {
            root: PathBuf::from("."),
        }
    }
}

fn default_storage_path() -> PathBuf {
    PathBuf::from("preferences.json")
}

fn default_track_fragment() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: SourceSettings::default(),
            storage_path: default_storage_path(),
            default_language: Lang::default(),
            track_fragment: default_track_fragment(),
            initial_fragment: None,
        }
    }
}

impl Settings {
    /// 從指定的工作目錄讀取設定。
    /// 如果 `config/i18n.toml` 不存在，則使用預設值。
    pub fn load(workspace_root: &Path) -> Result<Self> {
        let config_path = workspace_root.join("config/i18n.toml");
        if config_path.exists() {
            let raw = fs::read_to_string(&config_path)
                .with_context(|| format!("failed to read settings: {}", config_path.display()))?;
            let parsed: Settings = toml::from_str(&raw)
                .with_context(|| format!("failed to parse settings: {}", config_path.display()))?;
            Ok(parsed.normalize(workspace_root))
        } else {
            Ok(Settings::default().normalize(workspace_root))
        }
    }

    /// 標準化設定中的路徑，將相對路徑解析為相對於工作目錄的絕對路徑。
    fn normalize(mut self, workspace_root: &Path) -> Self {
        if self.storage_path.is_relative() {
            let joined = workspace_root.join(&self.storage_path);
            self.storage_path = joined;
        }
        if let SourceSettings::Fs { root } = &mut self.source {
            if root.is_relative() {
                let joined = workspace_root.join(&*root);
                *root = joined;
            }
        }
        self
    }

    /// 根據設定建立對應的字典來源。
    pub fn build_source(&self) -> Arc<dyn DictionarySource> {
        match &self.source {
            SourceSettings::Http { base_url } => Arc::new(HttpSource::new(base_url.clone())),
            SourceSettings::Fs { root } => Arc::new(FsSource::new(root.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    #[test]
    fn missing_config_falls_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.default_language, Lang::En);
        assert!(settings.track_fragment);
        assert!(matches!(settings.source, SourceSettings::Fs { .. }));
        assert_eq!(settings.storage_path, dir.path().join("preferences.json"));
    }

    #[test]
    fn config_file_overrides_defaults() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("config")).unwrap();
        fs::write(
            dir.path().join("config/i18n.toml"),
            r#"
default_language = "sr"
track_fragment = false
initial_fragment = "ru"
storage_path = "state/prefs.json"

[source]
kind = "http"
base_url = "https://example.com/site"
"#,
        )
        .unwrap();

        let settings = Settings::load(dir.path()).unwrap();
        assert_eq!(settings.default_language, Lang::Sr);
        assert!(!settings.track_fragment);
        assert_eq!(settings.initial_fragment.as_deref(), Some("ru"));
        assert_eq!(settings.storage_path, dir.path().join("state/prefs.json"));
        assert!(matches!(settings.source, SourceSettings::Http { .. }));
    }
}
