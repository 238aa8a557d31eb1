use std::path::PathBuf;

use async_trait::async_trait;
use serde_json::Value;
use tokio::fs;

use crate::dictionary::Dictionary;

use super::{DictionarySource, LoadError};

/// `DictionarySource` 的本地目錄實作，從 `<root>/lang/<code>.json` 讀取字典。
///
/// 供離線嵌入與測試使用；語意與 HTTP 來源一致：找不到檔案等同於
/// 網路錯誤，內容不是合法 JSON 等同於解析錯誤。
pub struct FsSource {
    root: PathBuf,
}

impl FsSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl DictionarySource for FsSource {
    fn name(&self) -> &str {
        "fs"
    }

    async fn fetch(&self, code: &str) -> Result<Dictionary, LoadError> {
        let path = self.root.join("lang").join(format!("{code}.json"));
        let raw = fs::read_to_string(&path)
            .await
            .map_err(|err| LoadError::Fetch {
                code: code.to_string(),
                message: format!("{}: {err}", path.display()),
            })?;
        let body: Value = serde_json::from_str(&raw).map_err(|err| LoadError::Parse {
            code: code.to_string(),
            message: err.to_string(),
        })?;
        Ok(Dictionary::from_value(body))
    }
}
