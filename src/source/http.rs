use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::dictionary::Dictionary;

use super::{DictionarySource, LoadError};

/// `DictionarySource` 的 HTTP 實作，用於從頁面所在的伺服器取得字典。
pub struct HttpSource {
    /// 頁面的基礎網址；`lang/<code>.json` 會接在它後面。
    base_url: String,
    /// `reqwest` 的非同步 HTTP 客戶端。
    client: Client,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::new(),
        }
    }

    /// 組出 `code` 對應的資源網址。代碼未經驗證，直接插入路徑。
    fn resource_url(&self, code: &str) -> String {
        format!("{}/lang/{code}.json", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl DictionarySource for HttpSource {
    fn name(&self) -> &str {
        "http"
    }

    /// 發出 GET 請求並將回應內容解析為字典。
    ///
    /// 非成功的狀態碼視為載入失敗；內容只要是合法 JSON 就接受，
    /// 不做任何結構驗證。
    async fn fetch(&self, code: &str) -> Result<Dictionary, LoadError> {
        let url = self.resource_url(code);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|err| LoadError::Fetch {
                code: code.to_string(),
                message: err.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status {
                code: code.to_string(),
                status: status.as_u16(),
            });
        }

        let body: Value = response.json().await.map_err(|err| LoadError::Parse {
            code: code.to_string(),
            message: err.to_string(),
        })?;
        Ok(Dictionary::from_value(body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resource_urls_join_cleanly() {
        let source = HttpSource::new("https://example.com/site/");
        assert_eq!(
            source.resource_url("sr"),
            "https://example.com/site/lang/sr.json"
        );
        let bare = HttpSource::new("https://example.com");
        assert_eq!(bare.resource_url("en"), "https://example.com/lang/en.json");
    }
}
