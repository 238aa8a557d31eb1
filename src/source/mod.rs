//! `source` 模組負責提供取得語言字典的具體實作。
//!
//! 每個子模組（`http`, `fs`）都實現了 `DictionarySource` trait，
//! 抽象化了字典資源的取得細節；兩者都解析 `lang/<code>.json` 路徑。

/// `http` 模組：透過 HTTP GET 取得遠端字典資源的實作。
pub mod http;

/// `fs` 模組：從本地目錄讀取字典檔案的實作，供離線嵌入與測試使用。
pub mod fs;

use async_trait::async_trait;
use thiserror::Error;

use crate::dictionary::Dictionary;

pub use fs::FsSource;
pub use http::HttpSource;

/// 字典載入失敗的分類。
///
/// 公開介面的呼叫者永遠不會看到這些錯誤；它們在載入完成的邊界被記錄後丟棄。
#[derive(Debug, Error)]
pub enum LoadError {
    /// 請求根本沒有得到回應（網路錯誤、檔案不存在）。
    #[error("failed to fetch translations for '{code}': {message}")]
    Fetch { code: String, message: String },
    /// 伺服器回應了非成功的狀態碼。
    #[error("failed to load translations for '{code}': HTTP {status}")]
    Status { code: String, status: u16 },
    /// 回應內容不是合法的 JSON。
    #[error("invalid dictionary body for '{code}': {message}")]
    Parse { code: String, message: String },
}

/// 定義了所有字典來源都必須遵守的通用介面。
///
/// 語言代碼不經驗證即被插入資源路徑；不存在的代碼自然會以
/// [`LoadError`] 失敗並由呼叫端記錄。
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// 回傳此來源的名稱，用於日誌記錄。
    fn name(&self) -> &str;

    /// 非同步地取得並解析 `code` 對應的字典。
    async fn fetch(&self, code: &str) -> Result<Dictionary, LoadError>;
}
