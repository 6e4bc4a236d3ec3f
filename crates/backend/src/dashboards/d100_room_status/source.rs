use async_trait::async_trait;
use contracts::dashboards::d100_room_status::LoadError;
use reqwest::header::{ACCEPT, CACHE_CONTROL, CONTENT_TYPE};

use crate::shared::config::SourceConfig;

/// Upstream of the room spreadsheet.
#[async_trait]
pub trait SheetSource: Send + Sync {
    /// Fetches the current CSV export, bypassing caches.
    async fn fetch_csv(&self) -> Result<String, LoadError>;
}

/// Published spreadsheet reachable over HTTP.
pub struct HttpSheetSource {
    client: reqwest::Client,
    url: Option<String>,
}

impl HttpSheetSource {
    pub fn from_config(config: &SourceConfig) -> anyhow::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()?;

        let url = config.csv_url.trim();
        Ok(Self {
            client,
            url: (!url.is_empty()).then(|| url.to_string()),
        })
    }

    pub fn is_configured(&self) -> bool {
        self.url.is_some()
    }
}

#[async_trait]
impl SheetSource for HttpSheetSource {
    async fn fetch_csv(&self) -> Result<String, LoadError> {
        let url = self.url.as_deref().ok_or(LoadError::NotConfigured)?;

        tracing::debug!("Fetching CSV from {}", url);
        let response = self
            .client
            .get(url)
            .header(CACHE_CONTROL, "no-cache")
            .header(ACCEPT, "text/csv, text/plain;q=0.9, */*;q=0.1")
            .send()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LoadError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
            .to_string();
        check_content_type(&content_type)?;

        let bytes = response
            .bytes()
            .await
            .map_err(|e| LoadError::Network(e.to_string()))?;

        String::from_utf8(bytes.to_vec())
            .map_err(|_| LoadError::NotText("body is not valid UTF-8".to_string()))
    }
}

/// Rejects bodies that are clearly not a CSV export (HTML login pages, JSON,
/// binaries). A missing content type is accepted.
fn check_content_type(content_type: &str) -> Result<(), LoadError> {
    let mime = content_type
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();

    let accepted = mime.is_empty()
        || mime.contains("csv")
        || (mime.starts_with("text/") && mime != "text/html")
        || mime == "application/octet-stream";

    if accepted {
        Ok(())
    } else {
        Err(LoadError::NotText(content_type.to_string()))
    }
}
