use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why a load cycle produced no new dataset.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum LoadError {
    #[error("CSV source is not configured")]
    NotConfigured,

    #[error("network error: {0}")]
    Network(String),

    #[error("HTTP status {0}")]
    Status(u16),

    #[error("response is not CSV text: {0}")]
    NotText(String),

    #[error("malformed CSV: {0}")]
    Malformed(String),
}

/// Header set by the source proxy on its 503 when no CSV URL is configured.
pub const SOURCE_STATE_HEADER: &str = "x-d100-source";
pub const SOURCE_NOT_CONFIGURED: &str = "not-configured";

impl LoadError {
    /// Error for a non-success proxy response. A 503 only means "not
    /// configured" when it carries the marker; any other 503 came from
    /// something in between.
    pub fn from_proxy_status(status: u16, source_state: Option<&str>) -> Self {
        match (status, source_state.map(str::trim)) {
            (503, Some(SOURCE_NOT_CONFIGURED)) => LoadError::NotConfigured,
            (status, _) => LoadError::Status(status),
        }
    }
}
