use crate::domain::model::LoadErrorKind;
use crate::domain::ports::Fetcher;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("HTTP error! status: {0}")]
    Status(u16),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("unexpected document shape: {0}")]
    Shape(String),
}

impl LoadError {
    pub fn kind(&self) -> LoadErrorKind {
        match self {
            LoadError::Transport(_) => LoadErrorKind::Transport,
            LoadError::Status(_) => LoadErrorKind::Status,
            LoadError::Parse(_) => LoadErrorKind::Parse,
            LoadError::Shape(_) => LoadErrorKind::Shape,
        }
    }
}

/// Body bytes are decoded as UTF-8 (lossily, like a browser's `text()`,
/// which also drops a leading BOM) then parsed.
pub fn parse_json(body: &[u8]) -> Result<Value, LoadError> {
    let text = String::from_utf8_lossy(body);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    Ok(serde_json::from_str(text)?)
}

/// Fetches JSON documents. Never retries.
pub struct JsonLoader<F: Fetcher> {
    fetcher: F,
}

impl<F: Fetcher> JsonLoader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Tagged form of [`load`](Self::load).
    pub async fn try_load(&self, url: &str) -> Result<Value, LoadError> {
        tracing::debug!(url, "Fetching JSON resource");
        let response = self
            .fetcher
            .fetch(url)
            .await
            .map_err(|e| LoadError::Transport(e.to_string()))?;

        if !response.is_success() {
            return Err(LoadError::Status(response.status));
        }

        parse_json(&response.body)
    }

    /// Fetch and decode into `T`. A document that parses but does not match
    /// `T` is reported as [`LoadError::Shape`].
    pub async fn try_load_as<T: DeserializeOwned>(&self, url: &str) -> Result<T, LoadError> {
        let value = self.try_load(url).await?;
        serde_json::from_value(value).map_err(|e| LoadError::Shape(e.to_string()))
    }

    /// Every failure is logged and collapses to `None`.
    pub async fn load(&self, url: &str) -> Option<Value> {
        match self.try_load(url).await {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::error!(url, kind = %e.kind(), "Failed to load data: {}", e);
                None
            }
        }
    }
}
