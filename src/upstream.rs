use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::config::Config;

#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    #[error("upstream rejected request: HTTP {0}")]
    Rejected(StatusCode),
    #[error("JSON parsing failed: {0}")]
    JsonParsing(#[from] serde_json::Error),
}

/// Source of truth for weather lookups. The payload is opaque JSON; nothing
/// downstream inspects its structure.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, city: &str) -> Result<Value, UpstreamError>;
}

pub struct VisualCrossingClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl VisualCrossingClient {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .user_agent("WeatherCacheServer/1.0")
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: config.weather_base_url.clone(),
            api_key: config.weather_api_key.clone(),
        }
    }
}

#[async_trait]
impl WeatherSource for VisualCrossingClient {
    async fn fetch(&self, city: &str) -> Result<Value, UpstreamError> {
        // The city lands in the path verbatim; any escaping is reqwest's
        // concern, not ours.
        let url = format!("{}/{}", self.base_url, city);

        let response = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpstreamError::Rejected(status));
        }

        let body = response.text().await?;
        let weather: Value = serde_json::from_str(&body)?;
        Ok(weather)
    }
}
