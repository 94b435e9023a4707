use serde_json::Value;
use std::sync::Arc;

use crate::cache::CacheStore;
use crate::upstream::{UpstreamError, WeatherSource};

/// Derive the store key for a city. Casing never changes the key.
pub fn cache_key(city: &str) -> String {
    format!("weather:{}", city.to_lowercase())
}

/// Cache-aside read-through over an upstream weather source.
///
/// The store is a performance layer, never a correctness dependency: read
/// failures degrade to a miss and write failures are logged and dropped.
pub struct WeatherFetcher {
    store: Arc<dyn CacheStore>,
    upstream: Arc<dyn WeatherSource>,
    ttl_secs: u64,
}

impl WeatherFetcher {
    pub fn new(store: Arc<dyn CacheStore>, upstream: Arc<dyn WeatherSource>, ttl_secs: u64) -> Self {
        Self {
            store,
            upstream,
            ttl_secs,
        }
    }

    pub async fn fetch_weather(&self, city: &str) -> Result<Value, UpstreamError> {
        let key = cache_key(city);

        match self.store.get(&key).await {
            Ok(Some(raw)) => match serde_json::from_str::<Value>(&raw) {
                Ok(weather) => {
                    tracing::debug!("Serving {} from cache", key);
                    return Ok(weather);
                }
                // Corrupt entry: treat as a miss and refetch.
                Err(e) => {
                    tracing::warn!("Cached value under {} failed to parse: {}", key, e);
                }
            },
            Ok(None) => {}
            Err(e) => {
                tracing::warn!("Cache read for {} failed, treating as miss: {}", key, e);
            }
        }

        let weather = self.upstream.fetch(city).await?;

        match serde_json::to_string(&weather) {
            Ok(serialized) => {
                if let Err(e) = self.store.set_ex(&key, &serialized, self.ttl_secs).await {
                    tracing::warn!("Failed to cache weather data under {}: {}", key, e);
                }
            }
            Err(e) => {
                tracing::warn!("Failed to serialize weather data for {}: {}", key, e);
            }
        }

        tracing::debug!("Serving {} from upstream", key);
        Ok(weather)
    }
}
