use serde::{Deserialize, Serialize};
use std::env;

pub const DEFAULT_CACHE_TTL_SECS: u64 = 12 * 60 * 60;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    pub weather_api_key: String,
    pub weather_base_url: String,
    pub redis_host: String,
    pub redis_port: String,
    pub redis_password: String,
    pub cache_ttl_secs: u64,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        Ok(Config {
            weather_api_key: env::var("WEATHER_API_KEY")
                .map_err(|_| anyhow::anyhow!("WEATHER_API_KEY not set"))?,
            weather_base_url: env::var("WEATHER_BASE_URL").unwrap_or_else(|_| {
                "https://weather.visualcrossing.com/VisualCrossingWebServices/rest/services/timeline"
                    .to_string()
            }),
            redis_host: env::var("REDIS_HOST")
                .map_err(|_| anyhow::anyhow!("REDIS_HOST not set"))?,
            redis_port: env::var("REDIS_PORT")
                .map_err(|_| anyhow::anyhow!("REDIS_PORT not set"))?,
            redis_password: env::var("REDIS_PASSWORD").unwrap_or_default(),
            cache_ttl_secs: match env::var("CACHE_TTL_SECS") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("CACHE_TTL_SECS is not a valid integer"))?,
                Err(_) => DEFAULT_CACHE_TTL_SECS,
            },
            port: match env::var("PORT") {
                Ok(raw) => raw
                    .parse()
                    .map_err(|_| anyhow::anyhow!("PORT is not a valid port number"))?,
                Err(_) => 3000,
            },
        })
    }

    /// Connection URL for the cache store, always against database 0.
    pub fn redis_url(&self) -> String {
        if self.redis_password.is_empty() {
            format!("redis://{}:{}/0", self.redis_host, self.redis_port)
        } else {
            format!(
                "redis://:{}@{}:{}/0",
                self.redis_password, self.redis_host, self.redis_port
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redis_url_without_password() {
        let config = Config {
            weather_api_key: "k".to_string(),
            weather_base_url: "https://example.com".to_string(),
            redis_host: "localhost".to_string(),
            redis_port: "6379".to_string(),
            redis_password: String::new(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            port: 3000,
        };

        assert_eq!(config.redis_url(), "redis://localhost:6379/0");
    }

    #[test]
    fn test_redis_url_with_password() {
        let config = Config {
            weather_api_key: "k".to_string(),
            weather_base_url: "https://example.com".to_string(),
            redis_host: "cache.internal".to_string(),
            redis_port: "6380".to_string(),
            redis_password: "hunter2".to_string(),
            cache_ttl_secs: DEFAULT_CACHE_TTL_SECS,
            port: 3000,
        };

        assert_eq!(config.redis_url(), "redis://:hunter2@cache.internal:6380/0");
    }
}
