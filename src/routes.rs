use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::Arc;

use crate::fetcher::WeatherFetcher;
use crate::upstream::UpstreamError;

// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<WeatherFetcher>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
    pub version: String,
}

// Route handlers
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

pub async fn get_weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<Value>, (StatusCode, Json<Value>)> {
    match state.fetcher.fetch_weather(&city).await {
        Ok(weather) => Ok(Json(weather)),
        Err(e) => {
            tracing::error!("Weather lookup for {} failed: {}", city, e);
            Err(error_response(&e))
        }
    }
}

/// Map a fetch error to the client-facing status and message. Upstream
/// rejections keep the provider's status code; everything else is a 500.
/// Internal error details never reach the client.
pub fn error_response(err: &UpstreamError) -> (StatusCode, Json<Value>) {
    match err {
        UpstreamError::RequestFailed(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to fetch weather data"})),
        ),
        UpstreamError::Rejected(status) => (
            // reqwest and axum sit on different http crate majors, so the
            // status travels as a raw u16.
            StatusCode::from_u16(status.as_u16()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            Json(json!({"error": "Invalid city or API error"})),
        ),
        UpstreamError::JsonParsing(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"error": "Failed to parse weather data"})),
        ),
    }
}

// Create the router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/weather/:city", get(get_weather))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_error_keeps_upstream_status() {
        let err = UpstreamError::Rejected(reqwest::StatusCode::NOT_FOUND);

        let (status, Json(body)) = error_response(&err);

        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "Invalid city or API error"}));
    }

    #[test]
    fn test_parse_error_maps_to_internal_error() {
        let parse_err = serde_json::from_str::<Value>("not json").unwrap_err();
        let err = UpstreamError::JsonParsing(parse_err);

        let (status, Json(body)) = error_response(&err);

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to parse weather data"}));
    }
}
