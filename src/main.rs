use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use weather_cache_server::cache::RedisCacheStore;
use weather_cache_server::config::Config;
use weather_cache_server::fetcher::WeatherFetcher;
use weather_cache_server::routes::{create_router, AppState};
use weather_cache_server::upstream::VisualCrossingClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_cache_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env()?;

    // Verify store connectivity up front; an unreachable cache is fatal here,
    // never later.
    let store = Arc::new(RedisCacheStore::connect(&config.redis_url()).await?);

    // Initialize upstream weather client
    let weather_client = Arc::new(VisualCrossingClient::new(&config));

    let fetcher = Arc::new(WeatherFetcher::new(
        store,
        weather_client,
        config.cache_ttl_secs,
    ));

    let state = AppState { fetcher };

    let app = create_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?;
    tracing::info!("Server starting on http://0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
