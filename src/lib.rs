pub mod auth;
pub mod config;
pub mod db;
pub mod errors;
pub mod extract;
mod http;
pub mod ledger;
mod middleware;
pub mod models;
pub mod roster;
pub mod state;

use axum::{Router, middleware as axum_middleware};
use bb8::Pool;
use bb8_redis::RedisConnectionManager;
use middleware::{cors_layer, create_rate_limiter, rate_limit_middleware};
use std::net::SocketAddr;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::{config::Config, errors::AppError, state::AppState};

pub async fn start_server() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::load()?;

    let manager = RedisConnectionManager::new(config.redis_url.clone())?;
    let redis_pool = Pool::builder().build(manager).await?;

    let port = config.port;
    let rate_limiter = create_rate_limiter(config.rate_limit_per_minute);
    let cors = cors_layer(&config.allowed_origins);
    let state = AppState::new(redis_pool, config);

    let app = Router::new()
        .merge(http::create_http_routes(state))
        .layer(axum_middleware::from_fn(move |req, next| {
            rate_limit_middleware(rate_limiter.clone(), req, next)
        }))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .fallback(|| async { (axum::http::StatusCode::NOT_FOUND, "404 Not Found") });

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .map_err(|e| AppError::EnvError(format!("Failed to bind port {port}: {e}")))?;

    tracing::info!("Player feedback server listening on port {}", port);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|e| {
        tracing::error!("Server error: {}", e);
        AppError::InternalError
    })
}
