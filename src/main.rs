//! Lesson Escrow Simulator Server
//!
//! Serves the simulated escrow contract and attendance oracle over a JSON API
//! for the classroom dashboard.

use std::sync::Arc;

use anyhow::Context;
use axum::http::{header, HeaderValue, Method};
use tower_http::cors::CorsLayer;
use tracing::info;
use tracing_subscriber::EnvFilter;

use lesson_escrow::app_state::AppState;
use lesson_escrow::config::AppConfig;
use lesson_escrow::routes;
use lesson_escrow::services::LessonService;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("invalid configuration")?;
    info!(
        policy = %config.contract.resolution_policy,
        fee_mode = %config.contract.fee_mode,
        required_minutes = config.contract.required_duration_minutes,
        scenario = %config.default_scenario,
        "contract configured"
    );

    let lesson_service = Arc::new(LessonService::from_config(&config));
    let app = routes::app(AppState::new(lesson_service))
        .layer(build_cors_layer(&config.cors_allowed_origins));

    let addr = config.socket_addr();
    info!("Server starting on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let allowed_origins = origins
        .iter()
        .filter_map(|origin| origin.parse::<HeaderValue>().ok())
        .collect::<Vec<_>>();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(false)
}
