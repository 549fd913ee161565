//! Route definitions for the lesson escrow API

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::app_state::AppState;
use crate::handlers::*;

// Contract routes
pub fn lesson_routes() -> Router<AppState> {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/reset", post(reset))
        .route("/api/fund", post(fund_lesson))
        .route("/api/topup", post(topup_student))
        .route("/api/resolve", post(resolve_lesson))
}

// Oracle routes
pub fn oracle_routes() -> Router<AppState> {
    Router::new().route("/api/scenario", post(set_scenario).get(get_scenario))
}

/// Full application router with state attached
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(lesson_routes())
        .merge(oracle_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
