use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::AppState;
use super::auth::require_token;
use super::handlers;

pub fn create_router(state: AppState) -> Router {
    // Public routes: no authentication required
    let public = Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::health_check))
        .route("/metrics", get(handlers::metrics::render));

    // Signal sources: bearer token when WEBHOOK_TOKEN is set
    let webhook = Router::new()
        .route("/webhook", post(handlers::webhook::receive))
        .layer(middleware::from_fn_with_state(state.clone(), require_token));

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    public
        .merge(webhook)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
