use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde_json::json;

use crate::AppState;

/// GET /: plain liveness text.
pub async fn index() -> impl IntoResponse {
    (StatusCode::OK, "Bitget trading bot is up!")
}

/// GET /health: healthy even without credentials, but says so.
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let credentials = if state.executor.has_credentials() {
        "configured"
    } else {
        "missing"
    };

    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "credentials": credentials,
            "position_mode": state.executor.mode().to_string(),
        })),
    )
}
