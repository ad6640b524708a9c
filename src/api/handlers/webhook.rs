use axum::body::Bytes;
use axum::extract::State;
use axum::Json;
use serde_json::Value;

use crate::errors::RelayError;
use crate::AppState;

/// POST /webhook: relay one trade instruction to Bitget.
///
/// The body is parsed here rather than through the `Json` extractor so that
/// malformed input still gets the `{"error": ...}` shape.
pub async fn receive(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<Value>, RelayError> {
    metrics::counter!("webhooks_received_total").increment(1);

    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        metrics::counter!("webhook_rejections_total").increment(1);
        RelayError::MissingOrInvalidField(vec![format!("body (not valid JSON: {e})")])
    })?;
    tracing::info!(payload = %payload, "Webhook received");

    let response = state.executor.execute(&payload).await?;
    tracing::info!(response = %response, "Bitget API response");

    Ok(Json(response))
}
