use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::Value;

/// Every way a webhook can fail, from local validation to the exchange
/// rejecting the order.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("missing or invalid field(s): {}", .0.join(", "))]
    MissingOrInvalidField(Vec<String>),

    #[error("unsupported action '{action}', must be one of: {}", .valid.join(", "))]
    UnsupportedAction {
        action: String,
        valid: Vec<&'static str>,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("exchange rejected order (HTTP {status}): {message}")]
    Exchange {
        status: u16,
        message: String,
        body: Value,
    },
}

impl RelayError {
    /// Local misuse of the webhook, as opposed to a downstream failure.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            RelayError::MissingOrInvalidField(_) | RelayError::UnsupportedAction { .. }
        )
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            RelayError::MissingOrInvalidField(_) | RelayError::UnsupportedAction { .. } => {
                StatusCode::BAD_REQUEST
            }
            RelayError::Unauthorized => StatusCode::UNAUTHORIZED,
            RelayError::Exchange { .. } => StatusCode::BAD_REQUEST,
            RelayError::Configuration(_) | RelayError::Signing(_) | RelayError::Network(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    exchange: Option<Value>,
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if status.is_server_error() {
            tracing::error!(error = %self, "Order relay failed");
        } else {
            tracing::warn!(error = %self, "Webhook rejected");
        }

        let body = match self {
            RelayError::Exchange {
                status: upstream,
                message,
                body,
            } => ErrorBody {
                error: message,
                status: Some(upstream),
                exchange: Some(body),
            },
            other => ErrorBody {
                error: other.to_string(),
                status: None,
                exchange: None,
            },
        };

        (status, Json(body)).into_response()
    }
}
