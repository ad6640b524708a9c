use std::time::{Duration, Instant};

use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use serde_json::{json, Value};

use crate::errors::RelayError;
use crate::models::OrderRequest;

use super::auth::Credentials;

pub const BITGET_API_BASE: &str = "https://api.bitget.com";
pub const PLACE_ORDER_PATH: &str = "/api/mix/v1/order/placeOrder";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Bitget business code for an accepted request.
const SUCCESS_CODE: &str = "00000";

/// Signs and submits orders to the Bitget mix (futures) API.
///
/// Holds only read-only state, so one instance is shared by every request.
#[derive(Debug, Clone)]
pub struct BitgetClient {
    http: Client,
    credentials: Credentials,
    base_url: String,
    timeout: Duration,
}

impl BitgetClient {
    pub fn new(http: Client, credentials: Credentials) -> Self {
        Self {
            http,
            credentials,
            base_url: BITGET_API_BASE.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Submit a market order. Exactly one POST is attempted; nothing is retried.
    ///
    /// Returns the exchange's JSON on success, or `{"raw": ...}` when the
    /// exchange answered with something other than JSON.
    pub async fn place_order(&self, order: &OrderRequest) -> Result<Value, RelayError> {
        let auth = self.credentials.signer()?;

        let body = order
            .to_body()
            .map_err(|e| RelayError::Signing(format!("order serialization failed: {e}")))?;
        let timestamp = chrono::Utc::now().timestamp_millis().to_string();
        let signature = auth.sign(&timestamp, "POST", PLACE_ORDER_PATH, &body)?;

        tracing::info!(
            symbol = %order.symbol,
            side = %order.side,
            size = %order.size,
            body = %body,
            "Submitting order to Bitget"
        );

        let url = format!("{}{}", self.base_url, PLACE_ORDER_PATH);
        let started = Instant::now();
        let resp = self
            .http
            .post(&url)
            .timeout(self.timeout)
            .header("ACCESS-KEY", &auth.api_key)
            .header("ACCESS-SIGN", signature)
            .header("ACCESS-TIMESTAMP", &timestamp)
            .header("ACCESS-PASSPHRASE", &auth.passphrase)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| self.transport_error(e))?;

        let status = resp.status();
        let is_json = resp
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let text = resp.text().await.map_err(|e| self.transport_error(e))?;

        metrics::histogram!("exchange_latency_seconds").record(started.elapsed().as_secs_f64());
        tracing::info!(status = %status, response = %text, "Bitget response");

        let payload = normalize_body(is_json, &text).map_err(|message| RelayError::Exchange {
            status: status.as_u16(),
            message,
            body: json!({ "raw": text }),
        })?;

        if !status.is_success() {
            return Err(RelayError::Exchange {
                status: status.as_u16(),
                message: exchange_message(&payload)
                    .unwrap_or_else(|| format!("Bitget returned HTTP {status}")),
                body: payload,
            });
        }

        if let Some(code) = business_error_code(&payload) {
            return Err(RelayError::Exchange {
                status: status.as_u16(),
                message: exchange_message(&payload)
                    .unwrap_or_else(|| format!("Bitget returned error code {code}")),
                body: payload,
            });
        }

        Ok(payload)
    }

    fn transport_error(&self, e: reqwest::Error) -> RelayError {
        if e.is_timeout() {
            RelayError::Network(format!(
                "Bitget did not respond within {}ms",
                self.timeout.as_millis()
            ))
        } else {
            RelayError::Network(e.to_string())
        }
    }
}

/// Parse a response body into JSON, or wrap non-JSON text as `{"raw": ...}`.
fn normalize_body(is_json: bool, text: &str) -> Result<Value, String> {
    if is_json {
        serde_json::from_str(text).map_err(|e| format!("malformed JSON from Bitget: {e}"))
    } else {
        Ok(json!({ "raw": text }))
    }
}

/// A `code` other than "00000" in a JSON body marks a rejected request.
fn business_error_code(payload: &Value) -> Option<String> {
    let code = match payload.get("code")? {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        _ => return None,
    };
    (code != SUCCESS_CODE).then_some(code)
}

fn exchange_message(payload: &Value) -> Option<String> {
    payload
        .get("msg")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
        .map(|m| format!("Bitget: {m}"))
}
