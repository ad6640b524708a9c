use serde_json::Value;

use crate::bitget::BitgetClient;
use crate::errors::RelayError;
use crate::models::PositionMode;

use super::translator::{build_order, OrderSettings};
use super::validator::validate;

/// Webhook payload in, exchange response out.
///
/// Validation always runs before any signing or network activity, so a bad
/// payload never costs an exchange API call.
#[derive(Debug, Clone)]
pub struct OrderExecutor {
    client: BitgetClient,
    settings: OrderSettings,
}

impl OrderExecutor {
    pub fn new(client: BitgetClient, mode: PositionMode, margin_coin: impl Into<String>) -> Self {
        let settings = OrderSettings {
            mode,
            margin_coin: margin_coin.into(),
            sub_account_id: client.credentials().sub_account_id.clone(),
        };
        Self { client, settings }
    }

    pub fn mode(&self) -> PositionMode {
        self.settings.mode
    }

    pub fn has_credentials(&self) -> bool {
        self.client.credentials().is_complete()
    }

    /// Validate, translate and submit one webhook payload.
    pub async fn execute(&self, payload: &Value) -> Result<Value, RelayError> {
        let instruction = validate(payload).inspect_err(|_| {
            metrics::counter!("webhook_rejections_total").increment(1);
        })?;

        let order = build_order(&instruction, &self.settings);
        tracing::info!(
            instruction = %instruction,
            mode = %self.settings.mode,
            "Translated webhook instruction"
        );

        match self.client.place_order(&order).await {
            Ok(response) => {
                metrics::counter!("orders_submitted_total").increment(1);
                Ok(response)
            }
            Err(e) => {
                metrics::counter!("orders_failed_total").increment(1);
                Err(e)
            }
        }
    }
}
