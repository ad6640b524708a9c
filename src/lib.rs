pub mod api;
pub mod bitget;
pub mod config;
pub mod errors;
pub mod execution;
pub mod metrics;
pub mod models;

use std::sync::Arc;

use metrics_exporter_prometheus::PrometheusHandle;

use crate::bitget::BitgetClient;
use crate::config::AppConfig;
use crate::execution::OrderExecutor;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub executor: Arc<OrderExecutor>,
    pub metrics_handle: PrometheusHandle,
}

impl AppState {
    /// Wire the Bitget client and executor from the loaded config.
    pub fn new(config: AppConfig, http: reqwest::Client, metrics_handle: PrometheusHandle) -> Self {
        let client = BitgetClient::new(http, config.credentials.clone())
            .with_base_url(config.bitget_base_url.clone())
            .with_timeout(config.order_timeout());
        let executor = OrderExecutor::new(client, config.position_mode(), config.margin_coin.clone());

        Self {
            config: Arc::new(config),
            executor: Arc::new(executor),
            metrics_handle,
        }
    }
}
