use bitget_relay::api::router::create_router;
use bitget_relay::config::AppConfig;
use bitget_relay::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_json);

    let addr = format!("{}:{}", config.host, config.port);

    if !config.has_bitget_auth() {
        tracing::warn!(
            missing = %config.credentials.missing().join(", "),
            "Bitget API credentials are missing, orders will fail"
        );
    }
    if config.webhook_token.is_none() {
        tracing::warn!("WEBHOOK_TOKEN not set, /webhook accepts unauthenticated requests");
    }

    tracing::info!(
        mode = %config.position_mode(),
        margin_coin = %config.margin_coin,
        base_url = %config.bitget_base_url,
        timeout_secs = config.order_timeout_secs,
        sub_account = config.credentials.sub_account_id.is_some(),
        "Order relay configured"
    );

    let metrics_handle = bitget_relay::metrics::init_metrics()?;
    let state = AppState::new(config, reqwest::Client::new(), metrics_handle);
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {addr}");
    axum::serve(listener, router).await?;

    Ok(())
}

fn init_tracing(json: bool) {
    use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry.with(fmt::layer().json()).init();
    } else {
        registry.with(fmt::layer()).init();
    }
}
