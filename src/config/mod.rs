use std::env;
use std::time::Duration;

use anyhow::Context;

use crate::bitget::{Credentials, BITGET_API_BASE};
use crate::models::PositionMode;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,

    /// Bearer token required on `/webhook` when set.
    pub webhook_token: Option<String>,

    // Bitget. Credentials may be absent; orders then fail fast.
    pub credentials: Credentials,
    pub bitget_base_url: String,
    pub hedge_mode: bool,
    pub margin_coin: String,
    pub order_timeout_secs: u64,

    pub log_json: bool,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        Ok(Self {
            host: var("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: var("PORT")
                .unwrap_or_else(|| "8080".into())
                .parse()
                .context("PORT must be a valid port number")?,

            webhook_token: var("WEBHOOK_TOKEN"),

            credentials: Credentials {
                api_key: var("BITGET_API_KEY"),
                api_secret: var("BITGET_API_SECRET"),
                passphrase: var("BITGET_API_PASSPHRASE"),
                sub_account_id: var("BITGET_SUBACCOUNT_UID"),
            },
            bitget_base_url: var("BITGET_BASE_URL").unwrap_or_else(|| BITGET_API_BASE.into()),
            hedge_mode: match var("BITGET_HEDGE_MODE") {
                Some(raw) => parse_bool(&raw)
                    .with_context(|| format!("BITGET_HEDGE_MODE must be a boolean, got '{raw}'"))?,
                None => true,
            },
            margin_coin: var("BITGET_MARGIN_COIN").unwrap_or_else(|| "USDT".into()),
            order_timeout_secs: var("ORDER_TIMEOUT_SECS")
                .unwrap_or_else(|| "10".into())
                .parse()
                .context("ORDER_TIMEOUT_SECS must be a whole number of seconds")?,

            log_json: var("LOG_FORMAT").is_some_and(|f| f.eq_ignore_ascii_case("json")),
        })
    }

    /// Returns true if all Bitget API credentials are configured.
    pub fn has_bitget_auth(&self) -> bool {
        self.credentials.is_complete()
    }

    pub fn position_mode(&self) -> PositionMode {
        PositionMode::from_hedge_flag(self.hedge_mode)
    }

    pub fn order_timeout(&self) -> Duration {
        Duration::from_secs(self.order_timeout_secs)
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> anyhow::Result<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let cfg = config(&[]).unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.bitget_base_url, "https://api.bitget.com");
        assert_eq!(cfg.margin_coin, "USDT");
        assert_eq!(cfg.order_timeout(), Duration::from_secs(10));
        assert_eq!(cfg.position_mode(), PositionMode::Hedge);
        assert!(!cfg.has_bitget_auth());
        assert!(cfg.webhook_token.is_none());
        assert!(!cfg.log_json);
    }

    #[test]
    fn reads_credentials_and_mode() {
        let cfg = config(&[
            ("BITGET_API_KEY", "k"),
            ("BITGET_API_SECRET", "s"),
            ("BITGET_API_PASSPHRASE", "p"),
            ("BITGET_SUBACCOUNT_UID", "42"),
            ("BITGET_HEDGE_MODE", "false"),
            ("PORT", "9000"),
            ("LOG_FORMAT", "JSON"),
        ])
        .unwrap();

        assert!(cfg.has_bitget_auth());
        assert_eq!(cfg.credentials.sub_account_id.as_deref(), Some("42"));
        assert_eq!(cfg.position_mode(), PositionMode::OneWay);
        assert_eq!(cfg.port, 9000);
        assert!(cfg.log_json);
    }

    #[test]
    fn blank_values_count_as_missing() {
        let cfg = config(&[("BITGET_API_KEY", "  "), ("WEBHOOK_TOKEN", "")]).unwrap();
        assert!(cfg.credentials.api_key.is_none());
        assert!(cfg.webhook_token.is_none());
    }

    #[test]
    fn malformed_values_abort() {
        assert!(config(&[("PORT", "eighty")]).is_err());
        assert!(config(&[("BITGET_HEDGE_MODE", "maybe")]).is_err());
        assert!(config(&[("ORDER_TIMEOUT_SECS", "-1")]).is_err());
    }
}
