use std::fmt;

use serde::{Deserialize, Serialize};

use super::Side;

/// Bitget account position mode. Fixed per deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PositionMode {
    /// Dual positions per symbol, tagged with `posSide`.
    Hedge,
    /// Single net position per symbol, tagged with `tradeSide`.
    OneWay,
}

impl PositionMode {
    pub fn from_hedge_flag(hedge: bool) -> Self {
        if hedge {
            PositionMode::Hedge
        } else {
            PositionMode::OneWay
        }
    }
}

impl fmt::Display for PositionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PositionMode::Hedge => f.write_str("hedge"),
            PositionMode::OneWay => f.write_str("one_way"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HoldSide {
    Long,
    Short,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Open,
    Close,
}

/// Position qualifier. Serializes to exactly one of `posSide` / `tradeSide`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PositionQualifier {
    #[serde(rename = "posSide")]
    PosSide(HoldSide),
    #[serde(rename = "tradeSide")]
    TradeSide(TradeSide),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderType {
    Market,
}

/// Body of `POST /api/mix/v1/order/placeOrder`.
///
/// Field order here is the serialized key order, which is part of the
/// signed payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub symbol: String,
    pub margin_coin: String,
    pub size: String,
    pub side: Side,
    #[serde(flatten)]
    pub qualifier: PositionQualifier,
    pub order_type: OrderType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub_account_id: Option<String>,
}

impl OrderRequest {
    /// Compact JSON, no whitespace. This is both the signed and sent body.
    pub fn to_body(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
