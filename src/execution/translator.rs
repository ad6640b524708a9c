use crate::errors::RelayError;
use crate::models::{
    HoldSide, OrderRequest, OrderType, PositionMode, PositionQualifier, Side, TradeAction,
    TradeInstruction, TradeSide,
};

/// Fixed per-deployment parameters applied to every order.
#[derive(Debug, Clone)]
pub struct OrderSettings {
    pub mode: PositionMode,
    pub margin_coin: String,
    pub sub_account_id: Option<String>,
}

/// Map an action to Bitget's `(side, qualifier)` pair.
///
/// | action      | hedge          | one-way       |
/// |-------------|----------------|---------------|
/// | open_long   | buy  / long    | buy  / open   |
/// | close_long  | sell / long    | buy  / close  |
/// | open_short  | sell / short   | sell / open   |
/// | close_short | buy  / short   | sell / close  |
pub fn translate(action: TradeAction, mode: PositionMode) -> (Side, PositionQualifier) {
    match mode {
        PositionMode::Hedge => match action {
            TradeAction::OpenLong => (Side::Buy, PositionQualifier::PosSide(HoldSide::Long)),
            TradeAction::CloseLong => (Side::Sell, PositionQualifier::PosSide(HoldSide::Long)),
            TradeAction::OpenShort => (Side::Sell, PositionQualifier::PosSide(HoldSide::Short)),
            TradeAction::CloseShort => (Side::Buy, PositionQualifier::PosSide(HoldSide::Short)),
        },
        // Side follows the exposure direction; tradeSide tells open from close.
        PositionMode::OneWay => match action {
            TradeAction::OpenLong => (Side::Buy, PositionQualifier::TradeSide(TradeSide::Open)),
            TradeAction::CloseLong => (Side::Buy, PositionQualifier::TradeSide(TradeSide::Close)),
            TradeAction::OpenShort => (Side::Sell, PositionQualifier::TradeSide(TradeSide::Open)),
            TradeAction::CloseShort => {
                (Side::Sell, PositionQualifier::TradeSide(TradeSide::Close))
            }
        },
    }
}

/// Same as [`translate`] for a raw action name.
pub fn translate_name(
    action: &str,
    mode: PositionMode,
) -> Result<(Side, PositionQualifier), RelayError> {
    Ok(translate(action.parse()?, mode))
}

/// Build the exchange payload for a validated instruction.
pub fn build_order(instruction: &TradeInstruction, settings: &OrderSettings) -> OrderRequest {
    let (side, qualifier) = translate(instruction.action, settings.mode);

    OrderRequest {
        symbol: instruction.symbol.clone(),
        margin_coin: settings.margin_coin.clone(),
        size: instruction.size.to_string(),
        side,
        qualifier,
        order_type: OrderType::Market,
        sub_account_id: settings.sub_account_id.clone(),
    }
}
