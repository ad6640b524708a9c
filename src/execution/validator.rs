use std::str::FromStr;

use rust_decimal::Decimal;
use serde_json::Value;

use crate::errors::RelayError;
use crate::models::{TradeAction, TradeInstruction};

/// Validate a raw webhook body into a [`TradeInstruction`].
///
/// All missing or wrong-typed fields are reported together. A well-typed but
/// unknown action is reported as `UnsupportedAction` once the other fields pass.
pub fn validate(payload: &Value) -> Result<TradeInstruction, RelayError> {
    let Some(fields) = payload.as_object() else {
        return Err(RelayError::MissingOrInvalidField(vec!["body".into()]));
    };

    let action = fields.get("action").and_then(Value::as_str);
    let symbol = fields
        .get("symbol")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty());
    let size = fields.get("amount").and_then(parse_amount);

    let mut invalid = Vec::new();
    if action.is_none() {
        invalid.push("action".to_string());
    }
    if symbol.is_none() {
        invalid.push("symbol".to_string());
    }
    if size.is_none() {
        invalid.push("amount".to_string());
    }

    match (action, symbol, size) {
        (Some(action), Some(symbol), Some(size)) => Ok(TradeInstruction {
            action: TradeAction::from_str(action)?,
            symbol: symbol.to_string(),
            size,
        }),
        _ => Err(RelayError::MissingOrInvalidField(invalid)),
    }
}

/// A JSON number that is strictly positive and fits a decimal.
fn parse_amount(value: &Value) -> Option<Decimal> {
    let Value::Number(number) = value else {
        return None;
    };
    let raw = number.to_string();
    let amount = Decimal::from_str(&raw)
        .or_else(|_| Decimal::from_scientific(&raw))
        .ok()?;
    (amount > Decimal::ZERO).then(|| amount.normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn invalid_fields(payload: Value) -> Vec<String> {
        match validate(&payload) {
            Err(RelayError::MissingOrInvalidField(fields)) => fields,
            other => panic!("expected MissingOrInvalidField, got {other:?}"),
        }
    }

    #[test]
    fn accepts_well_formed_instruction() {
        let instr = validate(&json!({
            "action": "open_long",
            "symbol": "BTCUSDT",
            "amount": 0.001
        }))
        .unwrap();

        assert_eq!(instr.action, TradeAction::OpenLong);
        assert_eq!(instr.symbol, "BTCUSDT");
        assert_eq!(instr.size.to_string(), "0.001");
    }

    #[test]
    fn empty_object_reports_every_field() {
        assert_eq!(invalid_fields(json!({})), vec!["action", "symbol", "amount"]);
    }

    #[test]
    fn missing_amount_is_rejected() {
        assert_eq!(
            invalid_fields(json!({ "action": "open_long", "symbol": "BTCUSDT" })),
            vec!["amount"]
        );
    }

    #[test]
    fn unknown_action_is_unsupported() {
        let err = validate(&json!({ "action": "sideways", "symbol": "BTCUSDT", "amount": 1 }))
            .unwrap_err();
        assert!(matches!(err, RelayError::UnsupportedAction { .. }));
        assert!(err.is_validation());
    }

    #[test]
    fn non_positive_amount_is_rejected() {
        assert_eq!(
            invalid_fields(json!({ "action": "open_long", "symbol": "BTCUSDT", "amount": -1 })),
            vec!["amount"]
        );
        assert_eq!(
            invalid_fields(json!({ "action": "open_long", "symbol": "BTCUSDT", "amount": 0 })),
            vec!["amount"]
        );
    }

    #[test]
    fn wrong_types_are_rejected() {
        assert_eq!(
            invalid_fields(json!({ "action": 3, "symbol": "", "amount": "0.5" })),
            vec!["action", "symbol", "amount"]
        );
        assert_eq!(invalid_fields(json!(["open_long"])), vec!["body"]);
    }

    #[test]
    fn amounts_are_normalized() {
        let instr = validate(&json!({ "action": "close_short", "symbol": " ETHUSDT ", "amount": 2.50 }))
            .unwrap();
        assert_eq!(instr.size.to_string(), "2.5");
        assert_eq!(instr.symbol, "ETHUSDT");

        let instr = validate(&json!({ "action": "close_short", "symbol": "ETHUSDT", "amount": 3 }))
            .unwrap();
        assert_eq!(instr.size.to_string(), "3");
    }
}
