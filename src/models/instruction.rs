use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::RelayError;

/// The abstract action vocabulary accepted from signal sources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TradeAction {
    OpenLong,
    CloseLong,
    OpenShort,
    CloseShort,
}

impl TradeAction {
    pub const ALL: [TradeAction; 4] = [
        TradeAction::OpenLong,
        TradeAction::CloseLong,
        TradeAction::OpenShort,
        TradeAction::CloseShort,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TradeAction::OpenLong => "open_long",
            TradeAction::CloseLong => "close_long",
            TradeAction::OpenShort => "open_short",
            TradeAction::CloseShort => "close_short",
        }
    }

    /// Wire names of every supported action, for error messages.
    pub fn valid_names() -> Vec<&'static str> {
        Self::ALL.iter().map(|a| a.as_str()).collect()
    }
}

impl FromStr for TradeAction {
    type Err = RelayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|a| a.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| RelayError::UnsupportedAction {
                action: s.to_string(),
                valid: Self::valid_names(),
            })
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A webhook payload that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeInstruction {
    pub action: TradeAction,
    pub symbol: String,
    /// Strictly positive, in the instrument's base units.
    pub size: Decimal,
}

impl fmt::Display for TradeInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.action, self.size, self.symbol)
    }
}
