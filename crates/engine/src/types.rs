//! Value types shared across the risk engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::RiskError;

/// Options contract right (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionRight {
    Call,
    Put,
}

impl OptionRight {
    /// Single-character marker used in option symbols.
    #[must_use]
    pub const fn marker(self) -> char {
        match self {
            Self::Call => 'C',
            Self::Put => 'P',
        }
    }

    /// Inverse of [`OptionRight::marker`].
    #[must_use]
    pub const fn from_marker(c: char) -> Option<Self> {
        match c {
            'C' => Some(Self::Call),
            'P' => Some(Self::Put),
            _ => None,
        }
    }
}

impl std::fmt::Display for OptionRight {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "CALL"),
            Self::Put => write!(f, "PUT"),
        }
    }
}

impl std::str::FromStr for OptionRight {
    type Err = RiskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "c" | "call" => Ok(Self::Call),
            "p" | "put" => Ok(Self::Put),
            _ => Err(RiskError::invalid_input(format!(
                "invalid option right: '{s}'. Valid values: call, put"
            ))),
        }
    }
}

/// A stop-loss level that has passed buffer enforcement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopLossResult {
    pub stop_loss_price: Decimal,
    /// Buffer actually in effect, as a percentage of current price.
    pub applied_buffer_pct: Decimal,
    /// True when the requested buffer exceeded policy and was clamped.
    pub was_enforced: bool,
}

/// One period of a theta decay projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecaySnapshot {
    /// 1-based period (week) number.
    pub period_index: u32,
    pub projected_price: Decimal,
    /// Loss relative to the previous period.
    pub period_loss_pct: Decimal,
    /// Loss relative to the starting price.
    pub cumulative_loss_pct: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_right_display_and_marker() {
        assert_eq!(OptionRight::Call.to_string(), "CALL");
        assert_eq!(OptionRight::Put.to_string(), "PUT");
        assert_eq!(OptionRight::Call.marker(), 'C');
        assert_eq!(OptionRight::from_marker('P'), Some(OptionRight::Put));
        assert_eq!(OptionRight::from_marker('X'), None);
    }

    #[test]
    fn option_right_from_str() {
        assert_eq!("call".parse::<OptionRight>().unwrap(), OptionRight::Call);
        assert_eq!("P".parse::<OptionRight>().unwrap(), OptionRight::Put);
        assert!("straddle".parse::<OptionRight>().is_err());
    }

    #[test]
    fn option_right_serde() {
        let json = serde_json::to_string(&OptionRight::Put).unwrap();
        assert_eq!(json, "\"put\"");
        let parsed: OptionRight = serde_json::from_str("\"call\"").unwrap();
        assert_eq!(parsed, OptionRight::Call);
    }
}
