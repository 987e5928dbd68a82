//! Option contract identifiers: `O:<TICKER><YYMMDD><C|P><strike*1000>`.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ParseError;
use crate::types::OptionRight;

/// Prefix marking a symbol as an option identifier.
pub const OPTION_PREFIX: &str = "O:";

const DATE_LEN: usize = 6;
const MIN_STRIKE_DIGITS: usize = 8;
const STRIKE_SCALE: u32 = 2;
const ENCODED_STRIKE_SCALE: u32 = 3;

/// A decoded option contract.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContractIdentifier {
    pub underlying: String,
    pub expiration: NaiveDate,
    pub right: OptionRight,
    /// Always carries exactly two decimal places.
    pub strike: Decimal,
}

impl ContractIdentifier {
    /// Create a contract, normalizing the strike to two decimal places.
    ///
    /// Expirations are encoded with a two-digit year, so only 2000 to 2099
    /// survive a trip through [`ContractIdentifier::to_symbol`].
    #[must_use]
    pub fn new(
        underlying: impl Into<String>,
        expiration: NaiveDate,
        right: OptionRight,
        strike: Decimal,
    ) -> Self {
        Self {
            underlying: underlying.into(),
            expiration,
            right,
            strike: normalize_strike(strike),
        }
    }

    /// Canonical symbol encoding; [`parse`] is its left inverse.
    #[must_use]
    pub fn to_symbol(&self) -> String {
        let mut thousandths = self.strike;
        thousandths.rescale(ENCODED_STRIKE_SCALE);
        format!(
            "{OPTION_PREFIX}{}{}{}{:08}",
            self.underlying,
            self.expiration.format("%y%m%d"),
            self.right.marker(),
            thousandths.mantissa()
        )
    }

    /// Calendar days from `as_of` until expiration, zero once expired.
    #[must_use]
    pub fn days_to_expiration(&self, as_of: NaiveDate) -> u32 {
        let days = (self.expiration - as_of).num_days().max(0);
        u32::try_from(days).unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn is_expired(&self, as_of: NaiveDate) -> bool {
        self.expiration < as_of
    }
}

impl std::fmt::Display for ContractIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_symbol())
    }
}

impl std::str::FromStr for ContractIdentifier {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Decode an option symbol such as `O:TSLA250417C00252500`.
///
/// The type marker is the last `C` or `P` in the symbol; everything after it
/// is the strike and the six characters before it are the expiry, so tickers
/// that themselves contain `C` or `P` decode correctly.
///
/// # Errors
///
/// Returns a [`ParseError`] naming the first structural problem found.
pub fn parse(symbol: &str) -> Result<ContractIdentifier, ParseError> {
    let symbol = symbol.trim();
    let body = symbol
        .strip_prefix(OPTION_PREFIX)
        .ok_or_else(|| ParseError::not_an_option_symbol(symbol))?;

    let marker_pos = body
        .rfind(|c: char| c == 'C' || c == 'P')
        .ok_or_else(|| ParseError::unknown_option_type(symbol))?;
    let right = body[marker_pos..]
        .chars()
        .next()
        .and_then(OptionRight::from_marker)
        .ok_or_else(|| ParseError::unknown_option_type(symbol))?;

    let head = &body[..marker_pos];
    let tail = &body[marker_pos + 1..];

    let strike = parse_strike(tail).ok_or_else(|| ParseError::malformed_strike(symbol))?;

    let split = head
        .len()
        .checked_sub(DATE_LEN)
        .filter(|&i| head.is_char_boundary(i))
        .ok_or_else(|| ParseError::malformed_expiration(symbol))?;
    let (ticker, date) = head.split_at(split);
    let expiration = parse_expiration(date).ok_or_else(|| ParseError::malformed_expiration(symbol))?;

    if ticker.is_empty() {
        return Err(ParseError::missing_underlying(symbol));
    }

    let contract = ContractIdentifier {
        underlying: ticker.to_string(),
        expiration,
        right,
        strike,
    };
    debug!(
        symbol,
        ticker = contract.underlying,
        expiry = %contract.expiration,
        right = %contract.right,
        strike = %contract.strike,
        "Parsed option symbol"
    );
    Ok(contract)
}

fn parse_strike(digits: &str) -> Option<Decimal> {
    if digits.len() < MIN_STRIKE_DIGITS || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let raw: i64 = digits.parse().ok()?;
    if raw == 0 {
        return None;
    }
    Some(normalize_strike(Decimal::new(raw, ENCODED_STRIKE_SCALE)))
}

fn parse_expiration(date: &str) -> Option<NaiveDate> {
    if !date.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: i32 = date[0..2].parse().ok()?;
    let mm: u32 = date[2..4].parse().ok()?;
    let dd: u32 = date[4..6].parse().ok()?;
    NaiveDate::from_ymd_opt(2000 + yy, mm, dd)
}

fn normalize_strike(strike: Decimal) -> Decimal {
    let mut rounded = strike.round_dp(STRIKE_SCALE);
    rounded.rescale(STRIKE_SCALE);
    rounded
}
