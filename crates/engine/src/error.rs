//! Error types for the options risk engine.
//!
//! Parse failures describe why a symbol is not a usable option identifier;
//! everything else is an input validation failure. Nothing here is transient.

use thiserror::Error;

/// Reasons an option symbol could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// Symbol lacks the `O:` option prefix.
    #[error("not an option symbol: {symbol}")]
    NotAnOptionSymbol {
        /// The rejected input.
        symbol: String,
    },

    /// Symbol carries neither a `C` nor a `P` marker.
    #[error("unknown option type in {symbol}")]
    UnknownOptionType {
        /// The rejected input.
        symbol: String,
    },

    /// Strike suffix is non-numeric, shorter than 8 digits, or zero.
    #[error("malformed strike in {symbol}")]
    MalformedStrike {
        /// The rejected input.
        symbol: String,
    },

    /// The six characters before the type marker are not a `YYMMDD` date.
    #[error("malformed expiration in {symbol}")]
    MalformedExpiration {
        /// The rejected input.
        symbol: String,
    },

    /// Nothing precedes the expiration date.
    #[error("missing underlying ticker in {symbol}")]
    MissingUnderlying {
        /// The rejected input.
        symbol: String,
    },
}

impl ParseError {
    pub fn not_an_option_symbol(symbol: impl Into<String>) -> Self {
        Self::NotAnOptionSymbol {
            symbol: symbol.into(),
        }
    }

    pub fn unknown_option_type(symbol: impl Into<String>) -> Self {
        Self::UnknownOptionType {
            symbol: symbol.into(),
        }
    }

    pub fn malformed_strike(symbol: impl Into<String>) -> Self {
        Self::MalformedStrike {
            symbol: symbol.into(),
        }
    }

    pub fn malformed_expiration(symbol: impl Into<String>) -> Self {
        Self::MalformedExpiration {
            symbol: symbol.into(),
        }
    }

    pub fn missing_underlying(symbol: impl Into<String>) -> Self {
        Self::MissingUnderlying {
            symbol: symbol.into(),
        }
    }
}

/// Errors returned by the risk engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RiskError {
    /// Contract identifier could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// A numeric argument is out of its valid domain.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A custom buffer policy table is inconsistent.
    #[error("invalid buffer policy: {0}")]
    InvalidPolicy(String),
}

impl RiskError {
    /// Creates an input validation error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a policy table validation error.
    pub fn invalid_policy(message: impl Into<String>) -> Self {
        Self::InvalidPolicy(message.into())
    }
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, RiskError>;
