//! Assess command: stop-loss and decay for one contract symbol.

use anyhow::Result;
use chrono::{NaiveDate, Utc};
use clap::Args;
use options_risk_engine::{AssessmentRequest, RiskEngine};
use rust_decimal::Decimal;

/// Arguments for the assess command.
#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Option symbol (e.g., "O:TSLA250417C00252500")
    pub symbol: String,

    /// Current underlying price
    #[arg(long)]
    pub price: Decimal,

    /// Current option premium; enables the decay projection
    #[arg(long)]
    pub option_price: Option<Decimal>,

    /// Suggested stop-loss buffer percentage from technical analysis
    #[arg(long)]
    pub buffer: Option<Decimal>,

    /// Per-week decay rate override
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Valuation date (YYYY-MM-DD, defaults to today UTC)
    #[arg(long)]
    pub as_of: Option<NaiveDate>,
}

impl AssessArgs {
    fn to_request(&self) -> AssessmentRequest {
        AssessmentRequest {
            symbol: self.symbol.clone(),
            underlying_price: self.price,
            option_price: self.option_price,
            suggested_buffer_pct: self.buffer,
            decay_rate: self.rate,
            as_of: self.as_of.unwrap_or_else(|| Utc::now().date_naive()),
        }
    }
}

/// Runs the assess command.
///
/// # Errors
/// Returns an error if the symbol fails to parse or any input is out of range.
pub fn run_assess(engine: &RiskEngine, args: &AssessArgs) -> Result<()> {
    let request = args.to_request();
    tracing::debug!(symbol = %request.symbol, as_of = %request.as_of, "Assessing contract");
    let assessment = engine.assess(&request)?;
    super::print_json(&assessment)
}
