//! Stop-loss command: policy-enforced stop for a position.

use anyhow::Result;
use clap::Args;
use options_risk_engine::{OptionRight, RiskEngine};
use rust_decimal::Decimal;

/// Arguments for the stop-loss command.
#[derive(Args, Debug, Clone)]
pub struct StopLossArgs {
    /// Current underlying price
    #[arg(long)]
    pub price: Decimal,

    /// Option right (call or put)
    #[arg(long)]
    pub right: OptionRight,

    /// Days to expiration
    #[arg(long)]
    pub dte: u32,

    /// Suggested buffer percentage (defaults to the policy maximum for the DTE)
    #[arg(long)]
    pub buffer: Option<Decimal>,
}

/// Runs the stop-loss command.
///
/// # Errors
/// Returns an error if the price is not positive or the buffer is negative.
pub fn run_stop_loss(engine: &RiskEngine, args: &StopLossArgs) -> Result<()> {
    tracing::info!(
        price = %args.price,
        right = %args.right,
        dte = args.dte,
        "Computing stop-loss"
    );
    let result = engine.stop_loss(args.price, args.right, args.dte, args.buffer)?;
    super::print_json(&result)
}
