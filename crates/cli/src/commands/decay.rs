//! Decay command: weekly theta decay projection.

use anyhow::{bail, Result};
use clap::Args;
use options_risk_engine::decay;
use rust_decimal::Decimal;

/// Arguments for the decay command.
#[derive(Args, Debug, Clone)]
pub struct DecayArgs {
    /// Current option price
    #[arg(long)]
    pub price: Decimal,

    /// Per-week decay rate as a fraction (defaults to decay.weekly_rate from config)
    #[arg(long, conflicts_with = "schedule")]
    pub rate: Option<Decimal>,

    /// Number of weeks to project
    #[arg(long, conflicts_with = "schedule")]
    pub weeks: Option<u32>,

    /// Comma-separated per-week rates for accelerating decay (e.g., 0.07,0.09,0.11)
    #[arg(long, value_delimiter = ',')]
    pub schedule: Vec<Decimal>,
}

/// Runs the decay command.
///
/// # Errors
/// Returns an error if inputs are out of range or neither `--weeks` nor `--schedule` is given.
pub fn run_decay(default_rate: Decimal, args: &DecayArgs) -> Result<()> {
    if !args.schedule.is_empty() {
        tracing::info!(price = %args.price, weeks = args.schedule.len(), "Projecting scheduled decay");
        let snapshots = decay::project_schedule(args.price, &args.schedule)?;
        return super::print_json(&snapshots);
    }

    let Some(weeks) = args.weeks else {
        bail!("either --weeks or --schedule is required");
    };
    let rate = args.rate.unwrap_or(default_rate);
    tracing::info!(price = %args.price, %rate, weeks, "Projecting decay");
    let snapshots = decay::project(args.price, rate, weeks)?.to_vec();
    super::print_json(&snapshots)
}
