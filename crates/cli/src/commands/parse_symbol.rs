//! Parse command: decode an option symbol.

use anyhow::Result;
use clap::Args;
use options_risk_engine::contract;

/// Arguments for the parse command.
#[derive(Args, Debug, Clone)]
pub struct ParseSymbolArgs {
    /// Option symbol (e.g., "O:TSLA250417C00252500")
    pub symbol: String,
}

/// Runs the parse command.
///
/// # Errors
/// Returns an error if the symbol is not a valid option identifier.
pub fn run_parse_symbol(args: &ParseSymbolArgs) -> Result<()> {
    tracing::debug!(symbol = %args.symbol, "Parsing option symbol");
    let contract = contract::parse(&args.symbol)?;
    super::print_json(&contract)
}
