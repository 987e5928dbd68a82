//! CLI commands for the options risk engine.
//!
//! Each command prints JSON on stdout for a downstream renderer; logs go to stderr.

pub mod assess;
pub mod decay;
pub mod parse_symbol;
pub mod stop_loss;

pub use assess::{run_assess, AssessArgs};
pub use decay::{run_decay, DecayArgs};
pub use parse_symbol::{run_parse_symbol, ParseSymbolArgs};
pub use stop_loss::{run_stop_loss, StopLossArgs};

use anyhow::{Context, Result};
use serde::Serialize;

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{json}");
    Ok(())
}
