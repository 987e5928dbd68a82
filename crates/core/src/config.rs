use anyhow::{bail, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub decay: DecayConfig,
    pub logging: LoggingConfig,
}

/// Defaults for the weekly theta decay projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Fraction of value lost per period when the caller does not supply one (0.08 = 8%).
    pub weekly_rate: Decimal,
    /// Calendar days in one projection period.
    pub days_per_period: u32,
    /// Upper bound on projected periods for long-dated contracts.
    pub max_periods: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Fallback filter directive when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            weekly_rate: Decimal::new(8, 2),
            days_per_period: 7,
            max_periods: 52,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl EngineConfig {
    /// Rejects settings the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error if the decay rate is outside (0, 1) or a period setting is zero.
    pub fn validate(&self) -> Result<()> {
        let rate = self.decay.weekly_rate;
        if rate <= Decimal::ZERO || rate >= Decimal::ONE {
            bail!("decay.weekly_rate must be between 0 and 1 (exclusive), got {rate}");
        }
        if self.decay.days_per_period == 0 {
            bail!("decay.days_per_period must be positive");
        }
        if self.decay.max_periods == 0 {
            bail!("decay.max_periods must be positive");
        }
        Ok(())
    }
}
