//! Risk engine facade: the entry point the chat renderer and CLI call.
//!
//! Every stop-loss it returns has passed through [`BufferEnforcer`] exactly
//! once, whether the buffer came from a caller suggestion or the policy
//! default.

use chrono::NaiveDate;
use options_risk_core::{DecayConfig, EngineConfig};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::contract::{self, ContractIdentifier};
use crate::decay;
use crate::enforcer::BufferEnforcer;
use crate::error::Result;
use crate::policy::BufferPolicyTable;
use crate::stop_loss::compute_raw_stop_loss;
use crate::types::{DecaySnapshot, OptionRight, StopLossResult};

/// Inputs for a full assessment of one contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssessmentRequest {
    pub symbol: String,
    /// Current price of the underlying.
    pub underlying_price: Decimal,
    /// Current option premium; no decay projection without it.
    pub option_price: Option<Decimal>,
    /// Buffer suggested by technical analysis; policy default when absent.
    pub suggested_buffer_pct: Option<Decimal>,
    /// Overrides the configured weekly decay rate.
    pub decay_rate: Option<Decimal>,
    pub as_of: NaiveDate,
}

/// Everything a renderer needs to describe one contract's risk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub contract: ContractIdentifier,
    pub days_to_expiration: u32,
    pub stop_loss: StopLossResult,
    pub decay: Vec<DecaySnapshot>,
}

#[derive(Debug, Clone, Default)]
pub struct RiskEngine {
    enforcer: BufferEnforcer,
    decay: DecayConfig,
}

impl RiskEngine {
    /// Engine with the standard buffer policy.
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self::with_policy(config, BufferPolicyTable::standard())
    }

    #[must_use]
    pub fn with_policy(config: &EngineConfig, policy: BufferPolicyTable) -> Self {
        Self {
            enforcer: BufferEnforcer::new(policy),
            decay: config.decay.clone(),
        }
    }

    #[must_use]
    pub fn policy(&self) -> &BufferPolicyTable {
        self.enforcer.policy()
    }

    /// Recommended stop-loss for a position, always policy-enforced.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RiskError::InvalidInput`] for a non-positive price or
    /// a negative suggested buffer.
    pub fn stop_loss(
        &self,
        current_price: Decimal,
        right: OptionRight,
        days_to_expiration: u32,
        suggested_buffer_pct: Option<Decimal>,
    ) -> Result<StopLossResult> {
        let buffer_pct = suggested_buffer_pct
            .unwrap_or_else(|| self.policy().max_buffer_pct(days_to_expiration, right));
        let raw = compute_raw_stop_loss(current_price, right, buffer_pct)?;
        self.enforcer
            .enforce(raw, current_price, right, days_to_expiration)
    }

    /// Whole or partial periods left before expiry, capped at `max_periods`.
    #[must_use]
    pub fn decay_periods(&self, days_to_expiration: u32) -> u32 {
        let per_period = self.decay.days_per_period.max(1);
        days_to_expiration
            .div_ceil(per_period)
            .min(self.decay.max_periods)
    }

    /// Weekly decay snapshots from now until expiry; empty on expiration day.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RiskError::InvalidInput`] for a negative price or a
    /// rate outside (0, 1).
    pub fn project_decay(
        &self,
        option_price: Decimal,
        days_to_expiration: u32,
        rate: Option<Decimal>,
    ) -> Result<Vec<DecaySnapshot>> {
        let periods = self.decay_periods(days_to_expiration);
        if periods == 0 {
            return Ok(Vec::new());
        }
        let rate = rate.unwrap_or(self.decay.weekly_rate);
        Ok(decay::project(option_price, rate, periods)?.to_vec())
    }

    /// Parse, stop-loss and decay for a single contract, all or nothing.
    ///
    /// # Errors
    ///
    /// Returns the first parse or validation failure.
    pub fn assess(&self, request: &AssessmentRequest) -> Result<RiskAssessment> {
        let contract = contract::parse(&request.symbol)?;
        let dte = contract.days_to_expiration(request.as_of);

        let stop_loss = self.stop_loss(
            request.underlying_price,
            contract.right,
            dte,
            request.suggested_buffer_pct,
        )?;

        let decay = match request.option_price {
            Some(price) => self.project_decay(price, dte, request.decay_rate)?,
            None => Vec::new(),
        };

        info!(
            ticker = contract.underlying,
            right = %contract.right,
            strike = %contract.strike,
            dte,
            stop = %stop_loss.stop_loss_price,
            buffer_pct = %stop_loss.applied_buffer_pct.round_dp(2),
            enforced = stop_loss.was_enforced,
            periods = decay.len(),
            "Assessed option risk"
        );

        Ok(RiskAssessment {
            contract,
            days_to_expiration: dte,
            stop_loss,
            decay,
        })
    }
}
