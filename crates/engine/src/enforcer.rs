//! Buffer enforcement: the single gate every surfaced stop-loss passes.
//!
//! A suggested stop wider than the tenor policy allows is pulled back to the
//! policy maximum; anything tighter passes unchanged.

use rust_decimal::Decimal;
use tracing::{debug, warn};

use crate::error::Result;
use crate::policy::BufferPolicyTable;
use crate::stop_loss::{compute_raw_stop_loss, implied_buffer_pct};
use crate::types::{OptionRight, StopLossResult};

#[derive(Debug, Clone, Default)]
pub struct BufferEnforcer {
    policy: BufferPolicyTable,
}

impl BufferEnforcer {
    #[must_use]
    pub fn new(policy: BufferPolicyTable) -> Self {
        Self { policy }
    }

    #[must_use]
    pub fn policy(&self) -> &BufferPolicyTable {
        &self.policy
    }

    /// Validate `raw_stop_loss` against the policy for `days_to_expiration`,
    /// clamping it when its buffer exceeds the allowed maximum.
    ///
    /// Re-enforcing a result's own stop price yields the same price and
    /// applied buffer.
    ///
    /// # Errors
    ///
    /// Returns [`crate::RiskError::InvalidInput`] if `current_price <= 0`.
    pub fn enforce(
        &self,
        raw_stop_loss: Decimal,
        current_price: Decimal,
        right: OptionRight,
        days_to_expiration: u32,
    ) -> Result<StopLossResult> {
        let observed = implied_buffer_pct(raw_stop_loss, current_price, right)?;
        let max_allowed = self.policy.max_buffer_pct(days_to_expiration, right);

        if observed > max_allowed {
            let stop_loss_price = compute_raw_stop_loss(current_price, right, max_allowed)?;
            warn!(
                %right,
                dte = days_to_expiration,
                observed_pct = %observed.round_dp(2),
                max_pct = %max_allowed,
                raw_stop = %raw_stop_loss,
                enforced_stop = %stop_loss_price,
                "Stop-loss buffer exceeds policy, clamping"
            );
            return Ok(StopLossResult {
                stop_loss_price,
                applied_buffer_pct: max_allowed,
                was_enforced: true,
            });
        }

        debug!(
            %right,
            dte = days_to_expiration,
            observed_pct = %observed,
            max_pct = %max_allowed,
            "Stop-loss within policy"
        );
        Ok(StopLossResult {
            stop_loss_price: raw_stop_loss,
            applied_buffer_pct: observed,
            was_enforced: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RiskError;
    use crate::policy::RiskPolicyTier;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn clamps_wide_call_stop_near_expiry() {
        let enforcer = BufferEnforcer::default();
        let result = enforcer
            .enforce(dec!(130.0), dec!(150.0), OptionRight::Call, 2)
            .unwrap();
        assert_eq!(result.stop_loss_price, dec!(147.0));
        assert_eq!(result.applied_buffer_pct, dec!(2.0));
        assert!(result.was_enforced);
    }

    #[test]
    fn clamps_wide_put_stop() {
        let enforcer = BufferEnforcer::default();
        // 10% above on a 90 DTE put; policy allows 7%
        let result = enforcer
            .enforce(dec!(110), dec!(100), OptionRight::Put, 90)
            .unwrap();
        assert_eq!(result.stop_loss_price, dec!(107));
        assert_eq!(result.applied_buffer_pct, dec!(7.0));
        assert!(result.was_enforced);
    }

    #[test]
    fn passes_stop_within_policy() {
        let enforcer = BufferEnforcer::default();
        let result = enforcer
            .enforce(dec!(145.5), dec!(150), OptionRight::Call, 30)
            .unwrap();
        assert_eq!(result.stop_loss_price, dec!(145.5));
        assert_eq!(result.applied_buffer_pct, dec!(3));
        assert!(!result.was_enforced);
    }

    #[test]
    fn stop_exactly_at_limit_is_not_enforced() {
        let enforcer = BufferEnforcer::default();
        let result = enforcer
            .enforce(dec!(142.5), dec!(150), OptionRight::Call, 30)
            .unwrap();
        assert_eq!(result.applied_buffer_pct, dec!(5));
        assert!(!result.was_enforced);
    }

    #[test]
    fn stop_on_profitable_side_passes_through() {
        let enforcer = BufferEnforcer::default();
        let result = enforcer
            .enforce(dec!(151.5), dec!(150), OptionRight::Call, 1)
            .unwrap();
        assert_eq!(result.stop_loss_price, dec!(151.5));
        assert_eq!(result.applied_buffer_pct, dec!(-1));
        assert!(!result.was_enforced);
    }

    #[test]
    fn non_positive_price_is_invalid() {
        let enforcer = BufferEnforcer::default();
        assert!(matches!(
            enforcer.enforce(dec!(10), dec!(0), OptionRight::Put, 10),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn out_of_range_stop_is_invalid() {
        let enforcer = BufferEnforcer::default();
        let far_stop = Decimal::from_i128_with_scale(7 * 10i128.pow(28), 0);
        assert!(matches!(
            enforcer.enforce(far_stop, dec!(0.0001), OptionRight::Put, 90),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn uses_custom_policy() {
        let policy = BufferPolicyTable::new(vec![RiskPolicyTier::new(None, dec!(10), dec!(10))])
            .unwrap();
        let enforcer = BufferEnforcer::new(policy);
        let result = enforcer
            .enforce(dec!(130), dec!(150), OptionRight::Call, 0)
            .unwrap();
        assert_eq!(result.stop_loss_price, dec!(135));
        assert!(result.was_enforced);
    }

    proptest! {
        #[test]
        fn enforcement_is_idempotent(
            price_cents in 1i64..10_000_000,
            stop_pct in 0i64..200,
            dte in 0u32..400,
            is_call in any::<bool>(),
        ) {
            let enforcer = BufferEnforcer::default();
            let right = if is_call { OptionRight::Call } else { OptionRight::Put };
            let price = Decimal::new(price_cents, 2);
            let raw = price * Decimal::new(stop_pct, 2);

            let first = enforcer.enforce(raw, price, right, dte).unwrap();
            let second = enforcer.enforce(first.stop_loss_price, price, right, dte).unwrap();
            prop_assert_eq!(second.stop_loss_price, first.stop_loss_price);
            prop_assert_eq!(second.applied_buffer_pct, first.applied_buffer_pct);
            prop_assert!(!second.was_enforced);
        }
    }
}
