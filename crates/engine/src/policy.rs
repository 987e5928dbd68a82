//! Tenor-dependent maximum stop-loss buffers.
//!
//! Near expiry only a tight stop is tolerated; long-dated puts get a wider
//! buffer than long-dated calls.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::{Result, RiskError};
use crate::types::OptionRight;

/// One row of the buffer table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskPolicyTier {
    /// Inclusive DTE upper bound; `None` on the last tier.
    pub max_days_to_expiration: Option<u32>,
    pub call_buffer_pct: Decimal,
    pub put_buffer_pct: Decimal,
}

impl RiskPolicyTier {
    #[must_use]
    pub const fn new(
        max_days_to_expiration: Option<u32>,
        call_buffer_pct: Decimal,
        put_buffer_pct: Decimal,
    ) -> Self {
        Self {
            max_days_to_expiration,
            call_buffer_pct,
            put_buffer_pct,
        }
    }

    #[must_use]
    pub fn covers(&self, days_to_expiration: u32) -> bool {
        self.max_days_to_expiration
            .map_or(true, |bound| days_to_expiration <= bound)
    }

    #[must_use]
    pub const fn buffer_pct(&self, right: OptionRight) -> Decimal {
        match right {
            OptionRight::Call => self.call_buffer_pct,
            OptionRight::Put => self.put_buffer_pct,
        }
    }
}

/// Ordered buffer tiers; the first tier covering a DTE wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferPolicyTable {
    tiers: Vec<RiskPolicyTier>,
}

impl BufferPolicyTable {
    /// Build a custom table.
    ///
    /// # Errors
    ///
    /// Returns [`RiskError::InvalidPolicy`] unless the tiers are non-empty,
    /// strictly ascending, end in a single unbounded tier, and carry
    /// non-negative percentages.
    pub fn new(tiers: Vec<RiskPolicyTier>) -> Result<Self> {
        let Some((last, bounded)) = tiers.split_last() else {
            return Err(RiskError::invalid_policy("table has no tiers"));
        };
        if last.max_days_to_expiration.is_some() {
            return Err(RiskError::invalid_policy("last tier must be unbounded"));
        }

        let mut previous: Option<u32> = None;
        for tier in bounded {
            let Some(bound) = tier.max_days_to_expiration else {
                return Err(RiskError::invalid_policy("only the last tier may be unbounded"));
            };
            if previous.is_some_and(|p| bound <= p) {
                return Err(RiskError::invalid_policy(format!(
                    "tier bounds must be strictly ascending, {bound} follows {}",
                    previous.unwrap_or_default()
                )));
            }
            previous = Some(bound);
        }

        if tiers
            .iter()
            .any(|t| t.call_buffer_pct < Decimal::ZERO || t.put_buffer_pct < Decimal::ZERO)
        {
            return Err(RiskError::invalid_policy("buffer percentages must be non-negative"));
        }

        Ok(Self { tiers })
    }

    /// The house table.
    ///
    /// | DTE   | Call % | Put % |
    /// |-------|--------|-------|
    /// | 0-1   | 1.0    | 1.0   |
    /// | 2     | 2.0    | 2.0   |
    /// | 3-5   | 3.0    | 3.0   |
    /// | 6-60  | 5.0    | 5.0   |
    /// | 61+   | 5.0    | 7.0   |
    #[must_use]
    pub fn standard() -> Self {
        Self {
            tiers: vec![
                RiskPolicyTier::new(Some(1), dec!(1.0), dec!(1.0)),
                RiskPolicyTier::new(Some(2), dec!(2.0), dec!(2.0)),
                RiskPolicyTier::new(Some(5), dec!(3.0), dec!(3.0)),
                RiskPolicyTier::new(Some(60), dec!(5.0), dec!(5.0)),
                RiskPolicyTier::new(None, dec!(5.0), dec!(7.0)),
            ],
        }
    }

    #[must_use]
    pub fn tiers(&self) -> &[RiskPolicyTier] {
        &self.tiers
    }

    /// Maximum allowed stop-loss buffer, as a percentage of current price.
    #[must_use]
    pub fn max_buffer_pct(&self, days_to_expiration: u32, right: OptionRight) -> Decimal {
        self.tiers
            .iter()
            .find(|tier| tier.covers(days_to_expiration))
            .or_else(|| self.tiers.last())
            .map_or(Decimal::ZERO, |tier| tier.buffer_pct(right))
    }
}

impl Default for BufferPolicyTable {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn standard_table_matches_house_limits() {
        let table = BufferPolicyTable::standard();
        let cases = [
            (0, dec!(1.0), dec!(1.0)),
            (1, dec!(1.0), dec!(1.0)),
            (2, dec!(2.0), dec!(2.0)),
            (3, dec!(3.0), dec!(3.0)),
            (5, dec!(3.0), dec!(3.0)),
            (6, dec!(5.0), dec!(5.0)),
            (60, dec!(5.0), dec!(5.0)),
            (61, dec!(5.0), dec!(7.0)),
            (90, dec!(5.0), dec!(7.0)),
            (u32::MAX, dec!(5.0), dec!(7.0)),
        ];
        for (dte, call, put) in cases {
            assert_eq!(table.max_buffer_pct(dte, OptionRight::Call), call, "call dte={dte}");
            assert_eq!(table.max_buffer_pct(dte, OptionRight::Put), put, "put dte={dte}");
        }
    }

    #[test]
    fn standard_table_passes_its_own_validation() {
        let table = BufferPolicyTable::standard();
        assert_eq!(BufferPolicyTable::new(table.tiers().to_vec()).unwrap(), table);
    }

    #[test]
    fn rejects_bounded_last_tier() {
        let tiers = vec![RiskPolicyTier::new(Some(10), dec!(1), dec!(1))];
        assert!(matches!(
            BufferPolicyTable::new(tiers),
            Err(RiskError::InvalidPolicy(_))
        ));
    }

    #[test]
    fn rejects_unordered_tiers() {
        let tiers = vec![
            RiskPolicyTier::new(Some(10), dec!(1), dec!(1)),
            RiskPolicyTier::new(Some(5), dec!(2), dec!(2)),
            RiskPolicyTier::new(None, dec!(3), dec!(3)),
        ];
        assert!(BufferPolicyTable::new(tiers).is_err());
    }

    #[test]
    fn rejects_empty_and_negative_tables() {
        assert!(BufferPolicyTable::new(vec![]).is_err());

        let tiers = vec![RiskPolicyTier::new(None, dec!(-1), dec!(1))];
        assert!(BufferPolicyTable::new(tiers).is_err());
    }

    #[test]
    fn custom_table_first_match_wins() {
        let table = BufferPolicyTable::new(vec![
            RiskPolicyTier::new(Some(7), dec!(2), dec!(4)),
            RiskPolicyTier::new(None, dec!(10), dec!(12)),
        ])
        .unwrap();
        assert_eq!(table.max_buffer_pct(7, OptionRight::Put), dec!(4));
        assert_eq!(table.max_buffer_pct(8, OptionRight::Call), dec!(10));
    }

    proptest! {
        #[test]
        fn buffer_is_non_decreasing_in_dte(dte in 0u32..10_000) {
            let table = BufferPolicyTable::standard();
            for right in [OptionRight::Call, OptionRight::Put] {
                prop_assert!(table.max_buffer_pct(dte, right) <= table.max_buffer_pct(dte + 1, right));
            }
        }
    }
}
