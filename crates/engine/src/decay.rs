//! Theta decay projection: compounding per-period value erosion.
//!
//! The projector assumes a constant rate per call. Callers that want decay
//! to accelerate toward expiry pass an explicit per-period schedule to
//! [`project_schedule`].

use std::iter::FusedIterator;

use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{Result, RiskError};
use crate::types::DecaySnapshot;

/// A lazily evaluated projection of `period_count` snapshots.
///
/// Iterating twice yields identical sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecayProjection {
    start_price: Decimal,
    period_decay_rate: Decimal,
    period_count: u32,
}

/// Project `current_option_price` forward `period_count` periods, losing
/// `period_decay_rate` of the remaining value each period.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] for a negative price, a rate outside
/// (0, 1), or a zero period count.
pub fn project(
    current_option_price: Decimal,
    period_decay_rate: Decimal,
    period_count: u32,
) -> Result<DecayProjection> {
    ensure_non_negative_price(current_option_price)?;
    ensure_rate(period_decay_rate)?;
    if period_count == 0 {
        return Err(RiskError::invalid_input("period count must be positive"));
    }

    debug!(
        price = %current_option_price,
        rate = %period_decay_rate,
        periods = period_count,
        "Projecting theta decay"
    );
    Ok(DecayProjection {
        start_price: current_option_price,
        period_decay_rate,
        period_count,
    })
}

/// Project with one rate per period, in order.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] for a negative price, an empty
/// schedule, or any rate outside (0, 1).
pub fn project_schedule(current_option_price: Decimal, rates: &[Decimal]) -> Result<Vec<DecaySnapshot>> {
    ensure_non_negative_price(current_option_price)?;
    if rates.is_empty() {
        return Err(RiskError::invalid_input("decay schedule must not be empty"));
    }
    for rate in rates {
        ensure_rate(*rate)?;
    }

    let mut previous = current_option_price;
    let snapshots = rates
        .iter()
        .zip(1u32..)
        .map(|(rate, index)| {
            let snapshot = step(current_option_price, previous, Decimal::ONE - *rate, index);
            previous = snapshot.projected_price;
            snapshot
        })
        .collect();
    Ok(snapshots)
}

impl DecayProjection {
    #[must_use]
    pub fn iter(&self) -> DecayIter {
        DecayIter {
            start_price: self.start_price,
            retained: Decimal::ONE - self.period_decay_rate,
            previous: self.start_price,
            next_index: 1,
            remaining: self.period_count,
        }
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.period_count as usize
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.period_count == 0
    }

    #[must_use]
    pub const fn start_price(&self) -> Decimal {
        self.start_price
    }

    #[must_use]
    pub const fn period_decay_rate(&self) -> Decimal {
        self.period_decay_rate
    }

    /// The snapshot at expiry (the last period).
    #[must_use]
    pub fn final_snapshot(&self) -> Option<DecaySnapshot> {
        self.iter().last()
    }

    #[must_use]
    pub fn to_vec(&self) -> Vec<DecaySnapshot> {
        self.iter().collect()
    }
}

impl<'a> IntoIterator for &'a DecayProjection {
    type Item = DecaySnapshot;
    type IntoIter = DecayIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`DecayProjection`].
#[derive(Debug, Clone)]
pub struct DecayIter {
    start_price: Decimal,
    retained: Decimal,
    previous: Decimal,
    next_index: u32,
    remaining: u32,
}

impl Iterator for DecayIter {
    type Item = DecaySnapshot;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let snapshot = step(self.start_price, self.previous, self.retained, self.next_index);
        self.previous = snapshot.projected_price;
        self.next_index = self.next_index.saturating_add(1);
        self.remaining -= 1;
        Some(snapshot)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining as usize;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for DecayIter {}

impl FusedIterator for DecayIter {}

fn step(start_price: Decimal, previous: Decimal, retained: Decimal, index: u32) -> DecaySnapshot {
    let projected_price = previous * retained;
    DecaySnapshot {
        period_index: index,
        projected_price,
        period_loss_pct: loss_pct(previous, projected_price),
        cumulative_loss_pct: loss_pct(start_price, projected_price),
    }
}

fn loss_pct(from: Decimal, to: Decimal) -> Decimal {
    if from.is_zero() {
        return Decimal::ZERO;
    }
    (from - to) / from * Decimal::ONE_HUNDRED
}

fn ensure_non_negative_price(price: Decimal) -> Result<()> {
    if price < Decimal::ZERO {
        return Err(RiskError::invalid_input(format!(
            "option price must be non-negative, got {price}"
        )));
    }
    Ok(())
}

fn ensure_rate(rate: Decimal) -> Result<()> {
    if rate <= Decimal::ZERO || rate >= Decimal::ONE {
        return Err(RiskError::invalid_input(format!(
            "decay rate must be between 0 and 1 (exclusive), got {rate}"
        )));
    }
    Ok(())
}
