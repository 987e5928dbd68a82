//! Raw stop-loss levels from a buffer percentage.
//!
//! A call loses value as the underlying falls, so its stop sits below the
//! current price; a put's stop sits above it.

use rust_decimal::Decimal;

use crate::error::{Result, RiskError};
use crate::types::OptionRight;

/// Apply `buffer_pct` to `current_price` in the losing direction for `right`.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] if `current_price <= 0`, `buffer_pct < 0`,
/// or the stop level is outside the representable decimal range.
pub fn compute_raw_stop_loss(
    current_price: Decimal,
    right: OptionRight,
    buffer_pct: Decimal,
) -> Result<Decimal> {
    ensure_positive_price(current_price)?;
    if buffer_pct < Decimal::ZERO {
        return Err(RiskError::invalid_input(format!(
            "buffer percentage must be non-negative, got {buffer_pct}"
        )));
    }

    let fraction = buffer_pct / Decimal::ONE_HUNDRED;
    let multiplier = match right {
        OptionRight::Call => Decimal::ONE.checked_sub(fraction),
        OptionRight::Put => Decimal::ONE.checked_add(fraction),
    };
    multiplier
        .and_then(|m| current_price.checked_mul(m))
        .ok_or_else(|| {
            RiskError::invalid_input(format!(
                "stop-loss for price {current_price} with buffer {buffer_pct}% overflows"
            ))
        })
}

/// Inverse of [`compute_raw_stop_loss`]: the buffer a stop level implies.
///
/// Negative when the stop sits on the profitable side of the price.
///
/// # Errors
///
/// Returns [`RiskError::InvalidInput`] if `current_price <= 0` or the implied
/// buffer is outside the representable decimal range.
pub fn implied_buffer_pct(
    stop_loss: Decimal,
    current_price: Decimal,
    right: OptionRight,
) -> Result<Decimal> {
    ensure_positive_price(current_price)?;
    let distance = match right {
        OptionRight::Call => current_price.checked_sub(stop_loss),
        OptionRight::Put => stop_loss.checked_sub(current_price),
    };
    distance
        .and_then(|d| d.checked_div(current_price))
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| {
            RiskError::invalid_input(format!(
                "buffer implied by stop {stop_loss} at price {current_price} overflows"
            ))
        })
}

fn ensure_positive_price(current_price: Decimal) -> Result<()> {
    if current_price <= Decimal::ZERO {
        return Err(RiskError::invalid_input(format!(
            "current price must be positive, got {current_price}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    #[test]
    fn call_stop_sits_below_price() {
        let stop = compute_raw_stop_loss(dec!(150.0), OptionRight::Call, dec!(5.0)).unwrap();
        assert_eq!(stop, dec!(142.5));
    }

    #[test]
    fn put_stop_sits_above_price() {
        let stop = compute_raw_stop_loss(dec!(150.0), OptionRight::Put, dec!(5.0)).unwrap();
        assert_eq!(stop, dec!(157.5));
    }

    #[test]
    fn zero_buffer_returns_current_price() {
        let stop = compute_raw_stop_loss(dec!(42.17), OptionRight::Put, dec!(0)).unwrap();
        assert_eq!(stop, dec!(42.17));
    }

    #[test]
    fn rejects_non_positive_price() {
        assert!(matches!(
            compute_raw_stop_loss(dec!(0), OptionRight::Call, dec!(5)),
            Err(RiskError::InvalidInput(_))
        ));
        assert!(compute_raw_stop_loss(dec!(-1), OptionRight::Put, dec!(5)).is_err());
        assert!(implied_buffer_pct(dec!(1), dec!(0), OptionRight::Call).is_err());
    }

    #[test]
    fn rejects_negative_buffer() {
        assert!(matches!(
            compute_raw_stop_loss(dec!(150), OptionRight::Call, dec!(-0.5)),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn implied_buffer_inverts_stop() {
        assert_eq!(
            implied_buffer_pct(dec!(142.5), dec!(150), OptionRight::Call).unwrap(),
            dec!(5)
        );
        assert_eq!(
            implied_buffer_pct(dec!(157.5), dec!(150), OptionRight::Put).unwrap(),
            dec!(5)
        );
        assert!(implied_buffer_pct(dec!(155), dec!(150), OptionRight::Call).unwrap() < Decimal::ZERO);
    }

    #[test]
    fn overflowing_stop_is_an_error() {
        let huge_buffer = Decimal::from_i128_with_scale(10i128.pow(28), 0);
        assert!(matches!(
            compute_raw_stop_loss(Decimal::MAX, OptionRight::Put, dec!(5)),
            Err(RiskError::InvalidInput(_))
        ));
        assert!(matches!(
            compute_raw_stop_loss(dec!(1000), OptionRight::Call, huge_buffer),
            Err(RiskError::InvalidInput(_))
        ));
    }

    #[test]
    fn overflowing_implied_buffer_is_an_error() {
        let far_stop = Decimal::from_i128_with_scale(7 * 10i128.pow(28), 0);
        assert!(matches!(
            implied_buffer_pct(far_stop, dec!(0.0001), OptionRight::Put),
            Err(RiskError::InvalidInput(_))
        ));
        assert!(implied_buffer_pct(Decimal::MIN, Decimal::MAX, OptionRight::Call).is_err());
    }

    proptest! {
        #[test]
        fn stop_stays_on_losing_side(cents in 1i64..100_000_000, bps in 0i64..=10_000) {
            let price = Decimal::new(cents, 2);
            let buffer = Decimal::new(bps, 2);
            let call = compute_raw_stop_loss(price, OptionRight::Call, buffer).unwrap();
            let put = compute_raw_stop_loss(price, OptionRight::Put, buffer).unwrap();
            prop_assert!(call <= price);
            prop_assert!(put >= price);
        }
    }
}
