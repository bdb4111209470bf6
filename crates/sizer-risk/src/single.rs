//! Simple single-level position sizing.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use sizer_core::{Direction, SizeResult, SizingError};
use tracing::debug;

use crate::checked::{div, mul, require_positive};

/// Size a position from an account balance and a risk percentage.
///
/// `risk_percent` is on a 0-100 scale. Long and short setups are both
/// supported: only the absolute entry/stop distance is used. The stop price
/// itself is not range-checked.
pub fn single_size(
    account_balance: Decimal,
    risk_percent: Decimal,
    entry_price: Decimal,
    stop_loss_price: Decimal,
) -> Result<SizeResult, SizingError> {
    require_positive("account_balance", account_balance)?;
    require_positive("risk_percent", risk_percent)?;
    require_positive("entry_price", entry_price)?;

    let per_share_risk = (entry_price - stop_loss_price).abs();
    if per_share_risk.is_zero() {
        return Err(SizingError::ZeroRiskDistance { price: entry_price });
    }

    let risk_amount = div(
        mul(account_balance, risk_percent, "risk amount")?,
        dec!(100),
        "risk amount",
    )?;
    let position_size = div(risk_amount, per_share_risk, "position size")?;
    let capital_needed = mul(position_size, entry_price, "capital needed")?;

    debug!(
        %risk_amount,
        %per_share_risk,
        %position_size,
        %capital_needed,
        "Sized single position"
    );

    Ok(SizeResult {
        risk_amount,
        per_share_risk,
        position_size,
        capital_needed,
        direction: Direction::from_prices(entry_price, stop_loss_price),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sizer_core::ErrorKind;

    #[test]
    fn test_basic_long() {
        let result = single_size(dec!(10000), dec!(1.0), dec!(100), dec!(99)).unwrap();
        assert_eq!(result.risk_amount, dec!(100.00));
        assert_eq!(result.per_share_risk, dec!(1.00));
        assert_eq!(result.position_size, dec!(100.00));
        assert_eq!(result.capital_needed, dec!(10000.00));
        assert_eq!(result.direction, Direction::Long);
    }

    #[test]
    fn test_short_is_symmetric() {
        let long = single_size(dec!(25000), dec!(2), dec!(50), dec!(48)).unwrap();
        let short = single_size(dec!(25000), dec!(2), dec!(50), dec!(52)).unwrap();
        assert_eq!(short.direction, Direction::Short);
        assert_eq!(long.per_share_risk, short.per_share_risk);
        assert_eq!(long.position_size, short.position_size);
        assert_eq!(short.position_size, dec!(250));
    }

    #[test]
    fn test_fractional_size() {
        // Risk 1% of 10000 = 100, stop 3 away = 33.33.. units
        let result = single_size(dec!(10000), dec!(1), dec!(100), dec!(97)).unwrap();
        assert_eq!(result.whole_units(), dec!(33));
        assert!(result.position_size > dec!(33.33) && result.position_size < dec!(33.34));
    }

    #[test]
    fn test_rejects_non_positive_inputs() {
        let cases = [
            (dec!(0), dec!(1), dec!(100), "account_balance"),
            (dec!(-10), dec!(1), dec!(100), "account_balance"),
            (dec!(10000), dec!(0), dec!(100), "risk_percent"),
            (dec!(10000), dec!(1), dec!(0), "entry_price"),
        ];

        for (balance, risk, entry, expected_field) in cases {
            match single_size(balance, risk, entry, dec!(99)) {
                Err(SizingError::InvalidInput { field, .. }) => assert_eq!(field, expected_field),
                other => panic!("Expected InvalidInput for {}, got {:?}", expected_field, other),
            }
        }
    }

    #[test]
    fn test_zero_distance() {
        let err = single_size(dec!(10000), dec!(1), dec!(100), dec!(100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ZeroRiskDistance);
    }

    #[test]
    fn test_invalid_input_checked_before_distance() {
        let err = single_size(dec!(0), dec!(1), dec!(100), dec!(100)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
