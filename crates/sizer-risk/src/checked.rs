//! Validation and overflow-checked arithmetic shared by the calculators.

use rust_decimal::Decimal;
use sizer_core::SizingError;

pub(crate) fn require_positive(field: &'static str, value: Decimal) -> Result<(), SizingError> {
    if value <= Decimal::ZERO {
        return Err(SizingError::not_positive(field, value));
    }
    Ok(())
}

/// Accepts values in (0, 1].
pub(crate) fn require_risk_fraction(
    field: &'static str,
    value: Decimal,
) -> Result<(), SizingError> {
    if value <= Decimal::ZERO || value > Decimal::ONE {
        return Err(SizingError::out_of_range(field, value, "(0, 1]"));
    }
    Ok(())
}

/// Accepts values in [0, 1].
pub(crate) fn require_cap_fraction(
    field: &'static str,
    value: Decimal,
) -> Result<(), SizingError> {
    if value < Decimal::ZERO || value > Decimal::ONE {
        return Err(SizingError::out_of_range(field, value, "[0, 1]"));
    }
    Ok(())
}

pub(crate) fn mul(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, SizingError> {
    a.checked_mul(b).ok_or(SizingError::Overflow(what))
}

pub(crate) fn div(a: Decimal, b: Decimal, what: &'static str) -> Result<Decimal, SizingError> {
    a.checked_div(b).ok_or(SizingError::Overflow(what))
}
