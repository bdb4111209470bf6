//! Number formatting for reports and the dashboard.

use rust_decimal::{Decimal, RoundingStrategy};

/// `$1,234.56` style currency.
pub fn format_currency(value: Decimal) -> String {
    let text = group_thousands(value.abs(), 2);
    if value.is_sign_negative() && !value.is_zero() {
        format!("-${}", text)
    } else {
        format!("${}", text)
    }
}

/// Whole share count with thousands separators.
pub fn format_shares(value: Decimal) -> String {
    let text = group_thousands(value.abs(), 0);
    if value.is_sign_negative() && !value.is_zero() {
        format!("-{}", text)
    } else {
        text
    }
}

/// A value already on the 0-100 scale, e.g. `2.00%`.
pub fn format_pct(value: Decimal) -> String {
    let rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}%", rounded)
}

/// A fraction shown as a percentage, e.g. `0.0025` as `0.25%`.
pub fn format_fraction_pct(value: Decimal) -> String {
    format_pct(value * Decimal::ONE_HUNDRED)
}

fn group_thousands(value: Decimal, places: u32) -> String {
    let rounded = value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero);
    let text = format!("{:.*}", places as usize, rounded);
    let (int_part, frac_part) = match text.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (text.as_str(), None),
    };

    let mut grouped = String::with_capacity(text.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }
    grouped
}
