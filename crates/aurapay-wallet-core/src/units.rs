//! Conversion between user-facing decimal strings and on-chain integer units.

use std::str::FromStr;

use alloy::primitives::utils::parse_units;
use alloy::primitives::U256;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::Asset;

pub const NATIVE_DECIMALS: u8 = 18;

/// Scales a decimal amount by `10^decimals`. Negative, empty and
/// over-precise amounts are rejected.
pub fn to_smallest_unit(amount: &str, decimals: u8) -> Result<U256, String> {
    let trimmed = amount.trim();
    if trimmed.is_empty() {
        return Err("amount is empty".to_owned());
    }
    if trimmed.starts_with('-') {
        return Err(format!("amount must not be negative: {trimmed}"));
    }
    if let Some((_, fraction)) = trimmed.split_once('.') {
        if fraction.len() > usize::from(decimals) {
            return Err(format!(
                "amount {trimmed} has more than {decimals} decimal places"
            ));
        }
    }
    parse_units(trimmed, decimals)
        .map(|parsed| parsed.get_absolute())
        .map_err(|e| format!("invalid amount {trimmed}: {e}"))
}

/// Renders an integer amount with `decimals` implied places, rounded half-up
/// to `precision` places. Fails when a power of ten it needs does not fit in
/// 256 bits, which only a nonsensical `decimals` can cause.
pub fn format_smallest_unit(raw: U256, decimals: u8, precision: usize) -> Result<String, String> {
    let decimals = usize::from(decimals);
    let scaled = if decimals >= precision {
        let divisor = pow10(decimals - precision)?;
        let half = divisor / U256::from(2u8);
        raw.saturating_add(half) / divisor
    } else {
        raw.checked_mul(pow10(precision - decimals)?)
            .ok_or_else(|| format!("{raw} overflows at {precision} decimal places"))?
    };

    if precision == 0 {
        return Ok(scaled.to_string());
    }
    let unit = pow10(precision)?;
    let whole = scaled / unit;
    let fraction = scaled % unit;
    Ok(format!(
        "{whole}.{:0>width$}",
        fraction.to_string(),
        width = precision
    ))
}

fn pow10(exp: usize) -> Result<U256, String> {
    U256::from(10u8)
        .checked_pow(U256::from(exp))
        .ok_or_else(|| format!("10^{exp} does not fit in 256 bits"))
}

/// Formats a user- or chain-supplied decimal string at the asset's display
/// precision. Anything that is not a finite number renders as zero.
pub fn format_amount(raw: &str, asset: Asset) -> String {
    let precision = asset.display_precision();
    match parse_number(raw) {
        Some(Number::Exact(value)) => {
            let dp = u32::try_from(precision).unwrap_or(u32::MAX);
            let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
            format!("{rounded:.precision$}")
        }
        Some(Number::Approx(value)) => format!("{value:.precision$}"),
        None => asset.zero_amount(),
    }
}

/// Like [`format_amount`] with en-US thousands separators, e.g. `1,234.50`.
pub fn format_amount_grouped(raw: &str, asset: Asset) -> String {
    let plain = format_amount(raw, asset);
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (whole, fraction) = match unsigned.split_once('.') {
        Some((w, f)) => (w, Some(f)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, ch) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match fraction {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

enum Number {
    Exact(Decimal),
    Approx(f64),
}

fn parse_number(raw: &str) -> Option<Number> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(value) = Decimal::from_str(trimmed) {
        return Some(Number::Exact(value));
    }
    // Exponent notation or out of Decimal's range, but still numeric.
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Some(Number::Approx(value)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn native_amount_rounds_to_four_places() {
        assert_eq!(format_amount("3.14159", Asset::Native), "3.1416");
        assert_eq!(format_amount("2", Asset::Native), "2.0000");
        assert_eq!(format_amount("0.00005", Asset::Native), "0.0001");
    }

    #[test]
    fn non_numeric_input_formats_as_zero() {
        assert_eq!(format_amount("abc", Asset::Native), "0.0000");
        assert_eq!(format_amount("", Asset::Native), "0.0000");
        assert_eq!(format_amount("NaN", Asset::Native), "0.0000");
        assert_eq!(format_amount("inf", Asset::Token), "0.00");
        assert_eq!(format_amount("12abc", Asset::Token), "0.00");
    }

    #[test]
    fn token_amount_uses_two_places() {
        assert_eq!(format_amount("1234.567", Asset::Token), "1234.57");
        assert_eq!(format_amount_grouped("1234.5", Asset::Token), "1,234.50");
        assert_eq!(format_amount_grouped("999", Asset::Token), "999.00");
        assert_eq!(format_amount_grouped("1234567.891", Asset::Token), "1,234,567.89");
        assert_eq!(format_amount_grouped("-1000", Asset::Token), "-1,000.00");
        assert_eq!(format_amount_grouped("oops", Asset::Token), "0.00");
    }

    #[test]
    fn decimal_to_wei() {
        let wei = to_smallest_unit("0.0001", NATIVE_DECIMALS).expect("parse");
        assert_eq!(wei, U256::from(100_000_000_000_000u64));
        let usdc = to_smallest_unit("12.5", 6).expect("parse");
        assert_eq!(usdc, U256::from(12_500_000u64));
    }

    #[test]
    fn rejects_bad_amounts() {
        assert!(to_smallest_unit("", 18).is_err());
        assert!(to_smallest_unit("-1", 18).is_err());
        assert!(to_smallest_unit("1.1234567", 6).is_err());
        assert!(to_smallest_unit("ten", 18).is_err());
    }

    #[test]
    fn formats_raw_units_with_rounding() {
        let one_and_a_bit = U256::from(1_234_567_890_000_000_000u64);
        let fmt = |raw, decimals, precision| {
            format_smallest_unit(raw, decimals, precision).expect("formattable")
        };
        assert_eq!(fmt(one_and_a_bit, 18, 4), "1.2346");
        assert_eq!(fmt(U256::ZERO, 18, 4), "0.0000");
        assert_eq!(fmt(U256::from(1_500_000u64), 6, 2), "1.50");
        assert_eq!(fmt(U256::from(7u8), 0, 2), "7.00");
    }

    #[test]
    fn oversized_decimals_are_rejected() {
        // 10^77 is the largest power of ten below 2^256.
        assert_eq!(
            format_smallest_unit(U256::from(1u8), 81, 4).expect("10^77 fits"),
            "0.0000"
        );
        assert!(format_smallest_unit(U256::from(1u8), 82, 4).is_err());
        assert!(format_smallest_unit(U256::MAX, 255, 2).is_err());
    }
}
