//! Conversion between human decimal strings and 10^18 fixed-point ledger
//! units. The ledger only ever sees integers; every amount crossing the
//! public API is a normalized decimal string.

use alloy_primitives::U256;

use crate::error::{Error, Result};

/// Fractional digits carried by the ledger's fixed-point encoding.
pub const DECIMALS: usize = 18;

fn unit_scale() -> U256 {
    U256::from(10u64).pow(U256::from(DECIMALS as u64))
}

/// Parses a non-negative base-10 decimal string into ledger units.
///
/// Inputs with more than [`DECIMALS`] fractional digits are rejected with
/// [`Error::PrecisionLoss`] rather than truncated; anything else that is not
/// a plain decimal is [`Error::InvalidAmount`].
pub fn parse_units(amount: &str) -> Result<U256> {
    let trimmed = amount.trim();
    let invalid = || Error::InvalidAmount(amount.to_string());

    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };
    if whole.is_empty() || !whole.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    if trimmed.contains('.') && (frac.is_empty() || !frac.bytes().all(|b| b.is_ascii_digit())) {
        return Err(invalid());
    }
    if frac.len() > DECIMALS {
        return Err(Error::PrecisionLoss(amount.to_string()));
    }

    let whole = U256::from_str_radix(whole, 10).map_err(|_| invalid())?;
    let frac = if frac.is_empty() {
        U256::ZERO
    } else {
        let padded = format!("{frac:0<width$}", width = DECIMALS);
        U256::from_str_radix(&padded, 10).map_err(|_| invalid())?
    };

    whole
        .checked_mul(unit_scale())
        .and_then(|scaled| scaled.checked_add(frac))
        .ok_or_else(invalid)
}

/// Renders ledger units as a decimal string, trimming trailing zeros.
pub fn format_units(value: U256) -> String {
    let scale = unit_scale();
    let whole = value / scale;
    let frac = value % scale;
    if frac.is_zero() {
        return whole.to_string();
    }

    let digits = frac.to_string();
    let mut frac = format!("{}{digits}", "0".repeat(DECIMALS - digits.len()));
    while frac.ends_with('0') {
        frac.pop();
    }
    format!("{whole}.{frac}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(s: &str) -> U256 {
        parse_units(s).expect("parse")
    }

    #[test]
    fn parses_whole_and_fractional_amounts() {
        assert_eq!(units("0"), U256::ZERO);
        assert_eq!(units("1"), unit_scale());
        assert_eq!(
            units("12.5"),
            U256::from(12_500_000_000_000_000_000u128)
        );
        assert_eq!(units("0.000000000000000001"), U256::from(1u64));
    }

    #[test]
    fn round_trips_through_display_units() {
        for input in ["0", "1", "12.5", "100", "0.25", "40", "7.000000000000000123"] {
            let normalized = format_units(units(input));
            assert_eq!(units(&normalized), units(input), "round trip for {input}");
        }
        // Normalization trims trailing zeros.
        assert_eq!(format_units(units("1.50")), "1.5");
        assert_eq!(format_units(units("2.000")), "2");
    }

    #[test]
    fn rejects_malformed_input() {
        for bad in ["", " ", "-1", "1.2.3", "abc", "1e18", ".5", "12.", "1,5", "+4"] {
            assert!(
                matches!(parse_units(bad), Err(Error::InvalidAmount(_))),
                "expected InvalidAmount for {bad:?}"
            );
        }
    }

    #[test]
    fn rejects_precision_beyond_ledger_scale() {
        let err = parse_units("1.0000000000000000001").unwrap_err();
        assert!(matches!(err, Error::PrecisionLoss(_)));
        // 19 digits fail even when the excess digit is a zero; nothing is
        // silently truncated.
        let err = parse_units("1.0000000000000000010").unwrap_err();
        assert!(matches!(err, Error::PrecisionLoss(_)));
    }
}
