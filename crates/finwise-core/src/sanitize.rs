//! Boundary between raw form text and the engine's numeric types.
//!
//! The forms let users type things like `"$1,250.5"`, `"12.5%"` or leave a
//! field half-edited. The strict `parse_*` functions report what went wrong;
//! the `sanitize_*` functions apply the engine's best-effort contract and
//! turn anything unusable into zero. Engines only ever see the output of one
//! of these, never raw text.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::error::FinwiseError;
use crate::types::{Money, Percent};
use crate::FinwiseResult;

/// Decimal places kept for currency fields.
pub const CURRENCY_DECIMALS: u32 = 2;

/// Decimal places kept for percentage fields.
pub const PERCENT_DECIMALS: u32 = 3;

/// Parse a currency string (e.g., "$1,234.56") into a non-negative amount
/// rounded to cents.
pub fn parse_currency(field: &str, raw: &str) -> FinwiseResult<Money> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches('$')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    let value = parse_decimal(field, raw, &cleaned)?;
    if value < Decimal::ZERO {
        return Err(FinwiseError::InvalidInput {
            field: field.into(),
            reason: "amount must not be negative".into(),
        });
    }
    Ok(clamp_decimals(value, CURRENCY_DECIMALS))
}

/// Parse a percentage string (e.g., "12.5%" or "12.5") into whole-number
/// percent, rejecting values outside [0, 100].
pub fn parse_percent(field: &str, raw: &str) -> FinwiseResult<Percent> {
    let cleaned = raw.trim().trim_end_matches('%').trim();
    let value = parse_decimal(field, raw, cleaned)?;
    if value < Decimal::ZERO || value > dec!(100) {
        return Err(FinwiseError::InvalidInput {
            field: field.into(),
            reason: format!("percentage {value} is outside 0-100"),
        });
    }
    Ok(clamp_decimals(value, PERCENT_DECIMALS))
}

/// Lenient currency parse: anything unparseable or negative becomes zero.
pub fn sanitize_currency(raw: &str) -> Money {
    parse_currency("currency", raw).unwrap_or(Decimal::ZERO)
}

/// Lenient percent parse: garbage becomes zero, out-of-range values are
/// clamped into [0, 100].
pub fn sanitize_percent(raw: &str) -> Percent {
    let cleaned = raw.trim().trim_end_matches('%').trim();
    match cleaned.parse::<Decimal>() {
        Ok(value) => clamp_decimals(value.max(Decimal::ZERO).min(dec!(100)), PERCENT_DECIMALS),
        Err(_) => Decimal::ZERO,
    }
}

/// Convert a float coming from a JS caller; NaN and infinities become zero.
pub fn coerce_f64(value: f64) -> Decimal {
    if !value.is_finite() {
        return Decimal::ZERO;
    }
    Decimal::from_f64(value).unwrap_or(Decimal::ZERO)
}

/// Floor at zero and record a warning when the input had to be changed.
pub fn non_negative_checked(field: &str, value: Decimal, warnings: &mut Vec<String>) -> Decimal {
    if value < Decimal::ZERO {
        let msg = format!("{field} was negative ({value}); treated as 0");
        log::warn!("{msg}");
        warnings.push(msg);
        Decimal::ZERO
    } else {
        value
    }
}

/// Clamp a percentage into [0, 100]. Returns the clamped value and whether
/// clamping happened; a warning is recorded when it did.
pub fn clamp_percent(field: &str, value: Percent, warnings: &mut Vec<String>) -> (Percent, bool) {
    if value > dec!(100) {
        let msg = format!("{field} of {value}% exceeds 100%; clamped to 100%");
        log::warn!("{msg}");
        warnings.push(msg);
        (dec!(100), true)
    } else if value < Decimal::ZERO {
        let msg = format!("{field} was negative ({value}%); treated as 0%");
        log::warn!("{msg}");
        warnings.push(msg);
        (Decimal::ZERO, true)
    } else {
        (value, false)
    }
}

fn parse_decimal(field: &str, raw: &str, cleaned: &str) -> FinwiseResult<Decimal> {
    if cleaned.is_empty() {
        return Ok(Decimal::ZERO);
    }
    cleaned.parse::<Decimal>().map_err(|_| FinwiseError::Parse {
        field: field.into(),
        value: raw.into(),
    })
}

fn clamp_decimals(value: Decimal, places: u32) -> Decimal {
    value.round_dp_with_strategy(places, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_currency_strips_symbols() {
        assert_eq!(parse_currency("income", "$1,234.567").unwrap(), dec!(1234.57));
        assert_eq!(parse_currency("income", "  75000 ").unwrap(), dec!(75000));
    }

    #[test]
    fn test_parse_currency_empty_is_zero() {
        assert_eq!(parse_currency("income", "").unwrap(), Decimal::ZERO);
        assert_eq!(parse_currency("income", "$").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_parse_currency_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_currency("income", "12abc"),
            Err(FinwiseError::Parse { .. })
        ));
        assert!(matches!(
            parse_currency("income", "-50"),
            Err(FinwiseError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_percent_bounds() {
        assert_eq!(parse_percent("rate", "4.25%").unwrap(), dec!(4.25));
        assert!(parse_percent("rate", "101").is_err());
    }

    #[test]
    fn test_sanitize_is_lenient() {
        assert_eq!(sanitize_currency("not a number"), Decimal::ZERO);
        assert_eq!(sanitize_currency("-10"), Decimal::ZERO);
        assert_eq!(sanitize_percent("250%"), dec!(100));
        assert_eq!(sanitize_percent("3.14159"), dec!(3.142));
    }

    #[test]
    fn test_coerce_f64_non_finite() {
        assert_eq!(coerce_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(coerce_f64(f64::INFINITY), Decimal::ZERO);
        assert_eq!(coerce_f64(2.5), dec!(2.5));
    }

    #[test]
    fn test_clamp_percent_flags() {
        let mut warnings = Vec::new();
        assert_eq!(clamp_percent("rate", dec!(150), &mut warnings), (dec!(100), true));
        assert_eq!(clamp_percent("rate", dec!(5), &mut warnings), (dec!(5), false));
        assert_eq!(warnings.len(), 1);
    }
}
