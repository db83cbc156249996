//! Annuity and compounding primitives shared by the savings, mortgage and
//! retirement engines. All functions take a per-period rate as a decimal
//! fraction and never panic: degenerate inputs fall back to the zero-rate
//! limit or to zero, and growth that leaves the `Decimal` range comes back
//! as `None` for the caller to resolve.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::types::{Money, Rate};

/// Compute (1 + r)^n via iterative multiplication (avoids Decimal::powd drift).
/// `None` when the result overflows.
pub fn compound(rate: Rate, n: u32) -> Option<Decimal> {
    let factor = Decimal::ONE.checked_add(rate)?;
    (0..n).try_fold(Decimal::ONE, |acc, _| acc.checked_mul(factor))
}

/// Discount factor 1 / (1 + r)^n. Growth too large to represent discounts
/// to zero.
pub fn discount_factor(rate: Rate, n: u32) -> Decimal {
    match compound(rate, n) {
        Some(factor) if !factor.is_zero() => Decimal::ONE / factor,
        _ => Decimal::ZERO,
    }
}

/// Future value of one unit paid at the end of each of `n` periods:
/// ((1 + r)^n - 1) / r
pub fn fv_annuity_factor(rate: Rate, n: u32) -> Option<Decimal> {
    if rate.is_zero() {
        return Some(Decimal::from(n));
    }
    (compound(rate, n)? - Decimal::ONE).checked_div(rate)
}

/// Same as [`fv_annuity_factor`] for a fractional period count, as produced
/// by the NPER solve.
pub fn fv_annuity_factor_frac(rate: Rate, n: Decimal) -> Option<Decimal> {
    if rate.is_zero() {
        return Some(n);
    }
    if n.fract().is_zero() {
        if let Some(whole) = n.to_u32() {
            return fv_annuity_factor(rate, whole);
        }
    }
    let growth = (Decimal::ONE + rate).checked_powd(n)?;
    (growth - Decimal::ONE).checked_div(rate)
}

/// Level payment that retires `principal` over `n` periods:
/// P * r(1+r)^n / ((1+r)^n - 1)
///
/// When (1+r)^n overflows the payment is taken at its interest-only limit
/// P * r. `None` only when the payment itself is out of range.
pub fn pmt(rate: Rate, n: u32, principal: Money) -> Option<Money> {
    if n == 0 {
        return Some(Decimal::ZERO);
    }
    if rate.is_zero() {
        return principal.checked_div(Decimal::from(n));
    }
    let Some(factor) = compound(rate, n) else {
        return principal.checked_mul(rate);
    };
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return principal.checked_div(Decimal::from(n));
    }
    principal
        .checked_mul(rate)?
        .checked_mul(factor)
        .and_then(|scaled| scaled.checked_div(denom))
        .or_else(|| principal.checked_mul(rate)?.checked_mul(factor.checked_div(denom)?))
}

/// Number of periods needed for a level payment to accumulate `target`:
/// ln(1 + target * r / payment) / ln(1 + r)
///
/// Returns zero when the payment or target is not positive, or when the
/// ratio is out of range.
pub fn nper(rate: Rate, payment: Money, target: Money) -> Decimal {
    if payment <= Decimal::ZERO || target <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    if rate.is_zero() {
        return target.checked_div(payment).unwrap_or(Decimal::ZERO);
    }
    let numerator = target
        .checked_mul(rate)
        .and_then(|v| v.checked_div(payment))
        .and_then(|v| v.checked_add(Decimal::ONE))
        .and_then(|v| v.checked_ln());
    let denominator = (Decimal::ONE + rate).checked_ln();
    match (numerator, denominator) {
        (Some(num), Some(den)) if !den.is_zero() => num / den,
        _ => Decimal::ZERO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_compound_matches_repeated_growth() {
        assert_eq!(compound(dec!(0.10), 2), Some(dec!(1.21)));
        assert_eq!(compound(dec!(0.05), 0), Some(Decimal::ONE));
    }

    #[test]
    fn test_fv_annuity_factor_zero_rate() {
        assert_eq!(fv_annuity_factor(Decimal::ZERO, 12), Some(dec!(12)));
    }

    #[test]
    fn test_pmt_standard_mortgage() {
        // 200k over 30 years at 6%/12: ~1,199.10
        let payment = pmt(dec!(0.005), 360, dec!(200_000)).unwrap();
        assert!((payment - dec!(1199.10)).abs() < dec!(0.01), "payment={payment}");
    }

    #[test]
    fn test_nper_recovers_period_count() {
        let rate = dec!(0.004);
        let payment = dec!(500);
        let target = payment * fv_annuity_factor(rate, 48).unwrap();
        let n = nper(rate, payment, target);
        assert!((n - dec!(48)).abs() < dec!(0.0001), "n={n}");
    }

    #[test]
    fn test_nper_non_positive_inputs() {
        assert_eq!(nper(dec!(0.01), Decimal::ZERO, dec!(1000)), Decimal::ZERO);
        assert_eq!(nper(dec!(0.01), dec!(100), dec!(-5)), Decimal::ZERO);
    }

    #[test]
    fn test_discount_factor() {
        assert_eq!(discount_factor(dec!(0.25), 1), dec!(0.8));
    }

    #[test]
    fn test_growth_out_of_range_is_none() {
        assert_eq!(compound(dec!(0.5), 500), None);
        assert_eq!(fv_annuity_factor(dec!(0.01), 7000), None);
        assert_eq!(fv_annuity_factor_frac(dec!(1) / dec!(12), dec!(1200.5)), None);
        assert_eq!(discount_factor(dec!(0.5), 500), Decimal::ZERO);
    }

    #[test]
    fn test_pmt_falls_back_to_interest_only_limit() {
        let payment = pmt(dec!(0.01), 7000, dec!(100_000)).unwrap();
        assert_eq!(payment, dec!(1000));
        assert_eq!(pmt(dec!(0.5), 12, Decimal::MAX), None);
    }

    #[test]
    fn test_nper_extreme_ratio_is_zero() {
        assert_eq!(nper(dec!(0.01), dec!(0.0000000001), Decimal::MAX), Decimal::ZERO);
    }
}
