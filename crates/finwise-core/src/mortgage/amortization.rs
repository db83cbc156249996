//! Fixed-rate mortgage amortization for monthly and bi-weekly cadences,
//! plus the flat monthly add-on costs of owning the home.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sanitize::{clamp_percent, non_negative_checked};
use crate::time_value::pmt;
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Longer terms are computed as if they were this long.
pub const MAX_TERM_YEARS: u32 = 40;

/// Balance below which the loan is considered paid off.
const BALANCE_EPSILON: Decimal = dec!(0.005);

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentCadence {
    #[default]
    Monthly,
    Biweekly,
}

impl PaymentCadence {
    pub fn periods_per_year(self) -> u32 {
        match self {
            PaymentCadence::Monthly => 12,
            PaymentCadence::Biweekly => 26,
        }
    }
}

/// Annual add-on costs, each a percentage of the loan principal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AddOnRates {
    pub homeowners_insurance_percent: Percent,
    pub property_tax_percent: Percent,
    pub maintenance_percent: Percent,
}

impl Default for AddOnRates {
    fn default() -> Self {
        Self {
            homeowners_insurance_percent: dec!(0.35),
            property_tax_percent: dec!(1.10),
            maintenance_percent: dec!(1.00),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageInput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub term_years: u32,
    #[serde(default)]
    pub cadence: PaymentCadence,
    #[serde(default)]
    pub add_on_rates: AddOnRates,
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub period: u32,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub balance: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MonthlyAddOnCosts {
    pub homeowners_insurance: Money,
    pub property_tax: Money,
    pub maintenance: Money,
    pub total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MortgageOutput {
    pub cadence: PaymentCadence,
    pub periodic_rate: Rate,
    /// Period count after the term cap.
    pub nominal_periods: u32,
    pub term_capped: bool,
    pub rate_clamped: bool,
    /// Level payment per period.
    pub payment: Money,
    pub monthly_equivalent_payment: Money,
    pub schedule: Vec<AmortizationRow>,
    pub total_interest: Money,
    pub total_paid: Money,
    pub actual_term_periods: u32,
    pub monthly_add_on_costs: MonthlyAddOnCosts,
    pub total_monthly_cost: Money,
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

/// Level payment and full amortization schedule for `input`.
pub fn amortize(input: &MortgageInput) -> ComputationOutput<MortgageOutput> {
    let mut warnings = Vec::new();

    let principal = non_negative_checked("principal", input.principal, &mut warnings);
    let (rate_percent, rate_clamped) =
        clamp_percent("annual_rate_percent", input.annual_rate_percent, &mut warnings);

    let term_capped = input.term_years > MAX_TERM_YEARS;
    if term_capped {
        let msg = format!(
            "term of {} years exceeds the {MAX_TERM_YEARS}-year maximum; computed as {MAX_TERM_YEARS} years",
            input.term_years
        );
        log::warn!("{msg}");
        warnings.push(msg);
    }
    let term_years = input.term_years.min(MAX_TERM_YEARS);

    let per_year = input.cadence.periods_per_year();
    let periodic_rate = rate_percent / dec!(100) / Decimal::from(per_year);
    let nominal_periods = term_years * per_year;

    let payment = if principal.is_zero() {
        Decimal::ZERO
    } else {
        pmt(periodic_rate, nominal_periods, principal).unwrap_or_else(|| {
            let msg =
                format!("payment on a principal of {principal} is out of range; treated as 0");
            log::warn!("{msg}");
            warnings.push(msg);
            Decimal::ZERO
        })
    };
    let schedule = build_schedule(principal, periodic_rate, payment, nominal_periods)
        .unwrap_or_else(|| {
            let msg = format!("balance on a principal of {principal} overflows; schedule omitted");
            log::warn!("{msg}");
            warnings.push(msg);
            Vec::new()
        });
    log::debug!(
        "amortized {principal} over {} of {nominal_periods} nominal periods",
        schedule.len()
    );

    let total_interest = saturating_total(schedule.iter().map(|r| r.interest));
    let total_paid = saturating_total(schedule.iter().map(|r| r.payment));
    let monthly_equivalent_payment = payment
        .checked_mul(Decimal::from(per_year))
        .map_or(Decimal::MAX, |yearly| yearly / dec!(12));
    let monthly_add_on_costs = add_on_costs(principal, &input.add_on_rates, &mut warnings);
    let total_monthly_cost = monthly_equivalent_payment.saturating_add(monthly_add_on_costs.total);

    let output = MortgageOutput {
        cadence: input.cadence,
        periodic_rate,
        nominal_periods,
        term_capped,
        rate_clamped,
        payment,
        monthly_equivalent_payment,
        actual_term_periods: schedule.len() as u32,
        schedule,
        total_interest,
        total_paid,
        monthly_add_on_costs,
        total_monthly_cost,
    };

    with_metadata(
        "Fixed-rate amortization: payment = P*r(1+r)^n / ((1+r)^n - 1)",
        &serde_json::json!({
            "cadence": input.cadence,
            "max_term_years": MAX_TERM_YEARS,
            "add_on_rates": input.add_on_rates,
        }),
        warnings,
        output,
    )
}

/// Run the balance recurrence until the loan is paid off. Each payment is
/// capped at the payoff amount so the final period never overpays; the
/// loop never runs past one period beyond the nominal count. `None` when the
/// balance plus interest leaves the representable range.
fn build_schedule(
    principal: Money,
    periodic_rate: Rate,
    payment: Money,
    nominal_periods: u32,
) -> Option<Vec<AmortizationRow>> {
    let mut schedule = Vec::with_capacity(nominal_periods as usize);
    if payment <= Decimal::ZERO {
        return Some(schedule);
    }

    let mut balance = principal;
    let mut period = 0u32;
    while balance >= BALANCE_EPSILON && period <= nominal_periods {
        period += 1;
        let interest = balance.checked_mul(periodic_rate)?;
        let paid = payment.min(balance.checked_add(interest)?);
        let principal_paid = paid - interest;
        balance -= principal_paid;
        schedule.push(AmortizationRow {
            period,
            payment: paid,
            interest,
            principal: principal_paid,
            balance,
        });
    }
    Some(schedule)
}

fn saturating_total(values: impl Iterator<Item = Money>) -> Money {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}

fn add_on_costs(
    principal: Money,
    rates: &AddOnRates,
    warnings: &mut Vec<String>,
) -> MonthlyAddOnCosts {
    let monthly = |field: &str, percent: Percent, warnings: &mut Vec<String>| {
        let (percent, _) = clamp_percent(field, percent, warnings);
        principal
            .checked_mul(percent)
            .map(|scaled| scaled / dec!(100) / dec!(12))
            .unwrap_or_else(|| principal * (percent / dec!(1200)))
    };
    let homeowners_insurance = monthly(
        "homeowners_insurance_percent",
        rates.homeowners_insurance_percent,
        warnings,
    );
    let property_tax = monthly("property_tax_percent", rates.property_tax_percent, warnings);
    let maintenance = monthly("maintenance_percent", rates.maintenance_percent, warnings);
    MonthlyAddOnCosts {
        homeowners_insurance,
        property_tax,
        maintenance,
        total: homeowners_insurance
            .saturating_add(property_tax)
            .saturating_add(maintenance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(
        principal: Money,
        rate: Percent,
        years: u32,
        cadence: PaymentCadence,
    ) -> MortgageInput {
        MortgageInput {
            principal,
            annual_rate_percent: rate,
            term_years: years,
            cadence,
            add_on_rates: AddOnRates::default(),
        }
    }

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected} +/- {tol}, got {actual}"
        );
    }

    fn principal_sum(out: &MortgageOutput) -> Money {
        out.schedule.iter().map(|r| r.principal).sum()
    }

    #[test]
    fn test_thirty_year_monthly() {
        let out = amortize(&input(dec!(200_000), dec!(6), 30, PaymentCadence::Monthly)).result;
        assert_close(out.payment, dec!(1199.10), dec!(0.01));
        assert_eq!(out.actual_term_periods, 360);
        assert_close(principal_sum(&out), dec!(200_000), dec!(0.01));
        assert_close(out.total_interest, dec!(231_676.38), dec!(0.05));
        assert_eq!(out.monthly_equivalent_payment, out.payment);
    }

    #[test]
    fn test_biweekly_pays_off_without_overpaying() {
        let out = amortize(&input(dec!(200_000), dec!(6), 30, PaymentCadence::Biweekly)).result;
        assert_close(out.payment, dec!(553.17), dec!(0.01));
        assert_close(out.monthly_equivalent_payment, dec!(1198.53), dec!(0.01));
        assert!(out.actual_term_periods <= out.nominal_periods + 1);
        assert_close(principal_sum(&out), dec!(200_000), dec!(0.01));
        let last = out.schedule.last().unwrap();
        assert!(last.balance.abs() < dec!(0.005));
        assert!(out.schedule.iter().all(|r| r.payment <= out.payment));
    }

    #[test]
    fn test_term_is_capped_at_forty_years() {
        let out = amortize(&input(dec!(200_000), dec!(6), 50, PaymentCadence::Monthly));
        assert!(out.result.term_capped);
        assert_eq!(out.result.nominal_periods, 480);
        assert_close(out.result.payment, dec!(1100.43), dec!(0.01));
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_schedule_terminates_for_every_rate_and_term() {
        for rate in [dec!(0.5), dec!(3), dec!(7.25), dec!(15)] {
            for years in [1, 15, 40] {
                for cadence in [PaymentCadence::Monthly, PaymentCadence::Biweekly] {
                    let out = amortize(&input(dec!(350_000), rate, years, cadence)).result;
                    assert!(out.actual_term_periods <= out.nominal_periods + 1);
                    assert_close(principal_sum(&out), dec!(350_000), dec!(0.01));
                }
            }
        }
    }

    #[test]
    fn test_zero_rate_amortizes_linearly() {
        let out =
            amortize(&input(dec!(120_000), Decimal::ZERO, 10, PaymentCadence::Monthly)).result;
        assert_eq!(out.payment, dec!(1000));
        assert_eq!(out.actual_term_periods, 120);
        assert_eq!(out.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_add_on_costs() {
        let out = amortize(&input(dec!(300_000), dec!(6), 30, PaymentCadence::Monthly)).result;
        assert_eq!(out.monthly_add_on_costs.homeowners_insurance, dec!(87.5));
        assert_eq!(out.monthly_add_on_costs.property_tax, dec!(275));
        assert_eq!(out.monthly_add_on_costs.maintenance, dec!(250));
        assert_eq!(out.monthly_add_on_costs.total, dec!(612.5));
        assert_eq!(out.total_monthly_cost, out.payment + dec!(612.5));
    }

    #[test]
    fn test_degenerate_inputs() {
        let out = amortize(&input(Decimal::ZERO, dec!(6), 30, PaymentCadence::Monthly)).result;
        assert!(out.schedule.is_empty());
        assert_eq!(out.payment, Decimal::ZERO);

        let out = amortize(&input(dec!(100_000), dec!(6), 0, PaymentCadence::Monthly)).result;
        assert!(out.schedule.is_empty());

        let out = amortize(&input(dec!(-1), dec!(6), 30, PaymentCadence::Monthly));
        assert_eq!(out.result.payment, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_rate_above_hundred_is_clamped() {
        let out = amortize(&input(dec!(100_000), dec!(120), 10, PaymentCadence::Monthly));
        assert!(out.result.rate_clamped);
        assert_eq!(out.result.periodic_rate, dec!(1) / dec!(12));
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let i = input(dec!(275_000), dec!(5.5), 25, PaymentCadence::Biweekly);
        assert_eq!(amortize(&i), amortize(&i));
    }

    #[test]
    fn test_principal_at_decimal_limit_does_not_overflow() {
        let out = amortize(&input(Decimal::MAX, dec!(100), 30, PaymentCadence::Monthly));
        assert!(out.result.payment > Decimal::ZERO);
        assert!(out.result.schedule.is_empty());
        assert_eq!(out.result.total_paid, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1, "{:?}", out.warnings);
        assert!(out.result.total_monthly_cost >= out.result.monthly_add_on_costs.total);
    }

    #[test]
    fn test_large_principal_still_amortizes() {
        let out = amortize(&input(dec!(1_000_000_000_000), dec!(6), 30, PaymentCadence::Monthly));
        assert!(out.warnings.is_empty());
        assert_eq!(out.result.actual_term_periods, 360);
        assert_close(principal_sum(&out.result), dec!(1_000_000_000_000), dec!(1));
    }
}
