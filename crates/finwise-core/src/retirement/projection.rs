//! Year-by-year retirement account projection over ages 22 to 100 with a
//! contribution window, a percentage withdrawal window, and present-value
//! summaries.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::assets::AssetMix;
use crate::sanitize::{clamp_percent, non_negative_checked};
use crate::time_value::{compound, discount_factor, fv_annuity_factor};
use crate::types::{with_metadata, ComputationOutput, Money, Percent, Rate};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const MIN_AGE: u32 = 22;
pub const MAX_AGE: u32 = 100;

/// Inflation rate used to discount future values back to the starting age.
pub const DISCOUNT_RATE: Rate = dec!(0.03);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementInput {
    pub contrib_start_age: u32,
    pub contrib_end_age: u32,
    pub monthly_contribution: Money,
    pub withdraw_start_age: u32,
    pub withdraw_end_age: u32,
    pub withdrawal_percent: Percent,
    #[serde(default)]
    pub allocations: AssetMix,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRow {
    pub age: u32,
    pub contributing: bool,
    pub withdrawing: bool,
    pub contributions: Money,
    pub gross_value: Money,
    pub withdrawal: Money,
    pub net_value: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetirementSummary {
    /// Largest net value reached over the projection.
    pub future_ending_balance: Money,
    pub future_total_withdrawn: Money,
    pub present_ending_balance: Money,
    pub present_total_withdrawn: Money,
    pub total_contributions: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetirementOutput {
    pub weighted_annual_return: Percent,
    pub first_withdrawal_age: u32,
    pub withdrawal_clamped: bool,
    /// Balances reached the largest representable value and were held there.
    pub saturated: bool,
    pub series: Vec<AgeRow>,
    pub summary: RetirementSummary,
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

pub fn project_retirement(input: &RetirementInput) -> ComputationOutput<RetirementOutput> {
    let mut warnings = Vec::new();

    let contrib_start = clamp_age("contrib_start_age", input.contrib_start_age, &mut warnings);
    let contrib_end = clamp_age("contrib_end_age", input.contrib_end_age, &mut warnings);
    let withdraw_start = clamp_age("withdraw_start_age", input.withdraw_start_age, &mut warnings);
    let withdraw_end = clamp_age("withdraw_end_age", input.withdraw_end_age, &mut warnings);
    if contrib_start > contrib_end {
        let msg = format!(
            "contribution window {contrib_start}..{contrib_end} is empty; no contributions projected"
        );
        log::warn!("{msg}");
        warnings.push(msg);
    }

    let monthly_contribution =
        non_negative_checked("monthly_contribution", input.monthly_contribution, &mut warnings);
    let (withdrawal_percent, withdrawal_clamped) =
        clamp_percent("withdrawal_percent", input.withdrawal_percent, &mut warnings);
    let withdrawal_rate = withdrawal_percent / dec!(100);

    let weighted_annual_return = input.allocations.weighted_annual_return(&mut warnings);
    let monthly_rate = weighted_annual_return / dec!(100) / dec!(12);
    let annual_growth = compound(monthly_rate, 12).unwrap_or(Decimal::MAX);
    let year_of_contributions = fv_annuity_factor(monthly_rate, 12)
        .unwrap_or(Decimal::MAX)
        .saturating_mul(monthly_contribution);

    let first_withdrawal_age = withdraw_start.max(contrib_end + 1);

    let mut series = Vec::with_capacity((MAX_AGE - MIN_AGE + 1) as usize);
    let mut base = Decimal::ZERO;
    let mut prior_gross = Decimal::ZERO;
    let mut saturated = false;
    for age in MIN_AGE..=MAX_AGE {
        let contributing = (contrib_start..=contrib_end).contains(&age);
        let withdrawing = (first_withdrawal_age..=withdraw_end).contains(&age);

        let contributions = if contributing { year_of_contributions } else { Decimal::ZERO };
        let gross_value = base.saturating_mul(annual_growth).saturating_add(contributions);
        saturated |= gross_value == Decimal::MAX;
        let withdrawal = if withdrawing {
            prior_gross.saturating_mul(withdrawal_rate).min(gross_value)
        } else {
            Decimal::ZERO
        };
        let net_value = (gross_value - withdrawal).max(Decimal::ZERO);

        series.push(AgeRow {
            age,
            contributing,
            withdrawing,
            contributions: if contributing {
                monthly_contribution.saturating_mul(dec!(12))
            } else {
                Decimal::ZERO
            },
            gross_value,
            withdrawal,
            net_value,
        });
        prior_gross = gross_value;
        base = net_value;
    }
    if saturated {
        let msg = format!(
            "balances at {weighted_annual_return}% blended return exceed the representable \
             range; values held at the maximum"
        );
        log::warn!("{msg}");
        warnings.push(msg);
    }

    let summary = summarize(&series, contrib_start);
    log::debug!(
        "projected {} ages at {weighted_annual_return}% blended return; peak {}",
        series.len(),
        summary.future_ending_balance
    );

    with_metadata(
        "Annual roll-forward with monthly compounding; withdrawals as a percent of prior gross value",
        &serde_json::json!({
            "ages": [MIN_AGE, MAX_AGE],
            "discount_rate": DISCOUNT_RATE.to_string(),
            "first_withdrawal_age": first_withdrawal_age,
        }),
        warnings,
        RetirementOutput {
            weighted_annual_return,
            first_withdrawal_age,
            withdrawal_clamped,
            saturated,
            series,
            summary,
        },
    )
}

/// Reduce the series to peak balance and total withdrawn, in future and
/// present dollars. Present values are discounted back to `start_age`.
fn summarize(series: &[AgeRow], start_age: u32) -> RetirementSummary {
    let pv = |age: u32, value: Money| {
        value.saturating_mul(discount_factor(DISCOUNT_RATE, age.saturating_sub(start_age)))
    };

    let mut summary = RetirementSummary::default();
    let mut peak_age = start_age;
    for row in series {
        if row.net_value > summary.future_ending_balance {
            summary.future_ending_balance = row.net_value;
            peak_age = row.age;
        }
        summary.future_total_withdrawn =
            summary.future_total_withdrawn.saturating_add(row.withdrawal);
        summary.present_total_withdrawn =
            summary.present_total_withdrawn.saturating_add(pv(row.age, row.withdrawal));
        summary.total_contributions = summary.total_contributions.saturating_add(row.contributions);
    }
    summary.present_ending_balance = pv(peak_age, summary.future_ending_balance);
    summary
}

fn clamp_age(field: &str, age: u32, warnings: &mut Vec<String>) -> u32 {
    let clamped = age.clamp(MIN_AGE, MAX_AGE);
    if clamped != age {
        let msg = format!("{field} of {age} is outside {MIN_AGE}..={MAX_AGE}; clamped to {clamped}");
        log::warn!("{msg}");
        warnings.push(msg);
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::retirement::assets::AssetAllocation;
    use pretty_assertions::assert_eq;

    fn mix(return_percent: Percent) -> AssetMix {
        AssetMix {
            us_stocks: AssetAllocation {
                allocation_percent: dec!(100),
                return_percent,
            },
            ..Default::default()
        }
    }

    fn input() -> RetirementInput {
        RetirementInput {
            contrib_start_age: 30,
            contrib_end_age: 64,
            monthly_contribution: dec!(500),
            withdraw_start_age: 65,
            withdraw_end_age: 95,
            withdrawal_percent: dec!(4),
            allocations: mix(dec!(7)),
        }
    }

    #[test]
    fn test_zero_return_hand_computed() {
        let out = project_retirement(&RetirementInput {
            contrib_start_age: 22,
            contrib_end_age: 23,
            monthly_contribution: dec!(100),
            withdraw_start_age: 24,
            withdraw_end_age: 25,
            withdrawal_percent: dec!(50),
            allocations: AssetMix::default(),
        })
        .result;
        let net: Vec<Money> = out.series.iter().take(5).map(|r| r.net_value).collect();
        assert_eq!(net, vec![dec!(1200), dec!(2400), dec!(1200), dec!(0), dec!(0)]);
        assert_eq!(out.summary.future_ending_balance, dec!(2400));
        assert_eq!(out.summary.future_total_withdrawn, dec!(2400));
        assert_eq!(out.summary.total_contributions, dec!(2400));

        let pv_peak = dec!(2400) / dec!(1.03);
        assert!((out.summary.present_ending_balance - pv_peak).abs() < dec!(0.000001));
        let pv_withdrawn = dec!(1200) / dec!(1.0609) + dec!(1200) / dec!(1.092727);
        assert!((out.summary.present_total_withdrawn - pv_withdrawn).abs() < dec!(0.000001));
    }

    #[test]
    fn test_series_covers_every_age() {
        let out = project_retirement(&input()).result;
        assert_eq!(out.series.len(), 79);
        assert_eq!(out.series.first().map(|r| r.age), Some(MIN_AGE));
        assert_eq!(out.series.last().map(|r| r.age), Some(MAX_AGE));
        assert!(out.series.iter().filter(|r| r.age < 30).all(|r| r.net_value.is_zero()));
    }

    #[test]
    fn test_withdrawals_start_after_contributions_end() {
        let mut i = input();
        i.withdraw_start_age = 55;
        let out = project_retirement(&i).result;
        assert_eq!(out.first_withdrawal_age, 65);
        assert!(out.series.iter().all(|r| !(r.contributing && r.withdrawing)));
        let at_65 = &out.series[(65 - MIN_AGE) as usize];
        let at_64 = &out.series[(64 - MIN_AGE) as usize];
        assert_eq!(at_65.withdrawal, at_64.gross_value * dec!(0.04));
    }

    #[test]
    fn test_no_withdrawal_after_window() {
        let out = project_retirement(&input()).result;
        assert!(out.series.iter().filter(|r| r.age > 95).all(|r| r.withdrawal.is_zero()));
        assert!(out.summary.future_total_withdrawn > Decimal::ZERO);
        assert!(out.summary.present_total_withdrawn < out.summary.future_total_withdrawn);
        assert!(out.summary.present_ending_balance < out.summary.future_ending_balance);
    }

    #[test]
    fn test_withdrawal_percent_is_clamped() {
        let mut i = input();
        i.withdrawal_percent = dec!(150);
        let out = project_retirement(&i);
        assert!(out.result.withdrawal_clamped);
        assert!(out.result.series.iter().all(|r| r.net_value >= Decimal::ZERO));
        let after = &out.result.series[(66 - MIN_AGE) as usize];
        assert_eq!(after.net_value, Decimal::ZERO);
    }

    #[test]
    fn test_out_of_range_ages_are_clamped() {
        let mut i = input();
        i.contrib_start_age = 18;
        i.withdraw_end_age = 110;
        let out = project_retirement(&i);
        assert_eq!(out.warnings.len(), 2);
        assert!(out.result.series[0].contributing);
    }

    #[test]
    fn test_negative_contribution_treated_as_zero() {
        let mut i = input();
        i.monthly_contribution = dec!(-250);
        let out = project_retirement(&i);
        assert_eq!(out.result.summary.future_ending_balance, Decimal::ZERO);
        assert_eq!(out.warnings.len(), 1);
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        assert_eq!(project_retirement(&input()), project_retirement(&input()));
    }

    #[test]
    fn test_extreme_return_holds_balances_at_maximum() {
        let mut i = input();
        i.contrib_start_age = MIN_AGE;
        i.monthly_contribution = dec!(10_000);
        i.allocations = mix(dec!(80));
        let out = project_retirement(&i);
        assert!(out.result.saturated);
        assert_eq!(out.warnings.len(), 1, "{:?}", out.warnings);
        assert_eq!(out.result.series.len(), 79);
        assert_eq!(out.result.summary.future_ending_balance, Decimal::MAX);
        assert!(out.result.summary.present_ending_balance > Decimal::ZERO);
        assert!(out.result.series.iter().all(|r| r.net_value >= Decimal::ZERO));
    }

    #[test]
    fn test_ordinary_return_does_not_saturate() {
        let out = project_retirement(&input());
        assert!(!out.result.saturated);
        assert!(out.warnings.is_empty());
    }
}
