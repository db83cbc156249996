//! Savings goal solver: how long a monthly deposit takes to reach a goal,
//! or what monthly deposit reaches it in a given time.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sanitize::{clamp_percent, non_negative_checked};
use crate::time_value::{fv_annuity_factor_frac, nper};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Which variable the solver fills in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculationMode {
    /// Monthly deposit given, solve for the time.
    #[default]
    Time,
    /// Time given, solve for the monthly deposit.
    Monthly,
}

/// One goal as entered on the savings form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsGoalInput {
    pub goal_amount: Money,
    pub monthly_savings: Option<Money>,
    pub time_to_goal_months: Option<Decimal>,
    /// Required. A missing rate yields a zero result, never a default rate.
    pub annual_rate_percent: Option<Percent>,
    pub mode: CalculationMode,
}

/// Goal plus the income the result is measured against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalRequest {
    pub goal: SavingsGoalInput,
    /// Annual after-tax income of the user branch.
    pub user_after_tax_income: Money,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SavingsGoalResult {
    pub mode: CalculationMode,
    pub monthly_savings: Money,
    /// Whole months, rounded up.
    pub time_to_goal_months: u32,
    pub exact_months: Decimal,
    pub percent_of_income: Percent,
    pub total_contributed: Money,
    pub interest_earned: Money,
    pub rate_clamped: bool,
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

/// Solve one goal. `monthly_after_tax_income` is the user branch's annual
/// after-tax income divided by twelve.
pub fn solve_goal(
    goal: &SavingsGoalInput,
    monthly_after_tax_income: Money,
    warnings: &mut Vec<String>,
) -> SavingsGoalResult {
    let mut result = SavingsGoalResult {
        mode: goal.mode,
        ..Default::default()
    };

    let Some(rate_percent) = goal.annual_rate_percent else {
        let msg = "annual interest rate missing; goal left unsolved".to_string();
        log::warn!("{msg}");
        warnings.push(msg);
        return result;
    };
    let (rate_percent, rate_clamped) = clamp_percent("annual_rate_percent", rate_percent, warnings);
    result.rate_clamped = rate_clamped;
    let monthly_rate = rate_percent / dec!(100) / dec!(12);

    let goal_amount = non_negative_checked("goal_amount", goal.goal_amount, warnings);
    if goal_amount.is_zero() {
        return result;
    }

    match goal.mode {
        CalculationMode::Time => {
            let monthly = non_negative_checked(
                "monthly_savings",
                goal.monthly_savings.unwrap_or(Decimal::ZERO),
                warnings,
            );
            if monthly.is_zero() {
                return result;
            }
            let months = nper(monthly_rate, monthly, goal_amount);
            result.monthly_savings = monthly;
            result.exact_months = months;
            result.time_to_goal_months = whole_months(months);
            result.total_contributed = monthly.saturating_mul(months);
        }
        CalculationMode::Monthly => {
            let months = non_negative_checked(
                "time_to_goal_months",
                goal.time_to_goal_months.unwrap_or(Decimal::ZERO),
                warnings,
            );
            if months.is_zero() {
                return result;
            }
            result.exact_months = months;
            result.time_to_goal_months = whole_months(months);
            let Some(factor) = fv_annuity_factor_frac(monthly_rate, months) else {
                let msg = format!(
                    "growth over {months} months at {rate_percent}% exceeds the representable \
                     range; monthly deposit rounds to zero"
                );
                log::warn!("{msg}");
                warnings.push(msg);
                result.interest_earned = goal_amount;
                return result;
            };
            if factor <= Decimal::ZERO {
                return result;
            }
            let monthly = goal_amount / factor;
            result.monthly_savings = monthly;
            result.total_contributed = monthly.saturating_mul(months);
        }
    }

    result.interest_earned = (goal_amount - result.total_contributed).max(Decimal::ZERO);
    result.percent_of_income = percent_of(result.monthly_savings, monthly_after_tax_income);
    result
}

/// Envelope-wrapped single-goal solve.
pub fn solve_savings_goal(request: &SavingsGoalRequest) -> ComputationOutput<SavingsGoalResult> {
    let mut warnings = Vec::new();
    let monthly_income = request.user_after_tax_income.max(Decimal::ZERO) / dec!(12);
    let result = solve_goal(&request.goal, monthly_income, &mut warnings);

    with_metadata(
        "Savings goal annuity solve (NPER for time, FV annuity for deposit)",
        &serde_json::json!({
            "mode": request.goal.mode,
            "annual_rate_percent": request.goal.annual_rate_percent.map(|r| r.to_string()),
        }),
        warnings,
        result,
    )
}

fn percent_of(monthly: Money, monthly_income: Money) -> Percent {
    if monthly_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }
    monthly
        .checked_div(monthly_income)
        .and_then(|share| share.checked_mul(dec!(100)))
        .unwrap_or(Decimal::MAX)
}

fn whole_months(months: Decimal) -> u32 {
    use rust_decimal::prelude::ToPrimitive;
    months.ceil().to_u32().unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monthly_goal(goal: Money, months: Decimal, rate: Percent) -> SavingsGoalInput {
        SavingsGoalInput {
            goal_amount: goal,
            monthly_savings: None,
            time_to_goal_months: Some(months),
            annual_rate_percent: Some(rate),
            mode: CalculationMode::Monthly,
        }
    }

    fn time_goal(goal: Money, monthly: Money, rate: Percent) -> SavingsGoalInput {
        SavingsGoalInput {
            goal_amount: goal,
            monthly_savings: Some(monthly),
            time_to_goal_months: None,
            annual_rate_percent: Some(rate),
            mode: CalculationMode::Time,
        }
    }

    #[test]
    fn test_fifty_thousand_in_five_years_at_four_percent() {
        let mut warnings = Vec::new();
        let goal = monthly_goal(dec!(50_000), dec!(60), dec!(4));
        let res = solve_goal(&goal, dec!(5_000), &mut warnings);
        assert!(
            (res.monthly_savings - dec!(754.1594)).abs() < dec!(0.001),
            "{}",
            res.monthly_savings
        );
        assert_eq!(res.time_to_goal_months, 60);
        assert!((res.percent_of_income - dec!(15.0832)).abs() < dec!(0.001));
        assert!(res.interest_earned > Decimal::ZERO);
        assert!(warnings.is_empty());
    }

    #[test]
    fn test_time_mode_rounds_months_up() {
        let mut warnings = Vec::new();
        let goal = time_goal(dec!(20_000), dec!(500), dec!(5));
        let res = solve_goal(&goal, dec!(4_000), &mut warnings);
        assert!((res.exact_months - dec!(37.0732)).abs() < dec!(0.001), "{}", res.exact_months);
        assert_eq!(res.time_to_goal_months, 38);
        assert_eq!(res.percent_of_income, dec!(12.5));
    }

    #[test]
    fn test_round_trip_time_then_monthly() {
        let mut warnings = Vec::new();
        let rate = dec!(4.5);
        let goal = time_goal(dec!(35_000), dec!(650), rate);
        let there = solve_goal(&goal, dec!(6_000), &mut warnings);
        let back = solve_goal(
            &monthly_goal(dec!(35_000), there.exact_months, rate),
            dec!(6_000),
            &mut warnings,
        );
        assert!((back.monthly_savings - dec!(650)).abs() < dec!(0.01), "{}", back.monthly_savings);
    }

    #[test]
    fn test_zero_rate_is_linear() {
        let mut warnings = Vec::new();
        let goal = time_goal(dec!(12_000), dec!(1_000), Decimal::ZERO);
        let res = solve_goal(&goal, dec!(5_000), &mut warnings);
        assert_eq!(res.time_to_goal_months, 12);
        let goal = monthly_goal(dec!(12_000), dec!(24), Decimal::ZERO);
        let res = solve_goal(&goal, dec!(5_000), &mut warnings);
        assert_eq!(res.monthly_savings, dec!(500));
        assert_eq!(res.interest_earned, Decimal::ZERO);
    }

    #[test]
    fn test_missing_rate_yields_zero() {
        let mut warnings = Vec::new();
        let mut goal = time_goal(dec!(10_000), dec!(100), dec!(3));
        goal.annual_rate_percent = None;
        let res = solve_goal(&goal, dec!(4_000), &mut warnings);
        assert_eq!(res.monthly_savings, Decimal::ZERO);
        assert_eq!(res.time_to_goal_months, 0);
        assert_eq!(warnings.len(), 1);
    }

    #[test]
    fn test_non_positive_inputs_yield_zero() {
        let mut warnings = Vec::new();
        let goal = time_goal(dec!(10_000), Decimal::ZERO, dec!(3));
        let res = solve_goal(&goal, dec!(4_000), &mut warnings);
        assert_eq!(res.time_to_goal_months, 0);
        let res = solve_goal(&time_goal(dec!(-5), dec!(100), dec!(3)), dec!(4_000), &mut warnings);
        assert_eq!(res.monthly_savings, Decimal::ZERO);
        let goal = monthly_goal(dec!(10_000), Decimal::ZERO, dec!(3));
        let res = solve_goal(&goal, dec!(4_000), &mut warnings);
        assert_eq!(res.monthly_savings, Decimal::ZERO);
    }

    #[test]
    fn test_rate_above_hundred_is_clamped() {
        let mut warnings = Vec::new();
        let goal = monthly_goal(dec!(10_000), dec!(12), dec!(250));
        let res = solve_goal(&goal, dec!(4_000), &mut warnings);
        assert!(res.rate_clamped);
        assert_eq!(warnings.len(), 1);
        let goal = monthly_goal(dec!(10_000), dec!(12), dec!(100));
        let reference = solve_goal(&goal, dec!(4_000), &mut warnings);
        assert_eq!(res.monthly_savings, reference.monthly_savings);
    }

    #[test]
    fn test_no_income_gives_zero_percent() {
        let out = solve_savings_goal(&SavingsGoalRequest {
            goal: monthly_goal(dec!(6_000), dec!(12), dec!(2)),
            user_after_tax_income: Decimal::ZERO,
        });
        assert!(out.result.monthly_savings > Decimal::ZERO);
        assert_eq!(out.result.percent_of_income, Decimal::ZERO);
    }

    #[test]
    fn test_horizon_beyond_decimal_range_rounds_deposit_to_zero() {
        for (months, rate) in [(dec!(1200), dec!(100)), (dec!(7000), dec!(12))] {
            let out = solve_savings_goal(&SavingsGoalRequest {
                goal: monthly_goal(dec!(50_000), months, rate),
                user_after_tax_income: dec!(60_000),
            });
            assert_eq!(out.result.monthly_savings, Decimal::ZERO);
            assert_eq!(out.result.exact_months, months);
            assert_eq!(out.result.interest_earned, dec!(50_000));
            assert_eq!(out.warnings.len(), 1, "{:?}", out.warnings);
        }
    }

    #[test]
    fn test_long_horizon_within_range_still_solves() {
        let mut warnings = Vec::new();
        let goal = monthly_goal(dec!(1_000_000), dec!(480), dec!(12));
        let res = solve_goal(&goal, dec!(10_000), &mut warnings);
        assert!(res.monthly_savings > Decimal::ZERO);
        assert!(res.monthly_savings < dec!(100));
        assert!(warnings.is_empty());
    }
}
