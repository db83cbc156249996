//! Splitting the retirement section across the ten plan slots when IRS
//! dollar limits cut into the percentage targets.
//!
//! Each plan has a recommended weight of the section. A plan whose weighted
//! share would exceed its annual limit is held at the limit. The share it
//! cannot absorb stays with the section as `unallocated_rate`; it is not
//! moved onto the plans that are still under their limits.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::types::{Money, Rate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RetirementPlan {
    Traditional401k,
    Roth401k,
    TraditionalIra,
    RothIra,
    Plan403b,
    Plan457b,
    Hsa,
    SepIra,
    SimpleIra,
    TaxableBrokerage,
}

impl RetirementPlan {
    pub const ALL: [RetirementPlan; 10] = [
        RetirementPlan::Traditional401k,
        RetirementPlan::Roth401k,
        RetirementPlan::TraditionalIra,
        RetirementPlan::RothIra,
        RetirementPlan::Plan403b,
        RetirementPlan::Plan457b,
        RetirementPlan::Hsa,
        RetirementPlan::SepIra,
        RetirementPlan::SimpleIra,
        RetirementPlan::TaxableBrokerage,
    ];

    /// Annual contribution limit, if any.
    pub fn annual_cap(&self) -> Option<Money> {
        match self {
            RetirementPlan::Traditional401k
            | RetirementPlan::Roth401k
            | RetirementPlan::Plan403b
            | RetirementPlan::Plan457b => Some(dec!(23_500)),
            RetirementPlan::TraditionalIra | RetirementPlan::RothIra => Some(dec!(7_000)),
            RetirementPlan::Hsa => Some(dec!(4_300)),
            RetirementPlan::SepIra => Some(dec!(70_000)),
            RetirementPlan::SimpleIra => Some(dec!(16_500)),
            RetirementPlan::TaxableBrokerage => None,
        }
    }

    /// Recommended share of the retirement section.
    pub fn recommended_weight(&self) -> Decimal {
        match self {
            RetirementPlan::Traditional401k => dec!(0.55),
            RetirementPlan::TraditionalIra => dec!(0.20),
            RetirementPlan::Hsa => dec!(0.10),
            RetirementPlan::TaxableBrokerage => dec!(0.15),
            _ => Decimal::ZERO,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RetirementPlan::Traditional401k => "Traditional 401(k)",
            RetirementPlan::Roth401k => "Roth 401(k)",
            RetirementPlan::TraditionalIra => "Traditional IRA",
            RetirementPlan::RothIra => "Roth IRA",
            RetirementPlan::Plan403b => "403(b)",
            RetirementPlan::Plan457b => "457(b)",
            RetirementPlan::Hsa => "HSA",
            RetirementPlan::SepIra => "SEP IRA",
            RetirementPlan::SimpleIra => "SIMPLE IRA",
            RetirementPlan::TaxableBrokerage => "Taxable brokerage",
        }
    }
}

/// Resolved share for one plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanAllocation {
    pub plan: RetirementPlan,
    pub weight: Decimal,
    /// Weighted share before any limit binds.
    pub uncapped_rate: Rate,
    /// Final share of after-tax income.
    pub rate: Rate,
    pub annual_amount: Money,
    pub annual_cap: Option<Money>,
    pub capped: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapResolution {
    pub section_rate: Rate,
    pub allocations: Vec<PlanAllocation>,
    /// Section share held back by plans pinned at their limits.
    pub unallocated_rate: Rate,
}

impl CapResolution {
    pub fn get(&self, plan: RetirementPlan) -> Option<&PlanAllocation> {
        self.allocations.iter().find(|a| a.plan == plan)
    }

    pub fn allocated_rate(&self) -> Rate {
        self.allocations.iter().map(|a| a.rate).sum()
    }
}

/// Split `section_rate` of `after_tax_income` across the retirement plans.
///
/// The final share of every plan is `min(weighted share, cap / after_tax_income)`
/// and its dollar amount never exceeds the cap. Without income there is
/// nothing for a dollar limit to bind against, so the weighted split stands.
pub fn resolve_retirement_caps(after_tax_income: Money, section_rate: Rate) -> CapResolution {
    let income = after_tax_income.max(Decimal::ZERO);
    let total_weight: Decimal = RetirementPlan::ALL.iter().map(|p| p.recommended_weight()).sum();

    let allocations: Vec<PlanAllocation> = RetirementPlan::ALL
        .iter()
        .map(|plan| {
            let weight = plan.recommended_weight();
            let uncapped_rate = if total_weight.is_zero() {
                Decimal::ZERO
            } else {
                section_rate * weight / total_weight
            };
            let annual_cap = plan.annual_cap();
            let cap_rate = annual_cap.filter(|_| income > Decimal::ZERO).map(|cap| cap / income);

            let (rate, annual_amount, capped) = match (annual_cap, cap_rate) {
                (Some(cap), Some(limit)) if uncapped_rate > limit => (limit, cap, true),
                _ => (uncapped_rate, income * uncapped_rate, false),
            };
            PlanAllocation {
                plan: *plan,
                weight,
                uncapped_rate,
                rate,
                annual_amount,
                annual_cap,
                capped,
            }
        })
        .collect();

    let allocated: Rate = allocations.iter().map(|a| a.rate).sum();
    let unallocated_rate = (section_rate - allocated).max(Decimal::ZERO);
    log::debug!(
        "retirement split of {section_rate} on {income}: {} capped, {unallocated_rate} held back",
        allocations.iter().filter(|a| a.capped).count()
    );

    CapResolution {
        section_rate,
        allocations,
        unallocated_rate,
    }
}

/// Clamp a user-entered annual contribution to the plan's limit.
/// Returns the amount kept and whether the limit cut it.
pub fn enforce_cap(plan: RetirementPlan, annual_amount: Money) -> (Money, bool) {
    match plan.annual_cap() {
        Some(cap) if annual_amount > cap => (cap, true),
        _ => (annual_amount, false),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::budget::sections::BudgetSection;
    use crate::types::HousingCostTier;

    const TOL: Decimal = dec!(0.000000001);

    #[test]
    fn test_weights_sum_to_one() {
        let total: Decimal = RetirementPlan::ALL.iter().map(|p| p.recommended_weight()).sum();
        assert_eq!(total, Decimal::ONE);
    }

    #[test]
    fn test_no_caps_bind_for_modest_income() {
        // 15% of 60k = 9k; 401(k) 4,950, IRA 1,800, HSA 900, brokerage 1,350.
        let res = resolve_retirement_caps(dec!(60_000), dec!(0.15));
        let k = res.get(RetirementPlan::Traditional401k).unwrap();
        assert!(!k.capped);
        assert_eq!(k.annual_amount, dec!(4_950));
        assert_eq!(res.unallocated_rate, Decimal::ZERO);
        assert_eq!(res.allocated_rate(), dec!(0.15));
    }

    #[test]
    fn test_unbound_plan_keeps_its_weighted_share() {
        // 15% of 260k: the IRA wants 7,800 and binds; the 401(k) wants
        // 21,450, under its 23,500 limit, and must stay at 8.25%.
        let res = resolve_retirement_caps(dec!(260_000), dec!(0.15));
        let k = res.get(RetirementPlan::Traditional401k).unwrap();
        assert!(!k.capped);
        assert_eq!(k.rate, dec!(0.0825));
        assert_eq!(k.annual_amount, dec!(21_450));

        let ira = res.get(RetirementPlan::TraditionalIra).unwrap();
        assert!(ira.capped);
        assert_eq!(ira.annual_amount, dec!(7_000));
        assert_eq!(ira.rate, dec!(7_000) / dec!(260_000));

        let hsa = res.get(RetirementPlan::Hsa).unwrap();
        assert!(!hsa.capped);
        assert_eq!(hsa.rate, dec!(0.015));
        assert_eq!(res.get(RetirementPlan::TaxableBrokerage).unwrap().rate, dec!(0.0225));

        let held_back = res.unallocated_rate * dec!(260_000);
        assert!((held_back - dec!(800)).abs() < TOL, "held_back={held_back}");
    }

    #[test]
    fn test_bound_excess_is_left_unallocated() {
        // 15% of 400k = 60k. 401(k) wants 33k, IRA 12k, HSA 6k: all bind.
        let res = resolve_retirement_caps(dec!(400_000), dec!(0.15));
        let amount = |p: RetirementPlan| res.get(p).unwrap().annual_amount;
        assert_eq!(amount(RetirementPlan::Traditional401k), dec!(23_500));
        assert_eq!(amount(RetirementPlan::TraditionalIra), dec!(7_000));
        assert_eq!(amount(RetirementPlan::Hsa), dec!(4_300));
        assert_eq!(amount(RetirementPlan::TaxableBrokerage), dec!(9_000));
        let held_back = res.unallocated_rate * dec!(400_000);
        assert!((held_back - dec!(16_200)).abs() < TOL, "held_back={held_back}");
    }

    #[test]
    fn test_caps_hold_for_every_tier_and_income() {
        let incomes = [
            dec!(1),
            dec!(15_000),
            dec!(48_000),
            dec!(90_000),
            dec!(156_666.67),
            dec!(250_000),
            dec!(1_000_000),
            dec!(25_000_000),
        ];
        for tier in [HousingCostTier::Low, HousingCostTier::Medium, HousingCostTier::High] {
            let rate = BudgetSection::Retirement.tier_rate(tier);
            for income in incomes {
                let res = resolve_retirement_caps(income, rate);
                for a in &res.allocations {
                    assert!(a.rate <= a.uncapped_rate);
                    if let Some(cap) = a.annual_cap {
                        assert!(a.annual_amount <= cap);
                        assert!(a.rate * income <= cap + TOL);
                    }
                }
                let total = res.allocated_rate() + res.unallocated_rate;
                assert!((total - rate).abs() < TOL);
            }
        }
    }

    #[test]
    fn test_zero_income_uses_uncapped_split() {
        let res = resolve_retirement_caps(Decimal::ZERO, dec!(0.14));
        let k = res.get(RetirementPlan::Traditional401k).unwrap();
        assert_eq!(k.rate, k.uncapped_rate);
        assert_eq!(k.annual_amount, Decimal::ZERO);
    }

    #[test]
    fn test_enforce_cap() {
        assert_eq!(enforce_cap(RetirementPlan::RothIra, dec!(9_000)), (dec!(7_000), true));
        assert_eq!(enforce_cap(RetirementPlan::RothIra, dec!(6_000)), (dec!(6_000), false));
        assert_eq!(
            enforce_cap(RetirementPlan::TaxableBrokerage, dec!(90_000)),
            (dec!(90_000), false)
        );
    }
}
