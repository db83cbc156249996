//! Recommended budget from after-tax income and housing-cost tier, set
//! against the monthly amounts the user entered.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::budget::retirement_caps::{enforce_cap, resolve_retirement_caps, CapResolution};
use crate::budget::sections::{BudgetItem, BudgetSection, ItemShare};
use crate::sanitize::non_negative_checked;
use crate::types::{with_metadata, ComputationOutput, HousingCostTier, Money, Percent, Rate};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A monthly amount the user typed next to a budget line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnteredAmount {
    pub item: BudgetItem,
    pub monthly_amount: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetInput {
    pub after_tax_income: Money,
    #[serde(default)]
    pub housing_cost_tier: HousingCostTier,
    #[serde(default)]
    pub entered: Vec<EnteredAmount>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetLine {
    pub item: BudgetItem,
    pub section: BudgetSection,
    pub recommended_rate: Rate,
    pub recommended_annual: Money,
    pub recommended_monthly: Money,
    pub entered_monthly: Money,
    /// The entered amount was cut back to the plan's annual limit.
    pub capped_by_irs_limit: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionTotal {
    pub section: BudgetSection,
    pub tier_percent: Percent,
    pub recommended_annual: Money,
    pub recommended_monthly: Money,
    pub entered_monthly: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetOutput {
    pub after_tax_income: Money,
    pub monthly_after_tax_income: Money,
    pub housing_cost_tier: HousingCostTier,
    pub lines: Vec<BudgetLine>,
    pub sections: Vec<SectionTotal>,
    pub retirement: CapResolution,
    pub total_recommended_monthly: Money,
    pub total_entered_monthly: Money,
    /// After-tax monthly income left once the entered amounts are paid.
    /// Negative when over budget.
    pub remaining_monthly: Money,
    pub exceeds_after_tax_income: bool,
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

/// Build the recommended budget and compare it with the entered amounts.
pub fn compute_budget(input: &BudgetInput) -> ComputationOutput<BudgetOutput> {
    let mut warnings: Vec<String> = Vec::new();
    let twelve = dec!(12);

    let income = non_negative_checked("after_tax_income", input.after_tax_income, &mut warnings);
    let monthly_income = income / twelve;
    let tier = input.housing_cost_tier;

    let retirement = resolve_retirement_caps(income, BudgetSection::Retirement.tier_rate(tier));

    // Sum duplicates so each line sees one entered figure.
    let mut entered: BTreeMap<BudgetItem, Money> = BTreeMap::new();
    for entry in &input.entered {
        let field = format!("entered amount for {:?}", entry.item);
        let amount = non_negative_checked(&field, entry.monthly_amount, &mut warnings);
        *entered.entry(entry.item).or_insert(Decimal::ZERO) += amount;
    }

    let mut lines = Vec::new();
    let mut sections = Vec::new();

    for section in BudgetSection::ALL {
        let section_rate = section.tier_rate(tier);
        let mut section_total = SectionTotal {
            section,
            tier_percent: section.tier_percent(tier),
            recommended_annual: Decimal::ZERO,
            recommended_monthly: Decimal::ZERO,
            entered_monthly: Decimal::ZERO,
        };

        for spec in section.items() {
            let (recommended_rate, recommended_annual) = match spec.share {
                ItemShare::Constant(rate) => (rate, income * rate),
                ItemShare::Weighted(weight) => {
                    let rate = section_rate * weight;
                    (rate, income * rate)
                }
                ItemShare::CappedPlan(plan) => match retirement.get(plan) {
                    Some(allocation) => (allocation.rate, allocation.annual_amount),
                    None => (Decimal::ZERO, Decimal::ZERO),
                },
            };

            let mut entered_monthly = entered.get(&spec.item).copied().unwrap_or(Decimal::ZERO);
            let mut capped_by_irs_limit = false;
            if let ItemShare::CappedPlan(plan) = spec.share {
                let (kept, capped) = enforce_cap(plan, entered_monthly * twelve);
                if capped {
                    let msg = format!(
                        "{} contribution of {} per year exceeds the {} limit; capped",
                        plan.label(),
                        entered_monthly * twelve,
                        kept
                    );
                    log::warn!("{msg}");
                    warnings.push(msg);
                    entered_monthly = kept / twelve;
                    capped_by_irs_limit = true;
                }
            }

            let recommended_monthly = recommended_annual / twelve;
            section_total.recommended_annual += recommended_annual;
            section_total.recommended_monthly += recommended_monthly;
            section_total.entered_monthly += entered_monthly;

            lines.push(BudgetLine {
                item: spec.item,
                section,
                recommended_rate,
                recommended_annual,
                recommended_monthly,
                entered_monthly,
                capped_by_irs_limit,
            });
        }
        sections.push(section_total);
    }

    let total_recommended_monthly: Money = sections.iter().map(|s| s.recommended_monthly).sum();
    let total_entered_monthly: Money = sections.iter().map(|s| s.entered_monthly).sum();
    let exceeds_after_tax_income = total_entered_monthly > monthly_income;
    if exceeds_after_tax_income {
        let msg = format!(
            "Entered budget of {total_entered_monthly} per month exceeds after-tax income of {monthly_income} per month"
        );
        log::warn!("{msg}");
        warnings.push(msg);
    }

    let output = BudgetOutput {
        after_tax_income: income,
        monthly_after_tax_income: monthly_income,
        housing_cost_tier: tier,
        lines,
        sections,
        retirement,
        total_recommended_monthly,
        total_entered_monthly,
        remaining_monthly: monthly_income - total_entered_monthly,
        exceeds_after_tax_income,
    };

    with_metadata(
        "Tiered budget allocation with IRS-capped retirement split",
        &serde_json::json!({
            "after_tax_income": income.to_string(),
            "housing_cost_tier": tier,
        }),
        warnings,
        output,
    )
}
