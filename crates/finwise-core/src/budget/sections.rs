//! The nine budget sections, their tier percentages and line items.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::budget::retirement_caps::RetirementPlan;
use crate::types::{HousingCostTier, Percent, Rate};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetSection {
    Housing,
    Food,
    Transportation,
    Insurance,
    Debt,
    Savings,
    Retirement,
    Lifestyle,
    Misc,
}

/// A budget line. Retirement lines carry the plan they fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetItem {
    RentOrMortgage,
    Utilities,
    InternetAndPhone,
    Groceries,
    DiningOut,
    CarPayment,
    Fuel,
    CarMaintenance,
    PublicTransit,
    HealthInsurance,
    AutoInsurance,
    RentersInsurance,
    LifeInsurance,
    StudentLoans,
    CreditCards,
    EmergencyFund,
    ShortTermGoals,
    Retirement(RetirementPlan),
    Entertainment,
    Clothing,
    PersonalCare,
    GiftsAndCharity,
    Other,
}

/// How an item's recommended share of after-tax income is derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemShare {
    /// Fixed fraction of after-tax income regardless of tier.
    Constant(Rate),
    /// Fraction of the section's tier percentage.
    Weighted(Decimal),
    /// Resolved by the retirement cap iteration.
    CappedPlan(RetirementPlan),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub item: BudgetItem,
    pub share: ItemShare,
}

const fn weighted(item: BudgetItem, weight: Decimal) -> ItemSpec {
    ItemSpec {
        item,
        share: ItemShare::Weighted(weight),
    }
}

const fn constant(item: BudgetItem, rate: Rate) -> ItemSpec {
    ItemSpec {
        item,
        share: ItemShare::Constant(rate),
    }
}

const fn plan(plan: RetirementPlan) -> ItemSpec {
    ItemSpec {
        item: BudgetItem::Retirement(plan),
        share: ItemShare::CappedPlan(plan),
    }
}

const HOUSING_ITEMS: &[ItemSpec] = &[
    weighted(BudgetItem::RentOrMortgage, dec!(0.80)),
    weighted(BudgetItem::Utilities, dec!(0.12)),
    weighted(BudgetItem::InternetAndPhone, dec!(0.08)),
];

const FOOD_ITEMS: &[ItemSpec] = &[
    weighted(BudgetItem::Groceries, dec!(0.70)),
    weighted(BudgetItem::DiningOut, dec!(0.30)),
];

const TRANSPORTATION_ITEMS: &[ItemSpec] = &[
    weighted(BudgetItem::CarPayment, dec!(0.40)),
    weighted(BudgetItem::Fuel, dec!(0.25)),
    weighted(BudgetItem::CarMaintenance, dec!(0.15)),
    weighted(BudgetItem::PublicTransit, dec!(0.20)),
];

const INSURANCE_ITEMS: &[ItemSpec] = &[
    weighted(BudgetItem::HealthInsurance, dec!(0.50)),
    weighted(BudgetItem::AutoInsurance, dec!(0.25)),
    weighted(BudgetItem::RentersInsurance, dec!(0.15)),
    weighted(BudgetItem::LifeInsurance, dec!(0.10)),
];

const DEBT_ITEMS: &[ItemSpec] = &[
    weighted(BudgetItem::StudentLoans, dec!(0.60)),
    weighted(BudgetItem::CreditCards, dec!(0.40)),
];

const SAVINGS_ITEMS: &[ItemSpec] = &[
    weighted(BudgetItem::EmergencyFund, dec!(0.50)),
    weighted(BudgetItem::ShortTermGoals, dec!(0.50)),
];

const RETIREMENT_ITEMS: &[ItemSpec] = &[
    plan(RetirementPlan::Traditional401k),
    plan(RetirementPlan::Roth401k),
    plan(RetirementPlan::TraditionalIra),
    plan(RetirementPlan::RothIra),
    plan(RetirementPlan::Plan403b),
    plan(RetirementPlan::Plan457b),
    plan(RetirementPlan::Hsa),
    plan(RetirementPlan::SepIra),
    plan(RetirementPlan::SimpleIra),
    plan(RetirementPlan::TaxableBrokerage),
];

const LIFESTYLE_ITEMS: &[ItemSpec] = &[
    weighted(BudgetItem::Entertainment, dec!(0.40)),
    weighted(BudgetItem::Clothing, dec!(0.35)),
    weighted(BudgetItem::PersonalCare, dec!(0.25)),
];

const MISC_ITEMS: &[ItemSpec] = &[
    constant(BudgetItem::GiftsAndCharity, dec!(0.02)),
    constant(BudgetItem::Other, dec!(0.02)),
];

impl BudgetSection {
    pub const ALL: [BudgetSection; 9] = [
        BudgetSection::Housing,
        BudgetSection::Food,
        BudgetSection::Transportation,
        BudgetSection::Insurance,
        BudgetSection::Debt,
        BudgetSection::Savings,
        BudgetSection::Retirement,
        BudgetSection::Lifestyle,
        BudgetSection::Misc,
    ];

    /// Share of after-tax income recommended for the section, in percent.
    pub fn tier_percent(&self, tier: HousingCostTier) -> Percent {
        let (low, medium, high) = match self {
            BudgetSection::Housing => (dec!(25), dec!(30), dec!(35)),
            BudgetSection::Food => (dec!(12), dec!(11), dec!(10)),
            BudgetSection::Transportation => (dec!(12), dec!(10), dec!(8)),
            BudgetSection::Insurance => (dec!(8), dec!(8), dec!(7)),
            BudgetSection::Debt => (dec!(8), dec!(7), dec!(6)),
            BudgetSection::Savings => (dec!(10), dec!(9), dec!(9)),
            BudgetSection::Retirement => (dec!(15), dec!(14), dec!(13)),
            BudgetSection::Lifestyle => (dec!(6), dec!(7), dec!(8)),
            BudgetSection::Misc => (dec!(4), dec!(4), dec!(4)),
        };
        match tier {
            HousingCostTier::Low => low,
            HousingCostTier::Medium => medium,
            HousingCostTier::High => high,
        }
    }

    /// [`Self::tier_percent`] as a decimal fraction.
    pub fn tier_rate(&self, tier: HousingCostTier) -> Rate {
        self.tier_percent(tier) / dec!(100)
    }

    pub fn items(&self) -> &'static [ItemSpec] {
        match self {
            BudgetSection::Housing => HOUSING_ITEMS,
            BudgetSection::Food => FOOD_ITEMS,
            BudgetSection::Transportation => TRANSPORTATION_ITEMS,
            BudgetSection::Insurance => INSURANCE_ITEMS,
            BudgetSection::Debt => DEBT_ITEMS,
            BudgetSection::Savings => SAVINGS_ITEMS,
            BudgetSection::Retirement => RETIREMENT_ITEMS,
            BudgetSection::Lifestyle => LIFESTYLE_ITEMS,
            BudgetSection::Misc => MISC_ITEMS,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BudgetSection::Housing => "Housing",
            BudgetSection::Food => "Food",
            BudgetSection::Transportation => "Transportation",
            BudgetSection::Insurance => "Insurance",
            BudgetSection::Debt => "Debt",
            BudgetSection::Savings => "Savings",
            BudgetSection::Retirement => "Retirement",
            BudgetSection::Lifestyle => "Lifestyle",
            BudgetSection::Misc => "Miscellaneous",
        }
    }
}

impl BudgetItem {
    /// Section that owns the item.
    pub fn section(&self) -> BudgetSection {
        BudgetSection::ALL
            .iter()
            .copied()
            .find(|section| section.items().iter().any(|spec| spec.item == *self))
            .unwrap_or(BudgetSection::Misc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_each_tier_sums_to_hundred() {
        for tier in [HousingCostTier::Low, HousingCostTier::Medium, HousingCostTier::High] {
            let total: Decimal = BudgetSection::ALL.iter().map(|s| s.tier_percent(tier)).sum();
            assert_eq!(total, dec!(100), "{tier:?}");
        }
    }

    #[test]
    fn test_weights_fill_their_section() {
        for section in BudgetSection::ALL {
            let weights: Decimal = section
                .items()
                .iter()
                .filter_map(|spec| match spec.share {
                    ItemShare::Weighted(w) => Some(w),
                    _ => None,
                })
                .sum();
            assert!(weights.is_zero() || weights == Decimal::ONE, "{section:?}");
        }
    }

    #[test]
    fn test_misc_constants_match_section() {
        let constants: Decimal = MISC_ITEMS
            .iter()
            .filter_map(|spec| match spec.share {
                ItemShare::Constant(rate) => Some(rate),
                _ => None,
            })
            .sum();
        for tier in [HousingCostTier::Low, HousingCostTier::Medium, HousingCostTier::High] {
            assert_eq!(constants, BudgetSection::Misc.tier_rate(tier));
        }
    }

    #[test]
    fn test_item_section_lookup() {
        assert_eq!(BudgetItem::Groceries.section(), BudgetSection::Food);
        assert_eq!(
            BudgetItem::Retirement(RetirementPlan::Hsa).section(),
            BudgetSection::Retirement
        );
    }
}
