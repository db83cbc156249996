use finwise_core::budget::{
    compute_budget, BudgetInput, BudgetItem, BudgetSection, EnteredAmount, RetirementPlan,
};
use finwise_core::HousingCostTier;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const TIERS: [HousingCostTier; 3] = [
    HousingCostTier::Low,
    HousingCostTier::Medium,
    HousingCostTier::High,
];

fn budget(income: Decimal, tier: HousingCostTier) -> finwise_core::budget::BudgetOutput {
    compute_budget(&BudgetInput {
        after_tax_income: income,
        housing_cost_tier: tier,
        entered: Vec::new(),
    })
    .result
}

fn recommended(out: &finwise_core::budget::BudgetOutput, item: BudgetItem) -> Decimal {
    out.lines
        .iter()
        .find(|l| l.item == item)
        .map(|l| l.recommended_annual)
        .unwrap_or_default()
}

// ---------------------------------------------------------------------------
// IRS caps hold for every tier and income
// ---------------------------------------------------------------------------

#[test]
fn test_retirement_caps_hold_for_every_tier_and_income() {
    let incomes = [
        dec!(1_000),
        dec!(45_000),
        dec!(120_000),
        dec!(250_000),
        dec!(900_000),
        dec!(10_000_000),
    ];
    for tier in TIERS {
        for income in incomes {
            let out = budget(income, tier);
            let k401 = recommended(&out, BudgetItem::Retirement(RetirementPlan::Traditional401k));
            let ira = recommended(&out, BudgetItem::Retirement(RetirementPlan::TraditionalIra));
            let hsa = recommended(&out, BudgetItem::Retirement(RetirementPlan::Hsa));
            assert!(k401 <= dec!(23_500), "{tier:?} {income}: 401(k) {k401}");
            assert!(ira <= dec!(7_000), "{tier:?} {income}: IRA {ira}");
            assert!(hsa <= dec!(4_300), "{tier:?} {income}: HSA {hsa}");
        }
    }
}

#[test]
fn test_retirement_plans_never_exceed_their_weighted_share() {
    for tier in TIERS {
        for income in [dec!(60_000), dec!(260_000), dec!(400_000)] {
            let out = budget(income, tier);
            let section_rate = BudgetSection::Retirement.tier_rate(tier);
            for plan in RetirementPlan::ALL {
                let share = income * section_rate * plan.recommended_weight();
                let got = recommended(&out, BudgetItem::Retirement(plan));
                assert!(got <= share, "{tier:?} {income}: {plan:?} {got} > {share}");
            }
        }
    }
}

#[test]
fn test_non_retirement_sections_follow_tier_percentages() {
    for tier in TIERS {
        let income = dec!(84_000);
        let out = budget(income, tier);
        for total in out.sections.iter().filter(|s| s.section != BudgetSection::Retirement) {
            let expected = income * total.tier_percent / dec!(100);
            assert!(
                (total.recommended_annual - expected).abs() < dec!(0.000001),
                "{:?} {:?}: {} vs {}",
                tier,
                total.section,
                total.recommended_annual,
                expected
            );
        }
    }
}

#[test]
fn test_tier_percentages_sum_to_one_hundred() {
    for tier in TIERS {
        let sum: Decimal = BudgetSection::ALL.iter().map(|s| s.tier_percent(tier)).sum();
        assert_eq!(sum, dec!(100), "{tier:?}");
    }
}

// ---------------------------------------------------------------------------
// Entered amounts
// ---------------------------------------------------------------------------

#[test]
fn test_over_budget_flag_compares_monthly_amounts() {
    let input = BudgetInput {
        after_tax_income: dec!(48_000),
        housing_cost_tier: HousingCostTier::Medium,
        entered: vec![
            EnteredAmount {
                item: BudgetItem::RentOrMortgage,
                monthly_amount: dec!(2_500),
            },
            EnteredAmount {
                item: BudgetItem::Groceries,
                monthly_amount: dec!(1_500),
            },
        ],
    };
    let out = compute_budget(&input);
    assert_eq!(out.result.total_entered_monthly, dec!(4_000));
    assert!(!out.result.exceeds_after_tax_income);
    assert_eq!(out.result.remaining_monthly, Decimal::ZERO);

    let mut over = input.clone();
    over.entered[1].monthly_amount = dec!(1_500.01);
    let out = compute_budget(&over);
    assert!(out.result.exceeds_after_tax_income);
    assert_eq!(out.warnings.len(), 1);
}

#[test]
fn test_entered_budget_parses_from_json() {
    let json = r#"{
        "after_tax_income": "60000",
        "housing_cost_tier": "High",
        "entered": [
            { "item": "rent_or_mortgage", "monthly_amount": "1800" },
            { "item": { "retirement": "traditional401k" }, "monthly_amount": "2500" }
        ]
    }"#;
    let input: BudgetInput = serde_json::from_str(json).unwrap();
    let out = compute_budget(&input);
    let k401 = out
        .result
        .lines
        .iter()
        .find(|l| l.item == BudgetItem::Retirement(RetirementPlan::Traditional401k))
        .unwrap();
    assert!(k401.capped_by_irs_limit);
    assert!((k401.entered_monthly * dec!(12) - dec!(23_500)).abs() < dec!(0.000001));
}
