use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use finwise_core::budget::{compute_budget, BudgetInput};
use finwise_core::HousingCostTier;

use super::read_input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum TierArg {
    Low,
    Medium,
    High,
}

impl From<TierArg> for HousingCostTier {
    fn from(tier: TierArg) -> Self {
        match tier {
            TierArg::Low => HousingCostTier::Low,
            TierArg::Medium => HousingCostTier::Medium,
            TierArg::High => HousingCostTier::High,
        }
    }
}

/// Arguments for budget allocation
#[derive(Args)]
pub struct BudgetArgs {
    /// Annual after-tax income
    #[arg(long)]
    pub after_tax_income: Option<Decimal>,

    /// Housing-cost tier of the area
    #[arg(long, value_enum, default_value = "medium")]
    pub tier: TierArg,

    /// Path to JSON input file, including entered monthly amounts
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_budget(args: BudgetArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let budget_input: BudgetInput = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => BudgetInput {
            after_tax_income: args
                .after_tax_income
                .ok_or("--after-tax-income is required (or provide --input)")?,
            housing_cost_tier: args.tier.into(),
            entered: Vec::new(),
        },
    };
    let result = compute_budget(&budget_input);
    Ok(serde_json::to_value(result)?)
}
