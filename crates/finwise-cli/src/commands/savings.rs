use clap::{Args, ValueEnum};
use rust_decimal::Decimal;
use serde_json::Value;

use finwise_core::savings::slots::solve_savings_goals;
use finwise_core::savings::{
    solve_savings_goal, CalculationMode, SavingsGoalBook, SavingsGoalInput, SavingsGoalRequest,
};

use super::read_input;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ModeArg {
    /// Solve for months given a monthly deposit
    Time,
    /// Solve for the monthly deposit given months
    Monthly,
}

/// Arguments for the savings goal solver
#[derive(Args)]
pub struct SavingsArgs {
    /// Goal amount
    #[arg(long)]
    pub goal: Option<Decimal>,

    /// Monthly deposit (time mode)
    #[arg(long)]
    pub monthly: Option<Decimal>,

    /// Months to reach the goal (monthly mode)
    #[arg(long)]
    pub months: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 4 for 4%)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Which variable to solve for
    #[arg(long, value_enum, default_value = "time")]
    pub mode: ModeArg,

    /// Annual after-tax income the deposit is measured against
    #[arg(long, default_value = "0")]
    pub income: Decimal,

    /// Treat the input file as all twelve goal slots
    #[arg(long)]
    pub all_slots: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_savings(args: SavingsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    if args.all_slots {
        let book: SavingsGoalBook = read_input(args.input.as_deref())?
            .ok_or("--input <file.json> or stdin required with --all-slots")?;
        return Ok(serde_json::to_value(solve_savings_goals(&book))?);
    }

    let request: SavingsGoalRequest = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SavingsGoalRequest {
            goal: SavingsGoalInput {
                goal_amount: args.goal.ok_or("--goal is required (or provide --input)")?,
                monthly_savings: args.monthly,
                time_to_goal_months: args.months,
                annual_rate_percent: Some(
                    args.rate.ok_or("--rate is required (or provide --input)")?,
                ),
                mode: match args.mode {
                    ModeArg::Time => CalculationMode::Time,
                    ModeArg::Monthly => CalculationMode::Monthly,
                },
            },
            user_after_tax_income: args.income,
        },
    };
    let result = solve_savings_goal(&request);
    Ok(serde_json::to_value(result)?)
}
