use clap::Args;
use serde_json::Value;

use finwise_core::planner::{PlanSnapshot, PlanningService};
use finwise_core::tax::TaxTables;

use super::read_input;

/// Arguments for whole-plan evaluation
#[derive(Args)]
pub struct PlanArgs {
    /// Path to JSON plan snapshot
    #[arg(long)]
    pub input: Option<String>,

    /// Print only the combined warnings of every engine
    #[arg(long)]
    pub warnings_only: bool,
}

pub fn run_plan(args: PlanArgs, tables: TaxTables) -> Result<Value, Box<dyn std::error::Error>> {
    let snapshot: PlanSnapshot = read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for plan evaluation")?;
    let report = PlanningService::new(tables).evaluate(&snapshot);
    if args.warnings_only {
        return Ok(serde_json::to_value(report.all_warnings())?);
    }
    Ok(serde_json::to_value(report)?)
}
