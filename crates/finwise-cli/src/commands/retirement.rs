use clap::Args;
use serde_json::Value;

use finwise_core::retirement::{project_retirement, RetirementInput};

use super::read_input;

/// Arguments for the retirement projection
#[derive(Args)]
pub struct RetirementArgs {
    /// Path to JSON input file
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_retirement(args: RetirementArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let ret_input: RetirementInput = read_input(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for the retirement projection")?;
    let result = project_retirement(&ret_input);
    Ok(serde_json::to_value(result)?)
}
