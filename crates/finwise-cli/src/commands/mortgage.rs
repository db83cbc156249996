use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finwise_core::mortgage::{amortize, AddOnRates, MortgageInput, PaymentCadence};

use super::read_input;

/// Arguments for mortgage amortization
#[derive(Args)]
pub struct MortgageArgs {
    /// Loan principal
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Annual interest rate in percent (e.g. 6.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Term in years (capped at 40)
    #[arg(long, default_value = "30")]
    pub years: u32,

    /// Pay every two weeks instead of monthly
    #[arg(long)]
    pub biweekly: bool,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_mortgage(args: MortgageArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mortgage_input: MortgageInput = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => MortgageInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            annual_rate_percent: args.rate.ok_or("--rate is required (or provide --input)")?,
            term_years: args.years,
            cadence: if args.biweekly {
                PaymentCadence::Biweekly
            } else {
                PaymentCadence::Monthly
            },
            add_on_rates: AddOnRates::default(),
        },
    };
    let result = amortize(&mortgage_input);
    Ok(serde_json::to_value(result)?)
}
