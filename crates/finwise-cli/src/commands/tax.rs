use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use finwise_core::tax::brackets::{self, BracketTaxInput};
use finwise_core::tax::deduction::{self, DeductionChoices, MaritalStatus};
use finwise_core::tax::summary::{self, PreTaxExpenses, SummaryInput};
use finwise_core::tax::{StateCode, TaxTables};

use super::read_input;

/// Arguments for a single progressive bracket tax calculation
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct BracketTaxArgs {
    /// Taxable income (negative values owe nothing)
    #[arg(long)]
    pub taxable_income: Option<Decimal>,

    /// Bracket table: "federal", "nyc", or a state code/name such as "CA"
    #[arg(long, default_value = "federal")]
    pub jurisdiction: String,

    /// Path to JSON input file with explicit brackets (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Filing choices shared by the deduction and summary commands
#[derive(Args)]
pub struct FilingFlags {
    /// Married (defaults to single)
    #[arg(long)]
    pub married: bool,

    /// Married and filing jointly
    #[arg(long)]
    pub jointly: bool,

    /// Filing as head of household
    #[arg(long)]
    pub head_of_household: bool,

    /// Aged 65 or over
    #[arg(long)]
    pub over_65: bool,

    /// Legally blind
    #[arg(long)]
    pub blind: bool,

    /// Qualifying surviving spouse
    #[arg(long)]
    pub surviving_spouse: bool,
}

impl FilingFlags {
    fn choices(&self) -> DeductionChoices {
        DeductionChoices {
            marital_status: if self.married {
                MaritalStatus::Married
            } else {
                MaritalStatus::Single
            },
            filed_jointly: self.jointly,
            head_of_household: self.head_of_household,
            over_age_65: self.over_65,
            blind: self.blind,
            qualifying_surviving_spouse: self.surviving_spouse,
        }
    }
}

/// Arguments for standard deduction resolution
#[derive(Args)]
pub struct DeductionArgs {
    #[command(flatten)]
    pub filing: FilingFlags,

    /// Path to JSON input file with deduction choices
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for the suggested/user financial summary
#[derive(Args)]
pub struct SummaryArgs {
    /// Annual pre-tax income
    #[arg(long)]
    pub income: Option<Decimal>,

    /// State of residence (code or name)
    #[arg(long)]
    pub state: Option<String>,

    /// New York City resident (only applies with --state NY)
    #[arg(long)]
    pub nyc_resident: bool,

    /// User branch traditional 401(k) contribution
    #[arg(long)]
    pub traditional_401k: Option<Decimal>,

    /// User branch traditional IRA contribution
    #[arg(long)]
    pub traditional_ira: Option<Decimal>,

    /// User branch HSA contribution
    #[arg(long)]
    pub hsa: Option<Decimal>,

    #[command(flatten)]
    pub filing: FilingFlags,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_bracket_tax(
    args: BracketTaxArgs,
    tables: &TaxTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let tax_input: BracketTaxInput = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => BracketTaxInput {
            brackets: jurisdiction_table(&args.jurisdiction, tables)?,
            taxable_income: args
                .taxable_income
                .ok_or("--taxable-income is required (or provide --input)")?,
        },
    };
    let result = brackets::calculate_bracket_tax(&tax_input);
    Ok(serde_json::to_value(result)?)
}

pub fn run_deduction(
    args: DeductionArgs,
    tables: &TaxTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let choices: DeductionChoices = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => args.filing.choices(),
    };
    let result = deduction::calculate_deduction(&choices, &tables.standard_deduction);
    Ok(serde_json::to_value(result)?)
}

pub fn run_summary(
    args: SummaryArgs,
    tables: &TaxTables,
) -> Result<Value, Box<dyn std::error::Error>> {
    let summary_input: SummaryInput = match read_input(args.input.as_deref())? {
        Some(parsed) => parsed,
        None => SummaryInput {
            pre_tax_income: args
                .income
                .ok_or("--income is required (or provide --input)")?,
            deduction_choices: args.filing.choices(),
            state: args
                .state
                .as_deref()
                .ok_or("--state is required (or provide --input)")?
                .parse::<StateCode>()?,
            nyc_resident: args.nyc_resident,
            suggested_pre_tax: PreTaxExpenses::default(),
            user_pre_tax: PreTaxExpenses {
                traditional_401k: args.traditional_401k.unwrap_or_default(),
                traditional_ira: args.traditional_ira.unwrap_or_default(),
                hsa: args.hsa.unwrap_or_default(),
                ..Default::default()
            },
        },
    };
    let result = summary::compute_summary(&summary_input, tables);
    Ok(serde_json::to_value(result)?)
}

fn jurisdiction_table(
    name: &str,
    tables: &TaxTables,
) -> Result<Vec<brackets::TaxBracket>, Box<dyn std::error::Error>> {
    let brackets = match name.to_ascii_lowercase().as_str() {
        "federal" => tables.federal.clone(),
        "nyc" => tables.nyc.clone(),
        _ => tables.state(name.parse::<StateCode>()?).to_vec(),
    };
    Ok(brackets)
}
