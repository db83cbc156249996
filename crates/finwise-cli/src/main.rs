mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::budget::BudgetArgs;
use commands::mortgage::MortgageArgs;
use commands::plan::PlanArgs;
use commands::retirement::RetirementArgs;
use commands::savings::SavingsArgs;
use commands::tax::{BracketTaxArgs, DeductionArgs, SummaryArgs};

/// Personal-finance calculations with decimal precision
#[derive(Parser)]
#[command(
    name = "finwise",
    version,
    about = "Personal-finance calculations with decimal precision",
    long_about = "A CLI for the finwise calculation engine: progressive bracket taxes, \
                  standard deductions, after-tax summaries, budget allocation with IRS \
                  contribution caps, savings goals, mortgage amortization and retirement \
                  projections."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// JSON file with alternative tax tables (defaults to the built-in 2026 tables)
    #[arg(long, global = true)]
    tables: Option<String>,

    /// Log derived intermediate values to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Progressive bracket tax on a taxable income
    BracketTax(BracketTaxArgs),
    /// Resolve the standard deduction for a set of filing choices
    Deduction(DeductionArgs),
    /// Suggested and user after-tax summaries
    Summary(SummaryArgs),
    /// Budget allocation by housing-cost tier
    Budget(BudgetArgs),
    /// Solve a savings goal for time or monthly deposit
    Savings(SavingsArgs),
    /// Mortgage payment and amortization schedule
    Mortgage(MortgageArgs),
    /// Year-by-year retirement projection
    Retirement(RetirementArgs),
    /// Evaluate every engine from one plan snapshot
    Plan(PlanArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let tables = match input::file::load_tables(cli.tables.as_deref()) {
        Ok(tables) => tables,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::BracketTax(args) => commands::tax::run_bracket_tax(args, &tables),
        Commands::Deduction(args) => commands::tax::run_deduction(args, &tables),
        Commands::Summary(args) => commands::tax::run_summary(args, &tables),
        Commands::Budget(args) => commands::budget::run_budget(args),
        Commands::Savings(args) => commands::savings::run_savings(args),
        Commands::Mortgage(args) => commands::mortgage::run_mortgage(args),
        Commands::Retirement(args) => commands::retirement::run_retirement(args),
        Commands::Plan(args) => commands::plan::run_plan(args, tables),
        Commands::Version => {
            println!("finwise {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
