use napi::Result as NapiResult;
use napi_derive::napi;

use finwise_core::tax::TaxTables;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

/// Tables passed from JS, validated, or the built-in 2026 tables.
fn tables_from(tables_json: Option<String>) -> NapiResult<TaxTables> {
    match tables_json {
        Some(json) => TaxTables::from_json(&json).map_err(to_napi_error),
        None => Ok(TaxTables::tax_year_2026()),
    }
}

// ---------------------------------------------------------------------------
// Tax
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_bracket_tax(input_json: String) -> NapiResult<String> {
    let input: finwise_core::tax::brackets::BracketTaxInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::tax::brackets::calculate_bracket_tax(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn resolve_deduction(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let choices: finwise_core::tax::DeductionChoices =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let tables = tables_from(tables_json)?;
    let output =
        finwise_core::tax::deduction::calculate_deduction(&choices, &tables.standard_deduction);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn compute_summary(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let input: finwise_core::tax::SummaryInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let tables = tables_from(tables_json)?;
    let output = finwise_core::tax::compute_summary(&input, &tables);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Budget
// ---------------------------------------------------------------------------

#[napi]
pub fn compute_budget(input_json: String) -> NapiResult<String> {
    let input: finwise_core::budget::BudgetInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::budget::compute_budget(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Savings
// ---------------------------------------------------------------------------

#[napi]
pub fn solve_savings_goal(input_json: String) -> NapiResult<String> {
    let input: finwise_core::savings::SavingsGoalRequest =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::savings::solve_savings_goal(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn solve_savings_goals(input_json: String) -> NapiResult<String> {
    let input: finwise_core::savings::SavingsGoalBook =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::savings::solve_savings_goals(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Mortgage & retirement
// ---------------------------------------------------------------------------

#[napi]
pub fn amortize_mortgage(input_json: String) -> NapiResult<String> {
    let input: finwise_core::mortgage::MortgageInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::mortgage::amortize(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

#[napi]
pub fn project_retirement(input_json: String) -> NapiResult<String> {
    let input: finwise_core::retirement::RetirementInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = finwise_core::retirement::project_retirement(&input);
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Whole plan
// ---------------------------------------------------------------------------

#[napi]
pub fn evaluate_plan(input_json: String, tables_json: Option<String>) -> NapiResult<String> {
    let snapshot: finwise_core::planner::PlanSnapshot =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let service = finwise_core::planner::PlanningService::new(tables_from(tables_json)?);
    let report = service.evaluate(&snapshot);
    serde_json::to_string(&report).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Form input
// ---------------------------------------------------------------------------

/// Lenient currency parse for live form fields: "$1,234.5" -> "1234.5",
/// anything unparseable -> "0".
#[napi]
pub fn sanitize_currency(raw: String) -> String {
    finwise_core::sanitize::sanitize_currency(&raw).to_string()
}

#[napi]
pub fn sanitize_percent(raw: String) -> String {
    finwise_core::sanitize::sanitize_percent(&raw).to_string()
}

/// JS number to a decimal string; NaN and infinities become "0".
#[napi]
pub fn coerce_number(value: f64) -> String {
    finwise_core::sanitize::coerce_f64(value).to_string()
}
