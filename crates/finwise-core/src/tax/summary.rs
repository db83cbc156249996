//! Financial summary: deduction, taxable income, every tax line and the
//! resulting after-tax income, computed once per branch.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::sanitize::non_negative_checked;
use crate::tax::brackets::compute_bracket_tax;
use crate::tax::deduction::{deduction_breakdown, DeductionChoices, FilingStatus};
use crate::tax::jurisdiction::StateCode;
use crate::tax::tables::TaxTables;
use crate::types::{with_metadata, Branch, BranchPair, ComputationOutput, Money};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Pre-tax deductions taken out of the paycheck before income tax.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreTaxExpenses {
    pub traditional_401k: Money,
    pub traditional_ira: Money,
    pub hsa: Money,
    pub health_insurance: Money,
    pub other: Money,
}

impl PreTaxExpenses {
    pub fn total(&self) -> Money {
        self.traditional_401k + self.traditional_ira + self.hsa + self.health_insurance + self.other
    }

    fn sanitized(&self, branch: Branch, warnings: &mut Vec<String>) -> Self {
        let mut check = |field: &str, value: Money| {
            non_negative_checked(&format!("{} {field}", branch_label(branch)), value, warnings)
        };
        Self {
            traditional_401k: check("traditional_401k", self.traditional_401k),
            traditional_ira: check("traditional_ira", self.traditional_ira),
            hsa: check("hsa", self.hsa),
            health_insurance: check("health_insurance", self.health_insurance),
            other: check("other", self.other),
        }
    }
}

/// Input for [`compute_summary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryInput {
    pub pre_tax_income: Money,
    #[serde(default)]
    pub deduction_choices: DeductionChoices,
    pub state: StateCode,
    #[serde(default)]
    pub nyc_resident: bool,
    #[serde(default)]
    pub suggested_pre_tax: PreTaxExpenses,
    #[serde(default)]
    pub user_pre_tax: PreTaxExpenses,
}

/// Every derived figure for one branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSummary {
    pub standard_deduction: Money,
    pub pre_tax_expenses: Money,
    pub taxable_income: Money,
    pub federal_tax: Money,
    pub social_security_tax: Money,
    pub medicare_tax: Money,
    pub state_tax: Money,
    pub city_tax: Money,
    pub total_tax: Money,
    pub after_tax_income: Money,
}

impl FinancialSummary {
    pub fn monthly_after_tax_income(&self) -> Money {
        self.after_tax_income / Decimal::from(12)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryOutput {
    pub filing_status: FilingStatus,
    pub city_tax_applied: bool,
    pub summary: BranchPair<FinancialSummary>,
}

// ---------------------------------------------------------------------------
// Core
// ---------------------------------------------------------------------------

/// Where a branch's income is taxed.
#[derive(Debug, Clone, Copy)]
pub struct Residence {
    pub state: StateCode,
    pub nyc: bool,
}

/// One branch of the summary.
///
/// Taxable income may go negative when expenses exceed income; the bracket
/// engine then owes nothing. After-tax income adds the standard deduction
/// back, so it reads as income minus taxes minus pre-tax expenses, floored
/// at zero.
pub fn summarize_branch(
    pre_tax_income: Money,
    standard_deduction: Money,
    expenses: &PreTaxExpenses,
    residence: Residence,
    tables: &TaxTables,
) -> FinancialSummary {
    let pre_tax_expenses = expenses.total();
    let taxable_income = pre_tax_income - standard_deduction - pre_tax_expenses;

    let federal_tax = compute_bracket_tax(&tables.federal, taxable_income);
    let state_tax = compute_bracket_tax(tables.state(residence.state), taxable_income);
    let city_tax = if residence.nyc {
        compute_bracket_tax(&tables.nyc, taxable_income)
    } else {
        Decimal::ZERO
    };

    let payroll = &tables.payroll;
    let social_security_tax =
        pre_tax_income.min(payroll.social_security_wage_base) * payroll.social_security_rate;
    let medicare_tax = pre_tax_income * payroll.medicare_rate;

    let total_tax = federal_tax + social_security_tax + medicare_tax + state_tax + city_tax;
    let after_tax_income = (taxable_income - total_tax + standard_deduction).max(Decimal::ZERO);

    FinancialSummary {
        standard_deduction,
        pre_tax_expenses,
        taxable_income,
        federal_tax,
        social_security_tax,
        medicare_tax,
        state_tax,
        city_tax,
        total_tax,
        after_tax_income,
    }
}

/// Suggested and user summaries from one input snapshot.
pub fn compute_summary(
    input: &SummaryInput,
    tables: &TaxTables,
) -> ComputationOutput<SummaryOutput> {
    let mut warnings: Vec<String> = Vec::new();

    let pre_tax_income =
        non_negative_checked("pre_tax_income", input.pre_tax_income, &mut warnings);
    let suggested = input.suggested_pre_tax.sanitized(Branch::Suggested, &mut warnings);
    let user = input.user_pre_tax.sanitized(Branch::User, &mut warnings);

    let deduction = deduction_breakdown(&input.deduction_choices, &tables.standard_deduction);

    let city_tax_applied = input.nyc_resident && input.state == StateCode::NY;
    if input.nyc_resident && !city_tax_applied {
        let msg = format!(
            "NYC residency ignored for state {}; city tax only applies to New York residents",
            input.state
        );
        log::warn!("{msg}");
        warnings.push(msg);
    }
    let residence = Residence {
        state: input.state,
        nyc: city_tax_applied,
    };

    let summary = BranchPair {
        suggested: summarize_branch(
            pre_tax_income,
            deduction.standard_deduction,
            &suggested,
            residence,
            tables,
        ),
        user: summarize_branch(
            pre_tax_income,
            deduction.standard_deduction,
            &user,
            residence,
            tables,
        ),
    };
    log::debug!(
        "taxable income suggested={} user={}",
        summary.suggested.taxable_income,
        summary.user.taxable_income
    );

    with_metadata(
        "Financial summary (standard deduction, bracket taxes, FICA) per branch",
        &serde_json::json!({
            "tax_year": tables.tax_year,
            "state": input.state.code(),
            "nyc_resident": input.nyc_resident,
            "filing_status": deduction.filing_status,
        }),
        warnings,
        SummaryOutput {
            filing_status: deduction.filing_status,
            city_tax_applied,
            summary,
        },
    )
}

fn branch_label(branch: Branch) -> &'static str {
    match branch {
        Branch::Suggested => "suggested",
        Branch::User => "user",
    }
}
