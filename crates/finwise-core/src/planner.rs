//! End-to-end plan evaluation: one snapshot of every form in, one report
//! of every engine out.
//!
//! The summary calculator runs first. Its *user* branch after-tax income
//! then feeds the budget and savings figures; the suggested branch is
//! reported but never used downstream. The mortgage and retirement engines
//! do not depend on income and run on their own inputs.

use serde::{Deserialize, Serialize};

use crate::budget::{compute_budget, BudgetInput, BudgetOutput, EnteredAmount};
use crate::mortgage::{amortize, MortgageInput, MortgageOutput};
use crate::retirement::{project_retirement, RetirementInput, RetirementOutput};
use crate::savings::slots::{solve_savings_goals, SavingsBookOutput, GOAL_SLOT_COUNT};
use crate::savings::{SavingsGoalBook, SavingsGoalInput};
use crate::tax::summary::SummaryOutput;
use crate::tax::{compute_summary, SummaryInput, TaxTables};
use crate::types::{Branch, ComputationOutput, HousingCostTier, Money};

/// Every user-editable input the engines consume.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanSnapshot {
    pub summary: SummaryInput,
    #[serde(default)]
    pub housing_cost_tier: HousingCostTier,
    #[serde(default)]
    pub budget_entries: Vec<EnteredAmount>,
    #[serde(default)]
    pub savings_goals: [SavingsGoalInput; GOAL_SLOT_COUNT],
    #[serde(default)]
    pub mortgage: Option<MortgageInput>,
    #[serde(default)]
    pub retirement: Option<RetirementInput>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanReport {
    /// After-tax income handed to the downstream engines.
    pub user_after_tax_income: Money,
    pub summary: ComputationOutput<SummaryOutput>,
    pub budget: ComputationOutput<BudgetOutput>,
    pub savings: ComputationOutput<SavingsBookOutput>,
    pub mortgage: Option<ComputationOutput<MortgageOutput>>,
    pub retirement: Option<ComputationOutput<RetirementOutput>>,
}

impl PlanReport {
    /// Every warning raised by any engine, prefixed with the engine name.
    pub fn all_warnings(&self) -> Vec<String> {
        let tagged = |engine: &str, warnings: &[String]| {
            warnings
                .iter()
                .map(|w| format!("{engine}: {w}"))
                .collect::<Vec<_>>()
        };
        let mut all = tagged("summary", &self.summary.warnings);
        all.extend(tagged("budget", &self.budget.warnings));
        all.extend(tagged("savings", &self.savings.warnings));
        if let Some(m) = &self.mortgage {
            all.extend(tagged("mortgage", &m.warnings));
        }
        if let Some(r) = &self.retirement {
            all.extend(tagged("retirement", &r.warnings));
        }
        all
    }
}

/// Runs every engine against one set of reference tables.
#[derive(Debug, Clone, Default)]
pub struct PlanningService {
    tables: TaxTables,
}

impl PlanningService {
    pub fn new(tables: TaxTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &TaxTables {
        &self.tables
    }

    pub fn evaluate(&self, snapshot: &PlanSnapshot) -> PlanReport {
        let summary = compute_summary(&snapshot.summary, &self.tables);
        let user_after_tax_income = summary.result.summary.get(Branch::User).after_tax_income;
        log::debug!("plan evaluated against user after-tax income {user_after_tax_income}");

        let budget = compute_budget(&BudgetInput {
            after_tax_income: user_after_tax_income,
            housing_cost_tier: snapshot.housing_cost_tier,
            entered: snapshot.budget_entries.clone(),
        });

        let savings = solve_savings_goals(&SavingsGoalBook {
            goals: snapshot.savings_goals.clone(),
            user_after_tax_income,
        });

        PlanReport {
            user_after_tax_income,
            summary,
            budget,
            savings,
            mortgage: snapshot.mortgage.as_ref().map(amortize),
            retirement: snapshot.retirement.as_ref().map(project_retirement),
        }
    }
}
