//! The fixed set of twelve goal slots shown on the savings page.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::goal::{solve_goal, SavingsGoalInput, SavingsGoalResult};
use crate::types::{with_metadata, ComputationOutput, Money};

pub const GOAL_SLOT_COUNT: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GoalSlot {
    DownPayment1,
    DownPayment2,
    Car1,
    Car2,
    Wedding1,
    Wedding2,
    Vacation1,
    Vacation2,
    Education1,
    Education2,
    EmergencyFund1,
    EmergencyFund2,
}

impl GoalSlot {
    pub const ALL: [GoalSlot; GOAL_SLOT_COUNT] = [
        GoalSlot::DownPayment1,
        GoalSlot::DownPayment2,
        GoalSlot::Car1,
        GoalSlot::Car2,
        GoalSlot::Wedding1,
        GoalSlot::Wedding2,
        GoalSlot::Vacation1,
        GoalSlot::Vacation2,
        GoalSlot::Education1,
        GoalSlot::Education2,
        GoalSlot::EmergencyFund1,
        GoalSlot::EmergencyFund2,
    ];

    pub fn label(self) -> &'static str {
        match self {
            GoalSlot::DownPayment1 => "Down Payment 1",
            GoalSlot::DownPayment2 => "Down Payment 2",
            GoalSlot::Car1 => "Car 1",
            GoalSlot::Car2 => "Car 2",
            GoalSlot::Wedding1 => "Wedding 1",
            GoalSlot::Wedding2 => "Wedding 2",
            GoalSlot::Vacation1 => "Vacation 1",
            GoalSlot::Vacation2 => "Vacation 2",
            GoalSlot::Education1 => "Education 1",
            GoalSlot::Education2 => "Education 2",
            GoalSlot::EmergencyFund1 => "Emergency Fund 1",
            GoalSlot::EmergencyFund2 => "Emergency Fund 2",
        }
    }
}

/// All twelve goals plus the income they are measured against.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavingsGoalBook {
    pub goals: [SavingsGoalInput; GOAL_SLOT_COUNT],
    pub user_after_tax_income: Money,
}

impl SavingsGoalBook {
    pub fn goal(&self, slot: GoalSlot) -> &SavingsGoalInput {
        &self.goals[slot as usize]
    }

    pub fn goal_mut(&mut self, slot: GoalSlot) -> &mut SavingsGoalInput {
        &mut self.goals[slot as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotResult {
    pub slot: GoalSlot,
    #[serde(flatten)]
    pub result: SavingsGoalResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavingsBookOutput {
    pub goals: Vec<SlotResult>,
    pub total_monthly_savings: Money,
    pub total_percent_of_income: Decimal,
}

/// Solve every slot independently. Slots with no goal amount come back as
/// zero results without warnings.
pub fn solve_savings_goals(book: &SavingsGoalBook) -> ComputationOutput<SavingsBookOutput> {
    let mut warnings = Vec::new();
    let monthly_income = book.user_after_tax_income.max(Decimal::ZERO) / dec!(12);

    let goals: Vec<SlotResult> = GoalSlot::ALL
        .iter()
        .map(|&slot| {
            let input = book.goal(slot);
            let result = if input.goal_amount.is_zero() {
                SavingsGoalResult {
                    mode: input.mode,
                    ..Default::default()
                }
            } else {
                let mut slot_warnings = Vec::new();
                let result = solve_goal(input, monthly_income, &mut slot_warnings);
                warnings.extend(
                    slot_warnings
                        .into_iter()
                        .map(|w| format!("{}: {w}", slot.label())),
                );
                result
            };
            SlotResult { slot, result }
        })
        .collect();

    let total_monthly_savings = goals
        .iter()
        .fold(Decimal::ZERO, |acc, g| acc.saturating_add(g.result.monthly_savings));
    let total_percent_of_income = goals
        .iter()
        .fold(Decimal::ZERO, |acc, g| acc.saturating_add(g.result.percent_of_income));

    with_metadata(
        "Savings goal annuity solve across twelve goal slots",
        &serde_json::json!({ "slots": GOAL_SLOT_COUNT }),
        warnings,
        SavingsBookOutput {
            goals,
            total_monthly_savings,
            total_percent_of_income,
        },
    )
}
