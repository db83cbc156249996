pub mod goal;
pub mod slots;

pub use goal::{
    solve_savings_goal, CalculationMode, SavingsGoalInput, SavingsGoalRequest, SavingsGoalResult,
};
pub use slots::{solve_savings_goals, GoalSlot, SavingsGoalBook};
