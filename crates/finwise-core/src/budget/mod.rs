pub mod allocation;
pub mod retirement_caps;
pub mod sections;

pub use allocation::{compute_budget, BudgetInput, BudgetOutput, EnteredAmount};
pub use retirement_caps::{resolve_retirement_caps, RetirementPlan};
pub use sections::{BudgetItem, BudgetSection};
