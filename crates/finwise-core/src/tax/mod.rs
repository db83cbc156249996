pub mod brackets;
pub mod deduction;
pub mod jurisdiction;
pub mod summary;
pub mod tables;

pub use brackets::{compute_bracket_tax, TaxBracket};
pub use deduction::{resolve_deduction, DeductionChoices, FilingStatus, MaritalStatus};
pub use jurisdiction::StateCode;
pub use summary::{compute_summary, FinancialSummary, PreTaxExpenses, SummaryInput};
pub use tables::TaxTables;
