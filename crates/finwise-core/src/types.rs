use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// All monetary values. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as decimals (0.062 = 6.2%).
pub type Rate = Decimal;

/// Percentages as typed into the forms (4 = 4%). Divide by 100 before use.
pub type Percent = Decimal;

/// Housing-cost tier of the user's area. Drives the budget split.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HousingCostTier {
    Low,
    #[default]
    Medium,
    High,
}

/// Which of the two parallel calculations a figure belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Branch {
    /// Recommended default pre-tax amounts.
    Suggested,
    /// Amounts the user actually entered.
    User,
}

/// The same calculation run once per branch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchPair<T> {
    pub suggested: T,
    pub user: T,
}

impl<T> BranchPair<T> {
    pub fn get(&self, branch: Branch) -> &T {
        match branch {
            Branch::Suggested => &self.suggested,
            Branch::User => &self.user,
        }
    }
}

/// Standard computation output envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}
