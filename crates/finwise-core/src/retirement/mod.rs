pub mod assets;
pub mod projection;

pub use assets::{AssetAllocation, AssetClass, AssetMix};
pub use projection::{project_retirement, RetirementInput, RetirementOutput, RetirementSummary};
