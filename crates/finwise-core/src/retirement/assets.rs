//! The four-asset-class allocation table that drives the projection's
//! blended return.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::sanitize::clamp_percent;
use crate::types::Percent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    UsStocks,
    InternationalStocks,
    Bonds,
    Cash,
}

impl AssetClass {
    pub const ALL: [AssetClass; 4] = [
        AssetClass::UsStocks,
        AssetClass::InternationalStocks,
        AssetClass::Bonds,
        AssetClass::Cash,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AssetClass::UsStocks => "US Stocks",
            AssetClass::InternationalStocks => "International Stocks",
            AssetClass::Bonds => "Bonds",
            AssetClass::Cash => "Cash",
        }
    }
}

/// One row of the allocation table. Both fields are whole-number percents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetAllocation {
    pub allocation_percent: Percent,
    pub return_percent: Percent,
}

/// Allocation rows indexed by [`AssetClass`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetMix {
    pub us_stocks: AssetAllocation,
    pub international_stocks: AssetAllocation,
    pub bonds: AssetAllocation,
    pub cash: AssetAllocation,
}

impl AssetMix {
    pub fn get(&self, class: AssetClass) -> &AssetAllocation {
        match class {
            AssetClass::UsStocks => &self.us_stocks,
            AssetClass::InternationalStocks => &self.international_stocks,
            AssetClass::Bonds => &self.bonds,
            AssetClass::Cash => &self.cash,
        }
    }

    pub fn total_allocation_percent(&self) -> Percent {
        AssetClass::ALL
            .iter()
            .map(|&c| self.get(c).allocation_percent)
            .sum()
    }

    /// Sum-product of allocation and return percents, divided by 100. The
    /// allocations are not required to add up to 100.
    pub fn weighted_annual_return(&self, warnings: &mut Vec<String>) -> Percent {
        AssetClass::ALL
            .iter()
            .map(|&class| {
                let row = self.get(class);
                let (alloc, _) = clamp_percent(
                    &format!("{} allocation_percent", class.label()),
                    row.allocation_percent,
                    warnings,
                );
                let (ret, _) = clamp_percent(
                    &format!("{} return_percent", class.label()),
                    row.return_percent,
                    warnings,
                );
                alloc * ret
            })
            .sum::<Decimal>()
            / dec!(100)
    }
}
