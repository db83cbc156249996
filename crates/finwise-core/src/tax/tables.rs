//! Reference tax data for tax year 2026 and the validated container the
//! engines read it from.
//!
//! State tables are single-filer schedules applied to the same taxable
//! income as the federal calculation. States without a wage income tax carry
//! an empty table; flat-tax states a single bracket.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::FinwiseError;
use crate::tax::brackets::TaxBracket;
use crate::tax::jurisdiction::StateCode;
use crate::types::{Money, Rate};
use crate::FinwiseResult;

macro_rules! bracket {
    ($rate:tt, $lower:tt) => {
        TaxBracket {
            rate: dec!($rate),
            lower_bound: dec!($lower),
        }
    };
}

// ---------------------------------------------------------------------------
// Federal and city schedules
// ---------------------------------------------------------------------------

/// Federal ordinary-income schedule, single filer.
pub const FEDERAL_2026: &[TaxBracket] = &[
    bracket!(0.1, 0),
    bracket!(0.12, 12_400),
    bracket!(0.22, 50_400),
    bracket!(0.24, 105_700),
    bracket!(0.32, 201_775),
    bracket!(0.35, 256_225),
    bracket!(0.37, 640_600),
];

/// New York City resident income tax.
pub const NYC_2026: &[TaxBracket] = &[
    bracket!(0.03078, 0),
    bracket!(0.03762, 12_000),
    bracket!(0.03819, 25_000),
    bracket!(0.03876, 50_000),
];

// ---------------------------------------------------------------------------
// State schedules
// ---------------------------------------------------------------------------

/// AL single-filer schedule.
pub const STATE_AL: &[TaxBracket] = &[
    bracket!(0.02, 0),
    bracket!(0.04, 500),
    bracket!(0.05, 3_000),
];

/// AK single-filer schedule.
pub const STATE_AK: &[TaxBracket] = &[];

/// AZ single-filer schedule.
pub const STATE_AZ: &[TaxBracket] = &[bracket!(0.025, 0)];

/// AR single-filer schedule.
pub const STATE_AR: &[TaxBracket] = &[
    bracket!(0.02, 0),
    bracket!(0.039, 4_500),
];

/// CA single-filer schedule.
pub const STATE_CA: &[TaxBracket] = &[
    bracket!(0.01, 0),
    bracket!(0.02, 10_756),
    bracket!(0.04, 25_499),
    bracket!(0.06, 40_245),
    bracket!(0.08, 55_866),
    bracket!(0.093, 70_606),
    bracket!(0.103, 360_659),
    bracket!(0.113, 432_787),
    bracket!(0.123, 721_314),
    bracket!(0.133, 1_000_000),
];

/// CO single-filer schedule.
pub const STATE_CO: &[TaxBracket] = &[bracket!(0.044, 0)];

/// CT single-filer schedule.
pub const STATE_CT: &[TaxBracket] = &[
    bracket!(0.02, 0),
    bracket!(0.045, 10_000),
    bracket!(0.055, 50_000),
    bracket!(0.06, 100_000),
    bracket!(0.065, 200_000),
    bracket!(0.069, 250_000),
    bracket!(0.0699, 500_000),
];

/// DE single-filer schedule.
pub const STATE_DE: &[TaxBracket] = &[
    bracket!(0, 0),
    bracket!(0.022, 2_000),
    bracket!(0.039, 5_000),
    bracket!(0.048, 10_000),
    bracket!(0.052, 20_000),
    bracket!(0.0555, 25_000),
    bracket!(0.066, 60_000),
];

/// DC single-filer schedule.
pub const STATE_DC: &[TaxBracket] = &[
    bracket!(0.04, 0),
    bracket!(0.06, 10_000),
    bracket!(0.065, 40_000),
    bracket!(0.085, 60_000),
    bracket!(0.0925, 250_000),
    bracket!(0.0975, 500_000),
    bracket!(0.1075, 1_000_000),
];

/// FL single-filer schedule.
pub const STATE_FL: &[TaxBracket] = &[];

/// GA single-filer schedule.
pub const STATE_GA: &[TaxBracket] = &[bracket!(0.0519, 0)];

/// HI single-filer schedule.
pub const STATE_HI: &[TaxBracket] = &[
    bracket!(0.014, 0),
    bracket!(0.032, 9_600),
    bracket!(0.055, 14_400),
    bracket!(0.064, 19_200),
    bracket!(0.068, 24_000),
    bracket!(0.072, 36_000),
    bracket!(0.076, 48_000),
    bracket!(0.079, 125_000),
    bracket!(0.0825, 175_000),
    bracket!(0.09, 225_000),
    bracket!(0.1, 275_000),
    bracket!(0.11, 325_000),
];

/// ID single-filer schedule.
pub const STATE_ID: &[TaxBracket] = &[
    bracket!(0, 0),
    bracket!(0.05695, 4_673),
];

/// IL single-filer schedule.
pub const STATE_IL: &[TaxBracket] = &[bracket!(0.0495, 0)];

/// IN single-filer schedule.
pub const STATE_IN: &[TaxBracket] = &[bracket!(0.03, 0)];

/// IA single-filer schedule.
pub const STATE_IA: &[TaxBracket] = &[bracket!(0.038, 0)];

/// KS single-filer schedule.
pub const STATE_KS: &[TaxBracket] = &[
    bracket!(0.052, 0),
    bracket!(0.0558, 23_000),
];

/// KY single-filer schedule.
pub const STATE_KY: &[TaxBracket] = &[bracket!(0.04, 0)];

/// LA single-filer schedule.
pub const STATE_LA: &[TaxBracket] = &[bracket!(0.03, 0)];

/// ME single-filer schedule.
pub const STATE_ME: &[TaxBracket] = &[
    bracket!(0.058, 0),
    bracket!(0.0675, 26_800),
    bracket!(0.0715, 63_450),
];

/// MD single-filer schedule.
pub const STATE_MD: &[TaxBracket] = &[
    bracket!(0.02, 0),
    bracket!(0.03, 1_000),
    bracket!(0.04, 2_000),
    bracket!(0.0475, 3_000),
    bracket!(0.05, 100_000),
    bracket!(0.0525, 125_000),
    bracket!(0.055, 150_000),
    bracket!(0.0575, 250_000),
];

/// MA single-filer schedule.
pub const STATE_MA: &[TaxBracket] = &[
    bracket!(0.05, 0),
    bracket!(0.09, 1_083_150),
];

/// MI single-filer schedule.
pub const STATE_MI: &[TaxBracket] = &[bracket!(0.0425, 0)];

/// MN single-filer schedule.
pub const STATE_MN: &[TaxBracket] = &[
    bracket!(0.0535, 0),
    bracket!(0.068, 32_570),
    bracket!(0.0785, 106_990),
    bracket!(0.0985, 198_630),
];

/// MS single-filer schedule.
pub const STATE_MS: &[TaxBracket] = &[
    bracket!(0, 0),
    bracket!(0.044, 10_000),
];

/// MO single-filer schedule.
pub const STATE_MO: &[TaxBracket] = &[
    bracket!(0, 0),
    bracket!(0.02, 1_313),
    bracket!(0.025, 2_626),
    bracket!(0.03, 3_939),
    bracket!(0.035, 5_252),
    bracket!(0.04, 6_565),
    bracket!(0.045, 7_878),
    bracket!(0.047, 9_191),
];

/// MT single-filer schedule.
pub const STATE_MT: &[TaxBracket] = &[
    bracket!(0.047, 0),
    bracket!(0.059, 21_100),
];

/// NE single-filer schedule.
pub const STATE_NE: &[TaxBracket] = &[
    bracket!(0.0246, 0),
    bracket!(0.0351, 3_900),
    bracket!(0.0501, 23_370),
    bracket!(0.052, 37_670),
];

/// NV single-filer schedule.
pub const STATE_NV: &[TaxBracket] = &[];

/// NH single-filer schedule.
pub const STATE_NH: &[TaxBracket] = &[];

/// NJ single-filer schedule.
pub const STATE_NJ: &[TaxBracket] = &[
    bracket!(0.014, 0),
    bracket!(0.0175, 20_000),
    bracket!(0.035, 35_000),
    bracket!(0.05525, 40_000),
    bracket!(0.0637, 75_000),
    bracket!(0.0897, 500_000),
    bracket!(0.1075, 1_000_000),
];

/// NM single-filer schedule.
pub const STATE_NM: &[TaxBracket] = &[
    bracket!(0.015, 0),
    bracket!(0.032, 5_500),
    bracket!(0.043, 16_500),
    bracket!(0.047, 33_500),
    bracket!(0.049, 66_500),
    bracket!(0.059, 210_000),
];

/// NY single-filer schedule.
pub const STATE_NY: &[TaxBracket] = &[
    bracket!(0.04, 0),
    bracket!(0.045, 8_500),
    bracket!(0.0525, 11_700),
    bracket!(0.055, 13_900),
    bracket!(0.06, 80_650),
    bracket!(0.0685, 215_400),
    bracket!(0.0965, 1_077_550),
    bracket!(0.103, 5_000_000),
    bracket!(0.109, 25_000_000),
];

/// NC single-filer schedule.
pub const STATE_NC: &[TaxBracket] = &[bracket!(0.0425, 0)];

/// ND single-filer schedule.
pub const STATE_ND: &[TaxBracket] = &[
    bracket!(0, 0),
    bracket!(0.0195, 48_475),
    bracket!(0.025, 244_825),
];

/// OH single-filer schedule.
pub const STATE_OH: &[TaxBracket] = &[
    bracket!(0, 0),
    bracket!(0.0275, 26_050),
    bracket!(0.035, 100_000),
];

/// OK single-filer schedule.
pub const STATE_OK: &[TaxBracket] = &[
    bracket!(0.0025, 0),
    bracket!(0.0075, 1_000),
    bracket!(0.0175, 2_500),
    bracket!(0.0275, 3_750),
    bracket!(0.0375, 4_900),
    bracket!(0.0475, 7_200),
];

/// OR single-filer schedule.
pub const STATE_OR: &[TaxBracket] = &[
    bracket!(0.0475, 0),
    bracket!(0.0675, 4_400),
    bracket!(0.0875, 11_050),
    bracket!(0.099, 125_000),
];

/// PA single-filer schedule.
pub const STATE_PA: &[TaxBracket] = &[bracket!(0.0307, 0)];

/// RI single-filer schedule.
pub const STATE_RI: &[TaxBracket] = &[
    bracket!(0.0375, 0),
    bracket!(0.0475, 79_900),
    bracket!(0.0599, 181_650),
];

/// SC single-filer schedule.
pub const STATE_SC: &[TaxBracket] = &[
    bracket!(0, 0),
    bracket!(0.03, 3_560),
    bracket!(0.062, 17_830),
];

/// SD single-filer schedule.
pub const STATE_SD: &[TaxBracket] = &[];

/// TN single-filer schedule.
pub const STATE_TN: &[TaxBracket] = &[];

/// TX single-filer schedule.
pub const STATE_TX: &[TaxBracket] = &[];

/// UT single-filer schedule.
pub const STATE_UT: &[TaxBracket] = &[bracket!(0.0455, 0)];

/// VT single-filer schedule.
pub const STATE_VT: &[TaxBracket] = &[
    bracket!(0.0335, 0),
    bracket!(0.066, 47_900),
    bracket!(0.076, 116_000),
    bracket!(0.0875, 242_000),
];

/// VA single-filer schedule.
pub const STATE_VA: &[TaxBracket] = &[
    bracket!(0.02, 0),
    bracket!(0.03, 3_000),
    bracket!(0.05, 5_000),
    bracket!(0.0575, 17_000),
];

/// WA single-filer schedule.
pub const STATE_WA: &[TaxBracket] = &[];

/// WV single-filer schedule.
pub const STATE_WV: &[TaxBracket] = &[
    bracket!(0.0222, 0),
    bracket!(0.0296, 10_000),
    bracket!(0.0333, 25_000),
    bracket!(0.0444, 40_000),
    bracket!(0.0482, 60_000),
];

/// WI single-filer schedule.
pub const STATE_WI: &[TaxBracket] = &[
    bracket!(0.035, 0),
    bracket!(0.044, 14_680),
    bracket!(0.053, 29_370),
    bracket!(0.0765, 323_290),
];

/// WY single-filer schedule.
pub const STATE_WY: &[TaxBracket] = &[];

/// Built-in schedule for a state.
pub fn state_brackets_2026(state: StateCode) -> &'static [TaxBracket] {
    match state {
        StateCode::AL => STATE_AL,
        StateCode::AK => STATE_AK,
        StateCode::AZ => STATE_AZ,
        StateCode::AR => STATE_AR,
        StateCode::CA => STATE_CA,
        StateCode::CO => STATE_CO,
        StateCode::CT => STATE_CT,
        StateCode::DE => STATE_DE,
        StateCode::DC => STATE_DC,
        StateCode::FL => STATE_FL,
        StateCode::GA => STATE_GA,
        StateCode::HI => STATE_HI,
        StateCode::ID => STATE_ID,
        StateCode::IL => STATE_IL,
        StateCode::IN => STATE_IN,
        StateCode::IA => STATE_IA,
        StateCode::KS => STATE_KS,
        StateCode::KY => STATE_KY,
        StateCode::LA => STATE_LA,
        StateCode::ME => STATE_ME,
        StateCode::MD => STATE_MD,
        StateCode::MA => STATE_MA,
        StateCode::MI => STATE_MI,
        StateCode::MN => STATE_MN,
        StateCode::MS => STATE_MS,
        StateCode::MO => STATE_MO,
        StateCode::MT => STATE_MT,
        StateCode::NE => STATE_NE,
        StateCode::NV => STATE_NV,
        StateCode::NH => STATE_NH,
        StateCode::NJ => STATE_NJ,
        StateCode::NM => STATE_NM,
        StateCode::NY => STATE_NY,
        StateCode::NC => STATE_NC,
        StateCode::ND => STATE_ND,
        StateCode::OH => STATE_OH,
        StateCode::OK => STATE_OK,
        StateCode::OR => STATE_OR,
        StateCode::PA => STATE_PA,
        StateCode::RI => STATE_RI,
        StateCode::SC => STATE_SC,
        StateCode::SD => STATE_SD,
        StateCode::TN => STATE_TN,
        StateCode::TX => STATE_TX,
        StateCode::UT => STATE_UT,
        StateCode::VT => STATE_VT,
        StateCode::VA => STATE_VA,
        StateCode::WA => STATE_WA,
        StateCode::WV => STATE_WV,
        StateCode::WI => STATE_WI,
        StateCode::WY => STATE_WY,
    }
}

// ---------------------------------------------------------------------------
// Deduction and payroll constants
// ---------------------------------------------------------------------------

/// Standard deduction amounts and the additive age/blindness riders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardDeductionTable {
    pub single: Money,
    pub married_filing_jointly: Money,
    pub married_filing_separately: Money,
    pub head_of_household: Money,
    pub qualifying_surviving_spouse: Money,
    /// Per-flag rider for single and head-of-household filers.
    pub single_rider: Money,
    /// Per-flag rider for married and surviving-spouse filers.
    pub married_rider: Money,
}

impl StandardDeductionTable {
    pub fn tax_year_2026() -> Self {
        Self {
            single: dec!(15_000),
            married_filing_jointly: dec!(30_000),
            married_filing_separately: dec!(15_000),
            head_of_household: dec!(22_500),
            qualifying_surviving_spouse: dec!(30_000),
            single_rider: dec!(2_000),
            married_rider: dec!(1_600),
        }
    }
}

/// FICA rates. The Social Security cap applies to income, not to the tax.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayrollRates {
    pub social_security_rate: Rate,
    pub social_security_wage_base: Money,
    pub medicare_rate: Rate,
}

impl PayrollRates {
    pub fn tax_year_2026() -> Self {
        Self {
            social_security_rate: dec!(0.062),
            social_security_wage_base: dec!(176_100),
            medicare_rate: dec!(0.0145),
        }
    }
}

// ---------------------------------------------------------------------------
// Container
// ---------------------------------------------------------------------------

/// Every reference table one calculation pass needs. Built-in data comes
/// from [`TaxTables::tax_year_2026`]; other years can be loaded from JSON
/// and must pass [`TaxTables::validate`] first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxTables {
    pub tax_year: u16,
    pub federal: Vec<TaxBracket>,
    pub states: BTreeMap<StateCode, Vec<TaxBracket>>,
    pub nyc: Vec<TaxBracket>,
    pub standard_deduction: StandardDeductionTable,
    pub payroll: PayrollRates,
}

impl TaxTables {
    pub fn tax_year_2026() -> Self {
        Self {
            tax_year: 2026,
            federal: FEDERAL_2026.to_vec(),
            states: StateCode::ALL
                .iter()
                .map(|state| (*state, state_brackets_2026(*state).to_vec()))
                .collect(),
            nyc: NYC_2026.to_vec(),
            standard_deduction: StandardDeductionTable::tax_year_2026(),
            payroll: PayrollRates::tax_year_2026(),
        }
    }

    /// Schedule for a state; a state missing from a loaded file taxes nothing.
    pub fn state(&self, state: StateCode) -> &[TaxBracket] {
        self.states.get(&state).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Parse tables from JSON and validate them.
    pub fn from_json(json: &str) -> FinwiseResult<Self> {
        let tables: TaxTables = serde_json::from_str(json)?;
        tables.validate()?;
        Ok(tables)
    }

    /// Check the bracket invariants the engine relies on: rates within
    /// [0, 1], the first bracket starting at zero, and strictly ascending
    /// lower bounds. Every state must be present.
    pub fn validate(&self) -> FinwiseResult<()> {
        validate_schedule("federal", &self.federal)?;
        validate_schedule("NYC", &self.nyc)?;
        for state in StateCode::ALL {
            match self.states.get(&state) {
                Some(schedule) => validate_schedule(state.code(), schedule)?,
                None => {
                    return Err(FinwiseError::InvalidTable {
                        jurisdiction: state.code().into(),
                        reason: "missing schedule".into(),
                    })
                }
            }
        }
        let rates = [
            ("social_security_rate", self.payroll.social_security_rate),
            ("medicare_rate", self.payroll.medicare_rate),
        ];
        for (field, rate) in rates {
            if rate < Decimal::ZERO || rate > Decimal::ONE {
                return Err(FinwiseError::InvalidInput {
                    field: field.into(),
                    reason: "rate must be within 0-1".into(),
                });
            }
        }
        Ok(())
    }
}

impl Default for TaxTables {
    fn default() -> Self {
        Self::tax_year_2026()
    }
}

fn validate_schedule(jurisdiction: &str, schedule: &[TaxBracket]) -> FinwiseResult<()> {
    let invalid = |reason: String| FinwiseError::InvalidTable {
        jurisdiction: jurisdiction.into(),
        reason,
    };

    if let Some(first) = schedule.first() {
        if !first.lower_bound.is_zero() {
            return Err(invalid(format!(
                "first bracket starts at {} instead of 0",
                first.lower_bound
            )));
        }
    }
    for (idx, bracket) in schedule.iter().enumerate() {
        if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
            return Err(invalid(format!("bracket {idx} has rate {}", bracket.rate)));
        }
    }
    for pair in schedule.windows(2) {
        if pair[1].lower_bound <= pair[0].lower_bound {
            return Err(invalid(format!(
                "lower bound {} does not follow {}",
                pair[1].lower_bound, pair[0].lower_bound
            )));
        }
    }
    Ok(())
}
