//! Standard deduction resolution from the filing-situation checkboxes.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::tax::tables::StandardDeductionTable;
use crate::types::{with_metadata, ComputationOutput, Money};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaritalStatus {
    #[default]
    Single,
    Married,
}

/// Filing-situation selections from the deductions form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeductionChoices {
    pub marital_status: MaritalStatus,
    pub filed_jointly: bool,
    pub head_of_household: bool,
    pub over_age_65: bool,
    pub blind: bool,
    pub qualifying_surviving_spouse: bool,
}

/// Filing status the choices resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilingStatus {
    QualifyingSurvivingSpouse,
    HeadOfHousehold,
    Single,
    MarriedFilingJointly,
    MarriedFilingSeparately,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeductionOutput {
    pub filing_status: FilingStatus,
    pub base_amount: Money,
    pub rider_amount: Money,
    pub rider_count: u32,
    pub standard_deduction: Money,
}

/// First match wins: surviving spouse, head of household, single, then
/// married jointly or separately.
pub fn filing_status(choices: &DeductionChoices) -> FilingStatus {
    if choices.qualifying_surviving_spouse {
        FilingStatus::QualifyingSurvivingSpouse
    } else if choices.head_of_household {
        FilingStatus::HeadOfHousehold
    } else if choices.marital_status == MaritalStatus::Single {
        FilingStatus::Single
    } else if choices.filed_jointly {
        FilingStatus::MarriedFilingJointly
    } else {
        FilingStatus::MarriedFilingSeparately
    }
}

/// Deduction breakdown: base amount for the filing status plus one flat
/// rider per true age/blindness flag.
pub fn deduction_breakdown(
    choices: &DeductionChoices,
    table: &StandardDeductionTable,
) -> DeductionOutput {
    let status = filing_status(choices);
    let (base_amount, rider) = match status {
        FilingStatus::QualifyingSurvivingSpouse => {
            (table.qualifying_surviving_spouse, table.married_rider)
        }
        FilingStatus::HeadOfHousehold => (table.head_of_household, table.single_rider),
        FilingStatus::Single => (table.single, table.single_rider),
        FilingStatus::MarriedFilingJointly => (table.married_filing_jointly, table.married_rider),
        FilingStatus::MarriedFilingSeparately => {
            (table.married_filing_separately, table.married_rider)
        }
    };
    let rider_count = u32::from(choices.over_age_65) + u32::from(choices.blind);
    let rider_amount = rider * Decimal::from(rider_count);

    DeductionOutput {
        filing_status: status,
        base_amount,
        rider_amount,
        rider_count,
        standard_deduction: base_amount + rider_amount,
    }
}

/// Standard deduction dollar amount for the choices.
pub fn resolve_deduction(choices: &DeductionChoices, table: &StandardDeductionTable) -> Money {
    deduction_breakdown(choices, table).standard_deduction
}

/// Envelope-wrapped variant for the CLI and bindings.
pub fn calculate_deduction(
    choices: &DeductionChoices,
    table: &StandardDeductionTable,
) -> ComputationOutput<DeductionOutput> {
    with_metadata(
        "Standard deduction decision table with age/blind riders",
        choices,
        Vec::new(),
        deduction_breakdown(choices, table),
    )
}
