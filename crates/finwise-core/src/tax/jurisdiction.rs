//! Two-letter codes for the 50 states plus DC.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FinwiseError;

/// A US state or the District of Columbia.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StateCode {
    AL,
    AK,
    AZ,
    AR,
    CA,
    CO,
    CT,
    DE,
    DC,
    FL,
    GA,
    HI,
    ID,
    IL,
    IN,
    IA,
    KS,
    KY,
    LA,
    ME,
    MD,
    MA,
    MI,
    MN,
    MS,
    MO,
    MT,
    NE,
    NV,
    NH,
    NJ,
    NM,
    NY,
    NC,
    ND,
    OH,
    OK,
    OR,
    PA,
    RI,
    SC,
    SD,
    TN,
    TX,
    UT,
    VT,
    VA,
    WA,
    WV,
    WI,
    WY,
}

impl StateCode {
    /// Every jurisdiction, in alphabetical order of name.
    pub const ALL: [StateCode; 51] = [
        StateCode::AL,
        StateCode::AK,
        StateCode::AZ,
        StateCode::AR,
        StateCode::CA,
        StateCode::CO,
        StateCode::CT,
        StateCode::DE,
        StateCode::DC,
        StateCode::FL,
        StateCode::GA,
        StateCode::HI,
        StateCode::ID,
        StateCode::IL,
        StateCode::IN,
        StateCode::IA,
        StateCode::KS,
        StateCode::KY,
        StateCode::LA,
        StateCode::ME,
        StateCode::MD,
        StateCode::MA,
        StateCode::MI,
        StateCode::MN,
        StateCode::MS,
        StateCode::MO,
        StateCode::MT,
        StateCode::NE,
        StateCode::NV,
        StateCode::NH,
        StateCode::NJ,
        StateCode::NM,
        StateCode::NY,
        StateCode::NC,
        StateCode::ND,
        StateCode::OH,
        StateCode::OK,
        StateCode::OR,
        StateCode::PA,
        StateCode::RI,
        StateCode::SC,
        StateCode::SD,
        StateCode::TN,
        StateCode::TX,
        StateCode::UT,
        StateCode::VT,
        StateCode::VA,
        StateCode::WA,
        StateCode::WV,
        StateCode::WI,
        StateCode::WY,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            StateCode::AL => "AL",
            StateCode::AK => "AK",
            StateCode::AZ => "AZ",
            StateCode::AR => "AR",
            StateCode::CA => "CA",
            StateCode::CO => "CO",
            StateCode::CT => "CT",
            StateCode::DE => "DE",
            StateCode::DC => "DC",
            StateCode::FL => "FL",
            StateCode::GA => "GA",
            StateCode::HI => "HI",
            StateCode::ID => "ID",
            StateCode::IL => "IL",
            StateCode::IN => "IN",
            StateCode::IA => "IA",
            StateCode::KS => "KS",
            StateCode::KY => "KY",
            StateCode::LA => "LA",
            StateCode::ME => "ME",
            StateCode::MD => "MD",
            StateCode::MA => "MA",
            StateCode::MI => "MI",
            StateCode::MN => "MN",
            StateCode::MS => "MS",
            StateCode::MO => "MO",
            StateCode::MT => "MT",
            StateCode::NE => "NE",
            StateCode::NV => "NV",
            StateCode::NH => "NH",
            StateCode::NJ => "NJ",
            StateCode::NM => "NM",
            StateCode::NY => "NY",
            StateCode::NC => "NC",
            StateCode::ND => "ND",
            StateCode::OH => "OH",
            StateCode::OK => "OK",
            StateCode::OR => "OR",
            StateCode::PA => "PA",
            StateCode::RI => "RI",
            StateCode::SC => "SC",
            StateCode::SD => "SD",
            StateCode::TN => "TN",
            StateCode::TX => "TX",
            StateCode::UT => "UT",
            StateCode::VT => "VT",
            StateCode::VA => "VA",
            StateCode::WA => "WA",
            StateCode::WV => "WV",
            StateCode::WI => "WI",
            StateCode::WY => "WY",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StateCode::AL => "Alabama",
            StateCode::AK => "Alaska",
            StateCode::AZ => "Arizona",
            StateCode::AR => "Arkansas",
            StateCode::CA => "California",
            StateCode::CO => "Colorado",
            StateCode::CT => "Connecticut",
            StateCode::DE => "Delaware",
            StateCode::DC => "District of Columbia",
            StateCode::FL => "Florida",
            StateCode::GA => "Georgia",
            StateCode::HI => "Hawaii",
            StateCode::ID => "Idaho",
            StateCode::IL => "Illinois",
            StateCode::IN => "Indiana",
            StateCode::IA => "Iowa",
            StateCode::KS => "Kansas",
            StateCode::KY => "Kentucky",
            StateCode::LA => "Louisiana",
            StateCode::ME => "Maine",
            StateCode::MD => "Maryland",
            StateCode::MA => "Massachusetts",
            StateCode::MI => "Michigan",
            StateCode::MN => "Minnesota",
            StateCode::MS => "Mississippi",
            StateCode::MO => "Missouri",
            StateCode::MT => "Montana",
            StateCode::NE => "Nebraska",
            StateCode::NV => "Nevada",
            StateCode::NH => "New Hampshire",
            StateCode::NJ => "New Jersey",
            StateCode::NM => "New Mexico",
            StateCode::NY => "New York",
            StateCode::NC => "North Carolina",
            StateCode::ND => "North Dakota",
            StateCode::OH => "Ohio",
            StateCode::OK => "Oklahoma",
            StateCode::OR => "Oregon",
            StateCode::PA => "Pennsylvania",
            StateCode::RI => "Rhode Island",
            StateCode::SC => "South Carolina",
            StateCode::SD => "South Dakota",
            StateCode::TN => "Tennessee",
            StateCode::TX => "Texas",
            StateCode::UT => "Utah",
            StateCode::VT => "Vermont",
            StateCode::VA => "Virginia",
            StateCode::WA => "Washington",
            StateCode::WV => "West Virginia",
            StateCode::WI => "Wisconsin",
            StateCode::WY => "Wyoming",
        }
    }
}

impl fmt::Display for StateCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for StateCode {
    type Err = FinwiseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        StateCode::ALL
            .iter()
            .copied()
            .find(|state| {
                state.code().eq_ignore_ascii_case(wanted)
                    || state.name().eq_ignore_ascii_case(wanted)
            })
            .ok_or_else(|| FinwiseError::UnknownJurisdiction(s.to_string()))
    }
}
