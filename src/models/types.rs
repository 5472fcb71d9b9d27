//! Coded category types
//!
//! Every coded column in the surveillance table is decoded into one of the closed
//! enums below. Codes outside a mapping have no variant of their own; the decoder
//! folds them into the `Unknown` fallback and counts them.

use std::fmt;
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::error::DashboardError;

/// Indicator value meaning "condition or intervention present"
pub const PRESENT_CODE: i32 = 1;
/// Indicator value meaning "condition or intervention absent"
pub const ABSENT_CODE: i32 = 2;
/// Indicator value for "not applicable / unknown"
pub const UNKNOWN_CODE: i32 = 97;
/// Codes for which an ICU or intubation status was recorded
pub const KNOWN_STATUS_CODES: [i32; 2] = [PRESENT_CODE, ABSENT_CODE];

/// Whether a tri-state indicator carries a recorded status of either polarity.
///
/// This does not tell admitted from not admitted; it only separates a recorded
/// status from an unknown one.
#[must_use]
pub fn is_known_status(code: Option<i32>) -> bool {
    code.is_some_and(|c| KNOWN_STATUS_CODES.contains(&c))
}

/// Defines a closed enum decoded from integer codes.
///
/// The `fallback` variant absorbs codes outside the mapping; it may also own a code.
macro_rules! coded_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident = $code:literal => $label:literal, )+
        }
        fallback { $(#[$fmeta:meta])* $fallback:ident $(= $fcode:literal)? => $flabel:literal }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant, )+
            $(#[$fmeta])*
            $fallback,
        }

        impl $name {
            /// Every variant in declaration order
            pub const ALL: &'static [Self] = &[$(Self::$variant,)+ Self::$fallback];

            /// Map a raw code; `None` when the code is outside the mapping
            #[must_use]
            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $( $code => Some(Self::$variant), )+
                    $( $fcode => Some(Self::$fallback), )?
                    _ => None,
                }
            }

            /// Display label
            #[must_use]
            pub fn label(self) -> &'static str {
                match self {
                    $( Self::$variant => $label, )+
                    Self::$fallback => $flabel,
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = DashboardError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|v| v.label().eq_ignore_ascii_case(wanted))
                    .ok_or_else(|| DashboardError::InvalidLabel {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.label())
            }
        }
    };
}

coded_enum! {
    /// Sex of the patient (`SEX`)
    pub enum Sex ("sex") {
        Male = 1 => "Male",
        Female = 2 => "Female",
    }
    fallback {
        /// Recorded as unknown (97) or carrying an unmapped code
        Unknown = 97 => "Unknown"
    }
}

coded_enum! {
    /// Care setting of the encounter (`PATIENT_TYPE`)
    pub enum PatientType ("patient type") {
        /// Returned home
        Ambulatory = 1 => "Ambulatory",
        Hospitalized = 2 => "Hospitalized",
    }
    fallback { Unknown = 97 => "Unknown" }
}

coded_enum! {
    /// Final case classification (`CLASIFFICATION_FINAL`)
    pub enum Classification ("classification") {
        Suspected = 1 => "Suspected",
        Confirmed = 2 => "Confirmed",
        SuspectedNotCovid = 3 => "Suspected Not COVID-19",
        ConfirmedNotRelated = 4 => "Confirmed COVID-19 Not Related",
        CovidPatient = 5 => "COVID-19 Patient",
        SuspectedRelated = 6 => "Suspected COVID-19 Related",
        ConfirmedRelatedDeath = 7 => "Confirmed COVID-19 Related Death",
    }
    fallback {
        /// Any code outside 1..=7
        Unknown => "Unknown"
    }
}

/// Patient outcome derived from the date of death
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Outcome {
    Survived,
    Deceased,
}

impl Outcome {
    pub const ALL: &'static [Self] = &[Self::Survived, Self::Deceased];

    #[must_use]
    pub fn from_mortality(died: bool) -> Self {
        if died { Self::Deceased } else { Self::Survived }
    }

    #[must_use]
    pub fn is_deceased(self) -> bool {
        self == Self::Deceased
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Survived => "Survived",
            Self::Deceased => "Deceased",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Outcome {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "survived" | "alive" => Ok(Self::Survived),
            "deceased" | "died" | "dead" => Ok(Self::Deceased),
            _ => Err(DashboardError::InvalidLabel {
                kind: "outcome",
                value: s.to_string(),
            }),
        }
    }
}

impl Serialize for Outcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Pre-existing condition tracked by an indicator column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Comorbidity {
    Diabetes,
    Copd,
    Asthma,
    Immunosuppression,
    Hypertension,
    OtherDisease,
    Cardiovascular,
    Obesity,
    ChronicRenal,
    Tobacco,
}

impl Comorbidity {
    /// Number of tracked conditions
    pub const COUNT: usize = 10;

    /// Every condition, in column order of the source table
    pub const ALL: [Self; Self::COUNT] = [
        Self::Diabetes,
        Self::Copd,
        Self::Asthma,
        Self::Immunosuppression,
        Self::Hypertension,
        Self::OtherDisease,
        Self::Cardiovascular,
        Self::Obesity,
        Self::ChronicRenal,
        Self::Tobacco,
    ];

    /// Position in [`Comorbidity::ALL`]
    #[must_use]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Name of the indicator column
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            Self::Diabetes => "DIABETES",
            Self::Copd => "COPD",
            Self::Asthma => "ASTHMA",
            Self::Immunosuppression => "INMSUPR",
            Self::Hypertension => "HIPERTENSION",
            Self::OtherDisease => "OTHER_DISEASE",
            Self::Cardiovascular => "CARDIOVASCULAR",
            Self::Obesity => "OBESITY",
            Self::ChronicRenal => "RENAL_CHRONIC",
            Self::Tobacco => "TOBACCO",
        }
    }

    /// Column name in title case, as shown in the condition tables
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Diabetes => "Diabetes",
            Self::Copd => "Copd",
            Self::Asthma => "Asthma",
            Self::Immunosuppression => "Inmsupr",
            Self::Hypertension => "Hipertension",
            Self::OtherDisease => "Other Disease",
            Self::Cardiovascular => "Cardiovascular",
            Self::Obesity => "Obesity",
            Self::ChronicRenal => "Renal Chronic",
            Self::Tobacco => "Tobacco",
        }
    }
}

impl fmt::Display for Comorbidity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Comorbidity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

/// Fixed age bands used for the mortality-by-age table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AgeBand {
    Under18,
    From18To29,
    From30To39,
    From40To49,
    From50To59,
    From60To69,
    From70To79,
    From80,
}

impl AgeBand {
    /// Smallest age accepted into a band
    pub const MIN_AGE: i32 = 0;
    /// Largest age accepted into a band (inclusive)
    pub const MAX_AGE: i32 = 130;

    pub const ALL: [Self; 8] = [
        Self::Under18,
        Self::From18To29,
        Self::From30To39,
        Self::From40To49,
        Self::From50To59,
        Self::From60To69,
        Self::From70To79,
        Self::From80,
    ];

    /// Band containing `age`; bands are lower-inclusive and upper-exclusive except
    /// the last, which also holds 130. Ages outside [0, 130] have no band.
    #[must_use]
    pub fn from_age(age: i32) -> Option<Self> {
        let band = match age {
            a if a < Self::MIN_AGE || a > Self::MAX_AGE => return None,
            0..=17 => Self::Under18,
            18..=29 => Self::From18To29,
            30..=39 => Self::From30To39,
            40..=49 => Self::From40To49,
            50..=59 => Self::From50To59,
            60..=69 => Self::From60To69,
            70..=79 => Self::From70To79,
            _ => Self::From80,
        };
        Some(band)
    }

    /// Inclusive age bounds of the band
    #[must_use]
    pub fn bounds(self) -> (i32, i32) {
        match self {
            Self::Under18 => (0, 17),
            Self::From18To29 => (18, 29),
            Self::From30To39 => (30, 39),
            Self::From40To49 => (40, 49),
            Self::From50To59 => (50, 59),
            Self::From60To69 => (60, 69),
            Self::From70To79 => (70, 79),
            Self::From80 => (80, Self::MAX_AGE),
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Under18 => "0-17",
            Self::From18To29 => "18-29",
            Self::From30To39 => "30-39",
            Self::From40To49 => "40-49",
            Self::From50To59 => "50-59",
            Self::From60To69 => "60-69",
            Self::From70To79 => "70-79",
            Self::From80 => "80+",
        }
    }
}

impl fmt::Display for AgeBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for AgeBand {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}
