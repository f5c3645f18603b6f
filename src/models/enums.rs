use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Raised when a stored string does not map to a known enum variant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid enum value for {field}: {value}")]
pub struct InvalidEnum {
    pub field: String,
    pub value: String,
}

/// Macro to generate enum with as_str + std::str::FromStr pattern
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(rename_all = "snake_case")]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = InvalidEnum;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }
    };
}

str_enum!(Gender {
    Male => "male",
    Female => "female",
});

str_enum!(ChestPainType {
    TypicalAngina => "typical_angina",
    AtypicalAngina => "atypical_angina",
    NonAnginal => "non_anginal",
    Asymptomatic => "asymptomatic",
});

str_enum!(RestingEcg {
    Normal => "normal",
    StTAbnormality => "st_t_abnormality",
    LvHypertrophy => "lv_hypertrophy",
});

str_enum!(RiskLevel {
    Low => "low",
    Medium => "medium",
    High => "high",
});

str_enum!(VitalKind {
    HeartRate => "heart_rate",
    BloodPressure => "blood_pressure",
    BloodSugar => "blood_sugar",
    Weight => "weight",
});

impl RiskLevel {
    /// Tier boundaries as observed in the assessment heuristic:
    /// below 30 is Low, 30 up to (not including) 60 is Medium,
    /// 60 and above is High.
    pub fn from_percentage(percentage: u8) -> Self {
        if percentage < 30 {
            Self::Low
        } else if percentage < 60 {
            Self::Medium
        } else {
            Self::High
        }
    }

    /// Patient-facing badge label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl VitalKind {
    /// Display unit for this vital.
    pub fn unit(self) -> &'static str {
        match self {
            VitalKind::HeartRate => "bpm",
            VitalKind::BloodPressure => "mmHg",
            VitalKind::BloodSugar => "mg/dL",
            VitalKind::Weight => "kg",
        }
    }
}
