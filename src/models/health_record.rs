use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::enums::{RiskLevel, VitalKind};

/// One dated observation event for a user.
///
/// Every field beyond the date is optional: a record may carry a single
/// vital (one heart-rate capture) or a full assessment outcome. Records
/// are never mutated after they are appended to a store — corrections
/// are new records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthRecord {
    pub id: Uuid,
    pub date: NaiveDate,
    pub heart_rate: Option<u32>,
    pub blood_pressure_systolic: Option<u32>,
    pub blood_pressure_diastolic: Option<u32>,
    pub cholesterol: Option<u32>,
    pub blood_sugar: Option<u32>,
    pub weight: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    pub risk_percentage: Option<u8>,
}

impl HealthRecord {
    /// Empty record for the given date; vitals are filled in via the
    /// `with_*` builders.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            heart_rate: None,
            blood_pressure_systolic: None,
            blood_pressure_diastolic: None,
            cholesterol: None,
            blood_sugar: None,
            weight: None,
            risk_level: None,
            risk_percentage: None,
        }
    }

    pub fn with_heart_rate(mut self, bpm: u32) -> Self {
        self.heart_rate = Some(bpm);
        self
    }

    pub fn with_blood_pressure(mut self, systolic: u32, diastolic: u32) -> Self {
        self.blood_pressure_systolic = Some(systolic);
        self.blood_pressure_diastolic = Some(diastolic);
        self
    }

    pub fn with_cholesterol(mut self, mg_dl: u32) -> Self {
        self.cholesterol = Some(mg_dl);
        self
    }

    pub fn with_blood_sugar(mut self, mg_dl: u32) -> Self {
        self.blood_sugar = Some(mg_dl);
        self
    }

    pub fn with_weight(mut self, kg: f64) -> Self {
        self.weight = Some(kg);
        self
    }

    pub fn with_risk(mut self, level: RiskLevel, percentage: u8) -> Self {
        self.risk_level = Some(level);
        self.risk_percentage = Some(percentage);
        self
    }

    /// Whether this record defines a value for the given vital.
    /// Blood pressure qualifies on the systolic reading.
    pub fn has_vital(&self, kind: VitalKind) -> bool {
        match kind {
            VitalKind::HeartRate => self.heart_rate.is_some(),
            VitalKind::BloodPressure => self.blood_pressure_systolic.is_some(),
            VitalKind::BloodSugar => self.blood_sugar.is_some(),
            VitalKind::Weight => self.weight.is_some(),
        }
    }

    /// Primary (and, for blood pressure, secondary) value for the vital.
    pub fn vital_value(&self, kind: VitalKind) -> Option<(f64, Option<f64>)> {
        match kind {
            VitalKind::HeartRate => self.heart_rate.map(|v| (f64::from(v), None)),
            VitalKind::BloodPressure => self.blood_pressure_systolic.map(|sys| {
                (
                    f64::from(sys),
                    self.blood_pressure_diastolic.map(f64::from),
                )
            }),
            VitalKind::BloodSugar => self.blood_sugar.map(|v| (f64::from(v), None)),
            VitalKind::Weight => self.weight.map(|v| (v, None)),
        }
    }
}

/// One point of a derived trend series, oldest-first when windowed.
///
/// `value_secondary` is the diastolic reading for blood pressure and
/// `None` for every other vital.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub date: NaiveDate,
    pub value: f64,
    pub value_secondary: Option<f64>,
}
