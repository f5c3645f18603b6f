use serde::{Deserialize, Serialize};

use super::AssessmentError;
use crate::models::{ChestPainType, Gender, RestingEcg};

/// Accepted input ranges, matching the measurement bounds the intake
/// form enforces.
pub const AGE_RANGE: std::ops::RangeInclusive<u32> = 18..=120;
pub const RESTING_BP_RANGE: std::ops::RangeInclusive<u32> = 80..=200;
pub const CHOLESTEROL_RANGE: std::ops::RangeInclusive<u32> = 100..=400;
pub const MAX_HEART_RATE_RANGE: std::ops::RangeInclusive<u32> = 60..=220;
pub const OLDPEAK_RANGE: std::ops::RangeInclusive<f64> = 0.0..=10.0;

/// One assessment's raw inputs.
///
/// All ten fields are required — a partially filled intake form never
/// reaches scoring, so optionality is not representable here. Range
/// validation still happens in [`HealthParameters::validate`] before
/// any score is computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthParameters {
    /// Age in years.
    pub age: u32,
    pub gender: Gender,
    pub chest_pain_type: ChestPainType,
    /// Resting systolic blood pressure, mmHg.
    pub resting_bp: u32,
    /// Total serum cholesterol, mg/dL.
    pub cholesterol: u32,
    /// Fasting blood sugar above 120 mg/dL.
    pub fasting_blood_sugar_high: bool,
    pub resting_ecg: RestingEcg,
    /// Maximum heart rate achieved during exercise, bpm.
    pub max_heart_rate: u32,
    pub exercise_induced_angina: bool,
    /// ST depression induced by exercise relative to rest.
    pub oldpeak: f64,
}

impl HealthParameters {
    /// Check every field against its declared range.
    ///
    /// Returns the first violation found; scoring must not proceed on
    /// out-of-range input.
    pub fn validate(&self) -> Result<(), AssessmentError> {
        if !AGE_RANGE.contains(&self.age) {
            return Err(AssessmentError::InvalidInput {
                field: "age",
                value: self.age.to_string(),
                expected: "18-120 years",
            });
        }
        if !RESTING_BP_RANGE.contains(&self.resting_bp) {
            return Err(AssessmentError::InvalidInput {
                field: "resting_bp",
                value: self.resting_bp.to_string(),
                expected: "80-200 mmHg",
            });
        }
        if !CHOLESTEROL_RANGE.contains(&self.cholesterol) {
            return Err(AssessmentError::InvalidInput {
                field: "cholesterol",
                value: self.cholesterol.to_string(),
                expected: "100-400 mg/dL",
            });
        }
        if !MAX_HEART_RATE_RANGE.contains(&self.max_heart_rate) {
            return Err(AssessmentError::InvalidInput {
                field: "max_heart_rate",
                value: self.max_heart_rate.to_string(),
                expected: "60-220 bpm",
            });
        }
        // NaN fails the range check too: contains() is false for NaN.
        if !OLDPEAK_RANGE.contains(&self.oldpeak) {
            return Err(AssessmentError::InvalidInput {
                field: "oldpeak",
                value: self.oldpeak.to_string(),
                expected: "0.0-10.0",
            });
        }
        Ok(())
    }
}
