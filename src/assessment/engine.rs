use serde::{Deserialize, Serialize};

use super::params::HealthParameters;
use super::AssessmentError;
use crate::models::{ChestPainType, Gender, RestingEcg, RiskLevel};

/// Reported percentage is clamped to this band: a score of 0 still
/// reads as 5% and the maximal factor sum (135) reads as 95%.
const MIN_PERCENTAGE: u8 = 5;
const MAX_PERCENTAGE: u8 = 95;

const LOW_RECOMMENDATIONS: &[&str] = &[
    "Maintain your healthy lifestyle habits",
    "Continue regular exercise (150 min/week)",
    "Annual heart health checkups recommended",
    "Keep a balanced diet rich in vegetables and fruits",
];

const MEDIUM_RECOMMENDATIONS: &[&str] = &[
    "Schedule a consultation with a cardiologist",
    "Monitor blood pressure and cholesterol regularly",
    "Increase physical activity gradually",
    "Reduce sodium and saturated fat intake",
    "Consider stress management techniques",
];

const HIGH_RECOMMENDATIONS: &[&str] = &[
    "Seek immediate consultation with a cardiologist",
    "Get comprehensive cardiac evaluation",
    "Follow prescribed medication strictly",
    "Major lifestyle modifications needed",
    "Regular monitoring of all vital signs",
    "Consider cardiac rehabilitation program",
];

/// Outcome of one risk assessment. Created fresh per call, never merged
/// with prior results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    pub risk_level: RiskLevel,
    /// Always within [5, 95].
    pub risk_percentage: u8,
    /// Fixed per-tier guidance, ordered; Low carries 4 items, Medium 5,
    /// High 6.
    pub recommendations: Vec<String>,
}

/// Score a validated parameter set into a risk classification.
///
/// Pure and deterministic: identical input always yields an identical
/// result. Out-of-range input fails with `InvalidInput` before any
/// scoring happens.
pub fn assess(params: &HealthParameters) -> Result<RiskResult, AssessmentError> {
    params.validate()?;

    let score = risk_score(params);
    let risk_percentage = score.clamp(u32::from(MIN_PERCENTAGE), u32::from(MAX_PERCENTAGE)) as u8;
    let risk_level = RiskLevel::from_percentage(risk_percentage);

    tracing::debug!(
        score,
        percentage = risk_percentage,
        level = risk_level.as_str(),
        "risk assessment computed"
    );

    Ok(RiskResult {
        risk_level,
        risk_percentage,
        recommendations: recommendations_for(risk_level),
    })
}

/// Additive point score over the ten risk factors. Each factor is
/// evaluated independently; the unclamped sum can reach 135.
fn risk_score(params: &HealthParameters) -> u32 {
    let mut score = 0;

    // Age bands are mutually exclusive, highest first.
    if params.age > 60 {
        score += 20;
    } else if params.age > 45 {
        score += 10;
    }

    if params.gender == Gender::Male {
        score += 10;
    }

    if matches!(
        params.chest_pain_type,
        ChestPainType::TypicalAngina | ChestPainType::AtypicalAngina
    ) {
        score += 15;
    }

    if params.resting_bp > 140 {
        score += 15;
    } else if params.resting_bp > 120 {
        score += 5;
    }

    if params.cholesterol > 240 {
        score += 15;
    } else if params.cholesterol > 200 {
        score += 8;
    }

    if params.fasting_blood_sugar_high {
        score += 10;
    }

    match params.resting_ecg {
        RestingEcg::LvHypertrophy => score += 10,
        RestingEcg::StTAbnormality => score += 5,
        RestingEcg::Normal => {}
    }

    // A low exercise ceiling only counts against older patients.
    if params.max_heart_rate < 120 && params.age > 40 {
        score += 10;
    }

    if params.exercise_induced_angina {
        score += 15;
    }

    if params.oldpeak > 2.0 {
        score += 15;
    } else if params.oldpeak > 1.0 {
        score += 8;
    }

    score
}

fn recommendations_for(level: RiskLevel) -> Vec<String> {
    let items = match level {
        RiskLevel::Low => LOW_RECOMMENDATIONS,
        RiskLevel::Medium => MEDIUM_RECOMMENDATIONS,
        RiskLevel::High => HIGH_RECOMMENDATIONS,
    };
    items.iter().map(|s| (*s).to_string()).collect()
}
