//! Tracking flows — the write paths that feed the record store and the
//! dashboard read model.
//!
//! Two flows produce records: a completed risk assessment (stores the
//! vitals derivable from its inputs plus the outcome) and a heart-rate
//! capture (stores a single BPM reading; the camera measurement itself
//! is an external collaborator that hands over one integer).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::assessment::{assess, AssessmentError, HealthParameters, RiskResult};
use crate::models::{HealthRecord, RiskLevel};
use crate::store::HealthRecordStore;

/// Plausible bounds for a camera-based pulse reading.
const BPM_RANGE: std::ops::RangeInclusive<u32> = 30..=250;

#[derive(Error, Debug)]
pub enum TrackerError {
    #[error(transparent)]
    Assessment(#[from] AssessmentError),

    #[error("Implausible heart rate reading: {bpm} bpm (expected 30-250)")]
    InvalidReading { bpm: u32 },
}

/// Result of an assessment flow: the scored outcome plus whether the
/// produced record reached durable storage. `persisted == false` means
/// the record is held in the in-memory view and a store `flush` will
/// retry the save.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentOutcome {
    pub result: RiskResult,
    pub record_id: Uuid,
    pub persisted: bool,
}

/// Run a risk assessment and append its record to the user's history.
///
/// The stored record mirrors what the intake captured: resting BP as
/// the systolic reading with an estimated diastolic (60% of systolic),
/// cholesterol, a nominal blood sugar level for the fasting flag, and
/// the risk outcome. Invalid parameters fail before anything is
/// appended; a persistence failure still returns the computed outcome
/// with `persisted: false`.
pub fn record_assessment(
    store: &mut HealthRecordStore,
    params: &HealthParameters,
    date: NaiveDate,
) -> Result<AssessmentOutcome, TrackerError> {
    let result = assess(params)?;

    let record = HealthRecord::new(date)
        .with_blood_pressure(params.resting_bp, estimated_diastolic(params.resting_bp))
        .with_cholesterol(params.cholesterol)
        .with_blood_sugar(nominal_blood_sugar(params.fasting_blood_sugar_high))
        .with_risk(result.risk_level, result.risk_percentage);
    let record_id = record.id;

    let persisted = match store.append(record) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                user_id = store.user_id(),
                error = %err,
                "assessment record not durable yet, kept in session view"
            );
            false
        }
    };

    tracing::info!(
        user_id = store.user_id(),
        percentage = result.risk_percentage,
        level = result.risk_level.as_str(),
        persisted,
        "assessment recorded"
    );

    Ok(AssessmentOutcome {
        result,
        record_id,
        persisted,
    })
}

/// Result of a heart-rate capture: the produced record's id plus the
/// same durability flag as [`AssessmentOutcome`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptureOutcome {
    pub record_id: Uuid,
    pub persisted: bool,
}

/// Append a single heart-rate capture to the user's history.
///
/// Implausible readings fail before anything is appended; a persistence
/// failure still returns the record id with `persisted: false` so the
/// caller knows the reading lives only in the session view until a
/// store `flush` retries the save.
pub fn record_heart_rate(
    store: &mut HealthRecordStore,
    bpm: u32,
    date: NaiveDate,
) -> Result<CaptureOutcome, TrackerError> {
    if !BPM_RANGE.contains(&bpm) {
        return Err(TrackerError::InvalidReading { bpm });
    }

    let record = HealthRecord::new(date).with_heart_rate(bpm);
    let record_id = record.id;

    let persisted = match store.append(record) {
        Ok(()) => true,
        Err(err) => {
            tracing::warn!(
                user_id = store.user_id(),
                error = %err,
                "heart rate record not durable yet, kept in session view"
            );
            false
        }
    };

    Ok(CaptureOutcome {
        record_id,
        persisted,
    })
}

/// Estimated diastolic reading derived from the systolic intake value,
/// as the assessment form captures no diastolic measurement of its own.
fn estimated_diastolic(systolic: u32) -> u32 {
    (f64::from(systolic) * 0.6).round() as u32
}

/// Nominal mg/dL level for the boolean fasting-blood-sugar answer.
fn nominal_blood_sugar(high: bool) -> u32 {
    if high {
        130
    } else {
        95
    }
}

/// Latest-record quick stats for the dashboard cards. Fields are `None`
/// where the most recent record does not carry that vital, rendered as
/// an em-dash placeholder by the UI.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DashboardSummary {
    pub date: Option<NaiveDate>,
    pub heart_rate: Option<u32>,
    pub blood_pressure: Option<(u32, u32)>,
    pub blood_sugar: Option<u32>,
    pub weight: Option<f64>,
    pub risk_level: Option<RiskLevel>,
    pub risk_percentage: Option<u8>,
}

impl DashboardSummary {
    pub fn from_store(store: &HealthRecordStore) -> Self {
        let Some(latest) = store.latest() else {
            return Self::default();
        };
        Self {
            date: Some(latest.date),
            heart_rate: latest.heart_rate,
            blood_pressure: latest
                .blood_pressure_systolic
                .zip(latest.blood_pressure_diastolic),
            blood_sugar: latest.blood_sugar,
            weight: latest.weight,
            risk_level: latest.risk_level,
            risk_percentage: latest.risk_percentage,
        }
    }
}
