//! HridayMitra core — the engine behind a consumer heart-health
//! companion app.
//!
//! Two pieces carry the logic: the risk [`assessment`] engine, a pure
//! rule-based scorer over ten health parameters, and the record
//! [`store`], which owns each user's dated health history and derives
//! the bounded trend series the dashboard charts. The [`tracker`]
//! module glues the two into the application flows. UI, auth, chart
//! rendering, and the camera pulse capture live in the host app; this
//! crate only sees their results (an identity string, a BPM integer).
//!
//! Logging goes through `tracing`; the host application installs the
//! subscriber.

pub mod assessment;
pub mod config;
pub mod models;
pub mod store;
pub mod tracker;

pub use assessment::{assess, AssessmentError, HealthParameters, RiskResult};
pub use models::{HealthRecord, RiskLevel, SeriesPoint, VitalKind};
pub use store::{
    FileStorage, HealthRecordStore, LoadReport, MemoryStorage, SqliteStorage, StoragePort,
    StoreError,
};
pub use tracker::{
    record_assessment, record_heart_rate, AssessmentOutcome, CaptureOutcome, DashboardSummary,
};
