//! Heart disease risk assessment.
//!
//! A deterministic, rule-based scoring heuristic over ten health
//! parameters. Explicitly not a validated clinical model: the factor
//! weights are fixed and auditable, and the output always carries a
//! plain-language recommendation list for the resulting tier.

pub mod engine;
pub mod params;

pub use engine::{assess, RiskResult};
pub use params::HealthParameters;

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AssessmentError {
    /// A parameter is outside its declared range. No partial scoring is
    /// attempted; the caller must not display a result.
    #[error("Invalid input for {field}: {value} (expected {expected})")]
    InvalidInput {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}
