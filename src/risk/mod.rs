//! Multi-hazard risk assessment
//!
//! - `tables`: weights, base scores, multiplier, band thresholds
//! - `aggregator`: weighted scoring and categorisation
//! - `advisories`: rule-driven structured recommendations
//! - `types`: assessment and advisory records

pub mod types;
pub mod tables;
pub mod advisories;
pub mod aggregator;

pub use types::{
    Advisory, AdvisorySeverity, AdvisoryType, AgencyNotice, AuthorityNote, MitigationAction,
    Recommendation, RiskAssessment, RiskCategory, SafetyLevel,
};
pub use tables::{BandThresholds, BaseScores, HazardWeights, RiskTables};
pub use advisories::{generate_recommendation, high_risk_set};
pub use aggregator::{RiskAggregator, ScoreBreakdown};
