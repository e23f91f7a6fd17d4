//! Hazard Risk Engine
//!
//! Point-level multi-hazard risk assessment and facility proximity ranking.
//!
//! - `hazard/`: susceptibility levels, labels, spatial collaborator, lookup service
//! - `risk/`: scoring tables, aggregator, structured advisories
//! - `facilities/`: tier table, proximity ranker, facility provider
//! - `formatters/`: HTML / Markdown / JSON rendering of assessments
//!
//! The engines are pure; I/O lives behind the `SpatialIndex` and
//! `FacilityProvider` traits. The HTTP layer is behind the `api` feature.

pub mod error;
pub mod geo;
pub mod config;
pub mod hazard;
pub mod risk;
pub mod facilities;
pub mod formatters;

#[cfg(feature = "api")]
pub mod api_server;

// Re-export commonly used types
pub use error::HazardError;
pub use geo::{format_distance, haversine_distance, Point};
pub use config::ServerConfig;
pub use hazard::{HazardLookupService, HazardProfile, HazardType, SusceptibilityLevel};
pub use risk::{RiskAggregator, RiskAssessment, RiskCategory, RiskTables, SafetyLevel};
pub use facilities::{FacilityProximityRanker, FacilityRecord, RankedFacilities};

#[cfg(feature = "api")]
pub use api_server::{AppState, create_router};
