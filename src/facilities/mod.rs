//! Facility proximity ranking
//!
//! Distance annotation, disaster-priority tiers and nearest-of-type summaries
//! for facilities around a query point.

pub mod types;
pub mod tiers;
pub mod ranker;
pub mod provider;

pub use types::{
    FacilityCounts, FacilityRecord, FacilitySummary, NearestFacility, PriorityTier,
    RankedFacilities, RankedFacility,
};
pub use tiers::TierTable;
pub use ranker::{FacilityProximityRanker, RankerConfig};
pub use provider::{FacilityProvider, NearbyFacilitiesService, StaticFacilityProvider};
