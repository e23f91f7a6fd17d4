//! Facility Proximity Ranker
//!
//! Annotates each facility with its haversine distance from the query point,
//! sorts by distance (stable), partitions into priority tiers, caps each tier
//! list and summarises the nearest evacuation centre, hospital and fire station.

use rayon::prelude::*;

use super::tiers::TierTable;
use super::types::{
    FacilityCounts, FacilityRecord, FacilitySummary, NearestFacility, PriorityTier,
    RankedFacilities, RankedFacility,
};
use crate::error::HazardError;
use crate::geo::{format_distance, Point};

const HOSPITAL_TYPES: &[&str] = &["hospital", "clinic"];
const FIRE_STATION_TYPE: &str = "fire_station";

#[derive(Debug, Clone)]
pub struct RankerConfig {
    /// Facilities at or below this distance are walkable (meters)
    pub walk_threshold_m: f64,
    /// Maximum entries per tier list; counts are not capped
    pub per_tier_cap: usize,
    pub tiers: TierTable,
}

impl Default for RankerConfig {
    fn default() -> Self {
        Self {
            walk_threshold_m: 500.0,
            per_tier_cap: 10,
            tiers: TierTable::default(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct FacilityProximityRanker {
    config: RankerConfig,
}

impl FacilityProximityRanker {
    pub fn new(config: RankerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RankerConfig {
        &self.config
    }

    /// Rank facilities around raw coordinates
    pub fn rank_at(
        &self,
        lat: f64,
        lng: f64,
        radius_m: f64,
        facilities: Vec<FacilityRecord>,
    ) -> Result<RankedFacilities, HazardError> {
        let point = Point::new(lat, lng).map_err(|e| HazardError::InvalidQuery(e.to_string()))?;
        self.rank(point, radius_m, facilities)
    }

    pub fn rank(
        &self,
        point: Point,
        radius_m: f64,
        facilities: Vec<FacilityRecord>,
    ) -> Result<RankedFacilities, HazardError> {
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(HazardError::InvalidQuery(format!(
                "radius must be a positive number of meters (got {})",
                radius_m
            )));
        }

        let mut annotated: Vec<RankedFacility> = facilities
            .into_par_iter()
            .filter_map(|record| self.annotate(&point, record))
            .collect();

        annotated.sort_by(|a, b| a.distance_meters.total_cmp(&b.distance_meters));

        let total = annotated.len();
        let mut tiers: [Vec<RankedFacility>; 5] = Default::default();
        for facility in annotated {
            tiers[(facility.priority.rank() - 1) as usize].push(facility);
        }
        let [evacuation, medical, emergency, essential, other] = tiers;

        let summary = FacilitySummary {
            nearest_evacuation: nearest(evacuation.first(), radius_m),
            nearest_hospital: nearest(
                medical
                    .iter()
                    .find(|f| HOSPITAL_TYPES.contains(&f.record.facility_type.as_str())),
                radius_m,
            ),
            nearest_fire_station: nearest(
                emergency
                    .iter()
                    .find(|f| f.record.facility_type == FIRE_STATION_TYPE),
                radius_m,
            ),
        };

        let counts = FacilityCounts {
            evacuation: evacuation.len(),
            medical: medical.len(),
            emergency_services: emergency.len(),
            essential: essential.len(),
            other: other.len(),
            total,
        };

        tracing::debug!(
            "Ranked {} facilities within {} m of ({}, {})",
            total,
            radius_m,
            point.lat(),
            point.lng()
        );

        let cap = self.config.per_tier_cap;
        Ok(RankedFacilities {
            summary,
            evacuation_centers: capped(evacuation, cap),
            medical: capped(medical, cap),
            emergency_services: capped(emergency, cap),
            essential_services: capped(essential, cap),
            other: capped(other, cap),
            counts,
        })
    }

    fn annotate(&self, origin: &Point, record: FacilityRecord) -> Option<RankedFacility> {
        let location = match Point::new(record.lat, record.lng) {
            Ok(p) => p,
            Err(e) => {
                tracing::warn!(facility_id = record.id, "Skipping facility '{}': {}", record.name, e);
                return None;
            }
        };

        let distance = origin.distance_to(&location);
        let tier = self.config.tiers.tier_of(&record.facility_type);

        Some(RankedFacility {
            distance_meters: distance,
            distance_km: (distance / 1000.0 * 100.0).round() / 100.0,
            distance_display: format_distance(distance),
            is_walkable: distance <= self.config.walk_threshold_m,
            priority: tier,
            subcategory: tier.subcategory(),
            record,
        })
    }
}

fn capped(mut list: Vec<RankedFacility>, cap: usize) -> Vec<RankedFacility> {
    list.truncate(cap);
    list
}

fn nearest(facility: Option<&RankedFacility>, radius_m: f64) -> NearestFacility {
    match facility {
        Some(f) => NearestFacility {
            name: f.record.name.clone(),
            distance: f.distance_display.clone(),
            is_walkable: f.is_walkable,
            found: true,
        },
        None => NearestFacility {
            name: format!("None within {}", format_distance(radius_m)),
            distance: "N/A".to_string(),
            is_walkable: false,
            found: false,
        },
    }
}
