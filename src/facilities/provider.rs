//! Facility provider contract, a static in-memory provider, and the
//! timeout-bounded nearby-facilities service.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use super::ranker::FacilityProximityRanker;
use super::types::{FacilityRecord, RankedFacilities};
use crate::error::HazardError;
use crate::geo::{haversine_distance, Point};

/// Source of facility records around a point (OSM, a local cache, ...)
#[async_trait]
pub trait FacilityProvider: Send + Sync {
    async fn facilities_within(&self, point: Point, radius_m: f64) -> Result<Vec<FacilityRecord>>;
}

/// Fixed facility list filtered by haversine radius
#[derive(Debug, Default)]
pub struct StaticFacilityProvider {
    records: Vec<FacilityRecord>,
}

impl StaticFacilityProvider {
    pub fn from_records(records: Vec<FacilityRecord>) -> Self {
        Self { records }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read facility data: {:?}", path))?;
        let records: Vec<FacilityRecord> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse facility data: {:?}", path))?;

        tracing::info!("Loaded {} facilities", records.len());
        Ok(Self { records })
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[async_trait]
impl FacilityProvider for StaticFacilityProvider {
    async fn facilities_within(&self, point: Point, radius_m: f64) -> Result<Vec<FacilityRecord>> {
        // Records with bad coordinates pass through; the ranker drops them with a warning
        Ok(self
            .records
            .iter()
            .filter(|r| {
                let d = haversine_distance(point.lat(), point.lng(), r.lat, r.lng);
                !d.is_finite() || d <= radius_m
            })
            .cloned()
            .collect())
    }
}

/// Fetches facilities from a provider and ranks them
pub struct NearbyFacilitiesService {
    provider: Arc<dyn FacilityProvider>,
    ranker: FacilityProximityRanker,
    timeout: Duration,
}

impl NearbyFacilitiesService {
    pub fn new(
        provider: Arc<dyn FacilityProvider>,
        ranker: FacilityProximityRanker,
        timeout: Duration,
    ) -> Self {
        Self {
            provider,
            ranker,
            timeout,
        }
    }

    pub fn ranker(&self) -> &FacilityProximityRanker {
        &self.ranker
    }

    pub async fn nearby(
        &self,
        lat: f64,
        lng: f64,
        radius_m: f64,
    ) -> Result<RankedFacilities, HazardError> {
        let point = Point::new(lat, lng).map_err(|e| HazardError::InvalidQuery(e.to_string()))?;
        if !radius_m.is_finite() || radius_m <= 0.0 {
            return Err(HazardError::InvalidQuery(format!(
                "radius must be a positive number of meters (got {})",
                radius_m
            )));
        }

        let facilities =
            tokio::time::timeout(self.timeout, self.provider.facilities_within(point, radius_m))
                .await
                .map_err(|_| {
                    HazardError::UpstreamUnavailable(format!(
                        "facility provider timed out after {:?}",
                        self.timeout
                    ))
                })?
                .map_err(|e| {
                    HazardError::UpstreamUnavailable(format!("facility provider failed: {}", e))
                })?;

        self.ranker.rank(point, radius_m, facilities)
    }
}
