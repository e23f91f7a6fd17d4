//! Hazard lookup service
//!
//! Resolves the susceptibility level of each hazard layer at a point through the
//! spatial collaborator. Overlapping source polygons are resolved first-match:
//! the first record yielded by the store wins and the overlap is logged.

use serde::{Serialize, Serializer};
use std::sync::Arc;
use std::time::Duration;

use super::geojson::{layer_to_feature_collection, FeatureCollection};
use super::labels::{display_label, risk_label};
use super::levels::{HazardType, SusceptibilityLevel};
use super::spatial_index::{PolygonRecord, SpatialIndex};
use crate::error::HazardError;
use crate::geo::Point;

pub const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(5);

/// Level and labels for one hazard layer at a point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardReading {
    #[serde(skip)]
    pub hazard: HazardType,
    /// Stored code, `null` when no polygon contains the point
    #[serde(serialize_with = "serialize_level_code")]
    pub level: SusceptibilityLevel,
    pub label: &'static str,
    pub risk_label: &'static str,
}

fn serialize_level_code<S: Serializer>(
    level: &SusceptibilityLevel,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match level.code() {
        Some(code) => serializer.serialize_str(code),
        None => serializer.serialize_none(),
    }
}

impl HazardReading {
    pub fn new(hazard: HazardType, level: SusceptibilityLevel) -> Self {
        Self {
            hazard,
            level,
            label: display_label(level),
            risk_label: risk_label(level, hazard),
        }
    }
}

/// Readings for all three layers at one point
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HazardProfile {
    pub flood: HazardReading,
    pub landslide: HazardReading,
    pub liquefaction: HazardReading,
}

impl HazardProfile {
    pub fn from_levels(
        flood: SusceptibilityLevel,
        landslide: SusceptibilityLevel,
        liquefaction: SusceptibilityLevel,
    ) -> Self {
        Self {
            flood: HazardReading::new(HazardType::Flood, flood),
            landslide: HazardReading::new(HazardType::Landslide, landslide),
            liquefaction: HazardReading::new(HazardType::Liquefaction, liquefaction),
        }
    }

    /// (flood, landslide, liquefaction) in aggregator argument order
    pub fn levels(&self) -> (SusceptibilityLevel, SusceptibilityLevel, SusceptibilityLevel) {
        (self.flood.level, self.landslide.level, self.liquefaction.level)
    }

    pub fn get(&self, hazard: HazardType) -> &HazardReading {
        match hazard {
            HazardType::Flood => &self.flood,
            HazardType::Landslide => &self.landslide,
            HazardType::Liquefaction => &self.liquefaction,
        }
    }
}

pub struct HazardLookupService {
    index: Arc<dyn SpatialIndex>,
    timeout: Duration,
}

impl HazardLookupService {
    pub fn new(index: Arc<dyn SpatialIndex>, timeout: Duration) -> Self {
        Self { index, timeout }
    }

    pub fn with_default_timeout(index: Arc<dyn SpatialIndex>) -> Self {
        Self::new(index, DEFAULT_UPSTREAM_TIMEOUT)
    }

    /// Susceptibility level of `hazard` at `point`, `NoData` when nothing contains it
    pub async fn lookup(
        &self,
        point: Point,
        hazard: HazardType,
    ) -> Result<SusceptibilityLevel, HazardError> {
        let records = tokio::time::timeout(self.timeout, self.index.find_containing(point, hazard))
            .await
            .map_err(|_| {
                HazardError::UpstreamUnavailable(format!(
                    "{} lookup timed out after {:?}",
                    hazard, self.timeout
                ))
            })?
            .map_err(|e| {
                HazardError::UpstreamUnavailable(format!("{} lookup failed: {}", hazard, e))
            })?;

        if records.len() > 1 {
            // Overlapping source polygons: keep query order, flag for the data owner
            tracing::warn!(
                hazard = %hazard,
                lat = point.lat(),
                lng = point.lng(),
                polygon_ids = ?records.iter().map(|r| r.id).collect::<Vec<_>>(),
                "Overlapping {} polygons at point; using first match",
                hazard
            );
        }

        Ok(records
            .first()
            .map(|record| level_of(record, hazard))
            .unwrap_or(SusceptibilityLevel::NoData))
    }

    /// Look up all three layers concurrently
    pub async fn lookup_all(&self, point: Point) -> Result<HazardProfile, HazardError> {
        let (flood, landslide, liquefaction) = tokio::try_join!(
            self.lookup(point, HazardType::Flood),
            self.lookup(point, HazardType::Landslide),
            self.lookup(point, HazardType::Liquefaction),
        )?;

        tracing::debug!(
            "Hazard levels at ({}, {}): flood={}, landslide={}, liquefaction={}",
            point.lat(),
            point.lng(),
            flood,
            landslide,
            liquefaction
        );

        Ok(HazardProfile::from_levels(flood, landslide, liquefaction))
    }

    /// Validate raw coordinates, then look up all layers
    pub async fn lookup_all_at(&self, lat: f64, lng: f64) -> Result<HazardProfile, HazardError> {
        let point = Point::new(lat, lng)?;
        self.lookup_all(point).await
    }

    /// Citizen-facing description of `level` on `hazard`
    pub fn label(level: SusceptibilityLevel, hazard: HazardType) -> &'static str {
        risk_label(level, hazard)
    }

    /// Whole layer as a GeoJSON FeatureCollection
    pub async fn export_layer(&self, hazard: HazardType) -> Result<FeatureCollection, HazardError> {
        let records = tokio::time::timeout(self.timeout, self.index.layer_records(hazard))
            .await
            .map_err(|_| {
                HazardError::UpstreamUnavailable(format!(
                    "{} layer export timed out after {:?}",
                    hazard, self.timeout
                ))
            })?
            .map_err(|e| {
                HazardError::UpstreamUnavailable(format!("{} layer export failed: {}", hazard, e))
            })?;

        tracing::debug!("Exporting {} {} polygons as GeoJSON", records.len(), hazard);
        Ok(layer_to_feature_collection(&records))
    }
}

fn level_of(record: &PolygonRecord, hazard: HazardType) -> SusceptibilityLevel {
    match SusceptibilityLevel::from_code(&record.susceptibility) {
        Some(level) => {
            if !level.valid_for(hazard) {
                tracing::warn!(
                    polygon_id = record.id,
                    "Polygon {} on {} layer carries {} (debris flow is a landslide class)",
                    record.id,
                    hazard,
                    level
                );
            }
            level
        }
        None => {
            tracing::warn!(
                polygon_id = record.id,
                "Unrecognised susceptibility code '{}' on {} polygon {}; treating as no data",
                record.susceptibility,
                hazard,
                record.id
            );
            SusceptibilityLevel::NoData
        }
    }
}
