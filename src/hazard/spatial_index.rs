//! Spatial collaborator contract and an in-memory implementation.
//!
//! Production deployments back [`SpatialIndex`] with a GIS store. The in-memory
//! index answers the same queries by ray casting over stored polygons and keeps
//! insertion order as query order, so first-match behaviour is reproducible.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::levels::HazardType;
use crate::geo::Point;

/// Polygon geometry in GeoJSON layout: rings of `[lng, lat]` positions,
/// first ring outer, remaining rings holes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "coordinates")]
pub enum Geometry {
    Polygon(Vec<Vec<[f64; 2]>>),
    MultiPolygon(Vec<Vec<Vec<[f64; 2]>>>),
}

impl Geometry {
    pub fn contains(&self, point: &Point) -> bool {
        match self {
            Geometry::Polygon(rings) => polygon_contains(rings, point),
            Geometry::MultiPolygon(polygons) => {
                polygons.iter().any(|rings| polygon_contains(rings, point))
            }
        }
    }
}

fn polygon_contains(rings: &[Vec<[f64; 2]>], point: &Point) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    ring_contains(outer, point) && !holes.iter().any(|hole| ring_contains(hole, point))
}

/// Even-odd ray casting along +longitude
fn ring_contains(ring: &[[f64; 2]], point: &Point) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let (x, y) = (point.lng(), point.lat());
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let [xi, yi] = ring[i];
        let [xj, yj] = ring[j];
        if (yi > y) != (yj > y) && x < (xj - xi) * (y - yi) / (yj - yi) + xi {
            inside = !inside;
        }
        j = i;
    }
    inside
}

/// One stored susceptibility polygon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolygonRecord {
    pub id: i64,
    pub layer: HazardType,
    /// Susceptibility code as stored (LS/MS/HS/VHS/DF)
    pub susceptibility: String,
    #[serde(default)]
    pub original_code: Option<String>,
    #[serde(default)]
    pub shape_area: Option<f64>,
    /// Owning dataset
    pub dataset_id: i64,
    pub geometry: Geometry,
}

#[async_trait]
pub trait SpatialIndex: Send + Sync {
    /// All polygons of `layer` containing `point`, in storage/query order
    async fn find_containing(&self, point: Point, layer: HazardType) -> Result<Vec<PolygonRecord>>;

    /// Every polygon of `layer`, in storage order
    async fn layer_records(&self, layer: HazardType) -> Result<Vec<PolygonRecord>>;
}

#[derive(Debug, Default)]
pub struct InMemorySpatialIndex {
    records: Vec<PolygonRecord>,
}

impl InMemorySpatialIndex {
    pub fn from_records(records: Vec<PolygonRecord>) -> Self {
        Self { records }
    }

    /// Load polygon records from a JSON array file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read hazard polygons: {:?}", path))?;
        let records: Vec<PolygonRecord> = serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse hazard polygons: {:?}", path))?;

        for hazard in HazardType::ALL {
            let n = records.iter().filter(|r| r.layer == hazard).count();
            tracing::info!("Loaded {} {} polygons", n, hazard);
        }

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
impl SpatialIndex for InMemorySpatialIndex {
    async fn find_containing(&self, point: Point, layer: HazardType) -> Result<Vec<PolygonRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.layer == layer && r.geometry.contains(&point))
            .cloned()
            .collect())
    }

    async fn layer_records(&self, layer: HazardType) -> Result<Vec<PolygonRecord>> {
        Ok(self.records.iter().filter(|r| r.layer == layer).cloned().collect())
    }
}
