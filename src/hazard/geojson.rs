//! GeoJSON export of a stored hazard layer.

use serde::Serialize;

use super::spatial_index::{Geometry, PolygonRecord};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub features: Vec<Feature>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Feature {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub properties: FeatureProperties,
    pub geometry: Geometry,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeatureProperties {
    pub susceptibility: String,
    pub original_code: Option<String>,
    pub shape_area: Option<f64>,
    pub dataset_id: i64,
}

impl From<&PolygonRecord> for Feature {
    fn from(record: &PolygonRecord) -> Self {
        Feature {
            kind: "Feature",
            properties: FeatureProperties {
                susceptibility: record.susceptibility.clone(),
                original_code: record.original_code.clone(),
                shape_area: record.shape_area,
                dataset_id: record.dataset_id,
            },
            geometry: record.geometry.clone(),
        }
    }
}

pub fn layer_to_feature_collection(records: &[PolygonRecord]) -> FeatureCollection {
    FeatureCollection {
        kind: "FeatureCollection",
        features: records.iter().map(Feature::from).collect(),
    }
}
