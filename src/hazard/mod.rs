pub mod levels;
pub mod labels;
pub mod spatial_index;
pub mod geojson;
pub mod lookup;

pub use levels::{HazardType, SusceptibilityLevel};
pub use labels::{display_label, risk_label};
pub use spatial_index::{Geometry, InMemorySpatialIndex, PolygonRecord, SpatialIndex};
pub use geojson::{layer_to_feature_collection, Feature, FeatureCollection, FeatureProperties};
pub use lookup::{HazardLookupService, HazardProfile, HazardReading, DEFAULT_UPSTREAM_TIMEOUT};
