//! WGS84 points and great-circle distance.

use serde::{Deserialize, Serialize};

use crate::error::HazardError;

/// Mean Earth radius used for haversine distances (meters)
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// A validated (latitude, longitude) pair in degrees.
///
/// Construct through [`Point::new`]; deserialization goes through the same check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPoint")]
pub struct Point {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize)]
struct RawPoint {
    lat: f64,
    lng: f64,
}

impl TryFrom<RawPoint> for Point {
    type Error = HazardError;

    fn try_from(raw: RawPoint) -> Result<Self, Self::Error> {
        Point::new(raw.lat, raw.lng)
    }
}

impl Point {
    pub fn new(lat: f64, lng: f64) -> Result<Self, HazardError> {
        if !lat.is_finite() || !lng.is_finite() {
            return Err(HazardError::InvalidCoordinate(format!(
                "lat={}, lng={} must be finite numbers",
                lat, lng
            )));
        }
        if !(-90.0..=90.0).contains(&lat) {
            return Err(HazardError::InvalidCoordinate(format!(
                "latitude {} outside [-90, 90]",
                lat
            )));
        }
        if !(-180.0..=180.0).contains(&lng) {
            return Err(HazardError::InvalidCoordinate(format!(
                "longitude {} outside [-180, 180]",
                lng
            )));
        }
        Ok(Self { lat, lng })
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// Great-circle distance to `other` in meters
    pub fn distance_to(&self, other: &Point) -> f64 {
        haversine_distance(self.lat, self.lng, other.lat, other.lng)
    }
}

/// Haversine distance between two points (meters)
pub fn haversine_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let lat1_rad = lat1.to_radians();
    let lat2_rad = lat2.to_radians();
    let delta_lat = (lat2 - lat1).to_radians();
    let delta_lon = (lon2 - lon1).to_radians();

    let a = (delta_lat / 2.0).sin().powi(2)
        + lat1_rad.cos() * lat2_rad.cos() * (delta_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().asin();

    EARTH_RADIUS_M * c
}

/// Display string for a distance: whole meters below 1 km, else km with one decimal
pub fn format_distance(meters: f64) -> String {
    if meters < 1000.0 {
        format!("{} m", meters.trunc() as i64)
    } else {
        format!("{:.1} km", meters / 1000.0)
    }
}
