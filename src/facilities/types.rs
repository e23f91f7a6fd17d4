use serde::{Deserialize, Serialize};

/// Raw facility as returned by the provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacilityRecord {
    pub id: i64,
    pub name: String,
    /// OSM-style amenity tag ("school", "hospital", "fire_station", ...)
    pub facility_type: String,
    pub lat: f64,
    pub lng: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Disaster-response priority; lower is more urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PriorityTier {
    Evacuation = 1,
    Medical = 2,
    EmergencyServices = 3,
    Essential = 4,
    Other = 5,
}

impl PriorityTier {
    pub const ALL: [PriorityTier; 5] = [
        PriorityTier::Evacuation,
        PriorityTier::Medical,
        PriorityTier::EmergencyServices,
        PriorityTier::Essential,
        PriorityTier::Other,
    ];

    pub fn rank(&self) -> u8 {
        *self as u8
    }

    pub fn subcategory(&self) -> &'static str {
        match self {
            Self::Evacuation => "evacuation",
            Self::Medical => "medical",
            Self::EmergencyServices => "emergency_services",
            Self::Essential => "essential",
            Self::Other => "other",
        }
    }
}

impl Serialize for PriorityTier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.rank())
    }
}

/// Facility annotated with distance, walkability and tier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacility {
    #[serde(flatten)]
    pub record: FacilityRecord,
    pub distance_meters: f64,
    /// Rounded to 2 decimals
    pub distance_km: f64,
    pub distance_display: String,
    pub is_walkable: bool,
    pub priority: PriorityTier,
    pub subcategory: &'static str,
}

/// Nearest facility of a critical kind, or a "none within radius" placeholder
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NearestFacility {
    pub name: String,
    pub distance: String,
    pub is_walkable: bool,
    pub found: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FacilitySummary {
    pub nearest_evacuation: NearestFacility,
    pub nearest_hospital: NearestFacility,
    pub nearest_fire_station: NearestFacility,
}

/// Untruncated per-tier counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FacilityCounts {
    pub evacuation: usize,
    pub medical: usize,
    pub emergency_services: usize,
    pub essential: usize,
    pub other: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedFacilities {
    pub summary: FacilitySummary,
    pub evacuation_centers: Vec<RankedFacility>,
    pub medical: Vec<RankedFacility>,
    pub emergency_services: Vec<RankedFacility>,
    pub essential_services: Vec<RankedFacility>,
    pub other: Vec<RankedFacility>,
    pub counts: FacilityCounts,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_ranks() {
        assert_eq!(PriorityTier::Evacuation.rank(), 1);
        assert_eq!(PriorityTier::Other.rank(), 5);
        assert!(PriorityTier::Medical < PriorityTier::Essential);
    }

    #[test]
    fn test_record_defaults_optional_fields() {
        let json = r#"{"id": 7, "name": "Brgy Hall", "facility_type": "townhall", "lat": 14.6, "lng": 121.0}"#;
        let record: FacilityRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.category, None);
        assert!(!serde_json::to_string(&record).unwrap().contains("address"));
    }
}
