//! Facility type → priority tier table

use rustc_hash::FxHashMap;

use super::types::PriorityTier;

const EVACUATION_TYPES: &[&str] = &["school", "community_centre", "kindergarten", "college", "university"];
const MEDICAL_TYPES: &[&str] = &["hospital", "clinic", "doctors", "pharmacy"];
const EMERGENCY_TYPES: &[&str] = &["fire_station", "police"];
const ESSENTIAL_TYPES: &[&str] = &["marketplace", "supermarket", "convenience"];

/// Maps facility types to tiers; unknown types fall into `Other`
#[derive(Debug, Clone)]
pub struct TierTable {
    tiers: FxHashMap<String, PriorityTier>,
}

impl Default for TierTable {
    fn default() -> Self {
        let mut table = Self::empty();
        for (types, tier) in [
            (EVACUATION_TYPES, PriorityTier::Evacuation),
            (MEDICAL_TYPES, PriorityTier::Medical),
            (EMERGENCY_TYPES, PriorityTier::EmergencyServices),
            (ESSENTIAL_TYPES, PriorityTier::Essential),
        ] {
            for facility_type in types {
                table.insert(facility_type, tier);
            }
        }
        table
    }
}

impl TierTable {
    pub fn empty() -> Self {
        Self {
            tiers: FxHashMap::default(),
        }
    }

    pub fn insert(&mut self, facility_type: &str, tier: PriorityTier) {
        self.tiers.insert(facility_type.to_string(), tier);
    }

    pub fn tier_of(&self, facility_type: &str) -> PriorityTier {
        self.tiers
            .get(facility_type)
            .copied()
            .unwrap_or(PriorityTier::Other)
    }
}
