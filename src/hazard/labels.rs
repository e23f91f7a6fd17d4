//! Level → text mappings shown next to each hazard reading.
//!
//! Two registers: the technical display name of the source classification, and a
//! citizen-facing description of what the level means on the ground.

use super::levels::{HazardType, SusceptibilityLevel};

pub const NO_DATA_LABEL: &str = "No Data Available";
pub const NO_DATA_RISK_LABEL: &str = "Not at risk - No hazard data for this area (safe zone)";
pub const UNKNOWN_RISK_LABEL: &str = "Risk level unknown";

/// Technical display name of a susceptibility class
pub fn display_label(level: SusceptibilityLevel) -> &'static str {
    match level {
        SusceptibilityLevel::Ls => "Low Susceptibility",
        SusceptibilityLevel::Ms => "Moderate Susceptibility",
        SusceptibilityLevel::Hs => "High Susceptibility",
        SusceptibilityLevel::Vhs => "Very High Susceptibility",
        SusceptibilityLevel::Df => "Debris Flow",
        SusceptibilityLevel::NoData => NO_DATA_LABEL,
    }
}

/// Citizen-friendly description of a level on a given layer
pub fn risk_label(level: SusceptibilityLevel, hazard: HazardType) -> &'static str {
    use HazardType::*;
    use SusceptibilityLevel::*;

    match (hazard, level) {
        (_, NoData) => NO_DATA_RISK_LABEL,

        (Flood, Ls) => "Low risk - Flooding unlikely in this area",
        (Flood, Ms) => "Moderate risk - Minor flooding possible during heavy rain",
        (Flood, Hs) => "High risk - Frequent flooding expected during typhoons",
        (Flood, Vhs) => "Very high risk - Severe flooding likely, area may become submerged",

        (Landslide, Ls) => "Low risk - Stable ground, slopes are secure",
        (Landslide, Ms) => "Moderate risk - Some slope movement possible during heavy rain",
        (Landslide, Hs) => "High risk - Slopes may collapse during typhoons or earthquakes",
        (Landslide, Vhs) => "Very high risk - Steep unstable slopes, landslides expected during storms",
        (Landslide, Df) => "CRITICAL RISK - Debris Flow Zone: Massive fast-moving landslides carrying rocks, mud, and debris. Extremely dangerous during heavy rain. EVACUATION REQUIRED.",

        (Liquefaction, Ls) => "Low risk - Soil remains stable during earthquakes",
        (Liquefaction, Ms) => "Moderate risk - During strong earthquakes, ground may shift slightly",
        (Liquefaction, Hs) => "High risk - During earthquakes, ground may turn soft like quicksand, causing buildings to sink or tilt",

        _ => UNKNOWN_RISK_LABEL,
    }
}
