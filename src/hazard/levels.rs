use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Hazard layers combined by the risk aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HazardType {
    Flood,
    Landslide,
    Liquefaction,
}

impl HazardType {
    /// Fixed evaluation order; advisories and API output follow it
    pub const ALL: [HazardType; 3] = [Self::Flood, Self::Landslide, Self::Liquefaction];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Flood => "flood",
            Self::Landslide => "landslide",
            Self::Liquefaction => "liquefaction",
        }
    }
}

impl fmt::Display for HazardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HazardType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "flood" => Ok(Self::Flood),
            "landslide" => Ok(Self::Landslide),
            "liquefaction" => Ok(Self::Liquefaction),
            other => Err(format!(
                "Unknown hazard type '{}'. Must be one of: flood, landslide, liquefaction",
                other
            )),
        }
    }
}

/// Ordinal susceptibility tag for one hazard layer at one point.
///
/// `NoData` means no polygon contained the point. It is scored as low-but-nonzero,
/// not as risk-free. `Df` (debris flow) only occurs on landslide layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SusceptibilityLevel {
    #[serde(rename = "LS")]
    Ls,
    #[serde(rename = "MS")]
    Ms,
    #[serde(rename = "HS")]
    Hs,
    #[serde(rename = "VHS")]
    Vhs,
    #[serde(rename = "DF")]
    Df,
    #[serde(rename = "NONE")]
    NoData,
}

impl SusceptibilityLevel {
    /// Source code as stored in the hazard layers; `None` for `NoData`
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Ls => Some("LS"),
            Self::Ms => Some("MS"),
            Self::Hs => Some("HS"),
            Self::Vhs => Some("VHS"),
            Self::Df => Some("DF"),
            Self::NoData => None,
        }
    }

    /// Parse a stored susceptibility code (case-insensitive)
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_uppercase().as_str() {
            "LS" => Some(Self::Ls),
            "MS" => Some(Self::Ms),
            "HS" => Some(Self::Hs),
            "VHS" => Some(Self::Vhs),
            "DF" => Some(Self::Df),
            _ => None,
        }
    }

    pub fn is_data(&self) -> bool {
        !matches!(self, Self::NoData)
    }

    /// Whether this level can legitimately appear on the given layer
    pub fn valid_for(&self, hazard: HazardType) -> bool {
        !matches!(self, Self::Df) || hazard == HazardType::Landslide
    }
}

impl fmt::Display for SusceptibilityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code().unwrap_or("NONE"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_code_case_insensitive() {
        assert_eq!(SusceptibilityLevel::from_code("vhs"), Some(SusceptibilityLevel::Vhs));
        assert_eq!(SusceptibilityLevel::from_code(" DF "), Some(SusceptibilityLevel::Df));
        assert_eq!(SusceptibilityLevel::from_code("XX"), None);
        assert_eq!(SusceptibilityLevel::from_code(""), None);
    }

    #[test]
    fn test_debris_flow_only_valid_for_landslide() {
        assert!(SusceptibilityLevel::Df.valid_for(HazardType::Landslide));
        assert!(!SusceptibilityLevel::Df.valid_for(HazardType::Flood));
        assert!(SusceptibilityLevel::Hs.valid_for(HazardType::Liquefaction));
    }

    #[test]
    fn test_hazard_type_parse() {
        assert_eq!("Flood".parse::<HazardType>(), Ok(HazardType::Flood));
        assert!("volcano".parse::<HazardType>().is_err());
    }

    #[test]
    fn test_serde_codes() {
        let json = serde_json::to_string(&SusceptibilityLevel::Vhs).unwrap();
        assert_eq!(json, "\"VHS\"");
        let json = serde_json::to_string(&HazardType::Liquefaction).unwrap();
        assert_eq!(json, "\"liquefaction\"");
    }
}
