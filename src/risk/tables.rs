//! Scoring tables for the risk aggregator
//!
//! Weights, base scores, the debris-flow multiplier and the category band
//! thresholds travel together as one [`RiskTables`] value. `Default` carries the
//! calibrated production values; JSON overrides are validated on load.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::hazard::{HazardType, SusceptibilityLevel};

/// Per-hazard weight in the aggregate score. Must sum to 1.0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardWeights {
    pub flood: f64,
    pub landslide: f64,
    pub liquefaction: f64,
}

impl HazardWeights {
    pub fn get(&self, hazard: HazardType) -> f64 {
        match hazard {
            HazardType::Flood => self.flood,
            HazardType::Landslide => self.landslide,
            HazardType::Liquefaction => self.liquefaction,
        }
    }

    pub fn sum(&self) -> f64 {
        self.flood + self.landslide + self.liquefaction
    }
}

/// Base score (0-100) per susceptibility level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct BaseScores {
    pub ls: f64,
    pub ms: f64,
    pub hs: f64,
    pub vhs: f64,
    pub df: f64,
    /// No containing polygon (assumed mostly safe)
    pub none: f64,
}

impl BaseScores {
    pub fn get(&self, level: SusceptibilityLevel) -> f64 {
        match level {
            SusceptibilityLevel::Ls => self.ls,
            SusceptibilityLevel::Ms => self.ms,
            SusceptibilityLevel::Hs => self.hs,
            SusceptibilityLevel::Vhs => self.vhs,
            SusceptibilityLevel::Df => self.df,
            SusceptibilityLevel::NoData => self.none,
        }
    }
}

/// Lower bounds (inclusive) of the upper three category bands
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub moderate: f64,
    pub high: f64,
    pub very_high: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTables {
    pub weights: HazardWeights,
    pub base_scores: BaseScores,
    /// Applied to the weighted landslide score when the level is DF
    pub debris_flow_multiplier: f64,
    pub bands: BandThresholds,
}

impl Default for RiskTables {
    fn default() -> Self {
        Self {
            // Flood is the most frequent disaster, liquefaction only follows earthquakes
            weights: HazardWeights {
                flood: 0.5,
                landslide: 0.3,
                liquefaction: 0.2,
            },
            base_scores: BaseScores {
                ls: 25.0,
                ms: 50.0,
                hs: 75.0,
                vhs: 100.0,
                df: 100.0,
                none: 10.0,
            },
            debris_flow_multiplier: 1.5,
            bands: BandThresholds {
                moderate: 25.0,
                high: 50.0,
                very_high: 75.0,
            },
        }
    }
}

impl RiskTables {
    /// Load tables from a JSON file and validate them
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read risk tables file: {:?}", path))?;

        let tables: RiskTables = serde_json::from_str(&contents)
            .with_context(|| "Failed to parse risk tables JSON")?;

        tables.validate()?;
        Ok(tables)
    }

    pub fn validate(&self) -> Result<()> {
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > 1e-9 {
            anyhow::bail!("Hazard weights must sum to 1.0 (got {})", sum);
        }

        for hazard in HazardType::ALL {
            if self.weights.get(hazard) < 0.0 {
                anyhow::bail!("Weight for {} must not be negative", hazard);
            }
        }

        if self.debris_flow_multiplier < 1.0 {
            anyhow::bail!(
                "Debris flow multiplier must be >= 1.0 (got {})",
                self.debris_flow_multiplier
            );
        }

        let b = &self.bands;
        if !(b.moderate < b.high && b.high < b.very_high) {
            anyhow::bail!(
                "Band thresholds must be ascending (got {}, {}, {})",
                b.moderate,
                b.high,
                b.very_high
            );
        }

        Ok(())
    }
}
