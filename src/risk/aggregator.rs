//! Risk Aggregator - combines three susceptibility levels into one assessment
//!
//! Score: base score × hazard weight per layer, with the debris-flow multiplier
//! applied to the weighted landslide score, summed. The unclamped total decides
//! the category band; the display score is clamped to 100.

use super::advisories::generate_recommendation;
use super::tables::RiskTables;
use super::types::{RiskAssessment, RiskCategory};
use crate::hazard::{HazardProfile, HazardType, SusceptibilityLevel};

/// Weighted contribution of each layer to the total
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreBreakdown {
    pub flood: f64,
    pub landslide: f64,
    pub liquefaction: f64,
}

impl ScoreBreakdown {
    pub fn total(&self) -> f64 {
        self.flood + self.landslide + self.liquefaction
    }
}

#[derive(Debug, Clone, Default)]
pub struct RiskAggregator {
    tables: RiskTables,
}

impl RiskAggregator {
    pub fn new(tables: RiskTables) -> Self {
        Self { tables }
    }

    pub fn tables(&self) -> &RiskTables {
        &self.tables
    }

    /// Weighted per-hazard scores before summing
    pub fn breakdown(
        &self,
        flood: SusceptibilityLevel,
        landslide: SusceptibilityLevel,
        liquefaction: SusceptibilityLevel,
    ) -> ScoreBreakdown {
        let t = &self.tables;
        let weighted = |level: SusceptibilityLevel, hazard: HazardType| {
            t.base_scores.get(level) * t.weights.get(hazard)
        };

        let mut landslide_score = weighted(landslide, HazardType::Landslide);
        if landslide == SusceptibilityLevel::Df {
            landslide_score *= t.debris_flow_multiplier;
        }

        ScoreBreakdown {
            flood: weighted(flood, HazardType::Flood),
            landslide: landslide_score,
            liquefaction: weighted(liquefaction, HazardType::Liquefaction),
        }
    }

    /// Category band for an unclamped total
    pub fn categorize(&self, total: f64) -> RiskCategory {
        let bands = &self.tables.bands;
        match total {
            s if s < bands.moderate => RiskCategory::Low,
            s if s < bands.high => RiskCategory::Moderate,
            s if s < bands.very_high => RiskCategory::High,
            _ => RiskCategory::VeryHigh,
        }
    }

    pub fn assess(
        &self,
        flood: SusceptibilityLevel,
        landslide: SusceptibilityLevel,
        liquefaction: SusceptibilityLevel,
    ) -> RiskAssessment {
        let total = self.breakdown(flood, landslide, liquefaction).total();
        let category = self.categorize(total);

        RiskAssessment {
            score: total.min(100.0),
            raw_score: total,
            category,
            message: category.message().to_string(),
            color: category.color().to_string(),
            icon: category.icon().to_string(),
            safety_level: category.safety_level(),
            recommendation: generate_recommendation(flood, landslide, liquefaction),
        }
    }

    pub fn assess_profile(&self, profile: &HazardProfile) -> RiskAssessment {
        let (flood, landslide, liquefaction) = profile.levels();
        self.assess(flood, landslide, liquefaction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::risk::types::{AdvisoryType, SafetyLevel};
    use approx::assert_abs_diff_eq;
    use SusceptibilityLevel::*;

    const LEVELS: [SusceptibilityLevel; 6] = [Ls, Ms, Hs, Vhs, Df, NoData];

    fn base(level: SusceptibilityLevel) -> f64 {
        match level {
            Ls => 25.0,
            Ms => 50.0,
            Hs => 75.0,
            Vhs | Df => 100.0,
            NoData => 10.0,
        }
    }

    #[test]
    fn test_total_matches_formula_for_all_combinations() {
        let agg = RiskAggregator::default();
        for f in LEVELS {
            for l in LEVELS {
                for q in LEVELS {
                    let multiplier = if l == Df { 1.5 } else { 1.0 };
                    let expected = base(f) * 0.5 + base(l) * 0.3 * multiplier + base(q) * 0.2;
                    let a = agg.assess(f, l, q);
                    assert_eq!(a.raw_score, expected, "{} {} {}", f, l, q);
                    assert_eq!(a.score, expected.min(100.0));
                }
            }
        }
    }

    #[test]
    fn test_flood_vhs_alone_is_high_risk() {
        let a = RiskAggregator::default().assess(Vhs, NoData, NoData);
        assert_abs_diff_eq!(a.raw_score, 55.0, epsilon = 1e-9);
        assert_eq!(a.category, RiskCategory::High);
        assert_eq!(a.safety_level, SafetyLevel::Warning);
    }

    #[test]
    fn test_debris_flow_multiplier_after_weighting() {
        let agg = RiskAggregator::default();
        let b = agg.breakdown(NoData, Df, NoData);
        assert_abs_diff_eq!(b.landslide, 45.0, epsilon = 1e-9);

        let a = agg.assess(NoData, Df, NoData);
        assert_abs_diff_eq!(a.raw_score, 52.0, epsilon = 1e-9);
        assert_eq!(a.category, RiskCategory::High);
        assert!(a.recommendation.summary.contains("DEBRIS FLOW ZONE"));
    }

    #[test]
    fn test_three_hazards_very_high() {
        let a = RiskAggregator::default().assess(Vhs, Vhs, Hs);
        assert_abs_diff_eq!(a.raw_score, 95.0, epsilon = 1e-9);
        assert_eq!(a.category, RiskCategory::VeryHigh);
        assert_eq!(a.safety_level, SafetyLevel::Danger);
        assert_eq!(a.recommendation.details.len(), 4);
        assert_eq!(
            a.recommendation.details[3].advisory_type,
            AdvisoryType::MultipleHazards
        );
    }

    #[test]
    fn test_all_no_data_is_low_risk() {
        let a = RiskAggregator::default().assess(NoData, NoData, NoData);
        assert_abs_diff_eq!(a.raw_score, 10.0, epsilon = 1e-9);
        assert_eq!(a.category, RiskCategory::Low);
        assert_eq!(a.safety_level, SafetyLevel::Safe);
    }

    #[test]
    fn test_band_boundaries_are_lower_inclusive() {
        let agg = RiskAggregator::default();
        assert_eq!(agg.categorize(24.999), RiskCategory::Low);
        assert_eq!(agg.categorize(25.0), RiskCategory::Moderate);
        assert_eq!(agg.categorize(50.0), RiskCategory::High);
        assert_eq!(agg.categorize(75.0), RiskCategory::VeryHigh);
        assert_eq!(agg.categorize(140.0), RiskCategory::VeryHigh);
    }

    #[test]
    fn test_display_score_clamped_raw_retained() {
        let mut tables = RiskTables::default();
        tables.debris_flow_multiplier = 3.0;
        let a = RiskAggregator::new(tables).assess(Vhs, Df, Hs);
        // 50 + 100*0.3*3 + 15 = 155
        assert_abs_diff_eq!(a.raw_score, 155.0, epsilon = 1e-9);
        assert_eq!(a.score, 100.0);
    }

    #[test]
    fn test_substituted_tables() {
        let mut tables = RiskTables::default();
        tables.base_scores.none = 0.0;
        let a = RiskAggregator::new(tables).assess(NoData, NoData, NoData);
        assert_eq!(a.raw_score, 0.0);
    }

    #[test]
    fn test_assess_is_idempotent() {
        let agg = RiskAggregator::default();
        let first = serde_json::to_string(&agg.assess(Hs, Df, Ms)).unwrap();
        let second = serde_json::to_string(&agg.assess(Hs, Df, Ms)).unwrap();
        assert_eq!(first, second);
    }
}
