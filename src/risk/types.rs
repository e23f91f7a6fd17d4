use serde::{Deserialize, Serialize};

use crate::hazard::HazardType;

/// Complete risk assessment for one point
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    /// Display score, `min(raw_score, 100)`
    pub score: f64,
    /// Unclamped weighted total
    pub raw_score: f64,
    pub category: RiskCategory,
    pub message: String,
    pub color: String, // "#10b981"
    pub icon: String,  // "✅", "⚠️", "🚫"
    pub safety_level: SafetyLevel,
    pub recommendation: Recommendation,
}

/// Overall risk band, decided on the unclamped total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "LOW RISK")]
    Low,
    #[serde(rename = "MODERATE RISK")]
    Moderate,
    #[serde(rename = "HIGH RISK")]
    High,
    #[serde(rename = "VERY HIGH RISK")]
    VeryHigh,
}

impl RiskCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "LOW RISK",
            Self::Moderate => "MODERATE RISK",
            Self::High => "HIGH RISK",
            Self::VeryHigh => "VERY HIGH RISK",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::Low => "Generally safe for development",
            Self::Moderate => "Acceptable with precautions",
            Self::High => "Significant hazards present",
            Self::VeryHigh => "Not recommended for development",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Low => "#10b981",      // Green
            Self::Moderate => "#f59e0b", // Yellow
            Self::High => "#f97316",     // Orange
            Self::VeryHigh => "#ef4444", // Red
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Self::Low => "✅",
            Self::Moderate | Self::High => "⚠️",
            Self::VeryHigh => "🚫",
        }
    }

    pub fn safety_level(&self) -> SafetyLevel {
        match self {
            Self::Low => SafetyLevel::Safe,
            Self::Moderate => SafetyLevel::Caution,
            Self::High => SafetyLevel::Warning,
            Self::VeryHigh => SafetyLevel::Danger,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SafetyLevel {
    Safe,
    Caution,
    Warning,
    Danger,
}

/// Summary line plus ordered advisories
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub summary: String,
    pub details: Vec<Advisory>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisoryType {
    /// No hazard at MS or above
    LowExposure,
    /// At least one hazard at MS, none high
    StandardPrecautions,
    /// One qualifying high-risk hazard
    Hazard,
    /// Two or more qualifying hazards
    MultipleHazards,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdvisorySeverity {
    Info,
    Caution,
    High,
    VeryHigh,
    Critical,
}

/// Structured advisory; rendering is left to `formatters`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Advisory {
    pub advisory_type: AdvisoryType,
    pub hazard: Option<HazardType>,
    pub severity: AdvisorySeverity,
    pub icon: String,
    /// Short caption, joined into the recommendation summary
    pub caption: String,
    /// Heading shown above the advisory body
    pub title: String,
    pub notice: Option<AgencyNotice>,
    /// Set when no mitigation makes construction acceptable
    pub prohibition: Option<String>,
    pub actions_heading: String,
    pub actions: Vec<MitigationAction>,
    pub authority: AuthorityNote,
}

impl Advisory {
    pub fn construction_prohibited(&self) -> bool {
        self.prohibition.is_some()
    }
}

/// Advisory issued by the responsible agency ("PHIVOLCS ADVISORY", ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencyNotice {
    pub issuer: String,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MitigationAction {
    pub title: String,
    pub detail: String,
}

/// Required clearance or authority contact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorityNote {
    pub heading: String, // "Required", "Mandatory", "Required Permits"
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tokens() {
        assert_eq!(RiskCategory::High.safety_level(), SafetyLevel::Warning);
        assert_eq!(RiskCategory::VeryHigh.icon(), "🚫");
        assert_eq!(RiskCategory::Low.color(), "#10b981");
    }

    #[test]
    fn test_serde_names() {
        assert_eq!(serde_json::to_string(&RiskCategory::VeryHigh).unwrap(), "\"VERY HIGH RISK\"");
        assert_eq!(serde_json::to_string(&SafetyLevel::Danger).unwrap(), "\"DANGER\"");
        assert_eq!(
            serde_json::to_string(&AdvisoryType::MultipleHazards).unwrap(),
            "\"multiple_hazards\""
        );
    }

    #[test]
    fn test_severity_ordering() {
        assert!(AdvisorySeverity::Critical > AdvisorySeverity::VeryHigh);
        assert!(AdvisorySeverity::Info < AdvisorySeverity::Caution);
    }
}
