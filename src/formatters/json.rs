use crate::risk::RiskAssessment;
use serde_json;

/// JSON formatter for risk assessments
pub struct JsonFormatter;

impl JsonFormatter {
    pub fn format(assessment: &RiskAssessment) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(assessment)
    }

    /// Compact JSON (no whitespace)
    pub fn format_compact(assessment: &RiskAssessment) -> Result<String, serde_json::Error> {
        serde_json::to_string(assessment)
    }
}
