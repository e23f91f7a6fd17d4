use crate::risk::{Advisory, Recommendation, RiskAssessment};

/// Markdown formatter for risk assessments
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Format a full assessment as markdown
    pub fn format(assessment: &RiskAssessment) -> String {
        let mut md = String::with_capacity(2048);

        md.push_str(&format!(
            "# {} {}\n\n",
            assessment.icon,
            assessment.category.label()
        ));
        md.push_str(&format!("**Risk Score:** {:.1}/100\n\n", assessment.score));
        md.push_str(&format!(
            "{} ({:?})\n\n",
            assessment.message, assessment.safety_level
        ));

        md.push_str("## Recommendation\n\n");
        md.push_str(&Self::format_recommendation(&assessment.recommendation));
        md
    }

    /// Summary line plus each advisory as a section
    pub fn format_recommendation(recommendation: &Recommendation) -> String {
        let mut md = String::with_capacity(1024);
        md.push_str(&format!("**{}**\n\n", recommendation.summary));
        for advisory in &recommendation.details {
            Self::format_advisory(&mut md, advisory);
        }
        md
    }

    fn format_advisory(md: &mut String, advisory: &Advisory) {
        md.push_str(&format!("### {} {}\n\n", advisory.icon, advisory.title));

        if let Some(notice) = &advisory.notice {
            md.push_str(&format!("> **{}:** {}\n\n", notice.issuer, notice.text));
        }
        if let Some(prohibition) = &advisory.prohibition {
            md.push_str(&format!("🚫 **{}**\n\n", prohibition));
        }

        md.push_str(&format!("**{}**\n\n", advisory.actions_heading));
        for action in &advisory.actions {
            md.push_str(&format!("- **{}:** {}\n", action.title, action.detail));
        }
        md.push('\n');

        md.push_str(&format!(
            "*{}:* {}\n\n",
            advisory.authority.heading, advisory.authority.text
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hazard::SusceptibilityLevel::*;
    use crate::risk::RiskAggregator;

    #[test]
    fn test_format_high_risk() {
        let assessment = RiskAggregator::default().assess(Vhs, NoData, NoData);
        let md = MarkdownFormatter::format(&assessment);

        assert!(md.starts_with("# ⚠️ HIGH RISK"));
        assert!(md.contains("**Risk Score:** 55.0/100"));
        assert!(md.contains("### 🌊 VERY HIGH FLOOD RISK"));
        assert!(md.contains("> **DPWH/PAGASA ADVISORY:**"));
        assert!(md.contains("- **Minimum Elevation:**"));
    }

    #[test]
    fn test_prohibition_rendered() {
        let assessment = RiskAggregator::default().assess(NoData, Df, NoData);
        let md = MarkdownFormatter::format_recommendation(&assessment.recommendation);
        assert!(md.contains("🚫 **CONSTRUCTION PROHIBITED."));
        assert!(md.contains("*Mandatory:*"));
    }
}
