use crate::risk::{Advisory, AdvisorySeverity, AdvisoryType, Recommendation, RiskAssessment};

/// HTML formatter for risk assessments
pub struct HtmlFormatter;

impl HtmlFormatter {
    /// Format assessment as standalone HTML with embedded CSS
    pub fn format(assessment: &RiskAssessment) -> String {
        let mut html = String::with_capacity(4096);

        html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
        html.push_str("<meta charset=\"UTF-8\">\n");
        html.push_str("<title>Hazard Risk Assessment</title>\n");
        html.push_str("<style>\n");
        html.push_str("body { font-family: system-ui, sans-serif; max-width: 800px; margin: 40px auto; padding: 20px; line-height: 1.6; }\n");
        html.push_str(".score { font-size: 1.5em; font-weight: bold; }\n");
        html.push_str(".advisory { padding: 15px; margin: 15px 0; border-radius: 4px; border-left: 4px solid; }\n");
        html.push_str(".info { background: #d4edda; border-color: #28a745; }\n");
        html.push_str(".caution { background: #fff3cd; border-color: #ffc107; }\n");
        html.push_str(".high { background: #ffe5d0; border-color: #f97316; }\n");
        html.push_str(".very-high, .critical { background: #f8d7da; border-color: #dc3545; }\n");
        html.push_str(".notice { font-weight: 600; }\n");
        html.push_str(".prohibition { color: #dc3545; font-weight: bold; }\n");
        html.push_str(".advisory h3 { margin-top: 0; }\n");
        html.push_str("</style>\n</head>\n<body>\n");

        html.push_str(&format!(
            "<h1 style=\"color: {}\">{} {}</h1>\n",
            assessment.color,
            assessment.icon,
            assessment.category.label()
        ));
        html.push_str(&format!(
            "<p class=\"score\">{:.1}/100</p>\n",
            assessment.score
        ));
        html.push_str(&format!("<p>{}</p>\n", assessment.message));

        html.push_str("<h2>Recommendation</h2>\n");
        html.push_str(&Self::format_recommendation(&assessment.recommendation));

        html.push_str("</body>\n</html>\n");
        html
    }

    /// Advisory markup without the document wrapper
    pub fn format_recommendation(recommendation: &Recommendation) -> String {
        let mut html = String::with_capacity(2048);
        html.push_str(&format!(
            "<p><strong>{}</strong></p>\n",
            recommendation.summary
        ));
        for advisory in &recommendation.details {
            Self::format_advisory(&mut html, advisory);
        }
        html
    }

    fn format_advisory(html: &mut String, advisory: &Advisory) {
        html.push_str(&format!(
            "<div class=\"advisory {}\">\n",
            severity_class(advisory.severity)
        ));
        html.push_str(&format!("<h3>{} {}</h3>\n", advisory.icon, advisory.title));

        if let Some(notice) = &advisory.notice {
            html.push_str(&format!(
                "<p class=\"notice\">{}: {}</p>\n",
                notice.issuer, notice.text
            ));
        }
        if let Some(prohibition) = &advisory.prohibition {
            html.push_str(&format!("<p class=\"prohibition\">{}</p>\n", prohibition));
        }

        html.push_str(&format!("<p><strong>{}</strong></p>\n", advisory.actions_heading));
        // Multiple-hazard impacts read as a plain list, mitigation steps are ordered
        let list_tag = if advisory.advisory_type == AdvisoryType::MultipleHazards {
            "ul"
        } else {
            "ol"
        };
        html.push_str(&format!("<{}>\n", list_tag));
        for action in &advisory.actions {
            html.push_str(&format!(
                "<li><strong>{}:</strong> {}</li>\n",
                action.title, action.detail
            ));
        }
        html.push_str(&format!("</{}>\n", list_tag));

        html.push_str(&format!(
            "<p><em>{}:</em> {}</p>\n",
            advisory.authority.heading, advisory.authority.text
        ));
        html.push_str("</div>\n");
    }
}

fn severity_class(severity: AdvisorySeverity) -> &'static str {
    match severity {
        AdvisorySeverity::Info => "info",
        AdvisorySeverity::Caution => "caution",
        AdvisorySeverity::High => "high",
        AdvisorySeverity::VeryHigh => "very-high",
        AdvisorySeverity::Critical => "critical",
    }
}
