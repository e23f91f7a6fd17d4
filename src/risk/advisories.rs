//! Rule-driven recommendation generation
//!
//! Which advisories apply is decided by the high-risk set (flood HS/VHS,
//! landslide HS/VHS/DF, liquefaction HS). Advisory content follows PHIVOLCS,
//! PAGASA and DPWH guidance, the National Building Code (PD 1096) and the
//! National Structural Code of the Philippines (NSCP).

use smallvec::SmallVec;

use super::types::{
    Advisory, AdvisorySeverity, AdvisoryType, AgencyNotice, AuthorityNote, MitigationAction,
    Recommendation,
};
use crate::hazard::{HazardType, SusceptibilityLevel};

pub const SUMMARY_SEPARATOR: &str = " + ";

/// Hazards at a level that requires a dedicated advisory, in flood/landslide/liquefaction order
pub fn high_risk_set(
    flood: SusceptibilityLevel,
    landslide: SusceptibilityLevel,
    liquefaction: SusceptibilityLevel,
) -> SmallVec<[HazardType; 3]> {
    use SusceptibilityLevel::*;

    let mut set = SmallVec::new();
    if matches!(flood, Hs | Vhs) {
        set.push(HazardType::Flood);
    }
    if matches!(landslide, Hs | Vhs | Df) {
        set.push(HazardType::Landslide);
    }
    if matches!(liquefaction, Hs) {
        set.push(HazardType::Liquefaction);
    }
    set
}

pub fn generate_recommendation(
    flood: SusceptibilityLevel,
    landslide: SusceptibilityLevel,
    liquefaction: SusceptibilityLevel,
) -> Recommendation {
    let high_risks = high_risk_set(flood, landslide, liquefaction);

    if high_risks.is_empty() {
        let any_moderate = [flood, landslide, liquefaction]
            .iter()
            .any(|l| *l == SusceptibilityLevel::Ms);
        let advisory = if any_moderate {
            standard_precautions_advisory()
        } else {
            low_exposure_advisory()
        };
        return Recommendation {
            summary: advisory.caption.clone(),
            details: vec![advisory],
        };
    }

    let mut details: Vec<Advisory> = high_risks
        .iter()
        .map(|hazard| match hazard {
            HazardType::Flood => flood_advisory(flood),
            HazardType::Landslide => landslide_advisory(landslide),
            HazardType::Liquefaction => liquefaction_advisory(),
        })
        .collect();

    let summary = details
        .iter()
        .map(|a| a.caption.as_str())
        .collect::<Vec<_>>()
        .join(SUMMARY_SEPARATOR);

    if high_risks.len() >= 2 {
        details.push(multiple_hazard_advisory());
    }

    Recommendation { summary, details }
}

fn action(title: &str, detail: &str) -> MitigationAction {
    MitigationAction {
        title: title.to_string(),
        detail: detail.to_string(),
    }
}

fn notice(issuer: &str, text: &str) -> Option<AgencyNotice> {
    Some(AgencyNotice {
        issuer: issuer.to_string(),
        text: text.to_string(),
    })
}

fn authority(heading: &str, text: &str) -> AuthorityNote {
    AuthorityNote {
        heading: heading.to_string(),
        text: text.to_string(),
    }
}

fn low_exposure_advisory() -> Advisory {
    Advisory {
        advisory_type: AdvisoryType::LowExposure,
        hazard: None,
        severity: AdvisorySeverity::Info,
        icon: "✅".to_string(),
        caption: "Low risk - Standard construction practices".to_string(),
        title: "Minimal disaster exposure".to_string(),
        notice: None,
        prohibition: None,
        actions_heading: "This location has minimal disaster exposure:".to_string(),
        actions: vec![
            action("Standard Building Code", "Comply with National Building Code (PD 1096)"),
            action("Regular Maintenance", "Maintain drainage and building integrity"),
            action("Emergency Preparedness", "Prepare basic evacuation plan"),
        ],
        authority: authority(
            "Development Status",
            "Safe for residential, commercial, and institutional use.",
        ),
    }
}

fn standard_precautions_advisory() -> Advisory {
    Advisory {
        advisory_type: AdvisoryType::StandardPrecautions,
        hazard: None,
        severity: AdvisorySeverity::Caution,
        icon: "📋".to_string(),
        caption: "Standard building codes with enhanced precautions".to_string(),
        title: "Suitable with standard precautions".to_string(),
        notice: None,
        prohibition: None,
        actions_heading: "This location is suitable for development with standard precautions:"
            .to_string(),
        actions: vec![
            action(
                "Building Code Compliance",
                "Follow National Building Code of the Philippines (PD 1096)",
            ),
            action("Site Assessment", "Conduct geotechnical investigation before construction"),
            action("Drainage Systems", "Install proper surface water drainage"),
            action("Slope Protection", "Maintain vegetation on slopes"),
        ],
        authority: authority(
            "Required Permits",
            "Secure Building Permit from Local Government Unit and consult licensed civil/structural engineer.",
        ),
    }
}

/// Flood advisory; VHS gets the discouraged-development variant
pub fn flood_advisory(level: SusceptibilityLevel) -> Advisory {
    if level == SusceptibilityLevel::Vhs {
        Advisory {
            advisory_type: AdvisoryType::Hazard,
            hazard: Some(HazardType::Flood),
            severity: AdvisorySeverity::VeryHigh,
            icon: "🌊".to_string(),
            caption: "VERY HIGH FLOOD RISK".to_string(),
            title: "VERY HIGH FLOOD RISK".to_string(),
            notice: notice(
                "DPWH/PAGASA ADVISORY",
                "Area is subject to severe flooding. Development is STRONGLY DISCOURAGED.",
            ),
            prohibition: None,
            actions_heading: "If development must proceed (not recommended):".to_string(),
            actions: vec![
                action(
                    "Minimum Elevation",
                    "Raise finished floor at least 2.0 meters above ground (DPWH standard for flood-prone areas)",
                ),
                action("Foundation", "Use elevated post/pile foundations designed by licensed engineer"),
                action("Materials", "Use flood-resistant materials (concrete, stone) for lower floors"),
                action("Drainage", "Install comprehensive flood control with retention basins"),
                action("Emergency Access", "Provide elevated exits and refuge areas on upper floors"),
                action("Utilities", "Locate electrical panels and equipment above flood level"),
            ],
            authority: authority(
                "Required",
                "Consult Local DRRMO and DPWH District Office. Flood hazard disclosure required in property documents.",
            ),
        }
    } else {
        Advisory {
            advisory_type: AdvisoryType::Hazard,
            hazard: Some(HazardType::Flood),
            severity: AdvisorySeverity::High,
            icon: "🌊".to_string(),
            caption: "HIGH FLOOD RISK".to_string(),
            title: "HIGH FLOOD RISK".to_string(),
            notice: notice(
                "DPWH/PAGASA ADVISORY",
                "Area is prone to flooding during heavy rainfall and typhoons.",
            ),
            prohibition: None,
            actions_heading: "Required Flood Mitigation:".to_string(),
            actions: vec![
                action(
                    "Floor Elevation",
                    "Raise floor at least 1.5 meters above ground (DPWH recommendation)",
                ),
                action("Foundation", "Use elevated foundations or flood-resistant materials"),
                action("Drainage", "Install perimeter drains and surface water diversion"),
                action("Flood Barriers", "Use removable barriers for doorways and openings"),
                action("Utilities", "Elevate HVAC, water heaters, and electrical systems"),
                action("Grading", "Slope property away from structure"),
            ],
            authority: authority(
                "Required",
                "Coordinate with Local DRRMO. Hydraulic plans must be approved by DPWH.",
            ),
        }
    }
}

/// Landslide advisory; DF, VHS and HS each get a distinct entry
pub fn landslide_advisory(level: SusceptibilityLevel) -> Advisory {
    match level {
        SusceptibilityLevel::Df => Advisory {
            advisory_type: AdvisoryType::Hazard,
            hazard: Some(HazardType::Landslide),
            severity: AdvisorySeverity::Critical,
            icon: "🌋".to_string(),
            caption: "DEBRIS FLOW ZONE".to_string(),
            title: "DEBRIS FLOW HAZARD ZONE".to_string(),
            notice: notice(
                "PHIVOLCS CRITICAL ADVISORY",
                "This is a DEBRIS FLOW SUSCEPTIBILITY ZONE. Debris flows are catastrophic landslides with rocks, soil, and mud moving at high speeds. Can bury structures within minutes.",
            ),
            prohibition: Some(
                "CONSTRUCTION PROHIBITED. No structural mitigation can protect against debris flows. Area must remain unpopulated."
                    .to_string(),
            ),
            actions_heading: "PHIVOLCS-Mandated Actions:".to_string(),
            actions: vec![
                action("No-Build Zone", "Area designated as restricted per PHIVOLCS hazard mapping"),
                action(
                    "Evacuation Protocol",
                    "Mandatory evacuation during heavy rainfall (>100mm/24hrs)",
                ),
                action("Early Warning", "Install community rain gauges and monitoring system"),
                action("Land Use", "Reforestation, watershed protection, or buffer zone only"),
                action("Relocation", "If inhabited, coordinate with LGU and DSWD for relocation"),
            ],
            authority: authority(
                "Mandatory",
                "Contact PHIVOLCS Regional Office and Local DRRMO. Secure Geohazard Assessment.",
            ),
        },
        SusceptibilityLevel::Vhs => Advisory {
            advisory_type: AdvisoryType::Hazard,
            hazard: Some(HazardType::Landslide),
            severity: AdvisorySeverity::VeryHigh,
            icon: "⛰️".to_string(),
            caption: "VERY HIGH LANDSLIDE RISK".to_string(),
            title: "VERY HIGH LANDSLIDE RISK".to_string(),
            notice: notice(
                "PHIVOLCS ADVISORY",
                "Very high landslide susceptibility. Development STRONGLY DISCOURAGED.",
            ),
            prohibition: None,
            actions_heading: "If development cannot be avoided (extensive mitigation required):"
                .to_string(),
            actions: vec![
                action(
                    "Slope Stabilization",
                    "Engineered retaining walls, soil nailing, rock bolting by geotechnical engineer",
                ),
                action("Subsurface Drainage", "Horizontal drains or deep wells to reduce water pressure"),
                action("Bioengineering", "Plant deep-rooted native species (bamboo, agoho trees)"),
                action("Slope Angle", "Maintain natural slopes below 30° where possible"),
                action("Monitoring", "Install inclinometers, rain gauges, and early warning systems"),
                action("Setback", "Minimum 10-meter buffer from slope crest or base"),
            ],
            authority: authority(
                "Required",
                "Geohazard Assessment by PHIVOLCS-accredited geologist. Clearance from Local DRRMO and Mines and Geosciences Bureau (MGB).",
            ),
        },
        _ => Advisory {
            advisory_type: AdvisoryType::Hazard,
            hazard: Some(HazardType::Landslide),
            severity: AdvisorySeverity::High,
            icon: "⛰️".to_string(),
            caption: "HIGH LANDSLIDE RISK".to_string(),
            title: "HIGH LANDSLIDE RISK".to_string(),
            notice: notice(
                "PHIVOLCS ADVISORY",
                "Prone to landslides during heavy rain and earthquakes. Engineering required.",
            ),
            prohibition: None,
            actions_heading: "Required Landslide Mitigation:".to_string(),
            actions: vec![
                action(
                    "Geotechnical Study",
                    "Site investigation with soil boring and stability analysis",
                ),
                action("Retaining Walls", "Gravity walls, gabions, or reinforced earth structures"),
                action("Surface Drainage", "Lined channels to divert runoff away from slopes"),
                action("Terracing", "Benched slopes with vegetation cover"),
                action("Foundation", "Deep piles or piers anchored to stable bedrock"),
                action("Monitoring", "Regular inspection for cracks, tilting, or ground movement"),
            ],
            authority: authority(
                "Required",
                "Consult geotechnical engineer. Geohazard Clearance from PHIVOLCS/MGB and Local DRRMO.",
            ),
        },
    }
}

pub fn liquefaction_advisory() -> Advisory {
    Advisory {
        advisory_type: AdvisoryType::Hazard,
        hazard: Some(HazardType::Liquefaction),
        severity: AdvisorySeverity::High,
        icon: "〰️".to_string(),
        caption: "HIGH LIQUEFACTION RISK".to_string(),
        title: "HIGH LIQUEFACTION RISK".to_string(),
        notice: notice(
            "PHIVOLCS/NBC ADVISORY",
            "During earthquakes, water-saturated soil may lose strength and behave like liquid, causing buildings to sink or tilt.",
        ),
        prohibition: None,
        actions_heading: "Required Liquefaction Mitigation (National Building Code):".to_string(),
        actions: vec![
            action(
                "Deep Foundations",
                "Driven piles, bored piles, or caissons through liquefiable layers to stable soil (10-20m depth)",
            ),
            action(
                "Ground Improvement",
                "Soil densification via vibro-compaction, dynamic compaction, or stone columns",
            ),
            action(
                "Testing",
                "Standard Penetration Test (SPT) and Cone Penetration Test (CPT) to map liquefaction zones",
            ),
            action(
                "Structural Design",
                "Moment-resisting frames or shear walls per National Structural Code of the Philippines (NSCP)",
            ),
            action("Mat Foundation", "Alternative: thick reinforced concrete mat to \"float\" on soil"),
            action("Dewatering", "Install gravel drains or wells to lower groundwater table"),
        ],
        authority: authority(
            "Required",
            "Foundation design sealed by licensed Civil Engineer. Must comply with NSCP Seismic Zone 4 provisions. Coordinate with Local Building Official.",
        ),
    }
}

fn multiple_hazard_advisory() -> Advisory {
    Advisory {
        advisory_type: AdvisoryType::MultipleHazards,
        hazard: None,
        severity: AdvisorySeverity::Critical,
        icon: "⚠️".to_string(),
        caption: "MULTIPLE HAZARD EXPOSURE".to_string(),
        title: "MULTIPLE HAZARD EXPOSURE".to_string(),
        notice: notice(
            "COMBINED RISK",
            "This location faces multiple high-severity hazards. Combined risks increase vulnerability significantly.",
        ),
        prohibition: None,
        actions_heading: "Expected impact:".to_string(),
        actions: vec![
            action("Cost", "Mitigation may cost 30-50% of construction budget"),
            action("Maintenance", "Substantial long-term maintenance required"),
            action("Insurance", "Property insurance may be unavailable or expensive"),
            action("Resale", "Resale value significantly reduced"),
        ],
        authority: authority(
            "OFFICIAL RECOMMENDATION",
            "Relocate to safer site. If proceeding, conduct Multi-Hazard Risk Assessment and secure clearances from PHIVOLCS, PAGASA, Local DRRMO, MGB, and DPWH.",
        ),
    }
}
