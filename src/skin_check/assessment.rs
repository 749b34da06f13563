use crate::config::AssessmentConfig;
use crate::image_classifier::interface::Classification;
use std::fmt;

const DISCLAIMER: &str = "Not a diagnosis, see a dermatologist about any concern.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => f.write_str("Low"),
            RiskLevel::Moderate => f.write_str("Moderate"),
            RiskLevel::High => f.write_str("High"),
        }
    }
}

/// Heuristic summary of one classified capture.
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    pub top: Option<Classification>,
    pub risk: RiskLevel,
    pub summary: String,
}

fn is_concerning(config: &AssessmentConfig, classification: &Classification) -> bool {
    config.concerning_labels.iter().any(|label| {
        classification
            .label
            .to_lowercase()
            .contains(&label.to_lowercase())
    })
}

pub fn assess(config: &AssessmentConfig, classifications: &[Classification]) -> Assessment {
    let top = classifications
        .iter()
        .max_by(|a, b| a.confidence.total_cmp(&b.confidence))
        .cloned();

    let Some(top) = top else {
        return Assessment {
            top: None,
            risk: RiskLevel::Low,
            summary: format!("No classification available. {}", DISCLAIMER),
        };
    };

    let risk = if is_concerning(config, &top) && top.confidence >= config.high_risk_confidence {
        RiskLevel::High
    } else if classifications
        .iter()
        .any(|c| is_concerning(config, c) && c.confidence >= config.moderate_risk_confidence)
    {
        RiskLevel::Moderate
    } else {
        RiskLevel::Low
    };

    let summary = format!(
        "Most likely {} ({:.0}%). {} risk. {}",
        top.label.replace('_', " "),
        top.confidence * 100.0,
        risk,
        DISCLAIMER
    );

    Assessment {
        top: Some(top),
        risk,
        summary,
    }
}
