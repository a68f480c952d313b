use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// The three canned analyses offered to the user. Closed set; selection is exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisMode {
    #[default]
    QuickScan,
    DetailedAnalysis,
    AtsOptimization,
}

impl AnalysisMode {
    pub const ALL: [AnalysisMode; 3] = [
        AnalysisMode::QuickScan,
        AnalysisMode::DetailedAnalysis,
        AnalysisMode::AtsOptimization,
    ];

    /// Wire identifier, identical to the serde representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisMode::QuickScan => "quick_scan",
            AnalysisMode::DetailedAnalysis => "detailed_analysis",
            AnalysisMode::AtsOptimization => "ats_optimization",
        }
    }

    /// Label shown on the radio button.
    pub fn label(&self) -> &'static str {
        match self {
            AnalysisMode::QuickScan => "Quick Scan",
            AnalysisMode::DetailedAnalysis => "Detailed Analysis",
            AnalysisMode::AtsOptimization => "ATS Optimization",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            AnalysisMode::QuickScan => {
                "Best-fit profession, 3 strengths, 2 quick improvements and an ATS score."
            }
            AnalysisMode::DetailedAnalysis => {
                "5 strengths, targeted improvements, ratings out of 10, section review and a scored breakdown."
            }
            AnalysisMode::AtsOptimization => {
                "Job description keywords, formatting and keyword density advice, tailoring points."
            }
        }
    }
}

impl fmt::Display for AnalysisMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown analysis mode '{0}' (expected quick_scan, detailed_analysis or ats_optimization)")]
pub struct UnknownAnalysisMode(pub String);

impl FromStr for AnalysisMode {
    type Err = UnknownAnalysisMode;

    /// Accepts the wire identifier or the display label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();
        AnalysisMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(needle) || m.label().eq_ignore_ascii_case(needle))
            .ok_or_else(|| UnknownAnalysisMode(s.to_string()))
    }
}

/// The result of one analysis, kept so that a single follow-up question can be asked about it.
/// Only a successful analysis creates one.
#[derive(Debug, Clone)]
pub struct AnalysisSession {
    pub id: Uuid,
    pub mode: AnalysisMode,
    pub resume_text: String,
    pub analysis: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_is_snake_case() {
        let json = serde_json::to_string(&AnalysisMode::AtsOptimization).unwrap();
        assert_eq!(json, r#""ats_optimization""#);
        let mode: AnalysisMode = serde_json::from_str(r#""detailed_analysis""#).unwrap();
        assert_eq!(mode, AnalysisMode::DetailedAnalysis);
    }

    #[test]
    fn test_mode_parses_labels_and_identifiers() {
        assert_eq!("Quick Scan".parse::<AnalysisMode>().unwrap(), AnalysisMode::QuickScan);
        assert_eq!("quick_scan".parse::<AnalysisMode>().unwrap(), AnalysisMode::QuickScan);
        assert_eq!(
            " ATS OPTIMIZATION ".parse::<AnalysisMode>().unwrap(),
            AnalysisMode::AtsOptimization
        );
    }

    #[test]
    fn test_unknown_mode_is_rejected() {
        let err = "deep_dive".parse::<AnalysisMode>().unwrap_err();
        assert_eq!(err, UnknownAnalysisMode("deep_dive".to_string()));
        assert_eq!(
            err.to_string(),
            "unknown analysis mode 'deep_dive' (expected quick_scan, detailed_analysis or ats_optimization)"
        );
        let boxed: Box<dyn std::error::Error> = Box::new(err);
        assert!(boxed.source().is_none());
    }

    #[test]
    fn test_display_matches_wire_identifier() {
        for mode in AnalysisMode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }

    #[test]
    fn test_default_mode_is_quick_scan() {
        assert_eq!(AnalysisMode::default(), AnalysisMode::QuickScan);
    }
}
