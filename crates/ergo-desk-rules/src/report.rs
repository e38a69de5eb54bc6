use ergo_desk_core::{CalibrationRatio, DetectedObject};
use serde::{Deserialize, Serialize};

use crate::finding::{problem, Finding, Severity};

/// Findings of one run together with the calibration they were computed
/// under.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub findings: Vec<Finding>,
    pub main_screen: DetectedObject,
    pub calibration_ratio: Option<CalibrationRatio>,
    pub image_width_px: f64,
}

impl AnalysisReport {
    /// First finding with the given problem id.
    pub fn finding(&self, problem_id: &str) -> Option<&Finding> {
        self.findings.iter().find(|f| f.problem_id == problem_id)
    }

    /// Findings at Moderate or above, in evaluation order.
    pub fn needing_attention(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity.needs_attention())
    }

    /// Most urgent severity in the report (`None` for an empty report).
    pub fn worst_severity(&self) -> Severity {
        self.findings
            .iter()
            .map(|f| f.severity)
            .max()
            .unwrap_or(Severity::None)
    }

    #[inline]
    pub fn is_clean(&self) -> bool {
        self.findings
            .iter()
            .all(|f| f.problem_id == problem::NO_ISSUES || !f.severity.needs_attention())
    }
}
