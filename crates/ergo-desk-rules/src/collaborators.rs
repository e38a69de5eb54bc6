//! Seams to the services around the analyzer.
//!
//! Object detection and advice writing are done elsewhere (a vision model,
//! a language model). The analyzer never calls them itself; a host wires a
//! [`DetectionProvider`] in front and an [`AdviceGenerator`] behind it.

use ergo_desk_core::{DetectedObject, UserProfile};
use serde::{Deserialize, Serialize};

use crate::finding::{Finding, Severity};
use crate::summary::{describe, problem_label, SeverityCounts};

/// Detector output for one photo.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Detections {
    pub objects: Vec<DetectedObject>,
    /// Photo width in pixels, when known.
    #[serde(default)]
    pub image_width_px: Option<f64>,
}

/// Produces detections from an encoded photo.
pub trait DetectionProvider {
    type Error: std::error::Error + Send + Sync + 'static;

    fn detect(&self, image: &[u8]) -> Result<Detections, Self::Error>;
}

/// Turns findings into advice text for the user.
pub trait AdviceGenerator {
    type Error: std::error::Error + Send + Sync + 'static;

    fn summarize(&self, findings: &[Finding], profile: &UserProfile)
        -> Result<String, Self::Error>;
}

/// A provider that ignores the image and returns fixed detections.
///
/// Useful for demos and tests, and for hosts that run detection
/// out-of-process and already hold the result.
#[derive(Clone, Debug, Default)]
pub struct StaticDetections(pub Detections);

impl DetectionProvider for StaticDetections {
    type Error = std::convert::Infallible;

    fn detect(&self, _image: &[u8]) -> Result<Detections, Self::Error> {
        Ok(self.0.clone())
    }
}

/// Offline advice: one line per finding that needs attention, most urgent
/// first, built from the fixed templates in [`crate::summary`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TemplateAdvice;

impl AdviceGenerator for TemplateAdvice {
    type Error = std::convert::Infallible;

    fn summarize(
        &self,
        findings: &[Finding],
        _profile: &UserProfile,
    ) -> Result<String, Self::Error> {
        let mut urgent: Vec<&Finding> = findings
            .iter()
            .filter(|f| f.severity.needs_attention())
            .collect();
        // stable: ties keep evaluation order
        urgent.sort_by(|a, b| b.severity.cmp(&a.severity));

        if urgent.is_empty() {
            return Ok("No changes needed; the workspace layout looks good.".to_string());
        }

        let mut out = format!(
            "Overall: {}.\n",
            SeverityCounts::from_findings(findings)
        );
        for (n, f) in urgent.iter().enumerate() {
            let marker = if f.severity == Severity::High { "!" } else { "-" };
            out.push_str(&format!(
                "{}. [{marker}] {}: {}\n",
                n + 1,
                problem_label(&f.problem_id),
                describe(f)
            ));
        }
        Ok(out)
    }
}
