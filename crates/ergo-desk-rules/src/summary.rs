//! Short human-readable renderings of findings.
//!
//! Fixed templates only; prose advice is the job of an
//! [`crate::AdviceGenerator`].

use serde::{Deserialize, Serialize};

use crate::finding::{is_height_problem, problem, Finding, FindingDetails, Severity};
use ergo_desk_core::{Handedness, HorizontalSide};

/// Display label for a problem id.
pub fn problem_label(problem_id: &str) -> &'static str {
    match problem_id {
        problem::SCREEN_HEIGHT | problem::MONITOR_HEIGHT => "Monitor height",
        problem::LAPTOP_HEIGHT => "Laptop screen height",
        problem::WRIST_REST_PRESENCE => "Wrist rest",
        problem::LIGHT_POSITION => "Lamp position",
        problem::KEYBOARD_MOUSE_DISTANCE => "Keyboard-mouse distance",
        problem::KEYBOARD_MOUSE_ALIGNMENT => "Keyboard-mouse alignment",
        problem::WINDOW_POSITION => "Window distance",
        problem::VIEWING_DISTANCE => "Viewing distance",
        problem::NO_ISSUES => "No issues",
        id if is_height_problem(id) => "Screen height",
        _ => "Other",
    }
}

/// One-sentence description of a finding.
pub fn describe(finding: &Finding) -> String {
    match &finding.details {
        FindingDetails::ScreenHeight {
            delta_cm,
            ideal_height_cm,
            ..
        } => {
            if *delta_cm > 0.0 {
                format!(
                    "The screen top is about {delta_cm:.1} cm above the ideal height of {ideal_height_cm:.1} cm; lower it."
                )
            } else {
                format!(
                    "The screen top is about {:.1} cm below the ideal height of {ideal_height_cm:.1} cm; raise it with a stand.",
                    delta_cm.abs()
                )
            }
        }
        FindingDetails::WristRest { has_wrist_rest } => {
            if *has_wrist_rest {
                "A wrist rest is in use.".to_string()
            } else {
                "No wrist rest detected; long sessions strain the wrist.".to_string()
            }
        }
        FindingDetails::LightPosition {
            handedness,
            lamp_side,
        } => match (handedness, lamp_side) {
            (Handedness::Left, HorizontalSide::Left) => {
                "The lamp is on the left of a left-handed user and will cast hand shadows; move it to the right.".to_string()
            }
            (Handedness::Right, HorizontalSide::Right) => {
                "The lamp is on the right of a right-handed user and will cast hand shadows; move it to the left.".to_string()
            }
            _ => format!("The lamp ({lamp_side}) is well placed."),
        },
        FindingDetails::KeyboardMouseDistance {
            actual_distance_cm,
            threshold_cm,
        } => {
            if finding.severity == Severity::High {
                format!(
                    "Keyboard and mouse are {actual_distance_cm:.1} cm apart, more than {threshold_cm:.0} cm; bring the mouse closer."
                )
            } else {
                format!("Keyboard and mouse are {actual_distance_cm:.1} cm apart.")
            }
        }
        FindingDetails::KeyboardMouseAlignment {
            is_vertically_aligned,
        } => {
            if *is_vertically_aligned {
                "The mouse is level with the keyboard.".to_string()
            } else {
                "The mouse is not level with the keyboard; keep both on the same line.".to_string()
            }
        }
        FindingDetails::WindowPosition {
            horizontal_distance_cm,
        } => {
            if finding.severity == Severity::Moderate {
                format!(
                    "A window is {horizontal_distance_cm:.1} cm from the screen and may cause glare."
                )
            } else {
                format!("The nearest window is {horizontal_distance_cm:.1} cm from the screen.")
            }
        }
        FindingDetails::ViewingDistance {
            main_screen_type,
            screen_width_ratio,
        } => {
            let pct = screen_width_ratio * 100.0;
            match finding.severity {
                Severity::High => format!(
                    "The {main_screen_type} fills {pct:.1}% of the view and is likely too close."
                ),
                Severity::Moderate => format!(
                    "The {main_screen_type} fills {pct:.1}% of the view and is likely too far."
                ),
                _ => format!("The {main_screen_type} fills {pct:.1}% of the view."),
            }
        }
        FindingDetails::NoIssues { message } => message.clone(),
    }
}

/// Number of findings per severity.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeverityCounts {
    pub high: usize,
    pub moderate: usize,
    pub low: usize,
}

impl SeverityCounts {
    pub fn from_findings(findings: &[Finding]) -> Self {
        findings.iter().fold(Self::default(), |mut acc, f| {
            match f.severity {
                Severity::High => acc.high += 1,
                Severity::Moderate => acc.moderate += 1,
                Severity::Low => acc.low += 1,
                Severity::None => {}
            }
            acc
        })
    }
}

impl std::fmt::Display for SeverityCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} high, {} moderate, {} low",
            self.high, self.moderate, self.low
        )
    }
}
