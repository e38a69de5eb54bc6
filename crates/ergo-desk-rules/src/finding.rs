use ergo_desk_core::{Handedness, HorizontalSide};
use serde::{Deserialize, Serialize};

/// Severity tier of a finding. Ordered from least to most urgent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Severity {
    None,
    Low,
    Moderate,
    High,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::None => "None",
            Severity::Low => "Low",
            Severity::Moderate => "Moderate",
            Severity::High => "High",
        }
    }

    /// Whether the finding asks the user to change something.
    #[inline]
    pub fn needs_attention(self) -> bool {
        self >= Severity::Moderate
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Well-known problem identifiers.
///
/// Height findings are named after the measured object's class
/// (`SCREEN_HEIGHT`, `MONITOR_HEIGHT`, `LAPTOP_HEIGHT`), see [`height_problem_id`].
pub mod problem {
    pub const SCREEN_HEIGHT: &str = "SCREEN_HEIGHT";
    pub const MONITOR_HEIGHT: &str = "MONITOR_HEIGHT";
    pub const LAPTOP_HEIGHT: &str = "LAPTOP_HEIGHT";
    pub const WRIST_REST_PRESENCE: &str = "WRIST_REST_PRESENCE";
    pub const LIGHT_POSITION: &str = "LIGHT_POSITION";
    pub const KEYBOARD_MOUSE_DISTANCE: &str = "KEYBOARD_MOUSE_DISTANCE";
    pub const KEYBOARD_MOUSE_ALIGNMENT: &str = "KEYBOARD_MOUSE_ALIGNMENT";
    pub const WINDOW_POSITION: &str = "WINDOW_POSITION";
    pub const VIEWING_DISTANCE: &str = "VIEWING_DISTANCE";
    pub const NO_ISSUES: &str = "NO_ISSUES";
}

/// `{CLASS}_HEIGHT`, with the class uppercased and whitespace replaced.
pub fn height_problem_id(class: &str) -> String {
    let class = class.trim().to_uppercase().replace(char::is_whitespace, "_");
    format!("{class}_HEIGHT")
}

/// Whether `problem_id` names a screen/laptop height finding.
pub fn is_height_problem(problem_id: &str) -> bool {
    problem_id.ends_with("_HEIGHT")
}

/// Supporting measurements for a finding, one shape per rule.
///
/// Serialized as a flat JSON object. Every rule builds its own value, so
/// no two findings ever share a details record.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FindingDetails {
    ScreenHeight {
        delta_cm: f64,
        ideal_height_cm: f64,
        estimated_actual_height_cm: f64,
        has_support: bool,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        has_external_keyboard: Option<bool>,
    },
    WristRest {
        has_wrist_rest: bool,
    },
    LightPosition {
        handedness: Handedness,
        lamp_side: HorizontalSide,
    },
    KeyboardMouseDistance {
        actual_distance_cm: f64,
        threshold_cm: f64,
    },
    KeyboardMouseAlignment {
        is_vertically_aligned: bool,
    },
    WindowPosition {
        horizontal_distance_cm: f64,
    },
    ViewingDistance {
        main_screen_type: String,
        /// Screen width over image width, `0.0..`.
        screen_width_ratio: f64,
    },
    NoIssues {
        message: String,
    },
}

/// One rule's output.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub problem_id: String,
    pub severity: Severity,
    pub details: FindingDetails,
}

impl Finding {
    pub fn new(problem_id: impl Into<String>, severity: Severity, details: FindingDetails) -> Self {
        Self {
            problem_id: problem_id.into(),
            severity,
            details,
        }
    }

    /// The "nothing to report" sentinel.
    pub fn no_issues() -> Self {
        Self::new(
            problem::NO_ISSUES,
            Severity::None,
            FindingDetails::NoIssues {
                message: "The workspace layout looks good.".to_string(),
            },
        )
    }

    #[inline]
    pub fn is_height(&self) -> bool {
        is_height_problem(&self.problem_id)
    }
}

/// Round to one decimal place, the precision findings report in.
///
/// Rounds the exact binary value: `50.05` is stored as `50.0499…` and
/// becomes `50.0`.
#[inline]
pub(crate) fn round1(v: f64) -> f64 {
    format!("{v:.1}").parse().unwrap_or(v)
}
