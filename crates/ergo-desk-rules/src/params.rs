use ergo_desk_core::{AspectRatio, ClassVocabulary, ObjectKind};
use serde::{Deserialize, Serialize};

use crate::analyzer::RuleKind;

/// Image width assumed when the detector does not report one.
pub const DEFAULT_IMAGE_WIDTH_PX: f64 = 1280.0;

/// Severity cut-offs for the screen/laptop height rule (|delta| in cm).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScreenHeightThresholds {
    /// `|delta| > high_cm` is High.
    pub high_cm: f64,
    /// `moderate_cm < |delta| <= high_cm` is Moderate.
    pub moderate_cm: f64,
}

impl Default for ScreenHeightThresholds {
    fn default() -> Self {
        Self {
            high_cm: 15.0,
            moderate_cm: 5.0,
        }
    }
}

/// Maximum comfortable keyboard–mouse spacing, by gender.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyboardMouseThresholds {
    pub male_cm: f64,
    /// Used for `female` and `other`.
    pub default_cm: f64,
}

impl Default for KeyboardMouseThresholds {
    fn default() -> Self {
        Self {
            male_cm: 15.0,
            default_cm: 10.0,
        }
    }
}

/// Main screen width as a fraction of the image width.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewingDistanceThresholds {
    /// Above this the screen is too close (High).
    pub too_close_ratio: f64,
    /// Below this the screen is too far (Moderate).
    pub too_far_ratio: f64,
}

impl Default for ViewingDistanceThresholds {
    fn default() -> Self {
        Self {
            too_close_ratio: 0.50,
            too_far_ratio: 0.40,
        }
    }
}

/// Configuration for [`crate::ErgonomicsAnalyzer`].
///
/// Every field has a default; a JSON file only needs to list overrides.
/// The numeric thresholds are empirical calibration constants and the
/// defaults should be kept unless there is a domain reason to change them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerParams {
    /// Photo width in pixels, used by the light and viewing-distance rules.
    pub image_width_px: f64,
    /// Assumed aspect ratio of the main screen for calibration.
    pub aspect: AspectRatio,
    /// Label → kind mapping for the detector output.
    pub vocabulary: ClassVocabulary,
    /// Kinds offered for main screen selection, in no particular order.
    pub screen_kinds: Vec<ObjectKind>,
    /// Maximum vertical gap for the "rests on a support" test.
    pub proximity_threshold_px: f64,
    pub screen_height: ScreenHeightThresholds,
    pub keyboard_mouse: KeyboardMouseThresholds,
    /// Window closer than this (cm, horizontally) risks glare.
    pub window_glare_cm: f64,
    pub viewing_distance: ViewingDistanceThresholds,
    /// Emit a single `NO_ISSUES` finding when no rule produced anything.
    pub no_issues_sentinel: bool,
    /// Rules to leave out of a run.
    pub disabled_rules: Vec<RuleKind>,
}

impl Default for AnalyzerParams {
    fn default() -> Self {
        Self {
            image_width_px: DEFAULT_IMAGE_WIDTH_PX,
            aspect: AspectRatio::default(),
            vocabulary: ClassVocabulary::default(),
            screen_kinds: vec![ObjectKind::Screen, ObjectKind::Laptop, ObjectKind::Monitor],
            proximity_threshold_px: 100.0,
            screen_height: ScreenHeightThresholds::default(),
            keyboard_mouse: KeyboardMouseThresholds::default(),
            window_glare_cm: 50.0,
            viewing_distance: ViewingDistanceThresholds::default(),
            no_issues_sentinel: true,
            disabled_rules: Vec::new(),
        }
    }
}

impl AnalyzerParams {
    /// Defaults with a known image width.
    pub fn with_image_width(image_width_px: f64) -> Self {
        Self {
            image_width_px,
            ..Self::default()
        }
    }

    /// Whether `class` is offered for main screen selection.
    pub fn is_screen_class(&self, class: &str) -> bool {
        self.screen_kinds
            .iter()
            .any(|&kind| self.vocabulary.matches(class, kind))
    }

    #[inline]
    pub fn is_enabled(&self, rule: RuleKind) -> bool {
        !self.disabled_rules.contains(&rule)
    }
}
