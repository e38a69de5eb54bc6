//! Where things should go, in image coordinates.
//!
//! These helpers turn a report back into pixel geometry so a front end can
//! overlay the suggested layout on the photo. Nothing here draws.

use ergo_desk_core::{find_first, ClassVocabulary, DetectedObject, ObjectKind, PixelBox};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

use crate::finding::{is_height_problem, problem, FindingDetails};
use crate::report::AnalysisReport;

/// Ideal main screen width as a fraction of the image width.
const IDEAL_SCREEN_WIDTH_FRACTION: f64 = 0.45;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MoveDirection {
    Up,
    Down,
}

/// Suggested main screen placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScreenCorrection {
    /// Current top edge of the main screen (px).
    pub current_top_y: f64,
    /// Top edge at the ideal height (px).
    pub ideal_top_y: f64,
    /// Ideal box: centered horizontally, 16:9, `0.45 ×` image width.
    pub ideal_box: PixelBox,
    pub direction: MoveDirection,
    /// Distance to move, in cm.
    pub shift_cm: f64,
}

/// Suggested keyboard and mouse placement.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InputDeviceLayout {
    pub ideal_keyboard: PixelBox,
    pub ideal_mouse: PixelBox,
}

/// Objects implicated by a finding, with the finding's problem id.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    pub problem_id: String,
    pub object: DetectedObject,
}

/// Ideal main screen position, derived from the first height finding that
/// needs attention.
///
/// The ideal top is `current_top + delta_cm / ratio`: a screen that sits
/// too high (positive delta) moves down the photo, i.e. to a larger `y`.
pub fn screen_correction(report: &AnalysisReport) -> Option<ScreenCorrection> {
    let ratio = report.calibration_ratio?;
    let delta_cm = report
        .needing_attention()
        .filter(|f| is_height_problem(&f.problem_id))
        .find_map(|f| match f.details {
            FindingDetails::ScreenHeight { delta_cm, .. } => Some(delta_cm),
            _ => None,
        })?;

    let current_top_y = report.main_screen.bbox.top();
    let ideal_top_y = current_top_y + ratio.to_px(delta_cm);

    let width = report.image_width_px * IDEAL_SCREEN_WIDTH_FRACTION;
    let height = width * 9.0 / 16.0;
    let center = Point2::new(report.image_width_px / 2.0, ideal_top_y + height / 2.0);

    Some(ScreenCorrection {
        current_top_y,
        ideal_top_y,
        ideal_box: PixelBox::new(center.x, center.y, width, height),
        direction: if delta_cm > 0.0 {
            MoveDirection::Down
        } else {
            MoveDirection::Up
        },
        shift_cm: delta_cm.abs(),
    })
}

/// Ideal keyboard/mouse placement when a keyboard–mouse finding needs
/// attention. The distance finding supplies the spacing, so it must be
/// present even when only the alignment is off.
///
/// The keyboard keeps its size and row but is centered in the image; the
/// mouse sits on the same row, half the threshold distance to the right of
/// the keyboard.
pub fn input_device_layout(
    report: &AnalysisReport,
    objects: &[DetectedObject],
    vocabulary: &ClassVocabulary,
) -> Option<InputDeviceLayout> {
    let ratio = report.calibration_ratio?;
    let needs_layout = report.needing_attention().any(|f| {
        f.problem_id == problem::KEYBOARD_MOUSE_DISTANCE
            || f.problem_id == problem::KEYBOARD_MOUSE_ALIGNMENT
    });
    if !needs_layout {
        return None;
    }
    let threshold_cm = match report.finding(problem::KEYBOARD_MOUSE_DISTANCE)?.details {
        FindingDetails::KeyboardMouseDistance { threshold_cm, .. } => threshold_cm,
        _ => return None,
    };
    let keyboard = find_first(objects, vocabulary, ObjectKind::Keyboard)?;
    let mouse = find_first(objects, vocabulary, ObjectKind::Mouse)?;

    let row_y = keyboard.bbox.y;
    let ideal_keyboard = PixelBox::new(
        report.image_width_px / 2.0,
        row_y,
        keyboard.bbox.width,
        keyboard.bbox.height,
    );
    let mouse_x = ideal_keyboard.right() + ratio.to_px(threshold_cm) / 2.0 + mouse.bbox.width / 2.0;
    let ideal_mouse = PixelBox::new(mouse_x, row_y, mouse.bbox.width, mouse.bbox.height);

    Some(InputDeviceLayout {
        ideal_keyboard,
        ideal_mouse,
    })
}

/// Detected objects to highlight for each finding that needs attention.
///
/// A missing wrist rest is shown on the mouse; viewing distance on the main
/// screen. Each object is listed once, under the first finding naming it.
pub fn highlights(
    report: &AnalysisReport,
    objects: &[DetectedObject],
    vocabulary: &ClassVocabulary,
) -> Vec<Highlight> {
    let mut out: Vec<Highlight> = Vec::new();
    let mut push = |problem_id: &str, object: &DetectedObject| {
        if !out.iter().any(|h| h.object == *object) {
            out.push(Highlight {
                problem_id: problem_id.to_string(),
                object: object.clone(),
            });
        }
    };

    for finding in report.needing_attention() {
        let id = finding.problem_id.as_str();
        let kinds: &[ObjectKind] = match id {
            problem::KEYBOARD_MOUSE_DISTANCE | problem::KEYBOARD_MOUSE_ALIGNMENT => {
                &[ObjectKind::Keyboard, ObjectKind::Mouse]
            }
            problem::WRIST_REST_PRESENCE => &[ObjectKind::Mouse],
            problem::LIGHT_POSITION => &[ObjectKind::DeskLamp],
            problem::WINDOW_POSITION => &[ObjectKind::Window],
            problem::VIEWING_DISTANCE => {
                push(id, &report.main_screen);
                &[]
            }
            _ if is_height_problem(id) => {
                let class = id.trim_end_matches("_HEIGHT").to_lowercase().replace('_', " ");
                if let Some(obj) = objects.iter().find(|o| o.class == class) {
                    push(id, obj);
                }
                &[]
            }
            _ => &[],
        };
        for &kind in kinds {
            if let Some(obj) = find_first(objects, vocabulary, kind) {
                push(id, obj);
            }
        }
    }
    out
}
