//! Pixel → centimeter scale from a screen of known diagonal size.
//!
//! The user tells us the diagonal of one detected screen; together with an
//! assumed aspect ratio that gives its physical height, and dividing by the
//! box height in pixels gives a cm-per-pixel factor for the whole photo.

use std::borrow::Cow;
use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::geometry::PixelBox;

pub const CM_PER_INCH: f64 = 2.54;

/// Display aspect ratio, `width:height`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub width: f64,
    pub height: f64,
}

impl AspectRatio {
    pub const WIDESCREEN: AspectRatio = AspectRatio {
        width: 16.0,
        height: 9.0,
    };

    /// Fraction of the diagonal taken by the vertical side.
    #[inline]
    pub fn height_fraction(&self) -> f64 {
        self.height / self.width.hypot(self.height)
    }
}

impl Default for AspectRatio {
    fn default() -> Self {
        Self::WIDESCREEN
    }
}

/// Diagonal size as entered by the user: a number, or free text such as
/// `"27 inch"` / `"15.6인치"`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DiagonalSize {
    Inches(f64),
    Text(String),
}

impl DiagonalSize {
    /// The diagonal in inches, if one can be extracted and is positive.
    pub fn inches(&self) -> Option<f64> {
        let value = match self {
            DiagonalSize::Inches(v) => Some(*v),
            DiagonalSize::Text(s) => parse_diagonal_inches(s),
        }?;
        (value.is_finite() && value > 0.0).then_some(value)
    }
}

impl From<f64> for DiagonalSize {
    fn from(v: f64) -> Self {
        DiagonalSize::Inches(v)
    }
}

impl From<&str> for DiagonalSize {
    fn from(s: &str) -> Self {
        DiagonalSize::Text(s.to_string())
    }
}

fn number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+\.?[0-9]*").expect("static pattern compiles"))
}

/// Fold full-width digits and full stop (as typed by CJK input methods)
/// to ASCII. Digits of other scripts are left alone and never match.
fn fold_full_width(text: &str) -> Cow<'_, str> {
    let is_full_width = |c: char| ('\u{FF10}'..='\u{FF19}').contains(&c) || c == '\u{FF0E}';
    if !text.chars().any(is_full_width) {
        return Cow::Borrowed(text);
    }
    text.chars()
        .map(|c| match c {
            '\u{FF0E}' => '.',
            '\u{FF10}'..='\u{FF19}' => {
                char::from_u32(c as u32 - 0xFF10 + u32::from(b'0')).unwrap_or(c)
            }
            other => other,
        })
        .collect()
}

/// Extract the first decimal number found in `text`.
pub fn parse_diagonal_inches(text: &str) -> Option<f64> {
    let text = fold_full_width(text);
    let m = number_pattern().find(&text)?;
    m.as_str().parse().ok()
}

/// Physical screen height in cm for a given diagonal.
pub fn screen_height_cm(diagonal_inches: f64, aspect: AspectRatio) -> f64 {
    diagonal_inches * CM_PER_INCH * aspect.height_fraction()
}

/// Centimeters per pixel, anchored on one screen.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CalibrationRatio(f64);

impl CalibrationRatio {
    /// Wrap a raw factor; `None` unless it is finite and positive.
    pub fn new(cm_per_px: f64) -> Option<Self> {
        (cm_per_px.is_finite() && cm_per_px > 0.0).then_some(Self(cm_per_px))
    }

    #[inline]
    pub fn cm_per_px(&self) -> f64 {
        self.0
    }

    #[inline]
    pub fn to_cm(&self, px: f64) -> f64 {
        px * self.0
    }

    #[inline]
    pub fn to_px(&self, cm: f64) -> f64 {
        cm / self.0
    }
}

/// Derive the calibration ratio from the main screen's box.
///
/// Returns `None` when no diagonal can be parsed or the box has no height;
/// every cm-based rule is then skipped.
pub fn calibrate(
    screen: &PixelBox,
    diagonal: &DiagonalSize,
    aspect: AspectRatio,
) -> Option<CalibrationRatio> {
    let inches = diagonal.inches()?;
    if screen.height <= 0.0 {
        return None;
    }
    CalibrationRatio::new(screen_height_cm(inches, aspect) / screen.height)
}
