use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Axis-aligned detection box in pixel space.
///
/// `(x, y)` is the box *center*; `width` and `height` are the full extents.
/// Image `y` grows downwards, so `top() < bottom()` for any valid box.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PixelBox {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Structural problems with a [`PixelBox`].
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum BoxError {
    #[error("box field `{field}` is not finite ({value})")]
    NonFinite { field: &'static str, value: f64 },
    #[error("box extent `{field}` is negative ({value})")]
    NegativeExtent { field: &'static str, value: f64 },
}

impl PixelBox {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    #[inline]
    pub fn center(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    #[inline]
    pub fn top(&self) -> f64 {
        self.y - self.height / 2.0
    }

    #[inline]
    pub fn bottom(&self) -> f64 {
        self.y + self.height / 2.0
    }

    #[inline]
    pub fn left(&self) -> f64 {
        self.x - self.width / 2.0
    }

    #[inline]
    pub fn right(&self) -> f64 {
        self.x + self.width / 2.0
    }

    /// Whether `y` lies inside the vertical span `[top, bottom]` (inclusive).
    #[inline]
    pub fn spans_y(&self, y: f64) -> bool {
        self.top() <= y && y <= self.bottom()
    }

    /// Absolute horizontal distance between two box centers, in pixels.
    #[inline]
    pub fn horizontal_distance(&self, other: &PixelBox) -> f64 {
        (self.center().x - other.center().x).abs()
    }

    /// Reject boxes that cannot be measured: NaN/infinite fields or
    /// negative extents. A zero-height box is structurally valid; it just
    /// cannot anchor a calibration.
    pub fn validate(&self) -> Result<(), BoxError> {
        for (field, value) in [
            ("x", self.x),
            ("y", self.y),
            ("width", self.width),
            ("height", self.height),
        ] {
            if !value.is_finite() {
                return Err(BoxError::NonFinite { field, value });
            }
        }
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value < 0.0 {
                return Err(BoxError::NegativeExtent { field, value });
            }
        }
        Ok(())
    }
}

/// Heuristic "rests on" test between two boxes.
///
/// `upper` is considered to sit on `lower` when the gap between the bottom
/// edge of `upper` and the top edge of `lower` is under `threshold_px`, and
/// their centers are horizontally closer than a quarter of their combined
/// widths. The pixel threshold is not normalized by image resolution.
pub fn is_proximate(upper: &PixelBox, lower: &PixelBox, threshold_px: f64) -> bool {
    let vertical_gap = (upper.bottom() - lower.top()).abs();
    let horizontal_offset = upper.horizontal_distance(lower);
    let alignment_limit = (upper.width + lower.width) / 4.0;

    vertical_gap < threshold_px && horizontal_offset < alignment_limit
}

/// Coarse horizontal placement of an object within the image.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HorizontalSide {
    Left,
    Center,
    Right,
}

impl HorizontalSide {
    pub fn as_str(self) -> &'static str {
        match self {
            HorizontalSide::Left => "left",
            HorizontalSide::Center => "center",
            HorizontalSide::Right => "right",
        }
    }
}

impl std::fmt::Display for HorizontalSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split the image into thirds and report which one `x` falls in.
pub fn horizontal_side(x: f64, image_width: f64) -> HorizontalSide {
    if x < image_width / 3.0 {
        HorizontalSide::Left
    } else if x > image_width * 2.0 / 3.0 {
        HorizontalSide::Right
    } else {
        HorizontalSide::Center
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn edges_follow_center_convention() {
        let b = PixelBox::new(450.0, 450.0, 750.0, 422.0);
        assert_relative_eq!(b.top(), 239.0);
        assert_relative_eq!(b.bottom(), 661.0);
        assert_relative_eq!(b.left(), 75.0);
        assert_relative_eq!(b.right(), 825.0);
        assert!(b.spans_y(239.0));
        assert!(b.spans_y(661.0));
        assert!(!b.spans_y(661.5));
    }

    #[test]
    fn monitor_on_stand_is_proximate() {
        let screen = PixelBox::new(450.0, 450.0, 750.0, 422.0);
        let stand = PixelBox::new(450.0, 700.0, 300.0, 80.0);
        assert!(is_proximate(&screen, &stand, 100.0));
    }

    #[test]
    fn proximity_requires_horizontal_alignment() {
        let laptop = PixelBox::new(1050.0, 650.0, 400.0, 250.0);
        let stand = PixelBox::new(450.0, 800.0, 300.0, 50.0);
        // vertical gap is 0 but centers are 600px apart
        assert!(!is_proximate(&laptop, &stand, 100.0));
    }

    #[test]
    fn proximity_rejects_large_vertical_gap() {
        let upper = PixelBox::new(100.0, 100.0, 100.0, 100.0);
        let lower = PixelBox::new(100.0, 400.0, 100.0, 100.0);
        assert!(!is_proximate(&upper, &lower, 100.0));
        assert!(is_proximate(&upper, &lower, 201.0));
    }

    #[test]
    fn gap_equal_to_threshold_is_not_proximate() {
        let upper = PixelBox::new(100.0, 100.0, 100.0, 100.0);
        // upper bottom 150, lower top 250
        let lower = PixelBox::new(100.0, 300.0, 100.0, 100.0);
        assert!(!is_proximate(&upper, &lower, 100.0));

        let closer = PixelBox::new(100.0, 299.5, 100.0, 100.0);
        assert!(is_proximate(&upper, &closer, 100.0));
    }

    #[test]
    fn sides_split_image_in_thirds() {
        assert_eq!(horizontal_side(100.0, 1280.0), HorizontalSide::Left);
        assert_eq!(horizontal_side(640.0, 1280.0), HorizontalSide::Center);
        assert_eq!(horizontal_side(1000.0, 1280.0), HorizontalSide::Right);
    }

    #[test]
    fn validate_flags_broken_boxes() {
        assert!(PixelBox::new(1.0, 1.0, 0.0, 0.0).validate().is_ok());
        assert!(matches!(
            PixelBox::new(f64::NAN, 1.0, 1.0, 1.0).validate(),
            Err(BoxError::NonFinite { field: "x", .. })
        ));
        assert!(matches!(
            PixelBox::new(1.0, 1.0, 5.0, -2.0).validate(),
            Err(BoxError::NegativeExtent {
                field: "height",
                ..
            })
        ));
    }
}
