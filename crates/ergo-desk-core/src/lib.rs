//! Core types and utilities for desk workspace ergonomics analysis.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete object detector: detections arrive as labelled
//! pixel boxes, and everything here is plain arithmetic on them.

pub mod calibration;
mod geometry;
mod logger;
mod object;
mod profile;

pub use calibration::{
    calibrate, parse_diagonal_inches, screen_height_cm, AspectRatio, CalibrationRatio,
    DiagonalSize,
};
pub use geometry::{horizontal_side, is_proximate, BoxError, HorizontalSide, PixelBox};
pub use object::{find_first, ClassVocabulary, DetectedObject, ObjectKind};
pub use profile::{Gender, Handedness, ProfileError, UserProfile};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::{init_logging, LogLevels, RULES_TARGET};
