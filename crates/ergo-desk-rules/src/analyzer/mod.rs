//! Ergonomics rule engine.
//!
//! This module wires together main screen selection, scale calibration and
//! the fixed battery of layout rules.

mod desk;
mod error;
mod pipeline;
mod rules;

use serde::{Deserialize, Serialize};

pub use desk::ideal_screen_top_cm;
pub use error::AnalyzeError;
pub use pipeline::ErgonomicsAnalyzer;

/// The individual checks, in evaluation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKind {
    LightPosition,
    WristRest,
    KeyboardMouseDistance,
    KeyboardMouseAlignment,
    WindowPosition,
    ViewingDistance,
    ScreenHeight,
    LaptopHeight,
}

impl RuleKind {
    /// Fixed evaluation order of a full run.
    pub const ORDER: [RuleKind; 8] = [
        RuleKind::LightPosition,
        RuleKind::WristRest,
        RuleKind::KeyboardMouseDistance,
        RuleKind::KeyboardMouseAlignment,
        RuleKind::WindowPosition,
        RuleKind::ViewingDistance,
        RuleKind::ScreenHeight,
        RuleKind::LaptopHeight,
    ];
}
