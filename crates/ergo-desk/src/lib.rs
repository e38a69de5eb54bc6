//! High-level facade crate for the `ergo-desk-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the core and rules crates
//! - end-to-end helpers that take a photo through a [`rules::DetectionProvider`],
//!   the analyzer and an optional [`rules::AdviceGenerator`]
//! - the `ergo-desk` command line tool (feature `cli`)
//!
//! ## Quickstart
//!
//! ```
//! use ergo_desk::pipeline::{analyze, ScreenSelection};
//! use ergo_desk::rules::{AnalyzerParams, Detections, StaticDetections};
//! use ergo_desk::core::{DetectedObject, Gender, Handedness, PixelBox, UserProfile};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = StaticDetections(Detections {
//!     objects: vec![
//!         DetectedObject::new("screen", PixelBox::new(450.0, 450.0, 750.0, 422.0)),
//!         DetectedObject::new("keyboard", PixelBox::new(550.0, 750.0, 450.0, 150.0)),
//!         DetectedObject::new("mouse", PixelBox::new(950.0, 780.0, 70.0, 100.0)),
//!     ],
//!     image_width_px: Some(1280.0),
//! });
//! let profile = UserProfile::new(175.0, Gender::Male, Handedness::Right);
//! let selection = ScreenSelection::new("screen_0", "27");
//!
//! let report = analyze(&provider, b"<jpeg bytes>", profile, &selection, AnalyzerParams::default())?;
//! println!("{} findings", report.findings.len());
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `ergo_desk::core`: geometry, detections, user profile, calibration.
//! - `ergo_desk::rules`: the rule engine, findings, corrections, summaries.
//! - `ergo_desk::pipeline`: provider → analyzer → advice helpers.

pub use ergo_desk_core as core;
pub use ergo_desk_rules as rules;

pub use ergo_desk_core::{DetectedObject, DiagonalSize, Gender, Handedness, PixelBox, UserProfile};
pub use ergo_desk_rules::{
    AnalysisReport, AnalyzerParams, ErgonomicsAnalyzer, Finding, FindingDetails, Severity,
};

pub mod pipeline;
