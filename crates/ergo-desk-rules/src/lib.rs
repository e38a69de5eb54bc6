//! Ergonomic rule evaluation for desk workspace photos.
//!
//! Current focus:
//! - main screen selection and pixel → cm calibration,
//! - a fixed, ordered battery of layout rules producing severity-tiered
//!   findings,
//! - correction geometry and short summaries for presenting a report.
//!
//! Geometry and the detection data model live in `ergo-desk-core`.
//!
//! ```
//! use ergo_desk_core::{DetectedObject, DiagonalSize, Gender, Handedness, PixelBox, UserProfile};
//! use ergo_desk_rules::{AnalyzerParams, ErgonomicsAnalyzer};
//!
//! let objects = vec![
//!     DetectedObject::new("screen", PixelBox::new(450.0, 450.0, 750.0, 422.0)),
//!     DetectedObject::new("keyboard", PixelBox::new(550.0, 750.0, 450.0, 150.0)),
//! ];
//! let profile = UserProfile::new(175.0, Gender::Male, Handedness::Right);
//! let mut analyzer = ErgonomicsAnalyzer::new(objects, profile, AnalyzerParams::default());
//!
//! let screens = analyzer.detect_screens();
//! let id = screens[0].id.clone().unwrap();
//! assert!(analyzer.set_main_screen(&id, &DiagonalSize::from("27"))?);
//! let findings = analyzer.run_all_analyses()?;
//! assert!(!findings.is_empty());
//! # Ok::<(), ergo_desk_rules::AnalyzeError>(())
//! ```

mod analyzer;
mod collaborators;
pub mod corrections;
mod finding;
mod io;
mod params;
mod report;
pub mod summary;

pub use analyzer::{ideal_screen_top_cm, AnalyzeError, ErgonomicsAnalyzer, RuleKind};
pub use collaborators::{
    AdviceGenerator, DetectionProvider, Detections, StaticDetections, TemplateAdvice,
};
pub use finding::{height_problem_id, is_height_problem, problem, Finding, FindingDetails, Severity};
pub use io::{AnalysisRequest, ErgoIoError, RequestError};
pub use params::{
    AnalyzerParams, KeyboardMouseThresholds, ScreenHeightThresholds, ViewingDistanceThresholds,
    DEFAULT_IMAGE_WIDTH_PX,
};
pub use report::AnalysisReport;
