//! JSON request and report helpers.

use std::{fs, path::Path};

use ergo_desk_core::{DetectedObject, DiagonalSize, UserProfile};
use serde::{Deserialize, Serialize};

use crate::{AnalysisReport, AnalyzeError, AnalyzerParams, ErgonomicsAnalyzer};

#[derive(thiserror::Error, Debug)]
pub enum ErgoIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Errors from running a request end to end.
#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("no screen with id `{0}` among the detections")]
    UnknownScreen(String),
    #[error(transparent)]
    Analyze(#[from] AnalyzeError),
}

/// Everything needed for one analysis, as a single JSON document.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub detections: Vec<DetectedObject>,
    /// Overrides `params.image_width_px` when present.
    #[serde(default)]
    pub image_width_px: Option<f64>,
    #[serde(default)]
    pub profile: UserProfile,
    /// Selection id of the main screen (`screen_{i}`).
    pub main_screen_id: String,
    pub diagonal: DiagonalSize,
    #[serde(default)]
    pub params: AnalyzerParams,
}

impl AnalysisRequest {
    /// Load a JSON request from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ErgoIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this request to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ErgoIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Fresh analyzer for this request; no main screen selected yet.
    pub fn analyzer(&self) -> ErgonomicsAnalyzer {
        let mut params = self.params.clone();
        if let Some(width) = self.image_width_px {
            params.image_width_px = width;
        }
        ErgonomicsAnalyzer::new(self.detections.clone(), self.profile.clone(), params)
    }

    /// Select the requested main screen and run every rule.
    pub fn run(&self) -> Result<AnalysisReport, RequestError> {
        let mut analyzer = self.analyzer();
        if !analyzer.set_main_screen(&self.main_screen_id, &self.diagonal)? {
            return Err(RequestError::UnknownScreen(self.main_screen_id.clone()));
        }
        Ok(analyzer.report()?)
    }
}

impl AnalysisReport {
    /// Load a JSON report from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, ErgoIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ErgoIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}
