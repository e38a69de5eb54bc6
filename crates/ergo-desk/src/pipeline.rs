use crate::{core, rules};
use log::info;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the end-to-end helpers.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("detection failed: {0}")]
    Detection(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("advice generation failed: {0}")]
    Advice(#[source] Box<dyn std::error::Error + Send + Sync>),

    #[error("invalid user profile: {0}")]
    Profile(#[from] core::ProfileError),

    #[error("no screen with id `{0}` among the detections")]
    UnknownScreen(String),

    #[error(transparent)]
    Analyze(#[from] rules::AnalyzeError),
}

/// The user's choice of main screen.
#[derive(Clone, Debug, PartialEq)]
pub struct ScreenSelection {
    pub screen_id: String,
    pub diagonal: core::DiagonalSize,
}

impl ScreenSelection {
    pub fn new(screen_id: impl Into<String>, diagonal: impl Into<core::DiagonalSize>) -> Self {
        Self {
            screen_id: screen_id.into(),
            diagonal: diagonal.into(),
        }
    }
}

/// Report plus the advice text written for it.
#[derive(Clone, Debug, PartialEq)]
pub struct AdvisedReport {
    pub report: rules::AnalysisReport,
    pub advice: String,
}

/// Run detection and return the selectable screens, ids assigned.
pub fn list_screens<P: rules::DetectionProvider>(
    provider: &P,
    image: &[u8],
    params: &rules::AnalyzerParams,
) -> Result<Vec<core::DetectedObject>, PipelineError> {
    let detections = provider
        .detect(image)
        .map_err(|e| PipelineError::Detection(Box::new(e)))?;
    let mut analyzer = rules::ErgonomicsAnalyzer::new(
        detections.objects,
        core::UserProfile::default(),
        params.clone(),
    );
    Ok(analyzer.detect_screens())
}

/// Run the analyzer end-to-end: detections -> main screen -> findings.
///
/// A fresh analyzer is built for every call. The detector's image width,
/// when reported, overrides `params.image_width_px`.
#[cfg_attr(
    feature = "tracing",
    instrument(
        level = "info",
        skip(provider, image, profile, params),
        fields(image_bytes = image.len(), screen_id = %selection.screen_id)
    )
)]
pub fn analyze<P: rules::DetectionProvider>(
    provider: &P,
    image: &[u8],
    profile: core::UserProfile,
    selection: &ScreenSelection,
    mut params: rules::AnalyzerParams,
) -> Result<rules::AnalysisReport, PipelineError> {
    profile.validate()?;
    let detections = provider
        .detect(image)
        .map_err(|e| PipelineError::Detection(Box::new(e)))?;
    if let Some(width) = detections.image_width_px {
        params.image_width_px = width;
    }
    info!("{} objects detected", detections.objects.len());

    let mut analyzer = rules::ErgonomicsAnalyzer::new(detections.objects, profile, params);
    if !analyzer.set_main_screen(&selection.screen_id, &selection.diagonal)? {
        return Err(PipelineError::UnknownScreen(selection.screen_id.clone()));
    }
    Ok(analyzer.report()?)
}

/// [`analyze`], then hand the findings to an advice generator.
pub fn analyze_and_advise<P, A>(
    provider: &P,
    advisor: &A,
    image: &[u8],
    profile: core::UserProfile,
    selection: &ScreenSelection,
    params: rules::AnalyzerParams,
) -> Result<AdvisedReport, PipelineError>
where
    P: rules::DetectionProvider,
    A: rules::AdviceGenerator,
{
    let report = analyze(provider, image, profile.clone(), selection, params)?;
    let advice = advisor
        .summarize(&report.findings, &profile)
        .map_err(|e| PipelineError::Advice(Box::new(e)))?;
    Ok(AdvisedReport { report, advice })
}
