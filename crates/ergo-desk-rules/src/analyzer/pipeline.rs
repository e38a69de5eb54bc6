use std::collections::HashSet;

use ergo_desk_core::{
    calibrate, CalibrationRatio, DetectedObject, DiagonalSize, UserProfile, RULES_TARGET,
};
use log::{debug, info, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

use super::rules::{evaluate, RuleContext};
use super::{AnalyzeError, RuleKind};
use crate::finding::Finding;
use crate::report::AnalysisReport;
use crate::AnalyzerParams;

/// Rule engine for one analysis request.
///
/// Build one per request: the analyzer owns its detections, so nothing is
/// shared between concurrent analyses. Findings are collected per call of
/// [`ErgonomicsAnalyzer::run_all_analyses`] and never accumulate across
/// calls.
#[derive(Clone, Debug)]
pub struct ErgonomicsAnalyzer {
    objects: Vec<DetectedObject>,
    profile: UserProfile,
    params: AnalyzerParams,
    main_screen: Option<DetectedObject>,
    ratio: Option<CalibrationRatio>,
}

impl ErgonomicsAnalyzer {
    pub fn new(objects: Vec<DetectedObject>, profile: UserProfile, params: AnalyzerParams) -> Self {
        Self {
            objects,
            profile,
            params,
            main_screen: None,
            ratio: None,
        }
    }

    #[inline]
    pub fn objects(&self) -> &[DetectedObject] {
        &self.objects
    }

    #[inline]
    pub fn profile(&self) -> &UserProfile {
        &self.profile
    }

    #[inline]
    pub fn params(&self) -> &AnalyzerParams {
        &self.params
    }

    /// Currently selected main screen, if any.
    #[inline]
    pub fn main_screen(&self) -> Option<&DetectedObject> {
        self.main_screen.as_ref()
    }

    /// Centimeters per pixel, once a main screen with a usable size is set.
    #[inline]
    pub fn calibration_ratio(&self) -> Option<CalibrationRatio> {
        self.ratio
    }

    /// All screen-like detections, each tagged with a selection id.
    ///
    /// Untagged screens get `screen_{i}`, `i` being their position among
    /// screen-like objects, or the next free index when a pre-tagged screen
    /// already holds that id. Ids are written back into the detections and
    /// never overwritten, so repeated calls return the same ids.
    pub fn detect_screens(&mut self) -> Vec<DetectedObject> {
        let params = &self.params;
        let mut taken: HashSet<String> = self
            .objects
            .iter()
            .filter(|obj| params.is_screen_class(&obj.class))
            .filter_map(|obj| obj.id.clone())
            .collect();

        self.objects
            .iter_mut()
            .filter(|obj| params.is_screen_class(&obj.class))
            .enumerate()
            .map(|(i, obj)| {
                if obj.id.is_none() {
                    let mut n = i;
                    let mut id = format!("screen_{n}");
                    while taken.contains(&id) {
                        n += 1;
                        id = format!("screen_{n}");
                    }
                    taken.insert(id.clone());
                    obj.id = Some(id);
                }
                obj.clone()
            })
            .collect()
    }

    /// Select the main screen by id and calibrate against its diagonal.
    ///
    /// Returns `Ok(false)` when no screen carries `id`; the caller should
    /// ask again. The calibration ratio is replaced even when the new
    /// diagonal cannot be parsed, in which case it becomes undefined and
    /// every cm-based rule is skipped.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, diagonal), fields(screen_id = id))
    )]
    pub fn set_main_screen(
        &mut self,
        id: &str,
        diagonal: &DiagonalSize,
    ) -> Result<bool, AnalyzeError> {
        let screens = self.detect_screens();
        let Some(selected) = screens.into_iter().find(|s| s.id.as_deref() == Some(id)) else {
            warn!("no screen with id `{id}` among detections");
            return Ok(false);
        };

        selected
            .bbox
            .validate()
            .map_err(|source| AnalyzeError::InvalidBox {
                id: id.to_string(),
                source,
            })?;

        self.ratio = calibrate(&selected.bbox, diagonal, self.params.aspect);
        match self.ratio {
            Some(ratio) => info!(
                "main screen {id} ({}) calibrated at {:.4} cm/px",
                selected.class,
                ratio.cm_per_px()
            ),
            None => warn!(
                "main screen {id} set but not calibrated (diagonal {diagonal:?}, box height {})",
                selected.bbox.height
            ),
        }
        self.main_screen = Some(selected);
        Ok(true)
    }

    /// Run every enabled rule in [`RuleKind::ORDER`].
    ///
    /// Fails only when no main screen has been selected. When no rule
    /// produced a finding and the sentinel is enabled, the result is a
    /// single `NO_ISSUES` finding.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self), fields(objects = self.objects.len()))
    )]
    pub fn run_all_analyses(&self) -> Result<Vec<Finding>, AnalyzeError> {
        let main_screen = self
            .main_screen
            .as_ref()
            .ok_or(AnalyzeError::MainScreenNotSet)?;

        let ctx = RuleContext {
            objects: &self.objects,
            profile: &self.profile,
            params: &self.params,
            main_screen: Some(main_screen),
            ratio: self.ratio,
        };

        let mut findings = Vec::new();
        for rule in RuleKind::ORDER {
            if !self.params.is_enabled(rule) {
                debug!(target: RULES_TARGET, "{rule:?}: disabled");
                continue;
            }
            match evaluate(rule, &ctx) {
                Some(finding) => {
                    debug!(
                        target: RULES_TARGET,
                        "{rule:?}: {} {}",
                        finding.problem_id,
                        finding.severity
                    );
                    findings.push(finding);
                }
                None => debug!(target: RULES_TARGET, "{rule:?}: skipped"),
            }
        }

        if findings.is_empty() && self.params.no_issues_sentinel {
            findings.push(Finding::no_issues());
        }

        info!(
            "analysis finished: {} findings over {} detections",
            findings.len(),
            self.objects.len()
        );
        Ok(findings)
    }

    /// Run the analyses and bundle the findings with their calibration
    /// context.
    pub fn report(&self) -> Result<AnalysisReport, AnalyzeError> {
        let findings = self.run_all_analyses()?;
        let main_screen = self
            .main_screen
            .clone()
            .ok_or(AnalyzeError::MainScreenNotSet)?;
        Ok(AnalysisReport {
            findings,
            main_screen,
            calibration_ratio: self.ratio,
            image_width_px: self.params.image_width_px,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::finding::{problem, Severity};
    use ergo_desk_core::{Gender, Handedness, PixelBox};

    fn obj(class: &str, x: f64, y: f64, w: f64, h: f64) -> DetectedObject {
        DetectedObject::new(class, PixelBox::new(x, y, w, h))
    }

    fn profile() -> UserProfile {
        UserProfile::new(175.0, Gender::Male, Handedness::Right)
    }

    #[test]
    fn screens_get_stable_sequential_ids() {
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![
                obj("keyboard", 0.0, 0.0, 10.0, 10.0),
                obj("screen", 0.0, 0.0, 10.0, 10.0),
                obj("laptop", 0.0, 0.0, 10.0, 10.0),
                obj("monitor", 0.0, 0.0, 10.0, 10.0),
            ],
            profile(),
            AnalyzerParams::default(),
        );
        let first = analyzer.detect_screens();
        let ids: Vec<_> = first.iter().filter_map(|s| s.id.clone()).collect();
        assert_eq!(ids, ["screen_0", "screen_1", "screen_2"]);
        assert_eq!(analyzer.detect_screens(), first);
        assert!(analyzer.objects()[0].id.is_none());
    }

    #[test]
    fn existing_ids_are_kept() {
        let mut tagged = obj("screen", 0.0, 0.0, 10.0, 10.0);
        tagged.id = Some("screen_7".to_string());
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![tagged, obj("laptop", 0.0, 0.0, 10.0, 10.0)],
            profile(),
            AnalyzerParams::default(),
        );
        let ids: Vec<_> = analyzer
            .detect_screens()
            .into_iter()
            .filter_map(|s| s.id)
            .collect();
        assert_eq!(ids, ["screen_7", "screen_1"]);
    }

    #[test]
    fn generated_ids_skip_ones_already_taken() {
        let mut tagged = obj("monitor", 0.0, 0.0, 10.0, 10.0);
        tagged.id = Some("screen_1".to_string());
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![
                tagged,
                obj("screen", 0.0, 0.0, 10.0, 10.0),
                obj("laptop", 0.0, 0.0, 10.0, 10.0),
            ],
            profile(),
            AnalyzerParams::default(),
        );
        let first = analyzer.detect_screens();
        let ids: Vec<_> = first.iter().filter_map(|s| s.id.as_deref()).collect();
        assert_eq!(ids, ["screen_1", "screen_2", "screen_3"]);
        assert_eq!(analyzer.detect_screens(), first);
    }

    #[test]
    fn unknown_screen_id_is_not_an_error() {
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![obj("screen", 450.0, 450.0, 750.0, 422.0)],
            profile(),
            AnalyzerParams::default(),
        );
        assert!(!analyzer
            .set_main_screen("screen_9", &DiagonalSize::from("27"))
            .expect("no error"));
        assert!(analyzer.main_screen().is_none());
    }

    #[test]
    fn invalid_box_is_an_error() {
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![obj("screen", 450.0, 450.0, -750.0, 422.0)],
            profile(),
            AnalyzerParams::default(),
        );
        let err = analyzer
            .set_main_screen("screen_0", &DiagonalSize::from("27"))
            .unwrap_err();
        assert!(matches!(err, AnalyzeError::InvalidBox { ref id, .. } if id == "screen_0"));
    }

    #[test]
    fn run_requires_main_screen() {
        let analyzer = ErgonomicsAnalyzer::new(Vec::new(), profile(), AnalyzerParams::default());
        assert!(matches!(
            analyzer.run_all_analyses(),
            Err(AnalyzeError::MainScreenNotSet)
        ));
        assert!(matches!(analyzer.report(), Err(AnalyzeError::MainScreenNotSet)));
    }

    #[test]
    fn unparseable_diagonal_skips_cm_rules() {
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![
                obj("screen", 450.0, 450.0, 750.0, 422.0),
                obj("keyboard", 550.0, 750.0, 450.0, 150.0),
                obj("mouse", 950.0, 780.0, 70.0, 100.0),
                obj("window", 1100.0, 300.0, 200.0, 300.0),
            ],
            profile(),
            AnalyzerParams::default(),
        );
        assert!(analyzer
            .set_main_screen("screen_0", &DiagonalSize::from("unknown"))
            .expect("set"));
        assert!(analyzer.calibration_ratio().is_none());

        let ids: Vec<_> = analyzer
            .run_all_analyses()
            .expect("run")
            .into_iter()
            .map(|f| f.problem_id)
            .collect();
        assert_eq!(
            ids,
            [
                problem::WRIST_REST_PRESENCE,
                problem::KEYBOARD_MOUSE_ALIGNMENT,
                problem::VIEWING_DISTANCE,
            ]
        );
    }

    #[test]
    fn rerunning_does_not_duplicate_findings() {
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![obj("screen", 450.0, 450.0, 750.0, 422.0)],
            profile(),
            AnalyzerParams::default(),
        );
        analyzer
            .set_main_screen("screen_0", &DiagonalSize::Inches(27.0))
            .expect("set");
        let first = analyzer.run_all_analyses().expect("run");
        let second = analyzer.run_all_analyses().expect("run");
        assert_eq!(first, second);
    }

    #[test]
    fn sentinel_when_every_rule_is_silent() {
        let mut params = AnalyzerParams::default();
        params.disabled_rules = vec![RuleKind::WristRest, RuleKind::ViewingDistance];
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![obj("screen", 450.0, 450.0, 750.0, 422.0)],
            UserProfile::default(),
            params.clone(),
        );
        analyzer
            .set_main_screen("screen_0", &DiagonalSize::from("n/a"))
            .expect("set");
        let findings = analyzer.run_all_analyses().expect("run");
        assert_eq!(findings, vec![Finding::no_issues()]);

        params.no_issues_sentinel = false;
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![obj("screen", 450.0, 450.0, 750.0, 422.0)],
            UserProfile::default(),
            params,
        );
        analyzer
            .set_main_screen("screen_0", &DiagonalSize::from("n/a"))
            .expect("set");
        assert!(analyzer.run_all_analyses().expect("run").is_empty());
    }

    #[test]
    fn findings_follow_rule_order() {
        let mut analyzer = ErgonomicsAnalyzer::new(
            vec![
                obj("laptop", 1050.0, 650.0, 400.0, 250.0),
                obj("screen", 450.0, 450.0, 750.0, 422.0),
                obj("desk lamp", 1200.0, 300.0, 80.0, 200.0),
                obj("window", 100.0, 300.0, 200.0, 300.0),
                obj("keyboard", 550.0, 750.0, 450.0, 150.0),
                obj("mouse", 950.0, 780.0, 70.0, 100.0),
            ],
            profile(),
            AnalyzerParams::default(),
        );
        assert!(analyzer
            .set_main_screen("screen_1", &DiagonalSize::from("27 inch"))
            .expect("set"));
        let findings = analyzer.run_all_analyses().expect("run");
        let ids: Vec<_> = findings.iter().map(|f| f.problem_id.as_str()).collect();
        assert_eq!(
            ids,
            [
                problem::LIGHT_POSITION,
                problem::WRIST_REST_PRESENCE,
                problem::KEYBOARD_MOUSE_DISTANCE,
                problem::KEYBOARD_MOUSE_ALIGNMENT,
                problem::WINDOW_POSITION,
                problem::VIEWING_DISTANCE,
                problem::SCREEN_HEIGHT,
                problem::LAPTOP_HEIGHT,
            ]
        );
        assert_eq!(findings[0].severity, Severity::Moderate);
        assert_eq!(findings[4].severity, Severity::Moderate);
    }
}
