use approx::assert_relative_eq;
use ergo_desk::rules::{problem, AnalyzeError, AnalysisRequest, FindingDetails};
use ergo_desk::{
    AnalyzerParams, DetectedObject, DiagonalSize, ErgonomicsAnalyzer, Gender, Handedness,
    PixelBox, Severity, UserProfile,
};

fn obj(class: &str, x: f64, y: f64, w: f64, h: f64) -> DetectedObject {
    DetectedObject::new(class, PixelBox::new(x, y, w, h))
}

fn male_175() -> UserProfile {
    UserProfile::new(175.0, Gender::Male, Handedness::Right)
}

fn desk() -> Vec<DetectedObject> {
    vec![
        obj("screen", 450.0, 450.0, 750.0, 422.0),
        obj("keyboard", 550.0, 750.0, 450.0, 150.0),
        obj("mouse", 950.0, 780.0, 70.0, 100.0),
    ]
}

fn calibrated(objects: Vec<DetectedObject>, diagonal: &str) -> ErgonomicsAnalyzer {
    let mut analyzer = ErgonomicsAnalyzer::new(objects, male_175(), AnalyzerParams::default());
    let screens = analyzer.detect_screens();
    let id = screens[0].id.clone().expect("screen id");
    assert!(analyzer
        .set_main_screen(&id, &DiagonalSize::from(diagonal))
        .expect("select"));
    analyzer
}

#[test]
fn typical_desk_photo() {
    let analyzer = calibrated(desk(), "27");
    let ratio = analyzer
        .calibration_ratio()
        .map(|r| r.cm_per_px())
        .expect("ratio");
    assert_relative_eq!(ratio, 2.54 * 27.0 * 0.4899 / 422.0, max_relative = 1e-3);

    let report = analyzer.report().expect("report");

    let screen = report.finding(problem::SCREEN_HEIGHT).expect("screen height");
    match &screen.details {
        FindingDetails::ScreenHeight {
            delta_cm,
            ideal_height_cm,
            estimated_actual_height_cm,
            ..
        } => {
            assert_relative_eq!(*delta_cm, -8.6, epsilon = 1e-9);
            assert_relative_eq!(
                *estimated_actual_height_cm - *ideal_height_cm,
                *delta_cm,
                epsilon = 0.11
            );
        }
        other => panic!("unexpected details {other:?}"),
    }
    assert_eq!(screen.severity, Severity::Moderate);

    let distance = report
        .finding(problem::KEYBOARD_MOUSE_DISTANCE)
        .expect("keyboard-mouse distance");
    assert_eq!(distance.severity, Severity::High);
    match distance.details {
        FindingDetails::KeyboardMouseDistance {
            actual_distance_cm,
            threshold_cm,
        } => {
            assert_relative_eq!(actual_distance_cm, 31.9, epsilon = 1e-9);
            assert_relative_eq!(threshold_cm, 15.0);
        }
        ref other => panic!("unexpected details {other:?}"),
    }

    assert!(report.finding(problem::LIGHT_POSITION).is_none());
    assert!(report.finding(problem::WINDOW_POSITION).is_none());
    assert!(report.finding(problem::NO_ISSUES).is_none());
    assert_eq!(report.worst_severity(), Severity::High);
}

#[test]
fn keyboard_mouse_severity_follows_threshold() {
    for diagonal in ["13", "27", "40", "55", "100"] {
        let objects = vec![
            obj("screen", 640.0, 300.0, 600.0, 422.0),
            obj("keyboard", 312.0, 700.0, 400.0, 150.0),
            obj("mouse", 427.0, 720.0, 60.0, 90.0),
        ];
        let analyzer = calibrated(objects, diagonal);
        let r = analyzer
            .calibration_ratio()
            .map(|r| r.cm_per_px())
            .expect("ratio");
        let findings = analyzer.run_all_analyses().expect("findings");
        let f = findings
            .iter()
            .find(|f| f.problem_id == problem::KEYBOARD_MOUSE_DISTANCE)
            .expect("distance finding");

        let expected = if 115.0 * r > 15.0 {
            Severity::High
        } else {
            Severity::Low
        };
        assert_eq!(f.severity, expected, "diagonal {diagonal}, ratio {r}");
    }
}

#[test]
fn missing_wrist_rest_is_always_high() {
    let lone_screen = vec![obj("laptop", 640.0, 400.0, 400.0, 250.0)];
    for objects in [lone_screen, desk()] {
        let mut analyzer =
            ErgonomicsAnalyzer::new(objects, UserProfile::default(), AnalyzerParams::default());
        analyzer.detect_screens();
        let selected = analyzer
            .set_main_screen("screen_0", &DiagonalSize::from("not a size"))
            .expect("select");
        assert!(selected);
        assert!(analyzer.calibration_ratio().is_none());

        let findings = analyzer.run_all_analyses().expect("findings");
        let f = findings
            .iter()
            .find(|f| f.problem_id == problem::WRIST_REST_PRESENCE)
            .expect("wrist rest finding");
        assert_eq!(f.severity, Severity::High);
    }
}

#[test]
fn wide_main_screen_is_too_close() {
    let analyzer = calibrated(vec![obj("monitor", 640.0, 400.0, 700.0, 400.0)], "27");
    let findings = analyzer.run_all_analyses().expect("findings");
    let f = findings
        .iter()
        .find(|f| f.problem_id == problem::VIEWING_DISTANCE)
        .expect("viewing distance");
    assert_eq!(f.severity, Severity::High);
    match &f.details {
        FindingDetails::ViewingDistance {
            main_screen_type,
            screen_width_ratio,
        } => {
            assert_eq!(main_screen_type, "monitor");
            assert_relative_eq!(*screen_width_ratio, 700.0 / 1280.0);
        }
        other => panic!("unexpected details {other:?}"),
    }
}

#[test]
fn screen_listing_is_stable() {
    let objects = vec![
        obj("keyboard", 550.0, 750.0, 450.0, 150.0),
        obj("laptop", 200.0, 600.0, 380.0, 240.0),
        obj("window", 1500.0, 250.0, 300.0, 400.0),
        obj("monitor", 900.0, 380.0, 560.0, 330.0),
        obj("screen", 450.0, 450.0, 750.0, 422.0),
    ];
    let mut analyzer = ErgonomicsAnalyzer::new(objects, male_175(), AnalyzerParams::default());

    let first = analyzer.detect_screens();
    let second = analyzer.detect_screens();
    assert_eq!(first, second);

    let classes: Vec<_> = first.iter().map(|s| s.class.as_str()).collect();
    assert_eq!(classes, ["laptop", "monitor", "screen"]);

    let mut ids: Vec<_> = first.iter().filter_map(|s| s.id.clone()).collect();
    assert_eq!(ids.len(), 3);
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[test]
fn analysis_needs_a_main_screen() {
    let mut analyzer = ErgonomicsAnalyzer::new(desk(), male_175(), AnalyzerParams::default());
    analyzer.detect_screens();
    assert!(matches!(
        analyzer.run_all_analyses(),
        Err(AnalyzeError::MainScreenNotSet)
    ));
}

#[test]
fn demo_requests_run() {
    let dir = concat!(env!("CARGO_MANIFEST_DIR"), "/demos");

    let report = AnalysisRequest::load_json(format!("{dir}/request.json"))
        .expect("load")
        .run()
        .expect("run");
    assert!(report.finding(problem::KEYBOARD_MOUSE_DISTANCE).is_some());

    let report = AnalysisRequest::load_json(format!("{dir}/home_office.json"))
        .expect("load")
        .run()
        .expect("run");
    assert_eq!(report.main_screen.class, "monitor");
    assert!(report.finding(problem::WRIST_REST_PRESENCE).is_some());
    assert!(report.finding(problem::LAPTOP_HEIGHT).is_none());
    assert!(report.finding(problem::LIGHT_POSITION).is_some());
}
