use ergo_desk_core::{
    find_first, horizontal_side, is_proximate, CalibrationRatio, DetectedObject, Gender,
    Handedness, HorizontalSide, ObjectKind, UserProfile, RULES_TARGET,
};
use log::debug;

use super::desk::{estimate_desk_y, ideal_screen_top_cm};
use super::RuleKind;
use crate::finding::{height_problem_id, problem, round1, Finding, FindingDetails, Severity};
use crate::AnalyzerParams;

/// Read-only inputs shared by every rule of one run.
pub(crate) struct RuleContext<'a> {
    pub objects: &'a [DetectedObject],
    pub profile: &'a UserProfile,
    pub params: &'a AnalyzerParams,
    pub main_screen: Option<&'a DetectedObject>,
    pub ratio: Option<CalibrationRatio>,
}

impl<'a> RuleContext<'a> {
    #[inline]
    pub fn find(&self, kind: ObjectKind) -> Option<&'a DetectedObject> {
        find_first(self.objects, &self.params.vocabulary, kind)
    }
}

/// Evaluate a single rule. `None` means the rule had nothing to say,
/// typically because one of its inputs is missing.
pub(crate) fn evaluate(rule: RuleKind, ctx: &RuleContext<'_>) -> Option<Finding> {
    match rule {
        RuleKind::LightPosition => light_position(ctx),
        RuleKind::WristRest => Some(wrist_rest(ctx)),
        RuleKind::KeyboardMouseDistance => keyboard_mouse_distance(ctx),
        RuleKind::KeyboardMouseAlignment => keyboard_mouse_alignment(ctx),
        RuleKind::WindowPosition => window_position(ctx),
        RuleKind::ViewingDistance => viewing_distance(ctx),
        RuleKind::ScreenHeight => screen_height(ctx),
        RuleKind::LaptopHeight => laptop_height(ctx),
    }
}

fn light_position(ctx: &RuleContext<'_>) -> Option<Finding> {
    let lamp = ctx.find(ObjectKind::DeskLamp)?;
    let handedness = ctx.profile.dominant_hand;
    let lamp_side = horizontal_side(lamp.bbox.x, ctx.params.image_width_px);

    // a lamp on the writing-hand side throws the hand's shadow onto the desk
    let casts_shadow = matches!(
        (handedness, lamp_side),
        (Handedness::Left, HorizontalSide::Left) | (Handedness::Right, HorizontalSide::Right)
    );
    let severity = if casts_shadow {
        Severity::Moderate
    } else {
        Severity::Low
    };

    Some(Finding::new(
        problem::LIGHT_POSITION,
        severity,
        FindingDetails::LightPosition {
            handedness,
            lamp_side,
        },
    ))
}

fn wrist_rest(ctx: &RuleContext<'_>) -> Finding {
    let has_wrist_rest = ctx.find(ObjectKind::WristRest).is_some();
    let severity = if has_wrist_rest {
        Severity::Low
    } else {
        Severity::High
    };
    Finding::new(
        problem::WRIST_REST_PRESENCE,
        severity,
        FindingDetails::WristRest { has_wrist_rest },
    )
}

fn keyboard_mouse_distance(ctx: &RuleContext<'_>) -> Option<Finding> {
    let ratio = ctx.ratio?;
    let keyboard = ctx.find(ObjectKind::Keyboard)?;
    let mouse = ctx.find(ObjectKind::Mouse)?;
    let gender = ctx.profile.gender?;

    let distance_cm = ratio.to_cm(keyboard.bbox.horizontal_distance(&mouse.bbox));
    let thresholds = &ctx.params.keyboard_mouse;
    let threshold_cm = match gender {
        Gender::Male => thresholds.male_cm,
        Gender::Female | Gender::Other => thresholds.default_cm,
    };
    let severity = if distance_cm > threshold_cm {
        Severity::High
    } else {
        Severity::Low
    };

    Some(Finding::new(
        problem::KEYBOARD_MOUSE_DISTANCE,
        severity,
        FindingDetails::KeyboardMouseDistance {
            actual_distance_cm: round1(distance_cm),
            threshold_cm,
        },
    ))
}

fn keyboard_mouse_alignment(ctx: &RuleContext<'_>) -> Option<Finding> {
    let keyboard = ctx.find(ObjectKind::Keyboard)?;
    let mouse = ctx.find(ObjectKind::Mouse)?;

    let is_vertically_aligned = keyboard.bbox.spans_y(mouse.bbox.y);
    let severity = if is_vertically_aligned {
        Severity::Low
    } else {
        Severity::Moderate
    };

    Some(Finding::new(
        problem::KEYBOARD_MOUSE_ALIGNMENT,
        severity,
        FindingDetails::KeyboardMouseAlignment {
            is_vertically_aligned,
        },
    ))
}

fn window_position(ctx: &RuleContext<'_>) -> Option<Finding> {
    let screen = ctx.main_screen?;
    let ratio = ctx.ratio?;
    let window = ctx.find(ObjectKind::Window)?;

    let horizontal_distance_cm = round1(ratio.to_cm(screen.bbox.horizontal_distance(&window.bbox)));
    let severity = if horizontal_distance_cm <= ctx.params.window_glare_cm {
        Severity::Moderate
    } else {
        Severity::Low
    };

    Some(Finding::new(
        problem::WINDOW_POSITION,
        severity,
        FindingDetails::WindowPosition {
            horizontal_distance_cm,
        },
    ))
}

fn viewing_distance(ctx: &RuleContext<'_>) -> Option<Finding> {
    let screen = ctx.main_screen?;
    let image_width = ctx.params.image_width_px;
    if image_width <= 0.0 {
        debug!(
            target: RULES_TARGET,
            "viewing distance skipped: image width {image_width} is not positive"
        );
        return None;
    }

    let screen_width_ratio = screen.bbox.width / image_width;
    let thresholds = &ctx.params.viewing_distance;
    let severity = if screen_width_ratio > thresholds.too_close_ratio {
        Severity::High
    } else if screen_width_ratio < thresholds.too_far_ratio {
        Severity::Moderate
    } else {
        Severity::Low
    };

    Some(Finding::new(
        problem::VIEWING_DISTANCE,
        severity,
        FindingDetails::ViewingDistance {
            main_screen_type: screen.class.clone(),
            screen_width_ratio,
        },
    ))
}

fn screen_height(ctx: &RuleContext<'_>) -> Option<Finding> {
    let screen = ctx
        .find(ObjectKind::Screen)
        .or_else(|| ctx.find(ObjectKind::Monitor))?;
    let has_support = rests_on_support(ctx, screen);
    measure_height(ctx, screen, has_support, None)
}

fn laptop_height(ctx: &RuleContext<'_>) -> Option<Finding> {
    let laptop = ctx.find(ObjectKind::Laptop)?;
    let has_support = rests_on_support(ctx, laptop);
    let has_external_keyboard = ctx.find(ObjectKind::Keyboard).is_some();
    measure_height(ctx, laptop, has_support, Some(has_external_keyboard))
}

fn rests_on_support(ctx: &RuleContext<'_>, obj: &DetectedObject) -> bool {
    ctx.find(ObjectKind::MonitorSupport).is_some_and(|support| {
        is_proximate(&obj.bbox, &support.bbox, ctx.params.proximity_threshold_px)
    })
}

/// Compare the top edge of `obj` against the ideal height for this user.
fn measure_height(
    ctx: &RuleContext<'_>,
    obj: &DetectedObject,
    has_support: bool,
    has_external_keyboard: Option<bool>,
) -> Option<Finding> {
    let ratio = ctx.ratio?;
    let height_cm = ctx.profile.height_cm?;
    let gender = ctx.profile.gender?;

    let desk_y = estimate_desk_y(ctx).unwrap_or_else(|| {
        debug!(
            target: RULES_TARGET,
            "no desk references detected, using the {} bottom edge",
            obj.class
        );
        obj.bbox.bottom()
    });

    let ideal_height_cm = ideal_screen_top_cm(height_cm, gender);
    let estimated_actual_height_cm = round1(ratio.to_cm(desk_y - obj.bbox.top()));
    let delta_cm = round1(estimated_actual_height_cm - ideal_height_cm);

    let thresholds = &ctx.params.screen_height;
    let severity = match delta_cm.abs() {
        d if d > thresholds.high_cm => Severity::High,
        d if d > thresholds.moderate_cm => Severity::Moderate,
        _ => Severity::Low,
    };

    Some(Finding::new(
        height_problem_id(&obj.class),
        severity,
        FindingDetails::ScreenHeight {
            delta_cm,
            ideal_height_cm,
            estimated_actual_height_cm,
            has_support,
            has_external_keyboard,
        },
    ))
}
