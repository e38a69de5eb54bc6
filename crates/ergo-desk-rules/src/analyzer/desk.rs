use ergo_desk_core::{is_proximate, Gender, ObjectKind};

use super::rules::RuleContext;

/// Ideal height of the screen's top edge above the desk, in cm.
///
/// Empirical anthropometric fits on body height `height_cm`; `Other` uses
/// the neutral fit.
pub fn ideal_screen_top_cm(height_cm: f64, gender: Gender) -> f64 {
    match gender {
        Gender::Male => (3.32 * height_cm - 25.50) / 10.0,
        Gender::Female => (2.61 * height_cm + 93.84) / 10.0,
        Gender::Other => (2.96 * height_cm + 34.17) / 10.0,
    }
}

const DESK_REFERENCE_KINDS: [ObjectKind; 4] = [
    ObjectKind::Keyboard,
    ObjectKind::Mouse,
    ObjectKind::WristRest,
    ObjectKind::MonitorSupport,
];

/// Estimate the desk surface row in pixels.
///
/// Mean bottom edge of the first keyboard, mouse, wrist rest and monitor
/// support, plus the first laptop unless it sits on that support. `None`
/// when none of these objects were detected.
pub(crate) fn estimate_desk_y(ctx: &RuleContext<'_>) -> Option<f64> {
    let mut bottoms: Vec<f64> = DESK_REFERENCE_KINDS
        .iter()
        .filter_map(|&kind| ctx.find(kind))
        .map(|obj| obj.bbox.bottom())
        .collect();

    if let Some(laptop) = ctx.find(ObjectKind::Laptop) {
        let on_support = ctx
            .find(ObjectKind::MonitorSupport)
            .is_some_and(|support| {
                is_proximate(
                    &laptop.bbox,
                    &support.bbox,
                    ctx.params.proximity_threshold_px,
                )
            });
        if !on_support {
            bottoms.push(laptop.bbox.bottom());
        }
    }

    if bottoms.is_empty() {
        return None;
    }
    Some(bottoms.iter().sum::<f64>() / bottoms.len() as f64)
}
