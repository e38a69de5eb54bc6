use serde::{Deserialize, Serialize};

use crate::geometry::PixelBox;

/// One labelled box from the external detector.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DetectedObject {
    /// Raw class label as reported by the detector.
    pub class: String,
    #[serde(rename = "box")]
    pub bbox: PixelBox,
    /// Selection handle (`screen_{index}`), only ever assigned to
    /// screen-like objects. Not stable across re-detection.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

impl DetectedObject {
    pub fn new(class: impl Into<String>, bbox: PixelBox) -> Self {
        Self {
            class: class.into(),
            bbox,
            id: None,
        }
    }
}

/// Object categories the analyzer knows how to reason about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Screen,
    Monitor,
    Laptop,
    Keyboard,
    Mouse,
    WristRest,
    DeskLamp,
    Window,
    MonitorSupport,
}

/// Mapping from detector labels to [`ObjectKind`].
///
/// Detector label sets drift between model versions (`wrist rest` vs
/// `wrist_rest`, `monitor support` vs `screen support`), so every kind
/// accepts a list of labels. Matching is exact and case-sensitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassVocabulary {
    pub screen: Vec<String>,
    pub monitor: Vec<String>,
    pub laptop: Vec<String>,
    pub keyboard: Vec<String>,
    pub mouse: Vec<String>,
    pub wrist_rest: Vec<String>,
    pub desk_lamp: Vec<String>,
    pub window: Vec<String>,
    pub monitor_support: Vec<String>,
}

fn labels(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for ClassVocabulary {
    fn default() -> Self {
        Self {
            screen: labels(&["screen"]),
            monitor: labels(&["monitor"]),
            laptop: labels(&["laptop"]),
            keyboard: labels(&["keyboard"]),
            mouse: labels(&["mouse"]),
            wrist_rest: labels(&["wrist_rest", "wrist rest"]),
            desk_lamp: labels(&["desk lamp"]),
            window: labels(&["window"]),
            monitor_support: labels(&["monitor support", "screen support"]),
        }
    }
}

impl ClassVocabulary {
    /// Labels accepted for `kind`.
    pub fn labels(&self, kind: ObjectKind) -> &[String] {
        match kind {
            ObjectKind::Screen => &self.screen,
            ObjectKind::Monitor => &self.monitor,
            ObjectKind::Laptop => &self.laptop,
            ObjectKind::Keyboard => &self.keyboard,
            ObjectKind::Mouse => &self.mouse,
            ObjectKind::WristRest => &self.wrist_rest,
            ObjectKind::DeskLamp => &self.desk_lamp,
            ObjectKind::Window => &self.window,
            ObjectKind::MonitorSupport => &self.monitor_support,
        }
    }

    #[inline]
    pub fn matches(&self, class: &str, kind: ObjectKind) -> bool {
        self.labels(kind).iter().any(|l| l == class)
    }

    /// Resolve a raw label; `None` for classes outside the vocabulary.
    pub fn kind_of(&self, class: &str) -> Option<ObjectKind> {
        const ALL: [ObjectKind; 9] = [
            ObjectKind::Screen,
            ObjectKind::Monitor,
            ObjectKind::Laptop,
            ObjectKind::Keyboard,
            ObjectKind::Mouse,
            ObjectKind::WristRest,
            ObjectKind::DeskLamp,
            ObjectKind::Window,
            ObjectKind::MonitorSupport,
        ];
        ALL.into_iter().find(|&k| self.matches(class, k))
    }
}

/// First object of `kind` in detection order.
pub fn find_first<'a>(
    objects: &'a [DetectedObject],
    vocabulary: &ClassVocabulary,
    kind: ObjectKind,
) -> Option<&'a DetectedObject> {
    objects
        .iter()
        .find(|obj| vocabulary.matches(&obj.class, kind))
}
