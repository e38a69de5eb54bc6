use serde::{Deserialize, Serialize};

/// Gender as used by the anthropometric formulas.
///
/// Anything other than `male`/`female` (case-insensitive) maps to `Other`,
/// which selects the neutral formula.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl From<String> for Gender {
    fn from(raw: String) -> Self {
        Gender::from(raw.as_str())
    }
}

impl From<&str> for Gender {
    fn from(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "male" => Gender::Male,
            "female" => Gender::Female,
            _ => Gender::Other,
        }
    }
}

impl From<Gender> for String {
    fn from(g: Gender) -> Self {
        match g {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
        .to_string()
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Handedness {
    Left,
    #[default]
    Right,
}

/// User inputs for one analysis.
///
/// Height and gender are optional: rules that need them skip silently when
/// they are absent.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub height_cm: Option<f64>,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(default)]
    pub dominant_hand: Handedness,
}

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ProfileError {
    #[error("height {0} cm is outside the supported range {min}-{max} cm", min = UserProfile::MIN_HEIGHT_CM, max = UserProfile::MAX_HEIGHT_CM)]
    HeightOutOfRange(f64),
}

impl UserProfile {
    pub const MIN_HEIGHT_CM: f64 = 100.0;
    pub const MAX_HEIGHT_CM: f64 = 250.0;

    pub fn new(height_cm: f64, gender: Gender, dominant_hand: Handedness) -> Self {
        Self {
            height_cm: Some(height_cm),
            gender: Some(gender),
            dominant_hand,
        }
    }

    /// Check input-surface constraints. The analyzer itself never calls
    /// this; callers validate before building a request.
    pub fn validate(&self) -> Result<(), ProfileError> {
        match self.height_cm {
            Some(h) if !(Self::MIN_HEIGHT_CM..=Self::MAX_HEIGHT_CM).contains(&h) => {
                Err(ProfileError::HeightOutOfRange(h))
            }
            _ => Ok(()),
        }
    }
}
