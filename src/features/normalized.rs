use crate::features::extract::TextFeatures;
use crate::foundation::math::clamp01;

/// Raw intensity that maps to a normalized intensity of 1.
pub const INTENSITY_CEILING: f64 = 10.0;
/// Raw calm that maps to a normalized calm of 1.
pub const CALM_CEILING: f64 = 5.0;

/// Intensity and calm scaled into `[0, 1]`.
///
/// Computed once per text and shared by the phase planner, the style selector and the
/// renderer so geometry and style thresholds always see the same values.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct NormalizedFeatures {
    /// `clamp(intensity / 10, 0, 1)`.
    pub intensity: f64,
    /// `clamp(calm / 5, 0, 1)`.
    pub calm: f64,
}

impl NormalizedFeatures {
    /// Normalize arbitrary raw scores.
    pub fn from_raw(intensity: f64, calm: f64) -> Self {
        Self {
            intensity: clamp01(intensity / INTENSITY_CEILING),
            calm: clamp01(calm / CALM_CEILING),
        }
    }

    /// Normalize the scores carried by a feature record.
    pub fn from_features(features: &TextFeatures) -> Self {
        Self::from_raw(features.intensity, features.calm)
    }

    /// `1 - calm`: the restlessness that drives the closing phase.
    pub fn unrest(self) -> f64 {
        1.0 - self.calm
    }
}

#[cfg(test)]
#[path = "../../tests/unit/features/normalized.rs"]
mod tests;
