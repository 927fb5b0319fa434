use crate::features::normalized::NormalizedFeatures;

/// Rendering algorithm applied to a finished trace. Exactly one is chosen per text.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleVariant {
    /// Point cloud of small dots around every trace point.
    Scattered,
    /// One faint, thin continuous stroke.
    Solitary,
    /// Thick continuous stroke, tapering at the end when calm is low.
    Bold,
    /// Dashed stroke of alternating drawn and skipped runs.
    Fragmented,
    /// Default stroke with mood-modulated width and a closing taper.
    OrganicBase,
}

impl StyleVariant {
    /// All variants in selection priority order.
    pub const ALL: [StyleVariant; 5] = [
        StyleVariant::Scattered,
        StyleVariant::Solitary,
        StyleVariant::Bold,
        StyleVariant::Fragmented,
        StyleVariant::OrganicBase,
    ];

    /// Lowercase name, as used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            StyleVariant::Scattered => "scattered",
            StyleVariant::Solitary => "solitary",
            StyleVariant::Bold => "bold",
            StyleVariant::Fragmented => "fragmented",
            StyleVariant::OrganicBase => "organic_base",
        }
    }
}

/// Inputs every style predicate sees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StyleInputs {
    /// Normalized intensity in `[0, 1]`.
    pub intensity: f64,
    /// Normalized calm in `[0, 1]`.
    pub calm: f64,
    /// Raw count of `'?'` in the text.
    pub question_count: u64,
}

/// Row predicate of [`STYLE_TABLE`].
pub type StylePredicate = fn(&StyleInputs) -> bool;

/// Ordered decision table; the first matching row wins. Rows overlap, so order matters.
pub const STYLE_TABLE: [(StylePredicate, StyleVariant); 5] = [
    (|s| s.intensity > 0.8 && s.calm < 0.2, StyleVariant::Scattered),
    (|s| s.calm > 0.7 && s.intensity < 0.3, StyleVariant::Solitary),
    (|s| s.intensity > 0.5 && s.calm > 0.4, StyleVariant::Bold),
    (
        |s| s.intensity > 0.3 && s.calm < 0.5 && s.question_count > 0,
        StyleVariant::Fragmented,
    ),
    (|_| true, StyleVariant::OrganicBase),
];

/// Pick the stroke style for normalized scores and a question count.
pub fn select(intensity: f64, calm: f64, question_count: u64) -> StyleVariant {
    let inputs = StyleInputs {
        intensity,
        calm,
        question_count,
    };
    STYLE_TABLE
        .iter()
        .find(|(matches, _)| matches(&inputs))
        .map(|&(_, variant)| variant)
        .unwrap_or(StyleVariant::OrganicBase)
}

/// [`select`] over the shared normalized scores.
pub fn select_for(mood: &NormalizedFeatures, question_count: u64) -> StyleVariant {
    let style = select(mood.intensity, mood.calm, question_count);
    tracing::debug!(
        style = style.name(),
        intensity = mood.intensity,
        calm = mood.calm,
        question_count,
        "selected stroke style"
    );
    style
}

#[cfg(test)]
#[path = "../../tests/unit/style/select.rs"]
mod tests;
