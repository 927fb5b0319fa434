use rayon::prelude::*;

use crate::config::TraceConfig;
use crate::features::extract::{TextFeatures, extract};
use crate::features::normalized::NormalizedFeatures;
use crate::foundation::core::Canvas;
use crate::foundation::error::{ThoughtlineError, ThoughtlineResult};
use crate::plan::phases::{PhasePlan, plan};
use crate::render::{RenderSettings, TraceImage, render};
use crate::style::select::{StyleVariant, select_for};
use crate::walk::walker::{Trace, walk};

/// Default canvas width in pixels.
pub const DEFAULT_WIDTH: i64 = 1000;
/// Default canvas height in pixels.
pub const DEFAULT_HEIGHT: i64 = 700;

/// Everything derived from a text before rasterization.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Interpretation {
    /// Raw features.
    pub features: TextFeatures,
    /// Normalized scores shared by planning, style selection and rendering.
    pub mood: NormalizedFeatures,
    /// The three walk phases.
    pub plan: PhasePlan,
    /// Chosen stroke style.
    pub style: StyleVariant,
    /// The walked path.
    pub trace: Trace,
}

/// A finished generation: the interpretation plus its image.
#[derive(Clone, Debug)]
pub struct GeneratedTrace {
    /// Derived parameters and trace.
    pub interpretation: Interpretation,
    /// Rendered raster.
    pub image: TraceImage,
}

/// Run `extract -> plan -> walk -> select` for one text.
#[tracing::instrument(skip(text), fields(chars = text.chars().count()))]
pub fn interpret(text: &str, canvas: Canvas) -> ThoughtlineResult<Interpretation> {
    let features = extract(text);
    let mood = NormalizedFeatures::from_features(&features);
    let plan = plan(&features, &mood);
    let trace = walk(&plan, features.seed, canvas)?;
    let style = select_for(&mood, features.question_count);
    Ok(Interpretation {
        features,
        mood,
        plan,
        style,
        trace,
    })
}

/// Text in, image out, with the default colors.
///
/// Fails only with [`ThoughtlineError::InvalidCanvas`] for non-positive dimensions.
pub fn generate_trace(text: &str, width: i64, height: i64) -> ThoughtlineResult<TraceImage> {
    let canvas = Canvas::new(width, height)?;
    let interpretation = interpret(text, canvas)?;
    render_interpretation(&interpretation, canvas, &RenderSettings::default())
}

/// Full pipeline with explicit configuration, keeping every intermediate value.
#[tracing::instrument(skip(text, config), fields(chars = text.chars().count()))]
pub fn generate_trace_with(
    text: &str,
    config: &TraceConfig,
) -> ThoughtlineResult<GeneratedTrace> {
    let canvas = config.canvas()?;
    let interpretation = interpret(text, canvas)?;
    let image = render_interpretation(&interpretation, canvas, &config.render_settings())?;
    tracing::info!(
        style = interpretation.style.name(),
        points = interpretation.trace.len(),
        seed = interpretation.features.seed,
        "generated trace"
    );
    Ok(GeneratedTrace {
        interpretation,
        image,
    })
}

/// Generate several independent texts in parallel. Results keep input order and match
/// what sequential calls would produce.
pub fn generate_batch<S>(
    texts: &[S],
    config: &TraceConfig,
) -> Vec<ThoughtlineResult<GeneratedTrace>>
where
    S: AsRef<str> + Sync,
{
    texts
        .par_iter()
        .map(|t| generate_trace_with(t.as_ref(), config))
        .collect()
}

fn render_interpretation(
    interpretation: &Interpretation,
    canvas: Canvas,
    settings: &RenderSettings,
) -> ThoughtlineResult<TraceImage> {
    render(
        &interpretation.trace,
        interpretation.style,
        &interpretation.mood,
        canvas,
        settings,
    )
}

/// Per-conversation memory of the last interpretation text handed to the engine.
///
/// Callers own one context per session and pass it explicitly; the engine itself keeps
/// no state between calls.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct InterpretationContext {
    last: Option<String>,
}

impl InterpretationContext {
    /// Empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the saved interpretation.
    pub fn remember(&mut self, text: impl Into<String>) {
        self.last = Some(text.into());
    }

    /// The saved interpretation, if any.
    pub fn last(&self) -> Option<&str> {
        self.last.as_deref()
    }

    /// Forget the saved interpretation.
    pub fn clear(&mut self) {
        self.last = None;
    }

    /// Generate from the saved interpretation.
    pub fn generate(&self, config: &TraceConfig) -> ThoughtlineResult<GeneratedTrace> {
        let text = self
            .last()
            .ok_or_else(|| ThoughtlineError::validation("no interpretation saved yet"))?;
        generate_trace_with(text, config)
    }
}

#[cfg(test)]
#[path = "../tests/unit/pipeline.rs"]
mod tests;
