//! thoughtline turns a span of text into a deterministic hand-drawn trace.
//!
//! # Pipeline overview
//!
//! 1. **Extract**: `&str -> TextFeatures` (counts, punctuation scores, point budget, seed)
//! 2. **Normalize**: `TextFeatures -> NormalizedFeatures` (intensity and calm in `[0, 1]`)
//! 3. **Plan**: `TextFeatures + NormalizedFeatures -> PhasePlan` (resolve, burst, contract)
//! 4. **Walk**: `PhasePlan + seed -> Trace` (seeded random walk clamped to the canvas)
//! 5. **Select**: `NormalizedFeatures + question count -> StyleVariant`
//! 6. **Render**: `Trace + StyleVariant -> TraceImage` (row-major RGB8), with an optional
//!    title and timestamp [`Caption`]
//!
//! [`generate_trace`] runs all six steps. The same text and canvas always produce the same
//! trace; independent calls share no state and may run in parallel ([`generate_batch`]).
//!
//! Persisting images is left to the caller; the `thoughtline` binary is one such caller.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod features;
mod foundation;
mod plan;
mod style;
mod walk;

/// Configuration loading.
pub mod config;
/// End-to-end entry points.
pub mod pipeline;
pub mod render;

pub use config::TraceConfig;
pub use features::extract::{TextFeatures, extract};
pub use features::normalized::{CALM_CEILING, INTENSITY_CEILING, NormalizedFeatures};
pub use foundation::core::{BezPath, Canvas, Point, Rgb8, TracePoint};
pub use foundation::error::{ThoughtlineError, ThoughtlineResult};
pub use pipeline::{
    DEFAULT_HEIGHT, DEFAULT_WIDTH, GeneratedTrace, Interpretation, InterpretationContext,
    generate_batch, generate_trace, generate_trace_with, interpret,
};
pub use plan::phases::{PhaseBeat, PhasePlan, PhaseSpec, plan};
pub use render::{
    BackendKind, Caption, CpuRenderer, DrawOp, ImageContent, PLACEHOLDER_MESSAGE, Paint,
    PixelFormat, RenderBackend, RenderSettings, SYSTEM_FONT_CANDIDATES, StrokePlan, TraceImage,
    compile_strokes, create_backend, render,
};
pub use style::select::{
    STYLE_TABLE, StyleInputs, StylePredicate, StyleVariant, select, select_for,
};
pub use walk::rng::TraceRng;
pub use walk::walker::{Trace, walk};
