//! Rasterization of finished traces.
//!
//! Rendering is split in two steps: [`compile_strokes`] turns a trace and a style into a
//! backend-agnostic [`StrokePlan`], and a [`RenderBackend`] rasterizes that plan.
//!
//! Text ops (the placeholder label and an optional [`Caption`]) are shaped with `parley`
//! from a single font file; without one, text is skipped and the rest still draws.

pub(crate) mod backend;
pub(crate) mod cpu;
pub(crate) mod plan;
pub(crate) mod text;

pub use backend::{
    BackendKind, PixelFormat, RenderBackend, RenderSettings, TraceImage, create_backend,
};
pub use cpu::CpuRenderer;
pub use plan::{
    Caption, DrawOp, ImageContent, PLACEHOLDER_MESSAGE, Paint, StrokePlan, compile_strokes,
};
pub use text::SYSTEM_FONT_CANDIDATES;

use crate::features::normalized::NormalizedFeatures;
use crate::foundation::core::Canvas;
use crate::foundation::error::ThoughtlineResult;
use crate::style::select::StyleVariant;
use crate::walk::walker::Trace;

/// Draw `trace` in `style` on the CPU backend, plus the caption from `settings`.
///
/// Traces of fewer than two points produce a placeholder image instead of an error.
pub fn render(
    trace: &Trace,
    style: StyleVariant,
    mood: &NormalizedFeatures,
    canvas: Canvas,
    settings: &RenderSettings,
) -> ThoughtlineResult<TraceImage> {
    let plan =
        compile_strokes(trace, style, mood, canvas.validate()?).with_caption(&settings.caption);
    create_backend(BackendKind::Cpu, settings).render_plan(&plan)
}
