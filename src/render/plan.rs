use kurbo::{Circle, Rect, Shape};

use crate::features::normalized::NormalizedFeatures;
use crate::foundation::core::{BezPath, Canvas, Point, TracePoint};
use crate::foundation::math::{trunc_i32, trunc_i64};
use crate::style::select::StyleVariant;
use crate::walk::rng::TraceRng;
use crate::walk::walker::Trace;

const PATH_TOLERANCE: f64 = 0.1;
const DOT_RADIUS: f64 = 2.0;
const DASH_WIDTH: f64 = 2.0;
const TITLE_SIZE: f64 = 24.0;
const TIMESTAMP_SIZE: f64 = 12.0;
const TIMESTAMP_ALPHA: u8 = 170;

/// Label drawn above the insufficient-trace bar.
pub const PLACEHOLDER_MESSAGE: &str = "insufficient trace";

/// Where a draw op takes its color from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Paint {
    /// Ink color with the given alpha.
    Ink {
        /// Straight alpha, 255 is opaque.
        alpha: u8,
    },
    /// Alert color, used by the insufficient-trace placeholder.
    Alert,
}

impl Paint {
    /// Opaque ink.
    pub const INK: Paint = Paint::Ink { alpha: 255 };
}

/// One backend-agnostic drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// Stroke `path` with round joins and caps.
    Stroke {
        /// Geometry in canvas pixels.
        path: BezPath,
        /// Stroke width in pixels.
        width: f64,
        /// Color source.
        paint: Paint,
    },
    /// Fill `path` (non-zero winding).
    Fill {
        /// Geometry in canvas pixels.
        path: BezPath,
        /// Color source.
        paint: Paint,
    },
    /// A single line of text centred on `center`.
    Text {
        /// The string to draw.
        text: String,
        /// Centre of the text's bounding box in canvas pixels.
        center: Point,
        /// Font size in pixels.
        size: f64,
        /// Color source.
        paint: Paint,
    },
}

impl DrawOp {
    /// Stroke width, if this op is a stroke.
    pub fn stroke_width(&self) -> Option<f64> {
        match self {
            DrawOp::Stroke { width, .. } => Some(*width),
            DrawOp::Fill { .. } | DrawOp::Text { .. } => None,
        }
    }

    /// The string, if this op draws text.
    pub fn text(&self) -> Option<&str> {
        match self {
            DrawOp::Text { text, .. } => Some(text),
            DrawOp::Stroke { .. } | DrawOp::Fill { .. } => None,
        }
    }
}

/// Optional text framing a trace: a title at the top and a timestamp at the bottom.
///
/// Both default to `None`, which keeps output a pure function of text and canvas. The
/// timestamp is any caller-formatted string; the engine never reads the clock.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Caption {
    /// Heading centred near the top edge.
    pub title: Option<String>,
    /// Creation time centred near the bottom edge.
    pub timestamp: Option<String>,
}

impl Caption {
    /// Whether nothing would be drawn.
    pub fn is_empty(&self) -> bool {
        non_blank(&self.title).is_none() && non_blank(&self.timestamp).is_none()
    }
}

fn non_blank(s: &Option<String>) -> Option<&str> {
    s.as_deref().filter(|s| !s.trim().is_empty())
}

/// What a rendered image depicts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "style", rename_all = "snake_case")]
pub enum ImageContent {
    /// A trace drawn in the given style.
    Trace(StyleVariant),
    /// Placeholder for a trace of fewer than two points.
    InsufficientTrace,
}

/// Ordered draw ops for one image, independent of the raster backend.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokePlan {
    /// Target surface.
    pub canvas: Canvas,
    /// What the ops depict.
    pub content: ImageContent,
    /// Ops in paint order.
    pub ops: Vec<DrawOp>,
}

impl StrokePlan {
    /// Append caption text on top of the drawing.
    pub fn with_caption(mut self, caption: &Caption) -> Self {
        let w = f64::from(self.canvas.width);
        let h = f64::from(self.canvas.height);
        if let Some(title) = non_blank(&caption.title) {
            self.ops.push(DrawOp::Text {
                text: title.to_string(),
                center: Point::new((w / 2.0).floor(), 30.0),
                size: TITLE_SIZE,
                paint: Paint::INK,
            });
        }
        if let Some(stamp) = non_blank(&caption.timestamp) {
            self.ops.push(DrawOp::Text {
                text: stamp.to_string(),
                center: Point::new((w / 2.0).floor(), h - 20.0),
                size: TIMESTAMP_SIZE,
                paint: Paint::Ink {
                    alpha: TIMESTAMP_ALPHA,
                },
            });
        }
        self
    }

    /// Whether any op draws text.
    pub fn has_text(&self) -> bool {
        self.ops.iter().any(|op| op.text().is_some())
    }
}

/// Compile a trace into draw ops for `style`, never regenerating or reordering points.
///
/// Styles that need randomness (scattered dots, dash lengths) draw from the render stream
/// of the trace seed.
pub fn compile_strokes(
    trace: &Trace,
    style: StyleVariant,
    mood: &NormalizedFeatures,
    canvas: Canvas,
) -> StrokePlan {
    if trace.len() < 2 {
        tracing::warn!(points = trace.len(), "not enough points to draw a trace");
        return StrokePlan {
            canvas,
            content: ImageContent::InsufficientTrace,
            ops: placeholder(canvas),
        };
    }

    let mut rng = TraceRng::for_render(trace.seed);
    let pts = &trace.points;
    let ops = match style {
        StyleVariant::Scattered => scattered(pts, mood, &mut rng),
        StyleVariant::Solitary => solitary(pts, mood),
        StyleVariant::Bold => bold(pts, mood),
        StyleVariant::Fragmented => fragmented(pts, mood, &mut rng),
        StyleVariant::OrganicBase => organic(pts, mood),
    };

    StrokePlan {
        canvas,
        content: ImageContent::Trace(style),
        ops,
    }
}

fn scattered(pts: &[TracePoint], mood: &NormalizedFeatures, rng: &mut TraceRng) -> Vec<DrawOp> {
    let spread = 10.0 + mood.intensity * 20.0;
    let mut ops = Vec::with_capacity(pts.len() * 10);
    for p in pts {
        let dots = rng.int_in(5, 15);
        for _ in 0..dots {
            let dx = rng.normal(spread);
            let dy = rng.normal(spread);
            let center = Point::new(
                f64::from(trunc_i32(f64::from(p.x) + dx)),
                f64::from(trunc_i32(f64::from(p.y) + dy)),
            );
            ops.push(DrawOp::Fill {
                path: Circle::new(center, DOT_RADIUS).to_path(PATH_TOLERANCE),
                paint: Paint::INK,
            });
        }
    }
    ops
}

fn solitary(pts: &[TracePoint], mood: &NormalizedFeatures) -> Vec<DrawOp> {
    let alpha = trunc_i64(255.0 * (0.3 + mood.calm * 0.7)).clamp(0, 255) as u8;
    vec![DrawOp::Stroke {
        path: polyline(pts),
        width: 1.0,
        paint: Paint::Ink { alpha },
    }]
}

fn bold(pts: &[TracePoint], mood: &NormalizedFeatures) -> Vec<DrawOp> {
    let n = pts.len() as f64;
    let base = trunc_i64(5.0 + mood.intensity * 8.0 - mood.calm * 2.0).max(2);
    let taper_from = n * 0.8;
    segments(pts, |i| {
        let i = i as f64;
        if i > taper_from && mood.calm < 0.5 {
            let reduction = 1.0 - (i - taper_from) / (n * 0.2);
            trunc_i64(base as f64 * reduction)
        } else {
            base
        }
    })
}

fn fragmented(pts: &[TracePoint], mood: &NormalizedFeatures, rng: &mut TraceRng) -> Vec<DrawOp> {
    let segment_base = 15.0 + mood.intensity * 10.0;
    let gap_base = 5.0 + mood.unrest() * 10.0;
    let last = pts.len() - 1;

    let mut ops = Vec::new();
    let mut i = 0usize;
    while i < last {
        let segment_len = trunc_i64(segment_base * rng.between(0.8, 0.4)).max(0) as usize;
        let gap_len = trunc_i64(gap_base * rng.between(0.8, 0.4)).max(0) as usize;

        let end = (i + segment_len).min(last);
        if i < end {
            ops.push(DrawOp::Stroke {
                path: polyline(&pts[i..=end]),
                width: DASH_WIDTH,
                paint: Paint::INK,
            });
        }
        i = (end + gap_len).max(i + 1);
    }
    ops
}

fn organic(pts: &[TracePoint], mood: &NormalizedFeatures) -> Vec<DrawOp> {
    let n = pts.len() as f64;
    let factor = 1.0 + mood.intensity * 3.0 - mood.calm * 1.5;
    let base = trunc_i64(2.0 * factor);
    let taper_from = n * 0.7;
    segments(pts, |i| {
        let i = i as f64;
        if i > taper_from {
            let reduction = 1.0 - (i - taper_from) / (n * 0.3);
            trunc_i64(base as f64 * reduction * (1.0 + mood.unrest() * 2.0))
        } else {
            base
        }
    })
}

/// One stroke per consecutive point pair, width chosen per segment index and floored at 1.
fn segments(pts: &[TracePoint], width_at: impl Fn(usize) -> i64) -> Vec<DrawOp> {
    pts.windows(2)
        .enumerate()
        .map(|(i, pair)| {
            let mut path = BezPath::new();
            path.move_to(pair[0].to_point());
            path.line_to(pair[1].to_point());
            DrawOp::Stroke {
                path,
                width: width_at(i).max(1) as f64,
                paint: Paint::INK,
            }
        })
        .collect()
}

fn polyline(pts: &[TracePoint]) -> BezPath {
    let mut path = BezPath::new();
    let mut iter = pts.iter();
    if let Some(first) = iter.next() {
        path.move_to(first.to_point());
    }
    for p in iter {
        path.line_to(p.to_point());
    }
    path
}

// A bar across the centre with the message just above it.
fn placeholder(canvas: Canvas) -> Vec<DrawOp> {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let half = (h * 0.01).max(1.0);
    let size = (h * 0.035).floor().clamp(8.0, TITLE_SIZE);
    let rect = Rect::new(w * 0.2, h / 2.0 - half, w * 0.8, h / 2.0 + half);
    vec![
        DrawOp::Fill {
            path: rect.to_path(PATH_TOLERANCE),
            paint: Paint::Alert,
        },
        DrawOp::Text {
            text: PLACEHOLDER_MESSAGE.to_string(),
            center: Point::new((w / 2.0).floor(), h / 2.0 - half - size),
            size,
            paint: Paint::Alert,
        },
    ]
}

#[cfg(test)]
#[path = "../../tests/unit/render/plan.rs"]
mod tests;
