use crate::foundation::core::{BezPath, Canvas, Rgb8};
use crate::foundation::error::{ThoughtlineError, ThoughtlineResult};
use crate::render::backend::{PixelFormat, RenderBackend, RenderSettings, TraceImage};
use crate::render::plan::{DrawOp, Paint, StrokePlan};
use crate::render::text::{ShapedText, TextLayoutEngine, resolve_font_path};

/// CPU backend powered by `vello_cpu`.
pub struct CpuRenderer {
    settings: RenderSettings,
    ctx: Option<vello_cpu::RenderContext>,
    text: TextLayoutEngine,
    font_resolved: bool,
}

impl CpuRenderer {
    /// Create a renderer with the given colors and font.
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            ctx: None,
            text: TextLayoutEngine::new(),
            font_resolved: false,
        }
    }

    // Resolved once per renderer; a configured font that fails to load is an error.
    fn ensure_font(&mut self) -> ThoughtlineResult<bool> {
        if !self.font_resolved {
            self.font_resolved = true;
            match resolve_font_path(self.settings.font_path.as_deref()) {
                Some(path) => self.text.load_font(&path)?,
                None => tracing::warn!("no font found; text ops will be skipped"),
            }
        }
        Ok(self.text.has_font())
    }

    // Shape every text op up front, in op order.
    fn shape_texts(&mut self, plan: &StrokePlan) -> ThoughtlineResult<Vec<ShapedText>> {
        if !plan.has_text() || !self.ensure_font()? {
            return Ok(Vec::new());
        }
        let mut shaped = Vec::new();
        for op in &plan.ops {
            if let DrawOp::Text { text, size, .. } = op {
                shaped.push(self.text.shape(text, *size as f32)?);
            }
        }
        Ok(shaped)
    }

    fn with_ctx_mut<R>(
        &mut self,
        width: u16,
        height: u16,
        f: impl FnOnce(&RenderSettings, &mut vello_cpu::RenderContext) -> ThoughtlineResult<R>,
    ) -> ThoughtlineResult<R> {
        let mut ctx = match self.ctx.take() {
            Some(ctx) if ctx.width() == width && ctx.height() == height => ctx,
            _ => vello_cpu::RenderContext::new(width, height),
        };
        ctx.reset();
        let out = f(&self.settings, &mut ctx)?;
        self.ctx = Some(ctx);
        Ok(out)
    }

    fn color_for(settings: &RenderSettings, paint: Paint) -> vello_cpu::peniko::Color {
        match paint {
            Paint::Ink { alpha } => rgba(settings.ink, alpha),
            Paint::Alert => rgba(settings.alert, 255),
        }
    }
}

impl RenderBackend for CpuRenderer {
    fn render_plan(&mut self, plan: &StrokePlan) -> ThoughtlineResult<TraceImage> {
        let (width, height) = surface_size(plan.canvas)?;
        let mut pixmap = vello_cpu::Pixmap::new(width, height);
        let shaped = self.shape_texts(plan)?;
        let font = self.text.font_data().cloned();
        let mut shaped = shaped.into_iter();

        self.with_ctx_mut(width, height, |settings, ctx| {
            ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
            ctx.set_paint(rgba(settings.background, 255));
            ctx.fill_rect(&vello_cpu::kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));

            for op in &plan.ops {
                match op {
                    DrawOp::Stroke {
                        path,
                        width: stroke_width,
                        paint,
                    } => {
                        ctx.set_paint(Self::color_for(settings, *paint));
                        ctx.set_stroke(
                            vello_cpu::kurbo::Stroke::new(*stroke_width)
                                .with_join(vello_cpu::kurbo::Join::Round)
                                .with_caps(vello_cpu::kurbo::Cap::Round),
                        );
                        ctx.stroke_path(&bezpath_to_cpu(path));
                    }
                    DrawOp::Fill { path, paint } => {
                        ctx.set_paint(Self::color_for(settings, *paint));
                        ctx.fill_path(&bezpath_to_cpu(path));
                    }
                    DrawOp::Text { center, paint, .. } => {
                        let (Some(font), Some(run)) = (font.as_ref(), shaped.next()) else {
                            continue;
                        };
                        ctx.set_paint(Self::color_for(settings, *paint));
                        ctx.set_transform(vello_cpu::kurbo::Affine::translate((
                            (center.x - run.width / 2.0).round(),
                            (center.y - run.height / 2.0).round(),
                        )));
                        ctx.glyph_run(font)
                            .font_size(run.size_px)
                            .fill_glyphs(run.glyphs.into_iter());
                        ctx.set_transform(vello_cpu::kurbo::Affine::IDENTITY);
                    }
                }
            }

            ctx.flush();
            ctx.render_to_pixmap(&mut pixmap);
            Ok(())
        })?;

        tracing::debug!(
            ops = plan.ops.len(),
            width = plan.canvas.width,
            height = plan.canvas.height,
            "rasterized stroke plan"
        );

        Ok(TraceImage {
            width: plan.canvas.width,
            height: plan.canvas.height,
            format: PixelFormat::Rgb8,
            data: premul_rgba_to_rgb(pixmap.data_as_u8_slice(), plan.canvas.pixel_count()),
            content: plan.content,
        })
    }
}

fn surface_size(canvas: Canvas) -> ThoughtlineResult<(u16, u16)> {
    let canvas = canvas.validate()?;
    match (u16::try_from(canvas.width), u16::try_from(canvas.height)) {
        (Ok(w), Ok(h)) => Ok((w, h)),
        _ => Err(ThoughtlineError::validation(format!(
            "canvas {}x{} exceeds the cpu backend limit of {}x{}",
            canvas.width,
            canvas.height,
            u16::MAX,
            u16::MAX
        ))),
    }
}

fn rgba(c: Rgb8, alpha: u8) -> vello_cpu::peniko::Color {
    vello_cpu::peniko::Color::from_rgba8(c.r, c.g, c.b, alpha)
}

// The background is opaque, so premultiplied channels equal straight ones.
fn premul_rgba_to_rgb(rgba: &[u8], pixels: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(pixels * 3);
    for px in rgba.chunks_exact(4).take(pixels) {
        out.extend_from_slice(&px[..3]);
    }
    out
}

fn bezpath_to_cpu(path: &BezPath) -> vello_cpu::kurbo::BezPath {
    use kurbo::PathEl;

    let pt = |p: kurbo::Point| vello_cpu::kurbo::Point::new(p.x, p.y);
    let mut out = vello_cpu::kurbo::BezPath::new();
    for el in path.elements() {
        match *el {
            PathEl::MoveTo(p) => out.move_to(pt(p)),
            PathEl::LineTo(p) => out.line_to(pt(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(pt(p1), pt(p2)),
            PathEl::CurveTo(p1, p2, p3) => out.curve_to(pt(p1), pt(p2), pt(p3)),
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
