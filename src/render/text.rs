use std::path::{Path, PathBuf};

use crate::foundation::error::{ThoughtlineError, ThoughtlineResult};

/// Font files tried in order when no font is configured.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

/// The configured font, or the first system candidate that exists.
pub(crate) fn resolve_font_path(configured: Option<&Path>) -> Option<PathBuf> {
    match configured {
        Some(p) => Some(p.to_path_buf()),
        None => SYSTEM_FONT_CANDIDATES
            .iter()
            .map(PathBuf::from)
            .find(|p| p.is_file()),
    }
}

/// Glyphs of one shaped string, positioned relative to the layout's top-left corner.
#[derive(Clone, Debug)]
pub(crate) struct ShapedText {
    pub(crate) glyphs: Vec<vello_cpu::Glyph>,
    pub(crate) size_px: f32,
    pub(crate) width: f64,
    pub(crate) height: f64,
}

struct LoadedFont {
    data: vello_cpu::peniko::FontData,
    family: String,
}

/// Parley contexts plus the single font used for captions and placeholder labels.
pub(crate) struct TextLayoutEngine {
    font_ctx: parley::FontContext,
    layout_ctx: parley::LayoutContext<()>,
    font: Option<LoadedFont>,
}

impl Default for TextLayoutEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TextLayoutEngine {
    pub(crate) fn new() -> Self {
        Self {
            font_ctx: parley::FontContext::default(),
            layout_ctx: parley::LayoutContext::new(),
            font: None,
        }
    }

    pub(crate) fn has_font(&self) -> bool {
        self.font.is_some()
    }

    pub(crate) fn font_data(&self) -> Option<&vello_cpu::peniko::FontData> {
        self.font.as_ref().map(|f| &f.data)
    }

    /// Read a font file and make it the face for every later layout.
    pub(crate) fn load_font(&mut self, path: &Path) -> ThoughtlineResult<()> {
        let bytes = std::fs::read(path).map_err(|e| {
            ThoughtlineError::validation(format!("read font '{}': {e}", path.display()))
        })?;

        let families = self
            .font_ctx
            .collection
            .register_fonts(parley::fontique::Blob::from(bytes.clone()), None);
        let family_id = families.first().map(|(id, _)| *id).ok_or_else(|| {
            ThoughtlineError::validation(format!(
                "no font families found in '{}'",
                path.display()
            ))
        })?;
        let family = self
            .font_ctx
            .collection
            .family_name(family_id)
            .ok_or_else(|| ThoughtlineError::validation("registered font family has no name"))?
            .to_string();

        tracing::debug!(path = %path.display(), family = %family, "loaded caption font");
        self.font = Some(LoadedFont {
            data: vello_cpu::peniko::FontData::new(vello_cpu::peniko::Blob::from(bytes), 0),
            family,
        });
        Ok(())
    }

    /// Shape `text` on a single line.
    pub(crate) fn shape(&mut self, text: &str, size_px: f32) -> ThoughtlineResult<ShapedText> {
        if !size_px.is_finite() || size_px <= 0.0 {
            return Err(ThoughtlineError::validation(
                "text size must be finite and > 0",
            ));
        }
        let family = self
            .font
            .as_ref()
            .map(|f| f.family.clone())
            .ok_or_else(|| ThoughtlineError::validation("no font loaded for text"))?;

        let mut builder = self
            .layout_ctx
            .ranged_builder(&mut self.font_ctx, text, 1.0, true);
        builder.push_default(parley::style::StyleProperty::FontStack(
            parley::style::FontStack::Source(std::borrow::Cow::Owned(family)),
        ));
        builder.push_default(parley::style::StyleProperty::FontSize(size_px));

        let mut layout: parley::Layout<()> = builder.build(text);
        layout.break_all_lines(None);

        let mut glyphs = Vec::new();
        for line in layout.lines() {
            for item in line.items() {
                let parley::layout::PositionedLayoutItem::GlyphRun(run) = item else {
                    continue;
                };
                glyphs.extend(run.positioned_glyphs().map(|g| vello_cpu::Glyph {
                    id: g.id,
                    x: g.x,
                    y: g.y,
                }));
            }
        }

        Ok(ShapedText {
            glyphs,
            size_px,
            width: f64::from(layout.width()),
            height: f64::from(layout.height()),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/text.rs"]
mod tests;
