use std::path::PathBuf;

use crate::foundation::core::Rgb8;
use crate::foundation::error::{ThoughtlineError, ThoughtlineResult};
use crate::render::plan::{Caption, ImageContent, StrokePlan};

/// Pixel layout of a [`TraceImage`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PixelFormat {
    /// 8-bit RGB, tightly packed, row-major.
    Rgb8,
}

impl PixelFormat {
    /// Bytes per pixel.
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelFormat::Rgb8 => 3,
        }
    }
}

/// A rendered raster image. Dimensions depend only on the canvas, never on the style.
#[derive(Clone, Debug)]
pub struct TraceImage {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Layout of `data`.
    pub format: PixelFormat,
    /// Pixel bytes, row-major.
    pub data: Vec<u8>,
    /// What the image depicts.
    pub content: ImageContent,
}

impl TraceImage {
    /// RGB value at `(x, y)`, or `None` outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let bpp = self.format.bytes_per_pixel();
        let i = (y as usize * self.width as usize + x as usize) * bpp;
        let px = self.data.get(i..i + 3)?;
        Some([px[0], px[1], px[2]])
    }

    /// Count pixels that differ from `background`.
    pub fn painted_pixels(&self, background: Rgb8) -> usize {
        let bg: [u8; 3] = background.into();
        self.data
            .chunks_exact(self.format.bytes_per_pixel())
            .filter(|px| px[..3] != bg)
            .count()
    }

    /// Convert into an `image` buffer for encoding.
    pub fn to_rgb_image(&self) -> ThoughtlineResult<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.data.clone()).ok_or_else(|| {
            ThoughtlineError::validation(format!(
                "image buffer of {} bytes does not match {}x{} rgb",
                self.data.len(),
                self.width,
                self.height
            ))
        })
    }
}

/// Colors, font and caption used when rasterizing a [`StrokePlan`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RenderSettings {
    /// Paper color the canvas is cleared to.
    pub background: Rgb8,
    /// Stroke and dot color.
    pub ink: Rgb8,
    /// Color of the insufficient-trace placeholder.
    pub alert: Rgb8,
    /// Font file for text ops. `None` tries the
    /// [`SYSTEM_FONT_CANDIDATES`](crate::render::SYSTEM_FONT_CANDIDATES) and skips text if
    /// none exists.
    pub font_path: Option<PathBuf>,
    /// Title and timestamp added on top of the drawing.
    pub caption: Caption,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Rgb8::PAPER,
            ink: Rgb8::INK,
            alert: Rgb8::ALERT,
            font_path: None,
            caption: Caption::default(),
        }
    }
}

/// A rasterizer that executes a compiled [`StrokePlan`].
pub trait RenderBackend {
    /// Rasterize `plan` onto a fresh surface cleared to the background color.
    fn render_plan(&mut self, plan: &StrokePlan) -> ThoughtlineResult<TraceImage>;
}

/// Available backend kinds.
#[derive(Clone, Copy, Debug, Default)]
pub enum BackendKind {
    /// CPU raster backend powered by `vello_cpu`.
    #[default]
    Cpu,
}

/// Create a rendering backend implementation.
pub fn create_backend(kind: BackendKind, settings: &RenderSettings) -> Box<dyn RenderBackend> {
    match kind {
        BackendKind::Cpu => Box::new(crate::render::cpu::CpuRenderer::new(settings.clone())),
    }
}
