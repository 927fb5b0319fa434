use std::path::{Path, PathBuf};

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::{ThoughtlineError, ThoughtlineResult};
use crate::render::{Caption, RenderSettings};

/// Knobs for one generation: canvas size, colors, caption text, font, and the output
/// file prefix.
///
/// Every field has a default, so a config file only needs the values it changes:
///
/// ```json
/// { "width": 800, "background": [255, 255, 255], "caption": { "title": "Thought trace" } }
/// ```
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TraceConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    /// Paper color.
    pub background: Rgb8,
    /// Stroke color.
    pub ink: Rgb8,
    /// Placeholder color for traces too short to draw.
    pub placeholder: Rgb8,
    /// File name prefix used when persisting images.
    pub file_prefix: String,
    /// Optional title and timestamp. Empty by default.
    pub caption: Caption,
    /// Font file for caption and placeholder text.
    pub font: Option<PathBuf>,
}

impl Default for TraceConfig {
    fn default() -> Self {
        let canvas = Canvas::default();
        Self {
            width: canvas.width,
            height: canvas.height,
            background: Rgb8::PAPER,
            ink: Rgb8::INK,
            placeholder: Rgb8::ALERT,
            file_prefix: "trace".to_string(),
            caption: Caption::default(),
            font: None,
        }
    }
}

impl TraceConfig {
    /// Parse a JSON config.
    pub fn from_json_str(s: &str) -> ThoughtlineResult<Self> {
        let cfg: Self = serde_json::from_str(s)
            .map_err(|e| ThoughtlineError::serde(format!("parse trace config: {e}")))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and parse a JSON config file.
    pub fn from_path(path: &Path) -> ThoughtlineResult<Self> {
        let s = std::fs::read_to_string(path).map_err(|e| {
            ThoughtlineError::Other(anyhow::anyhow!(
                "read trace config '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_json_str(&s)
    }

    /// Reject unusable values.
    pub fn validate(&self) -> ThoughtlineResult<()> {
        self.canvas()?;
        if self.file_prefix.trim().is_empty() || self.file_prefix.contains(['/', '\\']) {
            return Err(ThoughtlineError::validation(format!(
                "file_prefix must be a non-empty file name fragment, got {:?}",
                self.file_prefix
            )));
        }
        if let Some(font) = self.font.as_deref().filter(|p| !p.is_file()) {
            return Err(ThoughtlineError::validation(format!(
                "font '{}' is not a readable file",
                font.display()
            )));
        }
        Ok(())
    }

    /// The validated canvas.
    pub fn canvas(&self) -> ThoughtlineResult<Canvas> {
        Canvas::new(i64::from(self.width), i64::from(self.height))
    }

    /// Colors, font and caption for the renderer.
    pub fn render_settings(&self) -> RenderSettings {
        RenderSettings {
            background: self.background,
            ink: self.ink,
            alert: self.placeholder,
            font_path: self.font.clone(),
            caption: self.caption.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
