use crate::foundation::error::{ThoughtlineError, ThoughtlineResult};

pub use kurbo::{BezPath, Point};

/// Pixel dimensions of the drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Width in pixels (> 0).
    pub width: u32,
    /// Height in pixels (> 0).
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 700,
        }
    }
}

impl Canvas {
    /// Validate caller-provided dimensions. Zero or negative sizes are a contract violation.
    pub fn new(width: i64, height: i64) -> ThoughtlineResult<Self> {
        if width <= 0 || height <= 0 {
            return Err(ThoughtlineError::invalid_canvas(width, height));
        }
        let (Ok(w), Ok(h)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(ThoughtlineError::validation(format!(
                "canvas {width}x{height} exceeds u32 pixel range"
            )));
        };
        Ok(Self {
            width: w,
            height: h,
        })
    }

    /// Re-check a canvas built through its public fields.
    pub fn validate(self) -> ThoughtlineResult<Self> {
        Self::new(i64::from(self.width), i64::from(self.height))
    }

    /// Inclusive `[lo, hi]` window along X after keeping `margin` pixels free on both sides.
    pub fn x_window(self, margin: f64) -> (f64, f64) {
        axis_window(self.width, margin)
    }

    /// Inclusive `[lo, hi]` window along Y after keeping `margin` pixels free on both sides.
    pub fn y_window(self, margin: f64) -> (f64, f64) {
        axis_window(self.height, margin)
    }

    pub(crate) fn pixel_count(self) -> usize {
        self.width as usize * self.height as usize
    }
}

// Axes too short for the margin collapse onto their centre line.
fn axis_window(extent: u32, margin: f64) -> (f64, f64) {
    let extent = f64::from(extent);
    if extent - margin >= margin {
        (margin, extent - margin)
    } else {
        let mid = (extent / 2.0).floor();
        (mid, mid)
    }
}

/// One vertex of a trace, in integer pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct TracePoint {
    /// Horizontal pixel coordinate.
    pub x: i32,
    /// Vertical pixel coordinate (grows downwards).
    pub y: i32,
}

impl TracePoint {
    /// Create a point.
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The point as a `kurbo` coordinate.
    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

/// Straight (non-premultiplied) 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(from = "[u8; 3]", into = "[u8; 3]")]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Create a color from channels.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#F5F5F5`, the paper tone traces are drawn on.
    pub const PAPER: Self = Self::new(245, 245, 245);
    /// Opaque black ink.
    pub const INK: Self = Self::new(0, 0, 0);
    /// Red used to flag a missing trace.
    pub const ALERT: Self = Self::new(255, 0, 0);
}

impl From<[u8; 3]> for Rgb8 {
    fn from(v: [u8; 3]) -> Self {
        Self::new(v[0], v[1], v[2])
    }
}

impl From<Rgb8> for [u8; 3] {
    fn from(c: Rgb8) -> Self {
        [c.r, c.g, c.b]
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
