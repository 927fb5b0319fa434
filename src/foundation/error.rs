/// Convenience result type used across thoughtline.
pub type ThoughtlineResult<T> = Result<T, ThoughtlineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Degenerate traces are not errors: the renderer substitutes a placeholder image instead.
#[derive(thiserror::Error, Debug)]
pub enum ThoughtlineError {
    /// Non-positive canvas dimensions handed to the walker or renderer.
    #[error("invalid canvas: {width}x{height} (both dimensions must be > 0)")]
    InvalidCanvas {
        /// Requested width in pixels.
        width: i64,
        /// Requested height in pixels.
        height: i64,
    },

    /// Invalid caller-provided configuration or request data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing configuration.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ThoughtlineError {
    /// Build a [`ThoughtlineError::InvalidCanvas`] value.
    pub fn invalid_canvas(width: i64, height: i64) -> Self {
        Self::InvalidCanvas { width, height }
    }

    /// Build a [`ThoughtlineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ThoughtlineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
