//! Error types for artifact rendering.

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Errors that can occur while rendering or saving an artifact.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The embedded font could not be parsed or registered.
    #[error("Embedded font could not be registered")]
    Font,

    /// The drawing backend or chart layout failed.
    #[error("Drawing failed: {0}")]
    Drawing(String),

    /// PNG encoding failed.
    #[error("PNG encoding failed: {0}")]
    Encode(#[from] png::EncodingError),

    /// The artifact could not be written to disk.
    #[error("Failed to write {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl<E: std::error::Error + Send + Sync> From<DrawingAreaErrorKind<E>> for RenderError {
    fn from(err: DrawingAreaErrorKind<E>) -> Self {
        RenderError::Drawing(err.to_string())
    }
}
