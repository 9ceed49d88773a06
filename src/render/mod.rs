//! Renderer - turns statistic tables and numeric columns into PNG artifacts
//!
//! Every renderer returns an [`Artifact`] holding the encoded image in memory.
//! Writing to disk is a separate, explicit step so rendering can be exercised
//! without touching the file system.

pub mod artifacts;
pub mod charts;
pub mod encode;
pub mod error;
pub mod font;
pub mod table;

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;

pub use artifacts::*;
pub use charts::*;
pub use encode::*;
pub use error::RenderError;
pub use font::*;
pub use table::*;

/// Output resolution used when none is configured
pub const DEFAULT_DPI: u32 = 300;

/// Drawing surface every renderer paints on
pub type Canvas<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

/// Physical figure size and resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Figure {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
}

impl Figure {
    pub fn new(width_in: f64, height_in: f64, dpi: u32) -> Self {
        Self {
            width_in,
            height_in,
            dpi,
        }
    }

    /// Canvas size in pixels
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round().max(1.0) as u32,
            (self.height_in * self.dpi as f64).round().max(1.0) as u32,
        )
    }

    /// Convert a length in typographic points to pixels
    pub fn pt(&self, points: f64) -> f64 {
        points * self.dpi as f64 / 72.0
    }
}

/// A rendered image ready to be saved
#[derive(Debug, Clone)]
pub struct Artifact {
    pub file_name: String,
    pub width: u32,
    pub height: u32,
    /// PNG-encoded image
    pub bytes: Vec<u8>,
}

impl Artifact {
    /// Write the image into `dir`, replacing any previous file of the same name
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf, RenderError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|source| RenderError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(path)
    }
}

/// Paint a white canvas of the figure's size with `draw` and encode it.
pub fn render_bitmap<F>(file_name: &str, figure: Figure, draw: F) -> Result<Artifact, RenderError>
where
    F: FnOnce(&Canvas<'_>) -> Result<(), RenderError>,
{
    ensure_fonts_registered()?;

    let (width, height) = figure.pixel_size();
    let mut pixels = vec![0u8; width as usize * height as usize * 3];
    {
        let root = BitMapBackend::with_buffer(&mut pixels, (width, height)).into_drawing_area();
        root.fill(&WHITE)?;
        draw(&root)?;
        root.present()?;
    }

    Ok(Artifact {
        file_name: file_name.to_string(),
        width,
        height,
        bytes: encode_png(&pixels, width, height, figure.dpi)?,
    })
}
