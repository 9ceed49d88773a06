//! Embedded font registration
//!
//! Text is rasterized from a font compiled into the binary, so rendering
//! behaves the same on machines without any system fonts installed.

use std::sync::OnceLock;

use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::{register_font, FontStyle, IntoFont, TextStyle, BLACK};

use super::RenderError;

/// Family name every text style in the renderer refers to
pub const FONT_FAMILY: &str = "sans-serif";

static DEJAVU_SANS: &[u8] = include_bytes!("../../assets/DejaVuSans.ttf");

static REGISTERED: OnceLock<bool> = OnceLock::new();

/// Register the embedded font once per process
pub fn ensure_fonts_registered() -> Result<(), RenderError> {
    let registered = *REGISTERED.get_or_init(|| {
        register_font(FONT_FAMILY, FontStyle::Normal, DEJAVU_SANS).is_ok()
            && register_font(FONT_FAMILY, FontStyle::Bold, DEJAVU_SANS).is_ok()
    });

    if registered {
        Ok(())
    } else {
        Err(RenderError::Font)
    }
}

/// Black text of `size_px` pixels in the embedded family
pub fn text_style(size_px: f64) -> TextStyle<'static> {
    TextStyle::from((FONT_FAMILY, size_px).into_font()).color(&BLACK)
}

/// [`text_style`] anchored at the given horizontal and vertical position
pub fn anchored_text(size_px: f64, h: HPos, v: VPos) -> TextStyle<'static> {
    text_style(size_px).pos(Pos::new(h, v))
}
