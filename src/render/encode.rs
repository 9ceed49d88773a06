//! PNG encoding of raw RGB canvases

use super::RenderError;

const METERS_PER_INCH: f64 = 0.0254;

/// Convert dots per inch to the pixels-per-meter unit PNG stores
pub fn dots_per_meter(dpi: u32) -> u32 {
    (dpi as f64 / METERS_PER_INCH).round() as u32
}

/// Encode an RGB8 buffer as PNG, recording `dpi` in the `pHYs` chunk.
pub fn encode_png(pixels: &[u8], width: u32, height: u32, dpi: u32) -> Result<Vec<u8>, RenderError> {
    let mut bytes = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut bytes, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let ppm = dots_per_meter(dpi);
        encoder.set_pixel_dims(Some(png::PixelDimensions {
            xppu: ppm,
            yppu: ppm,
            unit: png::Unit::Meter,
        }));

        let mut writer = encoder.write_header()?;
        writer.write_image_data(pixels)?;
        writer.finish()?;
    }
    Ok(bytes)
}
