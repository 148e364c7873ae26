use image::{Rgba, RgbaImage};
use thiserror::Error;

use crate::binary::{
    chunks::cel::{CelChunk, CelContent},
    color_depth::ColorDepth,
    image::DecompressError,
    palette::Palette,
    scalars::Word,
};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LoadImageError {
    #[error("cel type {0} is not supported")]
    UnsupportedCelType(Word),
    #[error("unsupported color depth {0:?}")]
    UnsupportedColorDepth(ColorDepth),
    #[error(transparent)]
    Decompress(#[from] DecompressError),
}

/// Scales an alpha value by a cel opacity, rounding down
pub fn scale_alpha(alpha: u8, opacity: u8) -> u8 {
    ((alpha as u16 * opacity as u16) / u8::MAX as u16) as u8
}

/// Decompresses a cel image and writes it onto the frame at the cel position.
/// Pixels falling outside the frame are dropped. Written pixels replace
/// what was there, with alpha scaled by the cel opacity.
///
/// Nothing is drawn if the pixel stream can't be decoded.
pub fn draw_cel(
    target: &mut RgbaImage,
    cel: &CelChunk<'_>,
    color_depth: ColorDepth,
    palette: &Palette,
) -> Result<(), LoadImageError> {
    let CelContent::Image(image) = cel.content else {
        return Err(LoadImageError::UnsupportedCelType(cel.content.cel_type()));
    };
    let bytes_per_pixel = color_depth
        .bytes_per_pixel()
        .ok_or(LoadImageError::UnsupportedColorDepth(color_depth))?;
    let pixels = image.decompress(bytes_per_pixel)?;
    let stride = image.width as usize * bytes_per_pixel;
    if stride == 0 {
        return Ok(());
    }

    let to_rgba = |src: &[u8]| match color_depth {
        ColorDepth::Indexed => palette.get(src[0]),
        _ => Rgba([src[0], src[1], src[2], src[3]]),
    };

    let canvas_width = i64::from(target.width());
    let canvas_height = i64::from(target.height());
    for (local_y, row) in pixels.chunks_exact(stride).enumerate() {
        let y = i64::from(cel.y) + local_y as i64;
        if !(0..canvas_height).contains(&y) {
            continue;
        }
        for (local_x, src) in row.chunks_exact(bytes_per_pixel).enumerate() {
            let x = i64::from(cel.x) + local_x as i64;
            if !(0..canvas_width).contains(&x) {
                continue;
            }
            let mut pixel = to_rgba(src);
            pixel.0[3] = scale_alpha(pixel.0[3], cel.opacity);
            target.put_pixel(x as u32, y as u32, pixel);
        }
    }
    Ok(())
}
