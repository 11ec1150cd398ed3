use std::io::Cursor;

use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::ImagesetResult;

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
/// Crop rectangle in source-image pixel coordinates.
pub struct CropRegion {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// Decode encoded image bytes into straight (non-premultiplied) RGBA8.
pub fn decode_rgba(bytes: &[u8]) -> ImagesetResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    Ok(dyn_img.to_rgba8())
}

/// Encode RGBA8 pixels as PNG, alpha channel preserved.
pub fn encode_png(img: &RgbaImage) -> ImagesetResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode png")?;
    Ok(buf)
}

/// Encode pixels as an opaque PNG: the alpha channel is dropped by
/// conversion to RGB8 before encoding.
pub fn encode_png_opaque(img: &RgbaImage) -> ImagesetResult<Vec<u8>> {
    let rgb = image::DynamicImage::ImageRgba8(img.clone()).to_rgb8();
    let mut buf = Vec::new();
    rgb.write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .context("encode opaque png")?;
    Ok(buf)
}

/// Crop a region out of `img`.
///
/// Out-of-range rectangles are not pre-validated; `crop_imm` clamps them to
/// the image bounds and that behavior is inherited as-is.
pub fn crop_region(img: &RgbaImage, region: CropRegion) -> RgbaImage {
    image::imageops::crop_imm(img, region.x, region.y, region.width, region.height).to_image()
}
