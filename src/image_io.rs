//! Decoding inputs and encoding fused results with the `image` crate.

use std::path::Path;

use anyhow::{Context, Result, bail};
use image::{GrayImage, ImageBuffer, LumaA, RgbImage, Rgba};
use ndarray::{Array2, Array3};

use tfuse_fusion::Image;

/// Loads `path` as RGB, or as single-channel luma when `gray` is set.
pub fn load(path: &Path, gray: bool) -> Result<Image> {
    let decoded =
        image::open(path).with_context(|| format!("failed to open image: {}", path.display()))?;
    let image = if gray {
        let luma = decoded.to_luma8();
        let (width, height) = luma.dimensions();
        let plane = Array2::from_shape_vec((height as usize, width as usize), luma.into_raw())?;
        Image::from_gray_u8(plane)?
    } else {
        let rgb = decoded.to_rgb8();
        let (width, height) = rgb.dimensions();
        let data = Array3::from_shape_vec((height as usize, width as usize, 3), rgb.into_raw())?;
        Image::from_u8(data)?
    };
    Ok(image)
}

/// Writes an `(height, width, channels)` 8-bit array as PNG.
pub fn save_png(path: &Path, data: &Array3<u8>) -> Result<()> {
    let (height, width, channels) = data.dim();
    let (width, height) = (width as u32, height as u32);
    let raw: Vec<u8> = data.iter().copied().collect();
    let too_small = || format!("pixel buffer too small for {width}x{height}x{channels}");
    let saved = match channels {
        1 => GrayImage::from_raw(width, height, raw)
            .with_context(too_small)?
            .save(path),
        2 => ImageBuffer::<LumaA<u8>, _>::from_raw(width, height, raw)
            .with_context(too_small)?
            .save(path),
        3 => RgbImage::from_raw(width, height, raw)
            .with_context(too_small)?
            .save(path),
        4 => ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, raw)
            .with_context(too_small)?
            .save(path),
        n => bail!("cannot encode {n} channels as PNG"),
    };
    saved.with_context(|| format!("failed to write image: {}", path.display()))
}
