//! Structural similarity through `image_compare`.

use image::{GrayImage, Luma};
use image_compare::Algorithm;
use ndarray::{ArrayView2, ArrayView3, Axis};

use crate::error::MetricsError;

/// Structural similarity algorithm used for every channel.
const ALGORITHM: Algorithm = Algorithm::MSSIMSimple;

/// Converts one plane to 8-bit luma, rounding and saturating each sample.
fn to_gray(plane: ArrayView2<'_, f64>) -> Result<GrayImage, MetricsError> {
    let (h, w) = plane.dim();
    let (width, height) = match (u32::try_from(w), u32::try_from(h)) {
        (Ok(width), Ok(height)) => (width, height),
        _ => {
            return Err(MetricsError::Comparison {
                reason: format!("{h}x{w} plane exceeds the image size limit"),
            });
        }
    };
    Ok(GrayImage::from_fn(width, height, |col, row| {
        let v = plane[[row as usize, col as usize]];
        Luma([v.round().clamp(0.0, 255.0) as u8])
    }))
}

fn ssim_plane(x: ArrayView2<'_, f64>, y: ArrayView2<'_, f64>) -> Result<f64, MetricsError> {
    let similarity = image_compare::gray_similarity_structure(&ALGORITHM, &to_gray(x)?, &to_gray(y)?)
        .map_err(|e| MetricsError::Comparison {
            reason: e.to_string(),
        })?;
    Ok(similarity.score)
}

/// Mean structural similarity between `x` and `y`.
///
/// Samples are rounded to 8-bit levels and compared with the simple
/// MSSIM of `image_compare`. With `multichannel` the per-channel
/// scores are averaged.
///
/// # Errors
///
/// - [`MetricsError::ShapeMismatch`] if the shapes differ.
/// - [`MetricsError::EmptyImage`] if the images are empty.
/// - [`MetricsError::ChannelMismatch`] if `multichannel` is `false` and
///   the images have more than one channel.
/// - [`MetricsError::Comparison`] if the library rejects the planes.
pub fn ssim(
    x: ArrayView3<'_, f64>,
    y: ArrayView3<'_, f64>,
    multichannel: bool,
) -> Result<f64, MetricsError> {
    if x.shape() != y.shape() {
        return Err(MetricsError::ShapeMismatch {
            left: x.shape().to_vec(),
            right: y.shape().to_vec(),
        });
    }
    if x.is_empty() {
        return Err(MetricsError::EmptyImage {
            shape: x.shape().to_vec(),
        });
    }
    let channels = x.len_of(Axis(2));
    if !multichannel && channels > 1 {
        return Err(MetricsError::ChannelMismatch { channels });
    }

    let mut total = 0.0;
    for (xc, yc) in x.axis_iter(Axis(2)).zip(y.axis_iter(Axis(2))) {
        total += ssim_plane(xc, yc)?;
    }
    Ok(total / channels as f64)
}
