//! Validated multi-channel image.

use ndarray::{Array2, Array3, ArrayView3, Axis, s};

use crate::error::FusionError;

/// Luma weights (ITU-R BT.601) applied to red, green and blue.
const LUMA_WEIGHTS: [f64; 3] = [0.299, 0.587, 0.114];

/// A non-empty, finite `(height, width, channels)` image with `f64`
/// samples.
///
/// Grayscale images have one channel. Construction validates the
/// invariants once so the fusion code never has to.
///
/// # Example
///
/// ```
/// use ndarray::Array2;
/// use tfuse_fusion::Image;
///
/// let gray = Image::from_gray_u8(Array2::from_elem((4, 6), 100u8)).unwrap();
/// assert_eq!(gray.dim(), (4, 6, 1));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Image {
    data: Array3<f64>,
}

impl Image {
    /// Wraps a floating-point array after validating it.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::EmptyImage`] if an axis is empty and
    /// [`FusionError::NonFinite`] for the first NaN or infinite sample.
    pub fn new(data: Array3<f64>) -> Result<Self, FusionError> {
        let (height, width, channels) = data.dim();
        if height == 0 || width == 0 || channels == 0 {
            return Err(FusionError::EmptyImage {
                height,
                width,
                channels,
            });
        }
        if let Some(((row, col, channel), _)) = data.indexed_iter().find(|(_, v)| !v.is_finite()) {
            return Err(FusionError::NonFinite { row, col, channel });
        }
        Ok(Self { data })
    }

    /// Builds an image from 8-bit samples.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::EmptyImage`] if an axis is empty.
    pub fn from_u8(data: Array3<u8>) -> Result<Self, FusionError> {
        Self::new(data.mapv(f64::from))
    }

    /// Builds a single-channel image from a 2-D array.
    ///
    /// # Errors
    ///
    /// Same as [`Image::new`].
    pub fn from_gray(data: Array2<f64>) -> Result<Self, FusionError> {
        Self::new(data.insert_axis(Axis(2)))
    }

    /// Builds a single-channel image from 8-bit samples.
    ///
    /// # Errors
    ///
    /// Returns [`FusionError::EmptyImage`] if an axis is empty.
    pub fn from_gray_u8(data: Array2<u8>) -> Result<Self, FusionError> {
        Self::from_gray(data.mapv(f64::from))
    }

    /// Image height.
    pub fn height(&self) -> usize {
        self.data.len_of(Axis(0))
    }

    /// Image width.
    pub fn width(&self) -> usize {
        self.data.len_of(Axis(1))
    }

    /// Number of channels.
    pub fn channels(&self) -> usize {
        self.data.len_of(Axis(2))
    }

    /// `(height, width, channels)`.
    pub fn dim(&self) -> (usize, usize, usize) {
        self.data.dim()
    }

    /// Borrows the samples.
    pub fn view(&self) -> ArrayView3<'_, f64> {
        self.data.view()
    }

    /// Returns the samples.
    pub fn into_inner(self) -> Array3<f64> {
        self.data
    }

    /// Single-channel luma version of the image.
    ///
    /// One-channel images are returned unchanged. Images with three or
    /// more channels use the first three as RGB (alpha is ignored); a
    /// two-channel image is treated as gray plus alpha.
    pub fn to_luma(&self) -> Image {
        let plane = match self.channels() {
            1 | 2 => self.data.index_axis(Axis(2), 0).to_owned(),
            _ => {
                let rgb = self.data.slice(s![.., .., ..3]);
                rgb.map_axis(Axis(2), |px| {
                    px.iter().zip(LUMA_WEIGHTS).map(|(v, w)| v * w).sum::<f64>()
                })
            }
        };
        Image {
            data: plane.insert_axis(Axis(2)),
        }
    }

    /// Luma samples as a 2-D array.
    pub fn luma_plane(&self) -> Array2<f64> {
        self.to_luma().data.index_axis_move(Axis(2), 0)
    }

    /// Top-left `height × width` region, clamped to the image size.
    pub fn crop(&self, height: usize, width: usize) -> Image {
        let h = height.clamp(1, self.height());
        let w = width.clamp(1, self.width());
        Image {
            data: self.data.slice(s![..h, ..w, ..]).to_owned(),
        }
    }
}
