//! Multi-channel pixel storage shared by every stage of the pipeline
//!
//! Images are held as `rows × cols × channels` arrays of `u8`. Numeric work
//! happens on `f64` planes extracted on demand, so the stored pixels are never
//! rounded more than once.

use ndarray::{Array2, Array3, ArrayView3, ArrayViewMut3, Axis, s};

use crate::io::error::{QuiltError, Result};
use crate::spatial::placement::Rect;

/// Channel counts accepted at the adapter boundary
pub const SUPPORTED_CHANNELS: [usize; 3] = [1, 3, 4];

/// Owned multi-channel 8-bit image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelMatrix {
    data: Array3<u8>,
}

impl PixelMatrix {
    /// Wrap an existing `rows × cols × channels` array
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if the channel count is not 1, 3 or 4
    pub fn from_array(data: Array3<u8>) -> Result<Self> {
        let channels = data.dim().2;
        if !SUPPORTED_CHANNELS.contains(&channels) {
            return Err(QuiltError::UnsupportedFormat { channels });
        }
        Ok(Self { data })
    }

    /// Zero-initialised matrix
    ///
    /// # Errors
    ///
    /// Returns `UnsupportedFormat` if the channel count is not 1, 3 or 4
    pub fn zeros(rows: usize, cols: usize, channels: usize) -> Result<Self> {
        Self::from_array(Array3::zeros((rows, cols, channels)))
    }

    /// Build a matrix from a single-channel plane
    pub fn from_gray(plane: &Array2<u8>) -> Self {
        Self {
            data: plane.clone().insert_axis(Axis(2)),
        }
    }

    /// Number of pixel rows
    pub fn rows(&self) -> usize {
        self.data.dim().0
    }

    /// Number of pixel columns
    pub fn cols(&self) -> usize {
        self.data.dim().1
    }

    /// Number of interleaved channels
    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    /// Read-only view of the whole image
    pub fn view(&self) -> ArrayView3<'_, u8> {
        self.data.view()
    }

    /// Consume the matrix, returning its backing array
    pub fn into_array(self) -> Array3<u8> {
        self.data
    }

    /// Read-only window over a rectangle
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rectangle leaves the image
    pub fn region(&self, rect: Rect) -> Result<ArrayView3<'_, u8>> {
        self.check_bounds(rect)?;
        Ok(self
            .data
            .slice(s![rect.row..rect.row_end(), rect.col..rect.col_end(), ..]))
    }

    /// Mutable window over a rectangle
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rectangle leaves the image
    pub fn region_mut(&mut self, rect: Rect) -> Result<ArrayViewMut3<'_, u8>> {
        self.check_bounds(rect)?;
        Ok(self
            .data
            .slice_mut(s![rect.row..rect.row_end(), rect.col..rect.col_end(), ..]))
    }

    /// One channel of the whole image converted to `f64`
    pub fn channel_f64(&self, channel: usize) -> Array2<f64> {
        self.data
            .index_axis(Axis(2), channel)
            .mapv(f64::from)
    }

    /// One channel of a rectangle converted to `f64`
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rectangle leaves the image
    pub fn region_channel_f64(&self, rect: Rect, channel: usize) -> Result<Array2<f64>> {
        let region = self.region(rect)?;
        Ok(region.index_axis(Axis(2), channel).mapv(f64::from))
    }

    /// First channel of a rectangle, used as the luminance criterion for seams
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rectangle leaves the image
    pub fn luminance_region(&self, rect: Rect) -> Result<Array2<f64>> {
        self.region_channel_f64(rect, 0)
    }

    /// Copy a same-sized source window into a rectangle of this matrix
    ///
    /// # Errors
    ///
    /// Returns `DimensionMismatch` if the rectangle leaves the image or the
    /// source window differs in shape
    pub fn write_region(&mut self, rect: Rect, source: &ArrayView3<'_, u8>) -> Result<()> {
        let mut target = self.region_mut(rect)?;
        if target.dim() != source.dim() {
            let (rows, cols, _) = source.dim();
            return Err(crate::io::error::dimension_mismatch(
                "write_region",
                (rect.height, rect.width),
                (rows, cols),
            ));
        }
        target.assign(source);
        Ok(())
    }

    fn check_bounds(&self, rect: Rect) -> Result<()> {
        if rect.row_end() > self.rows() || rect.col_end() > self.cols() {
            return Err(crate::io::error::dimension_mismatch(
                "region",
                (self.rows(), self.cols()),
                (rect.row_end(), rect.col_end()),
            ));
        }
        Ok(())
    }
}
