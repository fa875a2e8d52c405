//! Mask-based merging of a chosen patch into the canvas

use ndarray::{Array2, Array3, ArrayView3, Axis, Zip, s};

use crate::io::error::{Result, dimension_mismatch};
use crate::spatial::PixelMatrix;
use crate::spatial::placement::Rect;

/// Provenance value keeping the existing canvas pixel
pub const KEEP: u8 = 0;
/// Provenance value taking the incoming patch pixel
pub const TAKE: u8 = 1;

/// Merge `patch` over `canvas_region`, channel by channel
///
/// Output is `canvas_region` where `mask == 0` and `patch` where `mask == 1`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the three inputs disagree in shape
pub fn blend(
    canvas_region: &ArrayView3<'_, u8>,
    patch: &ArrayView3<'_, u8>,
    mask: &Array2<u8>,
) -> Result<Array3<u8>> {
    let (rows, cols, _) = canvas_region.dim();
    if patch.dim() != canvas_region.dim() {
        let (p_rows, p_cols, _) = patch.dim();
        return Err(dimension_mismatch("blend patch", (rows, cols), (p_rows, p_cols)));
    }
    if mask.dim() != (rows, cols) {
        return Err(dimension_mismatch("blend mask", (rows, cols), mask.dim()));
    }

    let mut merged = canvas_region.to_owned();
    Zip::from(merged.lanes_mut(Axis(2)))
        .and(patch.lanes(Axis(2)))
        .and(mask)
        .for_each(|mut pixel, incoming, &provenance| {
            if provenance != KEEP {
                pixel.assign(&incoming);
            }
        });

    Ok(merged)
}

/// Blend `patch` into the canvas rectangle in place
///
/// # Errors
///
/// Returns `DimensionMismatch` if the rectangle leaves the canvas or the
/// inputs disagree in shape
pub fn blend_into(
    canvas: &mut PixelMatrix,
    rect: Rect,
    patch: &ArrayView3<'_, u8>,
    mask: &Array2<u8>,
) -> Result<()> {
    let merged = blend(&canvas.region(rect)?, patch, mask)?;
    canvas.write_region(rect, &merged.view())
}

/// Straight copy of `patch` into the canvas rectangle
///
/// # Errors
///
/// Returns `DimensionMismatch` if the rectangle leaves the canvas or the
/// patch differs in shape
pub fn overwrite(canvas: &mut PixelMatrix, rect: Rect, patch: &ArrayView3<'_, u8>) -> Result<()> {
    canvas.write_region(rect, patch)
}

/// Squared luminance difference between a canvas band and the matching band of a patch
///
/// `canvas_band` and `patch_band` must have the same extent; the first
/// channel stands in for luminance.
///
/// # Errors
///
/// Returns `DimensionMismatch` if either band leaves its image or the bands
/// differ in size
pub fn overlap_cost(
    canvas: &PixelMatrix,
    canvas_band: Rect,
    sample: &PixelMatrix,
    patch_band: Rect,
) -> Result<Array2<f64>> {
    if (canvas_band.height, canvas_band.width) != (patch_band.height, patch_band.width) {
        return Err(dimension_mismatch(
            "overlap cost",
            (canvas_band.height, canvas_band.width),
            (patch_band.height, patch_band.width),
        ));
    }

    let existing = canvas.luminance_region(canvas_band)?;
    let incoming = sample.luminance_region(patch_band)?;

    Ok(Zip::from(&existing)
        .and(&incoming)
        .map_collect(|&old, &new| (new - old) * (new - old)))
}

/// Combine per-band seam masks into a provenance mask for the whole tile
///
/// Starts from all [`TAKE`]; the left band (`tile × overlap`) is replaced by
/// the vertical seam mask, then the top band (`overlap × tile`) is multiplied
/// by the horizontal seam mask so the shared corner takes the new patch only
/// where both cuts agree.
///
/// # Errors
///
/// Returns `DimensionMismatch` if a band mask does not fit its band
pub fn provenance_mask(
    tile_size: usize,
    overlap: usize,
    left: Option<&Array2<u8>>,
    top: Option<&Array2<u8>>,
) -> Result<Array2<u8>> {
    let mut mask = Array2::from_elem((tile_size, tile_size), TAKE);

    if let Some(left_mask) = left {
        if left_mask.dim() != (tile_size, overlap) {
            return Err(dimension_mismatch(
                "left provenance band",
                (tile_size, overlap),
                left_mask.dim(),
            ));
        }
        mask.slice_mut(s![.., ..overlap]).assign(left_mask);
    }

    if let Some(top_mask) = top {
        if top_mask.dim() != (overlap, tile_size) {
            return Err(dimension_mismatch(
                "top provenance band",
                (overlap, tile_size),
                top_mask.dim(),
            ));
        }
        Zip::from(mask.slice_mut(s![..overlap, ..]))
            .and(top_mask)
            .for_each(|cell, &cut| *cell *= cut);
    }

    Ok(mask)
}
