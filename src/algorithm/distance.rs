//! Distance maps between sample patches and the canvas region being filled
//!
//! Every entry `(a, b)` of a distance map is the error of placing the sample
//! patch whose top-left corner is `(a, b)` at the current placement. Two
//! strategies share one interface:
//!
//! - [`MaskedSsd`] compares each candidate against the live canvas region,
//!   ignoring canvas pixels that are still zero (unpainted).
//! - [`ConvolutionSsd`] expands `Σ(a−b)² = Σa² − 2Σab + Σb²` so the sliding
//!   sums come from a box filter and a cross-correlation, and combines the
//!   left, top and corner overlap surfaces by inclusion–exclusion.

use ndarray::{Array2, ArrayView3, Axis, Zip, s};

use crate::io::configuration::DistanceMode;
use crate::io::error::{QuiltError, Result, computation_error, dimension_mismatch};
use crate::math::correlation::{box_sum, cross_correlate, sum_of_squares, valid_shape};
use crate::spatial::placement::{Neighbours, TilePlacement};
use crate::spatial::PixelMatrix;

/// Error surface indexed by candidate top-left position in the sample
pub type DistanceMap = Array2<f64>;

/// Computes a distance map for one tile placement
pub trait DistanceStrategy {
    /// Error of every candidate sample patch against the canvas at `placement`
    ///
    /// # Errors
    ///
    /// Returns an error if the tile does not fit in the sample or the
    /// placement leaves the canvas
    fn distance(
        &self,
        sample: &PixelMatrix,
        canvas: &PixelMatrix,
        placement: &TilePlacement,
    ) -> Result<DistanceMap>;
}

/// Brute-force masked sum of squared differences
#[derive(Debug, Clone, Copy, Default)]
pub struct MaskedSsd;

/// Sliding-window SSD built from box filtering and cross-correlation
#[derive(Debug, Clone, Copy, Default)]
pub struct ConvolutionSsd;

static MASKED: MaskedSsd = MaskedSsd;
static CONVOLUTION: ConvolutionSsd = ConvolutionSsd;

/// Strategy selected by configuration
pub fn strategy_for(mode: DistanceMode) -> &'static dyn DistanceStrategy {
    match mode {
        DistanceMode::Masked => &MASKED,
        DistanceMode::Convolution => &CONVOLUTION,
    }
}

/// Number of candidate top-left positions for a square tile
///
/// Inclusive sizing: `(H − tileSize + 1) × (W − tileSize + 1)`.
///
/// # Errors
///
/// Returns `DegenerateDistanceMap` if the tile does not fit in the sample
pub fn search_shape(sample: &PixelMatrix, tile_size: usize) -> Result<(usize, usize)> {
    valid_shape((sample.rows(), sample.cols()), (tile_size, tile_size)).ok_or(
        QuiltError::DegenerateDistanceMap {
            rows: sample.rows().saturating_sub(tile_size),
            cols: sample.cols().saturating_sub(tile_size),
        },
    )
}

impl DistanceStrategy for MaskedSsd {
    fn distance(
        &self,
        sample: &PixelMatrix,
        canvas: &PixelMatrix,
        placement: &TilePlacement,
    ) -> Result<DistanceMap> {
        let tile_size = placement.tile_size();
        let shape = search_shape(sample, tile_size)?;
        let target = canvas.region(placement.rect)?;

        if sample.channels() != canvas.channels() {
            return Err(dimension_mismatch(
                "masked distance channels",
                (1, sample.channels()),
                (1, canvas.channels()),
            ));
        }

        // Nothing painted yet, so nothing constrains the choice
        if target.iter().all(|&v| v == 0) {
            return Ok(Array2::zeros(shape));
        }

        let values: Vec<f64> = sample
            .view()
            .windows((tile_size, tile_size, sample.channels()))
            .into_iter()
            .map(|patch| masked_ssd(&target, &patch))
            .collect();

        Array2::from_shape_vec(shape, values)
            .map_err(|err| computation_error("masked distance", &err))
    }
}

/// SSD over the painted (non-zero) elements of `target`
fn masked_ssd(target: &ArrayView3<'_, u8>, patch: &ArrayView3<'_, u8>) -> f64 {
    Zip::from(target)
        .and(patch)
        .fold(0.0, |acc, &painted, &candidate| {
            if painted == 0 {
                acc
            } else {
                let diff = f64::from(painted) - f64::from(candidate);
                diff.mul_add(diff, acc)
            }
        })
}

impl DistanceStrategy for ConvolutionSsd {
    fn distance(
        &self,
        sample: &PixelMatrix,
        canvas: &PixelMatrix,
        placement: &TilePlacement,
    ) -> Result<DistanceMap> {
        let shape = search_shape(sample, placement.tile_size())?;

        let surface = match placement.neighbours() {
            Neighbours::None => Array2::zeros(shape),
            Neighbours::Left => {
                let left = ssd_surface(sample, &canvas.region(placement.left_strip())?)?;
                crop(&left, shape)?
            }
            Neighbours::Top => {
                let top = ssd_surface(sample, &canvas.region(placement.top_strip())?)?;
                crop(&top, shape)?
            }
            Neighbours::Both => {
                let left = ssd_surface(sample, &canvas.region(placement.left_strip())?)?;
                let top = ssd_surface(sample, &canvas.region(placement.top_strip())?)?;
                let corner = ssd_surface(sample, &canvas.region(placement.corner())?)?;

                // The corner lies in both strips; subtract it once
                let mut combined = crop(&left, shape)?;
                combined += &crop(&top, shape)?;
                combined -= &crop(&corner, shape)?;
                combined
            }
        };

        Ok(surface.mapv(|v| v.max(0.0)))
    }
}

/// Sliding SSD of `template` against every position of `sample`, summed over channels
///
/// # Errors
///
/// Returns an error if the channel counts differ or the template does not fit
pub fn ssd_surface(sample: &PixelMatrix, template: &ArrayView3<'_, u8>) -> Result<Array2<f64>> {
    let (t_rows, t_cols, t_channels) = template.dim();
    if t_channels != sample.channels() {
        return Err(dimension_mismatch(
            "ssd channels",
            (1, sample.channels()),
            (1, t_channels),
        ));
    }

    let shape = valid_shape((sample.rows(), sample.cols()), (t_rows, t_cols)).ok_or(
        QuiltError::DegenerateDistanceMap {
            rows: sample.rows().saturating_sub(t_rows),
            cols: sample.cols().saturating_sub(t_cols),
        },
    )?;

    let mut total = Array2::<f64>::zeros(shape);
    for channel in 0..t_channels {
        let a = sample.channel_f64(channel);
        let b = template.index_axis(Axis(2), channel).mapv(f64::from);

        let a_squared = box_sum(&a.mapv(|v| v * v).view(), (t_rows, t_cols));
        let ab = cross_correlate(&a.view(), &b.view());
        let b_squared = sum_of_squares(&b.view());

        Zip::from(&mut total)
            .and(&a_squared)
            .and(&ab)
            .for_each(|z, &a2, &cross| *z += 2.0f64.mul_add(-cross, a2) + b_squared);
    }

    Ok(total)
}

/// Keep the leading `shape` block, discarding positions whose full tile would leave the sample
fn crop(surface: &Array2<f64>, shape: (usize, usize)) -> Result<Array2<f64>> {
    let (rows, cols) = surface.dim();
    if rows < shape.0 || cols < shape.1 {
        return Err(dimension_mismatch("crop distance surface", shape, (rows, cols)));
    }
    Ok(surface.slice(s![..shape.0, ..shape.1]).to_owned())
}
