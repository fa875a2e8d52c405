//! Minimum-error boundary cut through an overlap band
//!
//! A dynamic program accumulates the cheapest top-to-bottom path through the
//! cost surface. The forward pass records which parent each cell extended, so
//! the backtrace follows recorded offsets instead of re-comparing floats.
//! Horizontal cuts run the same program on the transposed surface.

use std::cmp::Ordering;

use ndarray::{Array2, ArrayView2};

use crate::io::error::{Result, dimension_mismatch};

/// Orientation of the cut through an overlap band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CutAxis {
    /// Top-to-bottom path through a left overlap strip
    Vertical,
    /// Left-to-right path through a top overlap strip
    Horizontal,
}

/// Side of the seam a pixel falls on
pub mod side {
    /// Existing canvas content is kept
    pub const OLD: i8 = -1;
    /// The seam itself
    pub const SEAM: i8 = 0;
    /// Incoming patch content is taken
    pub const NEW: i8 = 1;
}

// Parent candidates in tie-break order: straight up, then up-left, then up-right
const PARENT_OFFSETS: [isize; 3] = [0, -1, 1];

/// Column of the minimum-cost vertical path for every row
///
/// Ties prefer the current column, then the left parent, then the right one.
/// The path ends at the first column minimising the cumulative cost of the
/// last row.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the surface is empty
pub fn seam_path(cost: &ArrayView2<'_, f64>) -> Result<Vec<usize>> {
    let (rows, cols) = cost.dim();
    if rows == 0 || cols == 0 {
        return Err(dimension_mismatch("seam path", (1, 1), (rows, cols)));
    }

    let mut cumulative = cost.to_owned();
    let mut parents = Array2::<isize>::zeros((rows, cols));

    for i in 1..rows {
        for j in 0..cols {
            let mut chosen = 0;
            let mut cheapest = f64::INFINITY;
            for offset in PARENT_OFFSETS {
                let Some(parent_col) = j.checked_add_signed(offset) else {
                    continue;
                };
                let Some(&value) = cumulative.get((i - 1, parent_col)) else {
                    continue;
                };
                if value < cheapest {
                    cheapest = value;
                    chosen = offset;
                }
            }

            if let Some(cell) = cumulative.get_mut((i, j)) {
                *cell += cheapest;
            }
            if let Some(parent) = parents.get_mut((i, j)) {
                *parent = chosen;
            }
        }
    }

    let last_row = cumulative.row(rows - 1);
    let mut idx = last_row
        .iter()
        .enumerate()
        .fold((0, f64::INFINITY), |(best_col, best), (col, &value)| {
            if value < best {
                (col, value)
            } else {
                (best_col, best)
            }
        })
        .0;

    let mut path = vec![0; rows];
    if let Some(slot) = path.last_mut() {
        *slot = idx;
    }
    for i in (1..rows).rev() {
        let offset = parents.get((i, idx)).copied().unwrap_or(0);
        idx = idx.saturating_add_signed(offset).min(cols - 1);
        if let Some(slot) = path.get_mut(i - 1) {
            *slot = idx;
        }
    }

    Ok(path)
}

/// Three-valued partition of each row relative to its seam column
///
/// Columns left of the seam are [`side::OLD`], the seam is [`side::SEAM`] and
/// columns to the right are [`side::NEW`].
pub fn partition(path: &[usize], cols: usize) -> Array2<i8> {
    Array2::from_shape_fn((path.len(), cols), |(r, c)| {
        let seam = path.get(r).copied().unwrap_or(0);
        match c.cmp(&seam) {
            Ordering::Less => side::OLD,
            Ordering::Equal => side::SEAM,
            Ordering::Greater => side::NEW,
        }
    })
}

/// Partition of the cost surface along the minimum-error cut
///
/// The result has the same shape as `cost`.
///
/// # Errors
///
/// Returns `DimensionMismatch` if the surface is empty
pub fn min_cut(cost: &ArrayView2<'_, f64>, axis: CutAxis) -> Result<Array2<i8>> {
    let oriented = match axis {
        CutAxis::Vertical => cost.view(),
        CutAxis::Horizontal => cost.t(),
    };

    let path = seam_path(&oriented)?;
    let sides = partition(&path, oriented.ncols());

    Ok(match axis {
        CutAxis::Vertical => sides,
        CutAxis::Horizontal => sides.reversed_axes(),
    })
}

/// Binary provenance from a partition: seam and new side become 1, old side 0
pub fn new_side_mask(sides: &Array2<i8>) -> Array2<u8> {
    sides.mapv(|v| u8::from(v >= side::SEAM))
}
