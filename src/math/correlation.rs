//! Sliding-window sums for template matching
//!
//! Both operations use "valid" semantics: the window never leaves the input,
//! so an `H×W` input and a `kh×kw` window produce `(H−kh+1)×(W−kw+1)` outputs
//! and there are no border artifacts to crop away afterwards.

use ndarray::{Array2, ArrayView2, Zip};
use num_traits::Float;

/// Shape of a valid-mode sliding window result, `None` when the window does not fit
pub const fn valid_shape(
    input: (usize, usize),
    window: (usize, usize),
) -> Option<(usize, usize)> {
    if window.0 == 0 || window.1 == 0 || window.0 > input.0 || window.1 > input.1 {
        None
    } else {
        Some((input.0 - window.0 + 1, input.1 - window.1 + 1))
    }
}

/// Summed-area table with a zero guard row and column
fn integral_image<T: Float>(input: &ArrayView2<'_, T>) -> Array2<T> {
    let (rows, cols) = input.dim();
    let mut integral = Array2::from_elem((rows + 1, cols + 1), T::zero());

    for r in 0..rows {
        let mut row_sum = T::zero();
        for c in 0..cols {
            row_sum = row_sum + input.get((r, c)).copied().unwrap_or_else(T::zero);
            let above = integral.get((r, c + 1)).copied().unwrap_or_else(T::zero);
            if let Some(cell) = integral.get_mut((r + 1, c + 1)) {
                *cell = above + row_sum;
            }
        }
    }

    integral
}

/// Uniform-kernel filter: sum of every `kh×kw` window
///
/// Computed from a summed-area table in O(H·W) regardless of window size.
/// Returns an empty array if the window does not fit.
pub fn box_sum<T: Float>(input: &ArrayView2<'_, T>, window: (usize, usize)) -> Array2<T> {
    let Some(shape) = valid_shape(input.dim(), window) else {
        return Array2::from_elem((0, 0), T::zero());
    };

    let integral = integral_image(input);
    let at = |r: usize, c: usize| integral.get((r, c)).copied().unwrap_or_else(T::zero);
    let (kh, kw) = window;

    Array2::from_shape_fn(shape, |(r, c)| {
        at(r + kh, c + kw) - at(r, c + kw) - at(r + kh, c) + at(r, c)
    })
}

/// Valid-mode cross-correlation of `input` with `kernel`
///
/// `out[r][c] = Σ input[r+u][c+v] · kernel[u][v]`. The kernel is not flipped.
/// Returns an empty array if the kernel does not fit.
pub fn cross_correlate<T: Float>(input: &ArrayView2<'_, T>, kernel: &ArrayView2<'_, T>) -> Array2<T> {
    let Some(shape) = valid_shape(input.dim(), kernel.dim()) else {
        return Array2::from_elem((0, 0), T::zero());
    };

    let values: Vec<T> = input
        .windows(kernel.dim())
        .into_iter()
        .map(|window| {
            Zip::from(&window)
                .and(kernel)
                .fold(T::zero(), |acc, &a, &b| acc + a * b)
        })
        .collect();

    Array2::from_shape_vec(shape, values)
        .unwrap_or_else(|_| Array2::from_elem((0, 0), T::zero()))
}

/// Sum of squared elements
pub fn sum_of_squares<T: Float>(input: &ArrayView2<'_, T>) -> T {
    input.fold(T::zero(), |acc, &v| acc + v * v)
}
