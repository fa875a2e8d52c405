//! Stochastic near-optimal candidate selection
//!
//! Always picking the single best patch makes the output visibly repetitive,
//! so every position within `(1 + ε)` of the minimum error is kept and one of
//! them is drawn uniformly.

use std::time::{SystemTime, UNIX_EPOCH};

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::algorithm::distance::DistanceMap;
use crate::io::error::{QuiltError, Result};

/// Seeded random source for reproducible candidate draws
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Seed derived from the system clock, for runs that need not be reproducible
    pub fn time_seed() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos() as u64)
    }

    /// Uniform real in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniformly pick one element: `items[floor(u · len)]`
    pub fn pick<T: Copy>(&mut self, items: &[T]) -> Option<T> {
        if items.is_empty() {
            return None;
        }
        let slot = ((self.unit() * items.len() as f64).floor() as usize).min(items.len() - 1);
        items.get(slot).copied()
    }
}

/// Outcome of a candidate draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    /// Flattened row-major index into the distance map
    pub index: usize,
    /// Sample row of the chosen patch's top-left corner
    pub row: usize,
    /// Sample column of the chosen patch's top-left corner
    pub col: usize,
    /// Size of the candidate set the draw was made from
    pub candidate_count: usize,
    /// Minimum error in the distance map
    pub best_error: f64,
}

/// Smallest finite value in the map
pub fn best_error(map: &DistanceMap) -> Option<f64> {
    map.iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |best, v| match best {
            Some(current) if current <= v => Some(current),
            _ => Some(v),
        })
}

/// Flattened indices, in row-major order, whose value is within `best · (1 + tolerance)`
pub fn find_candidates(map: &DistanceMap, best: f64, tolerance: f64) -> Vec<usize> {
    let threshold = best * (1.0 + tolerance);
    map.iter()
        .enumerate()
        .filter(|&(_, &v)| v <= threshold)
        .map(|(index, _)| index)
        .collect()
}

/// Convert a flattened row-major index to `(row, col)`
pub const fn index_to_position(index: usize, cols: usize) -> (usize, usize) {
    (index / cols, index % cols)
}

/// Draw one near-optimal position from the distance map
///
/// # Errors
///
/// Returns `DegenerateDistanceMap` if the map is empty or holds no finite value
pub fn select_candidate(
    map: &DistanceMap,
    tolerance: f64,
    selector: &mut RandomSelector,
) -> Result<Selection> {
    let (rows, cols) = map.dim();
    let degenerate = QuiltError::DegenerateDistanceMap { rows, cols };

    let Some(best) = best_error(map) else {
        return Err(degenerate);
    };

    let candidates = find_candidates(map, best, tolerance);
    let Some(index) = selector.pick(&candidates) else {
        return Err(degenerate);
    };

    let (row, col) = index_to_position(index, cols);
    Ok(Selection {
        index,
        row,
        col,
        candidate_count: candidates.len(),
        best_error: best,
    })
}
