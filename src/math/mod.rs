//! Numeric kernels used by the distance engine

/// Box filtering and valid-mode cross-correlation
pub mod correlation;
