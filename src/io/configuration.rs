//! Synthesis constants, runtime configuration defaults and validation

use crate::io::error::{Result, invalid_parameter};

/// Relative tolerance admitting near-optimal candidates (`best * (1 + ε)`)
pub const CANDIDATE_TOLERANCE: f64 = 0.002;

/// Default tile side in pixels
pub const DEFAULT_TILE_SIZE: usize = 80;

/// Default overlap between adjacent tiles in pixels
pub const DEFAULT_OVERLAP: usize = 13;

/// Default number of tiles along each canvas axis
pub const DEFAULT_NUM_TILES: usize = 5;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed canvas side in pixels
pub const MAX_CANVAS_DIMENSION: usize = 16_384;

// Soft guidance, reported as warnings only
/// Largest tile size recommended relative to the smaller sample side
pub const RECOMMENDED_TILE_FRACTION: f64 = 0.7;
/// Largest overlap recommended relative to the tile size
pub const RECOMMENDED_OVERLAP_FRACTION: f64 = 0.5;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;

// Output settings
/// Suffix added to output filenames
pub const OUTPUT_SUFFIX: &str = "_quilted";
/// Suffix added to process visualization filenames
pub const VISUALIZATION_SUFFIX: &str = "_process";
/// Image extensions accepted as synthesis input
pub const SUPPORTED_EXTENSIONS: [&str; 4] = ["png", "jpg", "jpeg", "bmp"];
/// Delay between GIF animation frames
pub const GIF_FRAME_DELAY_MS: u32 = 120;
/// Multiplier applied to the final frame delay so the result stays visible
pub const FINAL_FRAME_HOLD: u32 = 15;

/// Strategy used to build the distance map for each placement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum DistanceMode {
    /// Brute-force masked sum of squared differences against the live canvas
    Masked,
    /// Sliding-window SSD through `Σa² − 2Σab + Σb²`
    #[default]
    Convolution,
}

/// Parameters controlling a single synthesis run
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynthesisConfig {
    /// Side of each square tile in pixels
    pub tile_size: usize,
    /// Width of the band shared by neighbouring tiles
    pub overlap: usize,
    /// Number of tiles along each canvas axis
    pub num_tiles: usize,
    /// How the distance map is computed
    pub distance: DistanceMode,
    /// Blend tiles along a minimum-error cut instead of overwriting
    pub seam_smoothing: bool,
    /// Relative tolerance for the candidate set
    pub tolerance: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            tile_size: DEFAULT_TILE_SIZE,
            overlap: DEFAULT_OVERLAP,
            num_tiles: DEFAULT_NUM_TILES,
            distance: DistanceMode::default(),
            seam_smoothing: true,
            tolerance: CANDIDATE_TOLERANCE,
        }
    }
}

impl SynthesisConfig {
    /// Side length of the square output canvas
    ///
    /// `numTiles·tileSize − (numTiles−1)·overlap`, saturating at `usize::MAX`
    /// for configurations that `validate` rejects
    pub fn output_size(&self) -> usize {
        self.checked_output_size().unwrap_or(usize::MAX)
    }

    /// Side length of the output canvas, or `None` if it overflows `usize`
    pub fn checked_output_size(&self) -> Option<usize> {
        let painted = self.num_tiles.checked_mul(self.tile_size)?;
        let shared = self.num_tiles.saturating_sub(1).checked_mul(self.overlap)?;
        painted.checked_sub(shared)
    }

    /// Distance between the top-left corners of neighbouring tiles
    pub const fn stride(&self) -> usize {
        self.tile_size.saturating_sub(self.overlap)
    }

    /// Check the configuration against a sample of the given size
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if:
    /// - `num_tiles` is zero
    /// - `overlap` is zero or not smaller than `tile_size`
    /// - `tile_size` exceeds either sample dimension
    /// - `tolerance` is negative or not finite
    /// - the resulting canvas overflows or exceeds `MAX_CANVAS_DIMENSION`
    pub fn validate(&self, sample_rows: usize, sample_cols: usize) -> Result<()> {
        if self.num_tiles == 0 {
            return Err(invalid_parameter(
                "num_tiles",
                &self.num_tiles,
                &"at least one tile is required",
            ));
        }

        if self.overlap == 0 {
            return Err(invalid_parameter(
                "overlap",
                &self.overlap,
                &"overlap must be positive",
            ));
        }

        if self.overlap >= self.tile_size {
            return Err(invalid_parameter(
                "overlap",
                &self.overlap,
                &format!("must be smaller than tile size {}", self.tile_size),
            ));
        }

        let min_side = sample_rows.min(sample_cols);
        if self.tile_size > min_side {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!("exceeds sample dimensions {sample_rows}x{sample_cols}"),
            ));
        }

        if !self.tolerance.is_finite() || self.tolerance < 0.0 {
            return Err(invalid_parameter(
                "tolerance",
                &self.tolerance,
                &"must be a finite non-negative number",
            ));
        }

        let Some(output_size) = self.checked_output_size() else {
            return Err(invalid_parameter(
                "num_tiles",
                &self.num_tiles,
                &"canvas side overflows the address space",
            ));
        };
        if output_size > MAX_CANVAS_DIMENSION {
            return Err(invalid_parameter(
                "num_tiles",
                &self.num_tiles,
                &format!("canvas side {output_size} exceeds limit {MAX_CANVAS_DIMENSION}"),
            ));
        }

        if self.tile_size as f64 > min_side as f64 * RECOMMENDED_TILE_FRACTION {
            tracing::warn!(
                tile_size = self.tile_size,
                min_side,
                "tile size is large relative to the sample; output will repeat visibly"
            );
        }
        if self.overlap as f64 > self.tile_size as f64 * RECOMMENDED_OVERLAP_FRACTION {
            tracing::warn!(
                overlap = self.overlap,
                tile_size = self.tile_size,
                "overlap exceeds half the tile size"
            );
        }

        Ok(())
    }
}
