//! Tile-grid synthesis driver
//!
//! Walks the grid in raster order. Each placement depends on every tile
//! already written above and to the left of it, so cells are resolved strictly
//! one after another: distance map, candidate draw, optional seam cuts, then
//! compositing into the canvas.

use std::time::{Duration, Instant};

use ndarray::Array2;

use crate::algorithm::compositor::{blend_into, overlap_cost, overwrite, provenance_mask};
use crate::algorithm::distance::strategy_for;
use crate::algorithm::seam::{CutAxis, min_cut, new_side_mask};
use crate::algorithm::selection::{RandomSelector, Selection, select_candidate};
use crate::io::configuration::SynthesisConfig;
use crate::io::error::Result;
use crate::spatial::PixelMatrix;
use crate::spatial::placement::{Neighbours, Rect, TilePlacement, grid_placements};

/// Receives a notification after every tile written to the canvas
pub trait SynthesisObserver {
    /// Called once the tile at `placement` has been composited
    fn tile_placed(&mut self, report: &PlacementReport, canvas: &PixelMatrix);
}

impl SynthesisObserver for () {
    fn tile_placed(&mut self, _report: &PlacementReport, _canvas: &PixelMatrix) {}
}

/// What happened at one grid cell
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementReport {
    /// Grid cell and its canvas rectangle
    pub placement: TilePlacement,
    /// Sample patch chosen for the cell
    pub selection: Selection,
    /// Whether the patch was blended along seam cuts rather than copied
    pub blended: bool,
    /// Zero-based position of the cell in the raster walk
    pub cell_index: usize,
    /// Number of cells in the whole grid
    pub total_cells: usize,
}

/// Image quilting engine owning the output canvas for one synthesis run
pub struct Quilter {
    sample: PixelMatrix,
    config: SynthesisConfig,
    canvas: PixelMatrix,
    random_selector: RandomSelector,
    placements: Vec<TilePlacement>,
    next_cell: usize,
}

impl Quilter {
    /// Validate the configuration and allocate a zeroed canvas
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the configuration does not fit the sample
    pub fn new(
        sample: PixelMatrix,
        config: SynthesisConfig,
        random_selector: RandomSelector,
    ) -> Result<Self> {
        config.validate(sample.rows(), sample.cols())?;

        let side = config.output_size();
        let canvas = PixelMatrix::zeros(side, side, sample.channels())?;
        let placements = grid_placements(&config).collect();

        Ok(Self {
            sample,
            config,
            canvas,
            random_selector,
            placements,
            next_cell: 0,
        })
    }

    /// Configuration driving this run
    pub const fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Source texture
    pub const fn sample(&self) -> &PixelMatrix {
        &self.sample
    }

    /// Canvas in its current, possibly partial, state
    pub const fn canvas(&self) -> &PixelMatrix {
        &self.canvas
    }

    /// Number of grid cells in the run
    pub fn total_cells(&self) -> usize {
        self.placements.len()
    }

    /// Number of grid cells already written
    pub const fn cells_completed(&self) -> usize {
        self.next_cell
    }

    /// Whether every grid cell has been written
    pub fn is_complete(&self) -> bool {
        self.next_cell >= self.placements.len()
    }

    /// Resolve the next grid cell
    ///
    /// Returns `None` once the grid is complete. Callers that need to stay
    /// responsive can stop between steps.
    ///
    /// # Errors
    ///
    /// Returns an error if the distance map is degenerate or a region falls
    /// outside its image
    pub fn execute_step(&mut self) -> Result<Option<PlacementReport>> {
        let Some(placement) = self.placements.get(self.next_cell).copied() else {
            return Ok(None);
        };

        let (selection, blended) = self.place(&placement)?;
        let report = PlacementReport {
            placement,
            selection,
            blended,
            cell_index: self.next_cell,
            total_cells: self.placements.len(),
        };
        self.next_cell += 1;

        tracing::debug!(
            cell = ?(placement.grid_row, placement.grid_col),
            sample = ?(selection.row, selection.col),
            candidates = selection.candidate_count,
            best_error = selection.best_error,
            blended,
            "placed tile"
        );

        Ok(Some(report))
    }

    /// Synthesize the remaining cells, notifying `observer` after each one
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a placement; the canvas is then
    /// left partially written
    pub fn run(&mut self, observer: &mut dyn SynthesisObserver) -> Result<Duration> {
        let start = Instant::now();
        tracing::info!(
            sample = ?(self.sample.rows(), self.sample.cols(), self.sample.channels()),
            output = self.config.output_size(),
            tile_size = self.config.tile_size,
            overlap = self.config.overlap,
            tiles = self.config.num_tiles,
            distance = ?self.config.distance,
            seam_smoothing = self.config.seam_smoothing,
            "starting synthesis"
        );

        while let Some(report) = self.execute_step()? {
            observer.tile_placed(&report, &self.canvas);
        }

        let elapsed = start.elapsed();
        tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "synthesis complete");
        Ok(elapsed)
    }

    /// Consume the engine, returning the canvas
    pub fn into_canvas(self) -> PixelMatrix {
        self.canvas
    }

    fn place(&mut self, placement: &TilePlacement) -> Result<(Selection, bool)> {
        let map = strategy_for(self.config.distance).distance(
            &self.sample,
            &self.canvas,
            placement,
        )?;
        let selection = select_candidate(&map, self.config.tolerance, &mut self.random_selector)?;

        let tile_size = self.config.tile_size;
        let patch_rect = Rect::new(selection.row, selection.col, tile_size, tile_size);
        let patch = self.sample.region(patch_rect)?;

        let neighbours = placement.neighbours();
        if !self.config.seam_smoothing || neighbours == Neighbours::None {
            overwrite(&mut self.canvas, placement.rect, &patch)?;
            return Ok((selection, false));
        }

        let overlap = self.config.overlap;
        let left = neighbours
            .has_left()
            .then(|| {
                self.seam_mask(
                    placement.left_strip(),
                    Rect::new(selection.row, selection.col, tile_size, overlap),
                    CutAxis::Vertical,
                )
            })
            .transpose()?;
        let top = neighbours
            .has_top()
            .then(|| {
                self.seam_mask(
                    placement.top_strip(),
                    Rect::new(selection.row, selection.col, overlap, tile_size),
                    CutAxis::Horizontal,
                )
            })
            .transpose()?;

        let mask = provenance_mask(tile_size, overlap, left.as_ref(), top.as_ref())?;
        blend_into(&mut self.canvas, placement.rect, &patch, &mask)?;
        Ok((selection, true))
    }

    fn seam_mask(&self, canvas_band: Rect, patch_band: Rect, axis: CutAxis) -> Result<Array2<u8>> {
        let cost = overlap_cost(&self.canvas, canvas_band, &self.sample, patch_band)?;
        let sides = min_cut(&cost.view(), axis)?;
        Ok(new_side_mask(&sides))
    }
}

/// Synthesize a full canvas from `sample` with a seeded random source
///
/// # Errors
///
/// Returns `InvalidParameter` for a configuration that does not fit the
/// sample, or any error raised while placing tiles
pub fn synthesize(sample: PixelMatrix, config: SynthesisConfig, seed: u64) -> Result<PixelMatrix> {
    let mut quilter = Quilter::new(sample, config, RandomSelector::new(seed))?;
    quilter.run(&mut ())?;
    Ok(quilter.into_canvas())
}
