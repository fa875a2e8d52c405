//! Tile placement geometry on the output canvas
//!
//! Placements are derived purely from grid indices: the tile at `(i, j)` starts
//! at `(i·stride, j·stride)` where `stride = tileSize − overlap`, so
//! neighbouring placements share exactly `overlap` pixels along either axis.

use crate::io::configuration::SynthesisConfig;

/// Axis-aligned rectangle in pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Top row (inclusive)
    pub row: usize,
    /// Left column (inclusive)
    pub col: usize,
    /// Number of rows
    pub height: usize,
    /// Number of columns
    pub width: usize,
}

impl Rect {
    /// Create a rectangle from its top-left corner and extent
    pub const fn new(row: usize, col: usize, height: usize, width: usize) -> Self {
        Self {
            row,
            col,
            height,
            width,
        }
    }

    /// One past the last row
    pub const fn row_end(&self) -> usize {
        self.row + self.height
    }

    /// One past the last column
    pub const fn col_end(&self) -> usize {
        self.col + self.width
    }
}

/// Which already-placed neighbours constrain a grid cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Neighbours {
    /// First cell, nothing placed yet
    None,
    /// First row: only the tile to the left
    Left,
    /// First column: only the tile above
    Top,
    /// Interior cell with both neighbours and a shared corner
    Both,
}

impl Neighbours {
    /// Whether a left neighbour overlaps this cell
    pub const fn has_left(self) -> bool {
        matches!(self, Self::Left | Self::Both)
    }

    /// Whether a top neighbour overlaps this cell
    pub const fn has_top(self) -> bool {
        matches!(self, Self::Top | Self::Both)
    }
}

/// A single grid cell resolved to canvas coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    /// Grid row index
    pub grid_row: usize,
    /// Grid column index
    pub grid_col: usize,
    /// Canvas rectangle covered by the tile
    pub rect: Rect,
    /// Width of the shared band with each neighbour
    pub overlap: usize,
}

impl TilePlacement {
    /// Resolve grid indices `(i, j)` to a canvas rectangle
    pub const fn new(grid_row: usize, grid_col: usize, tile_size: usize, overlap: usize) -> Self {
        let stride = tile_size - overlap;
        Self {
            grid_row,
            grid_col,
            rect: Rect::new(grid_row * stride, grid_col * stride, tile_size, tile_size),
            overlap,
        }
    }

    /// Neighbour configuration for this cell
    pub const fn neighbours(&self) -> Neighbours {
        match (self.grid_row > 0, self.grid_col > 0) {
            (false, false) => Neighbours::None,
            (false, true) => Neighbours::Left,
            (true, false) => Neighbours::Top,
            (true, true) => Neighbours::Both,
        }
    }

    /// Side length of the tile
    pub const fn tile_size(&self) -> usize {
        self.rect.height
    }

    /// Band shared with the tile to the left (`tileSize × overlap`)
    pub const fn left_strip(&self) -> Rect {
        Rect::new(self.rect.row, self.rect.col, self.rect.height, self.overlap)
    }

    /// Band shared with the tile above (`overlap × tileSize`)
    pub const fn top_strip(&self) -> Rect {
        Rect::new(self.rect.row, self.rect.col, self.overlap, self.rect.width)
    }

    /// Square shared with both the left and top tiles
    pub const fn corner(&self) -> Rect {
        Rect::new(self.rect.row, self.rect.col, self.overlap, self.overlap)
    }
}

/// Raster-scan walk over the tile grid, row-major
pub fn grid_placements(config: &SynthesisConfig) -> impl Iterator<Item = TilePlacement> + '_ {
    (0..config.num_tiles).flat_map(move |i| {
        (0..config.num_tiles)
            .map(move |j| TilePlacement::new(i, j, config.tile_size, config.overlap))
    })
}
