//! Spatial data structures for images and tile placement
//!
//! This module contains spatial-related functionality including:
//! - Owned multi-channel pixel storage
//! - Tile grid geometry and overlap bands

/// Multi-channel pixel matrix shared by every component
pub mod matrix;
/// Tile placement rectangles derived from grid indices
pub mod placement;

pub use matrix::PixelMatrix;
pub use placement::{Neighbours, Rect, TilePlacement};
