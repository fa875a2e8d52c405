//! Image quilting texture synthesis
//!
//! A small sample texture is grown into a larger one by laying square tiles
//! on a grid. Each tile is the sample patch whose overlap with the already
//! placed neighbours differs least from the canvas, and a minimum-error cut
//! through the overlap decides which pixels of the new tile are kept.

/// Distance maps, candidate selection, seam cutting and the synthesis loop
pub mod algorithm;
/// Input/output operations and error handling
pub mod io;
/// Numeric kernels for correlation and box filtering
pub mod math;
/// Pixel storage and tile placement geometry
pub mod spatial;

pub use algorithm::executor::{Quilter, synthesize};
pub use io::configuration::{DistanceMode, SynthesisConfig};
pub use io::error::{QuiltError, Result};
pub use spatial::PixelMatrix;
