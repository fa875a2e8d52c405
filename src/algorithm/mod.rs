/// Mask-based compositing of chosen patches into the canvas
pub mod compositor;
/// Distance maps between sample patches and the canvas
pub mod distance;
/// Tile-grid synthesis driver
pub mod executor;
/// Minimum-error boundary cuts through overlap bands
pub mod seam;
/// Near-optimal candidate selection
pub mod selection;
