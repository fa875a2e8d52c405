//! Canvas snapshots and GIF export showing the synthesis process

use crate::algorithm::executor::{PlacementReport, SynthesisObserver};
use crate::io::configuration::FINAL_FRAME_HOLD;
use crate::io::error::{QuiltError, Result};
use crate::spatial::PixelMatrix;
use image::{Delay, Frame, Rgba, RgbaImage};
use std::path::Path;

/// Captures the canvas after every tile placement
///
/// Frames are stored as RGBA regardless of the canvas channel count so gray
/// and RGB syntheses animate the same way.
#[derive(Default)]
pub struct VisualizationCapture {
    frames: Vec<RgbaImage>,
    placements: Vec<PlacementReport>,
}

impl VisualizationCapture {
    /// Create an empty capture with room for `expected_tiles` frames
    pub fn new(expected_tiles: usize) -> Self {
        Self {
            frames: Vec::with_capacity(expected_tiles),
            placements: Vec::with_capacity(expected_tiles),
        }
    }

    /// Number of captured frames
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Placement events in the order they were captured
    pub fn placements(&self) -> &[PlacementReport] {
        &self.placements
    }

    /// Render a canvas as an RGBA image
    pub fn render(canvas: &PixelMatrix) -> RgbaImage {
        let view = canvas.view();
        let channels = canvas.channels();
        let mut img = RgbaImage::new(canvas.cols() as u32, canvas.rows() as u32);

        for (x, y, pixel) in img.enumerate_pixels_mut() {
            let at = |c: usize| view.get((y as usize, x as usize, c)).copied().unwrap_or(0);
            *pixel = match channels {
                1 => Rgba([at(0), at(0), at(0), 255]),
                3 => Rgba([at(0), at(1), at(2), 255]),
                _ => Rgba([at(0), at(1), at(2), at(3)]),
            };
        }

        img
    }

    /// Export the captured frames as an animated GIF
    ///
    /// The last frame is held `FINAL_FRAME_HOLD` times longer than the others.
    /// Frames are handed to the encoder as they are, so the capture is consumed.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No frames were captured
    /// - File system operations fail
    /// - GIF encoding fails
    pub fn export_gif(self, output_path: &Path, frame_delay_ms: u32) -> Result<()> {
        if self.frames.is_empty() {
            return Err(QuiltError::InvalidParameter {
                parameter: "visualization",
                value: output_path.display().to_string(),
                reason: "no frames captured".to_string(),
            });
        }

        if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| QuiltError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| QuiltError::FileSystem {
            path: output_path.to_path_buf(),
            operation: "create file",
            source: e,
        })?;

        let last = self.frames.len() - 1;
        let frames = self.frames.into_iter().enumerate().map(|(i, img)| {
            let delay = if i == last {
                frame_delay_ms.saturating_mul(FINAL_FRAME_HOLD)
            } else {
                frame_delay_ms
            };
            Frame::from_parts(img, 0, 0, Delay::from_numer_denom_ms(delay, 1))
        });

        let mut encoder = image::codecs::gif::GifEncoder::new(file);
        encoder
            .encode_frames(frames)
            .map_err(|e| QuiltError::ImageExport {
                path: output_path.to_path_buf(),
                source: e,
            })
    }
}

impl SynthesisObserver for VisualizationCapture {
    fn tile_placed(&mut self, report: &PlacementReport, canvas: &PixelMatrix) {
        self.frames.push(Self::render(canvas));
        self.placements.push(*report);
    }
}
