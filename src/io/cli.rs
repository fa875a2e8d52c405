//! Command-line interface for batch texture synthesis

use crate::algorithm::executor::{PlacementReport, Quilter, SynthesisObserver};
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{
    CANDIDATE_TOLERANCE, DEFAULT_NUM_TILES, DEFAULT_OVERLAP, DEFAULT_TILE_SIZE, DistanceMode,
    GIF_FRAME_DELAY_MS, OUTPUT_SUFFIX, SUPPORTED_EXTENSIONS, SynthesisConfig,
    VISUALIZATION_SUFFIX,
};
use crate::io::error::{QuiltError, Result, invalid_parameter};
use crate::io::image::{load_sample, save_matrix};
use crate::io::progress::{FileProgress, ProgressManager};
use crate::io::visualization::VisualizationCapture;
use crate::spatial::PixelMatrix;
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "quilt")]
#[command(
    author,
    version,
    about = "Synthesize large textures from a small sample by image quilting"
)]
/// Command-line arguments for the quilting tool
// One bool per independent switch
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Sample image or directory of samples to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Side of each square tile in pixels
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Width of the band shared by neighbouring tiles
    #[arg(short, long, default_value_t = DEFAULT_OVERLAP)]
    pub overlap: usize,

    /// Number of tiles along each side of the output
    #[arg(short = 'n', long = "tiles", default_value_t = DEFAULT_NUM_TILES)]
    pub num_tiles: usize,

    /// Use brute-force masked SSD instead of the convolution distance
    #[arg(long)]
    pub masked: bool,

    /// Copy tiles straight into the canvas instead of cutting seams
    #[arg(long)]
    pub no_seam: bool,

    /// Relative tolerance admitting near-optimal candidates
    #[arg(long, default_value_t = CANDIDATE_TOLERANCE)]
    pub tolerance: f64,

    /// Random seed for reproducible synthesis (defaults to the clock)
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Output path when a single sample is processed
    #[arg(long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Export the synthesis process as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process samples even if output exists
    #[arg(long)]
    pub no_skip: bool,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Synthesis parameters selected on the command line
    pub const fn synthesis_config(&self) -> SynthesisConfig {
        SynthesisConfig {
            tile_size: self.tile_size,
            overlap: self.overlap,
            num_tiles: self.num_tiles,
            distance: if self.masked {
                DistanceMode::Masked
            } else {
                DistanceMode::Convolution
            },
            seam_smoothing: !self.no_seam,
            tolerance: self.tolerance,
        }
    }
}

/// Forwards engine events to the optional progress bar and process capture
struct RunObservers<'a> {
    progress: Option<FileProgress<'a>>,
    capture: Option<&'a mut VisualizationCapture>,
}

impl SynthesisObserver for RunObservers<'_> {
    fn tile_placed(&mut self, report: &PlacementReport, canvas: &PixelMatrix) {
        if let Some(progress) = self.progress.as_mut() {
            progress.tile_placed(report, canvas);
        }
        if let Some(capture) = self.capture.as_deref_mut() {
            capture.tile_placed(report, canvas);
        }
    }
}

/// Orchestrates batch synthesis of sample files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Process files according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation or file processing fails
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;

        if files.is_empty() {
            tracing::info!(path = %self.cli.target.display(), "nothing to process");
            return Ok(());
        }

        if self.cli.output.is_some() && files.len() > 1 {
            return Err(invalid_parameter(
                "output",
                &self.cli.target.display(),
                &"an explicit output path needs a single sample",
            ));
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index)?;
        }

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Whether a path names a sample image this tool can read
    pub fn is_supported_image(path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| SUPPORTED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;
        if target.is_file() {
            if !Self::is_supported_image(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"target file must be a PNG, JPEG or BMP image",
                ));
            }
            Ok(if self.should_process_file(target) {
                vec![target.clone()]
            } else {
                vec![]
            })
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| QuiltError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            })?;

            let mut files = Vec::new();
            for entry in entries {
                let path = entry?.path();
                if Self::is_supported_image(&path)
                    && !Self::is_generated(&path)
                    && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"target must be an image file or directory",
            ))
        }
    }

    // Earlier outputs in the same directory are not samples
    fn is_generated(path: &Path) -> bool {
        path.file_stem()
            .and_then(|s| s.to_str())
            .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path_for(input_path);
        if output_path.exists() {
            tracing::info!(
                sample = %input_path.display(),
                output = %output_path.display(),
                "skipping sample, output exists"
            );
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path, index: usize) -> Result<()> {
        let output_path = self.output_path_for(input_path);
        let config = self.cli.synthesis_config();
        let seed = self.cli.seed.unwrap_or_else(RandomSelector::time_seed);

        let sample = load_sample(input_path)?;
        tracing::info!(
            sample = %input_path.display(),
            rows = sample.rows(),
            cols = sample.cols(),
            channels = sample.channels(),
            seed,
            "loaded sample"
        );

        let mut quilter = Quilter::new(sample, config, RandomSelector::new(seed))?;
        let total_cells = quilter.total_cells();

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, input_path, total_cells);
        }

        let mut capture = self
            .cli
            .visualize
            .then(|| VisualizationCapture::new(total_cells));

        let elapsed = {
            let mut observers = RunObservers {
                progress: self
                    .progress_manager
                    .as_mut()
                    .map(|pm| FileProgress::new(pm, index)),
                capture: capture.as_mut(),
            };
            quilter.run(&mut observers)?
        };

        save_matrix(quilter.canvas(), &output_path)?;
        tracing::info!(
            output = %output_path.display(),
            size = config.output_size(),
            elapsed_ms = elapsed.as_millis() as u64,
            "saved synthesized texture"
        );

        if let Some(capture) = capture {
            let viz_path = Self::visualization_path(input_path);
            let frames = capture.frame_count();
            capture.export_gif(&viz_path, GIF_FRAME_DELAY_MS)?;
            tracing::info!(path = %viz_path.display(), frames, "saved process animation");
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, elapsed);
        }

        Ok(())
    }

    fn output_path_for(&self, input_path: &Path) -> PathBuf {
        self.cli
            .output
            .as_deref()
            .map_or_else(|| Self::default_output_path(input_path), Self::with_png_extension)
    }

    /// Append `.png` to paths that lack an extension
    pub fn with_png_extension(path: &Path) -> PathBuf {
        if path.extension().is_some() {
            path.to_path_buf()
        } else {
            path.with_extension("png")
        }
    }

    /// `<stem>_quilted.png` next to the sample
    pub fn default_output_path(input_path: &Path) -> PathBuf {
        Self::sibling(input_path, &format!("{OUTPUT_SUFFIX}.png"))
    }

    /// `<stem>_process.gif` next to the sample
    pub fn visualization_path(input_path: &Path) -> PathBuf {
        Self::sibling(input_path, &format!("{VISUALIZATION_SUFFIX}.gif"))
    }

    fn sibling(input_path: &Path, suffix: &str) -> PathBuf {
        let stem = input_path.file_stem().unwrap_or_default();
        let name = format!("{}{suffix}", stem.to_string_lossy());

        if let Some(parent) = input_path.parent() {
            parent.join(name)
        } else {
            PathBuf::from(name)
        }
    }
}
