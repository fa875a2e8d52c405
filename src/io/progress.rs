//! Multi-file progress tracking with automatic batching for large sets
//!
//! Each file's bar counts placed tiles; the synthesis engine reports through
//! [`FileProgress`], which adapts the manager to the observer interface.

use crate::algorithm::executor::{PlacementReport, SynthesisObserver};
use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use crate::spatial::PixelMatrix;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix:>24} [{bar:30.green/white}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Samples: [{bar:40.green/white}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Display state of one sample file
#[derive(Debug, Clone, Default)]
struct FileState {
    name: String,
    placed: usize,
    total: usize,
    elapsed: Option<Duration>,
}

impl FileState {
    fn message(&self) -> String {
        let width = self.total.to_string().len();
        match self.elapsed {
            Some(elapsed) => format!(
                "{:>width$}/{} tiles in {} ms",
                self.placed,
                self.total,
                elapsed.as_millis()
            ),
            None => format!("{:>width$}/{} tiles", self.placed, self.total),
        }
    }
}

/// Coordinates progress display for batch operations
///
/// Shows one bar per file for the most recent files and adds an aggregate
/// bar once the batch is larger than [`MAX_INDIVIDUAL_PROGRESS_BARS`].
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    files: Vec<FileState>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            files: Vec::new(),
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        for _ in 0..file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS) {
            let bar = ProgressBar::new(0);
            bar.set_style(TILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(bar));
        }

        self.files = vec![FileState::default(); file_count];
    }

    /// Configure the bar for a new file
    pub fn start_file(&mut self, index: usize, path: &Path, total_tiles: usize) {
        if index >= self.files.len() {
            self.files.resize(index + 1, FileState::default());
        }
        if let Some(state) = self.files.get_mut(index) {
            *state = FileState {
                name: path
                    .file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
                placed: 0,
                total: total_tiles,
                elapsed: None,
            };
        }
        self.refresh();
    }

    /// Report the number of tiles placed so far
    pub fn update_tiles(&mut self, index: usize, tiles_placed: usize) {
        if let Some(state) = self.files.get_mut(index) {
            state.placed = tiles_placed;
        }
        self.refresh();
    }

    /// Mark a file as completed and advance the batch bar
    pub fn complete_file(&mut self, index: usize, elapsed: Duration) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }
        if let Some(state) = self.files.get_mut(index) {
            state.placed = state.total;
            state.elapsed = Some(elapsed);
        }
        self.refresh();
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All samples processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Number of files whose synthesis has finished
    pub fn completed_count(&self) -> usize {
        self.files.iter().filter(|f| f.elapsed.is_some()).count()
    }

    // Bars show the most recently started files
    fn refresh(&self) {
        let started: Vec<&FileState> = self.files.iter().filter(|f| !f.name.is_empty()).collect();
        let first_visible = started.len().saturating_sub(self.file_bars.len());
        let visible = started.get(first_visible..).unwrap_or(&[]);

        for (slot, bar) in self.file_bars.iter().enumerate() {
            if let Some(state) = visible.get(slot) {
                bar.set_length(state.total as u64);
                bar.set_position(state.placed as u64);
                bar.set_prefix(state.name.clone());
                bar.set_message(state.message());
            } else {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_prefix(String::new());
                bar.set_message(String::new());
            }
        }
    }
}

/// Progress reporting for a single file, driven by synthesis events
pub struct FileProgress<'a> {
    manager: &'a mut ProgressManager,
    file_index: usize,
}

impl<'a> FileProgress<'a> {
    /// Route tile events to the bar of `file_index`
    pub const fn new(manager: &'a mut ProgressManager, file_index: usize) -> Self {
        Self {
            manager,
            file_index,
        }
    }
}

impl SynthesisObserver for FileProgress<'_> {
    fn tile_placed(&mut self, report: &PlacementReport, _canvas: &PixelMatrix) {
        self.manager
            .update_tiles(self.file_index, report.cell_index + 1);
    }
}
