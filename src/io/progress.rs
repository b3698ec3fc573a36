//! Multi-tileset progress tracking with automatic batching for large sets

use crate::io::configuration::{MAX_INDIVIDUAL_PROGRESS_BARS, PROGRESS_BAR_WIDTH};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Display state of one tileset
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TilesetProgress {
    /// Display name of the tileset
    pub name: String,
    /// Cells resolved on the current attempt
    pub resolved: usize,
    /// Cells in the grid
    pub total: usize,
    /// Restarts performed so far
    pub restarts: usize,
}

/// Coordinates progress display for batch operations
///
/// Automatically switches between individual progress bars (for small batches)
/// and a single batch progress bar (for large batches) based on tileset count
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    tileset_bars: Vec<ProgressBar>,
    tileset_count: usize,
    tileset_states: Vec<TilesetProgress>,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static PROGRESS_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "{{msg}} [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{prefix}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Tilesets: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            tileset_bars: Vec::new(),
            tileset_count: 0,
            tileset_states: Vec::new(),
        }
    }

    /// Initialize progress bars based on tileset count
    pub fn initialize(&mut self, tileset_count: usize) {
        self.tileset_count = tileset_count;

        // Switch to batch mode for large sets to avoid terminal spam
        if tileset_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(tileset_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = tileset_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(PROGRESS_STYLE.clone());
            self.tileset_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Number of tilesets announced by [`Self::initialize`]
    pub const fn tileset_count(&self) -> usize {
        self.tileset_count
    }

    /// Configure progress bar for a new tileset
    pub fn start_tileset(&mut self, index: usize, path: &Path, total_cells: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.tileset_states.len() {
            self.tileset_states
                .resize(index + 1, TilesetProgress::default());
        }
        if let Some(state) = self.tileset_states.get_mut(index) {
            *state = TilesetProgress {
                name,
                resolved: 0,
                total: total_cells,
                restarts: 0,
            };
        }
        self.update_bars();
    }

    /// Report resolved cells and restarts of the current attempt
    pub fn update_tileset(&mut self, index: usize, resolved: usize, restarts: usize) {
        if let Some(state) = self.tileset_states.get_mut(index) {
            state.resolved = resolved;
            state.restarts = restarts;
        }
        self.update_bars();
    }

    /// Mark tileset as completed and update batch progress
    pub fn complete_tileset(&mut self, index: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.tileset_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.resolved = state.total;
        }
        self.update_bars();
    }

    /// Current display state of a tileset
    pub fn tileset_state(&self, index: usize) -> Option<&TilesetProgress> {
        self.tileset_states.get(index)
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All tilesets processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Update all progress bars to show the last N active tilesets
    fn update_bars(&self) {
        let active: Vec<&TilesetProgress> = self
            .tileset_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, state) in visible.iter().enumerate() {
            if let Some(bar) = self.tileset_bars.get(bar_idx) {
                bar.set_length(state.total as u64);
                bar.set_position(state.resolved as u64);
                let width = state.total.to_string().len();
                let message = if state.restarts == 0 {
                    format!("{:>width$}/{}", state.resolved, state.total)
                } else {
                    format!(
                        "{:>width$}/{} (restarts: {})",
                        state.resolved, state.total, state.restarts
                    )
                };
                bar.set_message(message);
                bar.set_prefix(state.name.clone());
            }
        }

        // Clear any unused bars
        for bar_idx in visible.len()..self.tileset_bars.len() {
            if let Some(bar) = self.tileset_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
