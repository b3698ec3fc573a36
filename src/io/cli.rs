//! Command-line interface for solving one or many tilesets

use crate::algorithm::executor::{CollapseExecutor, RestartPolicy};
use crate::io::catalog::CatalogLoader;
use crate::io::configuration::{
    DEFAULT_GRID_HEIGHT, DEFAULT_GRID_WIDTH, DEFAULT_MAX_ATTEMPTS, DEFAULT_SEED, OUTPUT_SUFFIX,
    VISUALIZATION_SUFFIX,
};
use crate::io::error::{Result, WithContext, path_error};
use crate::io::image::{TileImageCache, export_grid_as_png};
use crate::io::progress::ProgressManager;
use clap::Parser;
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "edgetile")]
#[command(
    author,
    version,
    about = "Fill a grid with tiles whose edges match their neighbours"
)]
/// Command-line arguments for the tile solver
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Tileset directory, or a directory of tileset directories
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Grid width in tiles
    #[arg(short = 'w', long, default_value_t = DEFAULT_GRID_WIDTH)]
    pub width: usize,

    /// Grid height in tiles
    #[arg(short = 'H', long, default_value_t = DEFAULT_GRID_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Solve attempts before giving up, 0 retries forever
    #[arg(short, long, default_value_t = DEFAULT_MAX_ATTEMPTS)]
    pub max_attempts: usize,

    /// Output image path (single tileset only)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Enable visualization output as animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process tilesets even if output exists
    #[arg(short, long)]
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

    /// Restart policy requested on the command line
    pub const fn restart_policy(&self) -> RestartPolicy {
        RestartPolicy::from_limit(self.max_attempts)
    }
}

/// Orchestrates solving every tileset under the target with progress tracking
pub struct TilesetProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl TilesetProcessor {
    /// Create a new tileset processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
        }
    }

    /// Solve tilesets according to CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The target is neither a tileset nor a directory of tilesets
    /// - `--output` is given for more than one tileset
    /// - A tileset fails to load, solve or export
    pub fn process(&mut self) -> Result<()> {
        let tilesets = self.collect_tilesets()?;

        if tilesets.is_empty() {
            return Ok(());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(tilesets.len());
        }

        for (index, tileset) in tilesets.iter().enumerate() {
            self.process_tileset(tileset, index)?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        Ok(())
    }

    /// Tileset directories to solve, in sorted order
    ///
    /// # Errors
    ///
    /// Returns an error if the target cannot be read or holds no tileset
    pub fn collect_tilesets(&self) -> Result<Vec<PathBuf>> {
        let target = &self.cli.target;

        let candidates = if CatalogLoader::is_tileset(target) {
            vec![target.clone()]
        } else if target.is_dir() {
            let mut tilesets = Vec::new();
            for entry in std::fs::read_dir(target).with_path(target)? {
                let path = entry.with_path(target)?.path();
                if CatalogLoader::is_tileset(&path) {
                    tilesets.push(path);
                }
            }
            if tilesets.is_empty() {
                return Err(path_error(target, "Directory contains no tilesets"));
            }
            tilesets.sort();
            tilesets
        } else {
            return Err(path_error(
                target,
                "Target must be a tileset directory or a directory of tilesets",
            ));
        };

        if self.cli.output.is_some() && candidates.len() > 1 {
            return Err(path_error(
                target,
                "--output can only be used with a single tileset",
            ));
        }

        Ok(candidates
            .into_iter()
            .filter(|tileset| self.should_process_tileset(tileset))
            .collect())
    }

    fn should_process_tileset(&self, tileset: &Path) -> bool {
        if !self.cli.skip_existing() {
            return true;
        }

        let output_path = self.output_path(tileset);
        if output_path.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.cli.quiet {
                eprintln!("Skipping: {} (output exists)", tileset.display());
            }
            false
        } else {
            true
        }
    }

    fn process_tileset(&mut self, tileset: &Path, index: usize) -> Result<()> {
        let start_time = Instant::now();
        let output_path = self.output_path(tileset);

        let catalog = Arc::new(CatalogLoader::new(tileset).load()?);
        let mut executor = CollapseExecutor::new(
            Arc::clone(&catalog),
            self.cli.width,
            self.cli.height,
            self.cli.restart_policy(),
            self.cli.seed,
        )?;

        if self.cli.visualize {
            executor.enable_visualization();
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_tileset(index, tileset, self.cli.width * self.cli.height);
        }

        let progress = &mut self.progress_manager;
        let restarts = executor.run_with(|state, _| {
            if let Some(pm) = progress.as_mut() {
                pm.update_tileset(index, state.grid().resolved_count(), state.restarts());
            }
        })?;

        let mut images = TileImageCache::new(catalog.tile_pixel_size());
        export_grid_as_png(executor.grid(), &catalog, &mut images, &output_path)?;

        if self.cli.visualize {
            let viz_path = Self::visualization_path(&output_path, tileset);
            let frames = executor.export_visualization(&viz_path, &mut images)?;
            debug!("Wrote {frames} frames to '{}'", viz_path.display());
        }

        info!(
            "Solved '{}' in {:.2?} with {restarts} restarts, wrote '{}'",
            tileset.display(),
            start_time.elapsed(),
            output_path.display()
        );

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_tileset(index);
        }

        Ok(())
    }

    /// Where the composite image for `tileset` is written
    pub fn output_path(&self, tileset: &Path) -> PathBuf {
        if let Some(ref output) = self.cli.output {
            return output.clone();
        }

        let name = tileset.file_name().unwrap_or_default();
        let output_name = format!("{}{OUTPUT_SUFFIX}.png", name.to_string_lossy());

        if let Some(parent) = tileset.parent() {
            parent.join(output_name)
        } else {
            PathBuf::from(output_name)
        }
    }

    /// Where the solve animation for `tileset` is written, next to its composite
    pub fn visualization_path(output_path: &Path, tileset: &Path) -> PathBuf {
        let name = tileset.file_name().unwrap_or_default();
        let viz_name = format!("{}{VISUALIZATION_SUFFIX}.gif", name.to_string_lossy());

        if let Some(parent) = output_path.parent() {
            parent.join(viz_name)
        } else {
            PathBuf::from(viz_name)
        }
    }
}
