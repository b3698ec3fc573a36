use crate::{
    algorithm::propagation::find_conflict,
    algorithm::selection::RandomSelector,
    algorithm::solver::{StepResult, step},
    io::configuration::{DEFAULT_MAX_ATTEMPTS, MAX_GRID_DIMENSION},
    io::error::{AlgorithmError, Result, invalid_parameter},
    io::image::TileImageCache,
    io::visualization::VisualizationCapture,
    spatial::{ConstraintGrid, TileCatalog},
};
use log::{debug, info, warn};
use std::path::Path;
use std::sync::Arc;

/// How many solve attempts a contradiction may consume
///
/// Every attempt starts from a fresh grid. There is no partial backtracking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RestartPolicy {
    /// Total attempts allowed, `None` for unbounded
    pub max_attempts: Option<usize>,
}

impl RestartPolicy {
    /// Restart forever on contradiction
    pub const fn unbounded() -> Self {
        Self { max_attempts: None }
    }

    /// Allow at most `max_attempts` attempts in total
    pub const fn bounded(max_attempts: usize) -> Self {
        Self {
            max_attempts: Some(max_attempts),
        }
    }

    /// Interpret a command-line limit where 0 means unbounded
    pub const fn from_limit(limit: usize) -> Self {
        if limit == 0 {
            Self::unbounded()
        } else {
            Self::bounded(limit)
        }
    }

    /// Whether attempt number `attempt` (1-based) may start
    pub fn allows(&self, attempt: usize) -> bool {
        self.max_attempts.is_none_or(|max| attempt <= max)
    }
}

impl Default for RestartPolicy {
    fn default() -> Self {
        Self::from_limit(DEFAULT_MAX_ATTEMPTS)
    }
}

/// Drives solver steps over a grid and rebuilds the grid on contradiction
///
/// Owns the current grid exclusively. The catalog is shared read-only between
/// attempts and never copied per grid.
pub struct CollapseExecutor {
    catalog: Arc<TileCatalog>,
    grid: ConstraintGrid,
    policy: RestartPolicy,
    random_selector: RandomSelector,
    /// Current attempt, starting at 1
    attempt: usize,
    /// Steps taken across all attempts
    steps: usize,
    /// Optional visualization capture
    pub visualization: Option<VisualizationCapture>,
}

impl CollapseExecutor {
    /// Create an executor with a fresh grid
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog is empty
    /// - Either dimension is zero or exceeds `MAX_GRID_DIMENSION`
    pub fn new(
        catalog: Arc<TileCatalog>,
        width: usize,
        height: usize,
        policy: RestartPolicy,
        seed: u64,
    ) -> Result<Self> {
        if catalog.is_empty() {
            return Err(AlgorithmError::EmptyCatalog);
        }
        for (parameter, value) in [("width", width), ("height", height)] {
            if value == 0 || value > MAX_GRID_DIMENSION {
                return Err(invalid_parameter(
                    parameter,
                    &value,
                    &format!("must be between 1 and {MAX_GRID_DIMENSION}"),
                ));
            }
        }
        if policy.max_attempts == Some(0) {
            return Err(invalid_parameter(
                "max_attempts",
                &0,
                &"at least one attempt is required",
            ));
        }

        debug!(
            "Solving {width}x{height} grid with {} tile variants (seed {seed})",
            catalog.len()
        );

        let grid = ConstraintGrid::new(width, height, &catalog);
        Ok(Self {
            catalog,
            grid,
            policy,
            random_selector: RandomSelector::new(seed),
            attempt: 1,
            steps: 0,
            visualization: None,
        })
    }

    /// Access the current grid
    pub const fn grid(&self) -> &ConstraintGrid {
        &self.grid
    }

    /// Access the shared catalog
    pub fn catalog(&self) -> &TileCatalog {
        &self.catalog
    }

    /// Current attempt number, starting at 1
    pub const fn attempt(&self) -> usize {
        self.attempt
    }

    /// Number of restarts performed so far
    pub const fn restarts(&self) -> usize {
        self.attempt - 1
    }

    /// Steps taken across all attempts
    pub const fn steps(&self) -> usize {
        self.steps
    }

    /// Whether every cell of the current grid holds a tile
    pub fn is_complete(&self) -> bool {
        self.grid.is_complete()
    }

    /// Enable GIF recording of the solve
    pub fn enable_visualization(&mut self) {
        let (width, height) = self.grid.dimensions();
        self.visualization = Some(VisualizationCapture::new(width, height, width * height));
    }

    /// Export visualization as GIF if enabled, returning the number of frames
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Visualization was not enabled
    /// - Tile images cannot be loaded or the GIF cannot be written
    pub fn export_visualization(&self, output_path: &Path, images: &mut TileImageCache) -> Result<usize> {
        self.visualization.as_ref().map_or_else(
            || {
                Err(AlgorithmError::InvalidParameter {
                    parameter: "visualization",
                    value: "disabled".to_string(),
                    reason: "Visualization was not enabled for this run".to_string(),
                })
            },
            |viz| {
                viz.export_gif(
                    output_path,
                    &self.catalog,
                    images,
                    crate::io::configuration::GIF_FRAME_DELAY_MS,
                )
            },
        )
    }

    /// Run one solver step, restarting on contradiction
    ///
    /// A contradiction is returned to the caller after the grid has already
    /// been replaced, so the next call continues on the fresh grid.
    ///
    /// # Errors
    ///
    /// Returns `UnsolvableConfiguration` if a contradiction occurs and the
    /// restart policy allows no further attempts.
    pub fn step(&mut self) -> Result<StepResult> {
        self.steps += 1;
        let result = step(&mut self.grid, &self.catalog, &mut self.random_selector);

        match result {
            StepResult::Collapsed { position, tile, .. } => {
                if let Some(ref mut viz) = self.visualization {
                    viz.record_placement(position, tile, self.steps);
                }
            }
            StepResult::Contradiction { position } => self.restart(position)?,
            StepResult::Stalled => {
                debug_assert!(find_conflict(&self.grid, &self.catalog).is_none());
            }
        }

        Ok(result)
    }

    /// Step until the grid is complete
    ///
    /// Returns the number of restarts performed.
    ///
    /// # Errors
    ///
    /// Returns `UnsolvableConfiguration` once the restart policy is exhausted.
    pub fn run(&mut self) -> Result<usize> {
        self.run_with(|_, _| {})
    }

    /// Step until the grid is complete, reporting every step to `on_step`
    ///
    /// # Errors
    ///
    /// Returns `UnsolvableConfiguration` once the restart policy is exhausted.
    pub fn run_with(&mut self, mut on_step: impl FnMut(&Self, &StepResult)) -> Result<usize> {
        loop {
            let result = self.step()?;
            on_step(self, &result);
            if result.is_stalled() {
                debug!(
                    "Solved after {} steps and {} restarts",
                    self.steps,
                    self.restarts()
                );
                return Ok(self.restarts());
            }
        }
    }

    /// Discard the grid and start a new attempt
    fn restart(&mut self, position: [usize; 2]) -> Result<()> {
        let (width, height) = self.grid.dimensions();

        if !self.policy.allows(self.attempt + 1) {
            warn!(
                "Contradiction at {position:?} on attempt {}, no attempts left",
                self.attempt
            );
            return Err(AlgorithmError::UnsolvableConfiguration {
                attempts: self.attempt,
                dimensions: (width, height),
            });
        }

        info!(
            "Contradiction at {position:?} on attempt {}, restarting",
            self.attempt
        );
        self.grid = ConstraintGrid::new(width, height, &self.catalog);
        self.attempt += 1;

        if let Some(ref mut viz) = self.visualization {
            viz.record_restart(self.steps);
        }

        Ok(())
    }
}
