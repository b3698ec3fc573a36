//! Single-step constraint propagation and collapse
//!
//! One call to [`step`] scans the grid once in row-major order, narrowing each
//! undecided cell against its decided neighbours. The first cell narrowed to a
//! single candidate is committed immediately and the step returns. If no cell
//! is forced, the cell with the most decided or off-grid neighbours is
//! collapsed to a uniformly random remaining candidate.

use crate::{
    algorithm::propagation::constrain_from_neighbors,
    algorithm::selection::{PressureFrontier, RandomSelector},
    spatial::{ConstraintGrid, TileCatalog},
};
use log::trace;

/// Result of one solver step
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepResult {
    /// A cell was committed to a tile
    Collapsed {
        /// Position of the committed cell
        position: [usize; 2],
        /// Catalog id of the committed tile
        tile: usize,
        /// True when the neighbours left exactly one candidate
        forced: bool,
    },
    /// No undecided cell remains
    Stalled,
    /// An undecided cell ran out of candidates
    Contradiction {
        /// Position of the cell with an empty possibility set
        position: [usize; 2],
    },
}

impl StepResult {
    /// Whether stepping has nothing left to do
    pub const fn is_stalled(&self) -> bool {
        matches!(self, Self::Stalled)
    }

    /// Whether the step hit an unsolvable cell
    pub const fn is_contradiction(&self) -> bool {
        matches!(self, Self::Contradiction { .. })
    }
}

/// Advance the grid by one propagation scan
///
/// Never un-resolves a cell and never grows a possibility set. A contradiction
/// leaves the grid in a partially narrowed state that callers should discard.
pub fn step(
    grid: &mut ConstraintGrid,
    catalog: &TileCatalog,
    random_selector: &mut RandomSelector,
) -> StepResult {
    let mut frontier = PressureFrontier::new();
    let (width, height) = grid.dimensions();

    for row in 0..height {
        for col in 0..width {
            let position = [row, col];
            if grid.cell(position).is_resolved() {
                continue;
            }

            let pressure = constrain_from_neighbors(grid, catalog, position);
            let candidates = grid.cell(position).possible_tiles();

            if let Some(tile) = candidates.only() {
                grid.resolve(position, tile);
                trace!("Forced {position:?} to tile {tile}");
                return StepResult::Collapsed {
                    position,
                    tile,
                    forced: true,
                };
            }

            if candidates.is_empty() {
                trace!("No candidates left at {position:?}");
                return StepResult::Contradiction { position };
            }

            frontier.observe(position, pressure.pressure);
        }
    }

    let Some(position) = frontier.choice() else {
        return StepResult::Stalled;
    };

    match random_selector.choose_tile(grid.cell(position).possible_tiles()) {
        Some(tile) => {
            grid.resolve(position, tile);
            trace!(
                "Collapsed {position:?} to tile {tile} at pressure {}",
                frontier.max_pressure()
            );
            StepResult::Collapsed {
                position,
                tile,
                forced: false,
            }
        }
        None => StepResult::Contradiction { position },
    }
}
