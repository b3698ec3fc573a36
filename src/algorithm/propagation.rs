use crate::{
    spatial::edges::{Side, matches},
    spatial::{ConstraintGrid, TileCatalog},
};

/// Outcome of constraining one cell against its four neighbour directions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NeighborPressure {
    /// Directions that are off-grid or hold a decided neighbour
    pub pressure: usize,
    /// Candidate ids removed by decided neighbours
    pub eliminated: usize,
}

/// Count the directions around `position` that are off-grid or already decided
pub fn neighbor_pressure(grid: &ConstraintGrid, position: [usize; 2]) -> usize {
    Side::ALL
        .iter()
        .filter(|&&side| {
            grid.neighbor(position, side)
                .is_none_or(|neighbor| grid.cell(neighbor).is_resolved())
        })
        .count()
}

/// Remove candidates of the cell at `position` that conflict with decided neighbours
///
/// Only decided neighbours constrain the cell. Undecided neighbours add
/// nothing, and positions past the grid edge count toward pressure without
/// removing anything.
pub fn constrain_from_neighbors(
    grid: &mut ConstraintGrid,
    catalog: &TileCatalog,
    position: [usize; 2],
) -> NeighborPressure {
    let pressure = neighbor_pressure(grid, position);
    let mut eliminated = 0;

    for side in Side::ALL {
        let Some(neighbor_tile) = grid
            .neighbor(position, side)
            .and_then(|neighbor| grid.resolved_tile(neighbor, catalog))
        else {
            continue;
        };

        eliminated += grid
            .cell_mut(position)
            .possible_tiles_mut()
            .retain(|candidate| {
                catalog
                    .get(candidate)
                    .is_some_and(|tile| matches(tile, side, neighbor_tile))
            });
    }

    NeighborPressure {
        pressure,
        eliminated,
    }
}

/// Find a pair of decided neighbours whose shared edges do not match
///
/// Returns the first offending position and the side facing the mismatched
/// neighbour, scanning in row-major order. A grid built only by stepping never
/// contains such a pair.
pub fn find_conflict(grid: &ConstraintGrid, catalog: &TileCatalog) -> Option<([usize; 2], Side)> {
    grid.positions().into_iter().find_map(|position| {
        let tile = grid.resolved_tile(position, catalog)?;
        [Side::Right, Side::Bottom].into_iter().find_map(|side| {
            let neighbor = grid.neighbor(position, side)?;
            let neighbor_tile = grid.resolved_tile(neighbor, catalog)?;
            (!matches(tile, side, neighbor_tile)).then_some((position, side))
        })
    })
}
