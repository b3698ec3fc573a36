//! Constraint grid of undecided and decided cells
//!
//! Each cell tracks the set of catalog ids still consistent with its decided
//! neighbours and, once decided, the single tile it holds. Cells only ever move
//! from undecided to decided. Positions are `[row, col]` in row-major order.

use ndarray::Array2;

use crate::algorithm::bitset::TileBitset;
use crate::spatial::edges::Side;
use crate::spatial::tiles::{TileCatalog, TileDefinition};

/// A single grid cell in superposition until resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntropyPoint {
    possible_tiles: TileBitset,
    resolved: Option<usize>,
}

impl EntropyPoint {
    /// Create an undecided cell that admits every id below `tile_count`
    pub fn new(tile_count: usize) -> Self {
        Self {
            possible_tiles: TileBitset::all(tile_count),
            resolved: None,
        }
    }

    /// Whether a tile has been committed to this cell
    pub const fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }

    /// Id of the committed tile
    pub const fn resolved(&self) -> Option<usize> {
        self.resolved
    }

    /// Ids still possible for this cell
    pub const fn possible_tiles(&self) -> &TileBitset {
        &self.possible_tiles
    }

    /// Number of ids still possible
    pub fn entropy(&self) -> usize {
        self.possible_tiles.count()
    }

    /// An undecided cell with nothing left to choose from
    pub fn is_contradiction(&self) -> bool {
        self.resolved.is_none() && self.possible_tiles.is_empty()
    }

    pub(crate) fn possible_tiles_mut(&mut self) -> &mut TileBitset {
        &mut self.possible_tiles
    }

    /// Commit a tile, returning false if the cell was already resolved
    fn resolve(&mut self, tile: usize) -> bool {
        if self.resolved.is_some() {
            return false;
        }
        self.possible_tiles = TileBitset::single(tile, self.possible_tiles.capacity());
        self.resolved = Some(tile);
        true
    }
}

/// Fixed-size rectangle of cells solved by repeated stepping
#[derive(Debug, Clone)]
pub struct ConstraintGrid {
    cells: Array2<EntropyPoint>,
    tile_pixel_size: u32,
}

impl ConstraintGrid {
    /// Create a grid where every cell admits every tile of the catalog
    pub fn new(width: usize, height: usize, catalog: &TileCatalog) -> Self {
        Self {
            cells: Array2::from_elem((height, width), EntropyPoint::new(catalog.len())),
            tile_pixel_size: catalog.tile_pixel_size(),
        }
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.cells.ncols()
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.cells.nrows()
    }

    /// Grid size as (width, height) in cells
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width(), self.height())
    }

    /// Side length in pixels of one rendered tile
    pub const fn tile_pixel_size(&self) -> u32 {
        self.tile_pixel_size
    }

    /// Whether a position lies inside the grid
    pub fn contains(&self, position: [usize; 2]) -> bool {
        position[0] < self.height() && position[1] < self.width()
    }

    /// Position of the neighbour across `side`, or `None` past the grid edge
    pub fn neighbor(&self, position: [usize; 2], side: Side) -> Option<[usize; 2]> {
        let [row_step, col_step] = side.offset();
        let row = position[0].checked_add_signed(row_step)?;
        let col = position[1].checked_add_signed(col_step)?;
        let neighbor = [row, col];
        self.contains(neighbor).then_some(neighbor)
    }

    /// Cell at `position`
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the grid. The solver only asks for
    /// positions it has bounds-checked, so this indicates a caller bug.
    // Out-of-range access is a programming error rather than a recoverable condition
    #[allow(clippy::panic)]
    pub fn cell(&self, position: [usize; 2]) -> &EntropyPoint {
        let (width, height) = self.dimensions();
        self.cells.get(position).unwrap_or_else(|| {
            panic!("cell {position:?} is outside the {width}x{height} grid")
        })
    }

    #[allow(clippy::panic)]
    pub(crate) fn cell_mut(&mut self, position: [usize; 2]) -> &mut EntropyPoint {
        let (width, height) = self.dimensions();
        self.cells.get_mut(position).unwrap_or_else(|| {
            panic!("cell {position:?} is outside the {width}x{height} grid")
        })
    }

    /// Commit `tile` to the cell at `position`
    ///
    /// Returns false and leaves the cell untouched if it was already resolved.
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the grid.
    pub fn resolve(&mut self, position: [usize; 2], tile: usize) -> bool {
        self.cell_mut(position).resolve(tile)
    }

    /// Catalog entry committed at `position`, if any
    ///
    /// # Panics
    ///
    /// Panics if `position` is outside the grid.
    pub fn resolved_tile<'a>(
        &self,
        position: [usize; 2],
        catalog: &'a TileCatalog,
    ) -> Option<&'a TileDefinition> {
        self.cell(position)
            .resolved()
            .and_then(|tile| catalog.get(tile))
    }

    /// Every position in row-major scan order
    pub fn positions(&self) -> Vec<[usize; 2]> {
        let (width, height) = self.dimensions();
        (0..height)
            .flat_map(|row| (0..width).map(move |col| [row, col]))
            .collect()
    }

    /// Iterate cells with their positions in row-major order
    pub fn cells(&self) -> impl Iterator<Item = ([usize; 2], &EntropyPoint)> {
        self.cells
            .indexed_iter()
            .map(|((row, col), cell)| ([row, col], cell))
    }

    /// Number of decided cells
    pub fn resolved_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_resolved()).count()
    }

    /// Whether every cell holds a tile
    pub fn is_complete(&self) -> bool {
        self.cells.iter().all(EntropyPoint::is_resolved)
    }
}
