//! Edge compatibility between neighbouring tiles
//!
//! Two tiles fit across a seam when the edge pattern of one side reads as the
//! mirror image of the facing side. Signatures are read clockwise around each
//! tile, so a physically continuous pattern appears reversed from the other tile.

use crate::spatial::tiles::TileDefinition;

/// Side of a square tile, clockwise from the top
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Upper edge, facing the previous row
    Top = 0,
    /// Right edge, facing the next column
    Right = 1,
    /// Lower edge, facing the next row
    Bottom = 2,
    /// Left edge, facing the previous column
    Left = 3,
}

impl Side {
    /// All sides in edge tuple order
    pub const ALL: [Self; 4] = [Self::Top, Self::Right, Self::Bottom, Self::Left];

    /// Position of this side within an edge tuple
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Row and column step from a cell to the neighbour across this side
    pub const fn offset(self) -> [isize; 2] {
        match self {
            Self::Top => [-1, 0],
            Self::Right => [0, 1],
            Self::Bottom => [1, 0],
            Self::Left => [0, -1],
        }
    }
}

/// Side that faces `side` across a shared seam
pub const fn opposite(side: Side) -> Side {
    match side {
        Side::Top => Side::Bottom,
        Side::Right => Side::Left,
        Side::Bottom => Side::Top,
        Side::Left => Side::Right,
    }
}

/// Check whether `edge` equals `facing` read backwards
///
/// Compares character by character without allocating.
pub fn edges_mirror(edge: &str, facing: &str) -> bool {
    edge.chars().eq(facing.chars().rev())
}

/// Check whether tile `a` may sit next to tile `b` with `b` across `a`'s `side`
pub fn matches(a: &TileDefinition, side: Side, b: &TileDefinition) -> bool {
    edges_mirror(a.edge(side), b.edge(opposite(side)))
}
