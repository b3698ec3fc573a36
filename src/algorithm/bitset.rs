use bitvec::prelude::*;
use std::fmt;

/// Fixed-size bitset of tile ids still possible for a cell
///
/// Indexed directly by catalog id. Membership tests are O(1); iteration visits
/// ids in ascending order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileBitset {
    bits: BitVec,
    max_tiles: usize,
}

impl TileBitset {
    /// Create a bitset with no tiles present
    pub fn new(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![0; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset containing every id below `max_tiles`
    pub fn all(max_tiles: usize) -> Self {
        Self {
            bits: bitvec![1; max_tiles],
            max_tiles,
        }
    }

    /// Create a bitset holding exactly one tile
    pub fn single(tile: usize, max_tiles: usize) -> Self {
        let mut bitset = Self::new(max_tiles);
        bitset.insert(tile);
        bitset
    }

    /// Insert a tile id, ignoring ids outside the set's range
    pub fn insert(&mut self, tile: usize) {
        if tile < self.max_tiles {
            self.bits.set(tile, true);
        }
    }

    /// Test tile membership
    pub fn contains(&self, tile: usize) -> bool {
        self.bits.get(tile).as_deref() == Some(&true)
    }

    /// Keep only the ids for which `keep` returns true
    ///
    /// Returns the number of ids removed.
    pub fn retain(&mut self, mut keep: impl FnMut(usize) -> bool) -> usize {
        let mut removed = 0;
        for tile in 0..self.max_tiles {
            if self.contains(tile) && !keep(tile) {
                self.bits.set(tile, false);
                removed += 1;
            }
        }
        removed
    }

    /// Test if no tiles are present
    pub fn is_empty(&self) -> bool {
        self.bits.not_any()
    }

    /// Count tiles in the set
    pub fn count(&self) -> usize {
        self.bits.count_ones()
    }

    /// The only member, if the set holds exactly one tile
    pub fn only(&self) -> Option<usize> {
        let mut ones = self.bits.iter_ones();
        let first = ones.next()?;
        ones.next().is_none().then_some(first)
    }

    /// The `n`th member in ascending id order
    pub fn nth(&self, n: usize) -> Option<usize> {
        self.bits.iter_ones().nth(n)
    }

    /// Size of the id range this set covers
    pub const fn capacity(&self) -> usize {
        self.max_tiles
    }

    /// Extract all tile ids in ascending order
    pub fn to_vec(&self) -> Vec<usize> {
        self.bits.iter_ones().collect()
    }
}

impl fmt::Display for TileBitset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TileBitset({} tiles: {:?})", self.count(), self.to_vec())
    }
}
