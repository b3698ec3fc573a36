//! Tile definitions and rotation-expanded catalogs
//!
//! Base tiles carry four edge signatures and an image asset. Every requested
//! quarter turn is materialized as its own catalog entry, so the solver only
//! ever deals with flat tile ids and never rotates anything while stepping.

use crate::io::configuration::MAX_ROTATION;
use crate::io::error::{AlgorithmError, Result};
use crate::spatial::edges::Side;
use std::path::PathBuf;

/// Edge signatures ordered top, right, bottom, left
pub type EdgeSignature = [String; 4];

/// Rotate an edge tuple clockwise by a number of quarter turns
///
/// One quarter turn moves the left edge to the top, the top edge to the right
/// and so on. Four turns reproduce the original tuple.
pub fn rotate_edges(edges: &EdgeSignature, quarter_turns: usize) -> EdgeSignature {
    let mut rotated = edges.clone();
    rotated.rotate_right(quarter_turns % 4);
    rotated
}

/// A tile as described by a catalog source, before rotation expansion
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BaseTile {
    /// Name used by the catalog source to refer to the tile
    pub name: String,
    /// Image asset drawn for this tile
    pub asset: PathBuf,
    /// Unrotated edge signatures
    pub edges: EdgeSignature,
    /// Quarter-turn counts to materialize in addition to the unrotated tile
    pub rotations: Vec<usize>,
}

impl BaseTile {
    /// Create a base tile with no extra rotations
    pub fn new(name: impl Into<String>, asset: impl Into<PathBuf>, edges: EdgeSignature) -> Self {
        Self {
            name: name.into(),
            asset: asset.into(),
            edges,
            rotations: Vec::new(),
        }
    }

    /// Request rotated variants of this tile
    #[must_use]
    pub fn with_rotations(mut self, rotations: impl IntoIterator<Item = usize>) -> Self {
        self.rotations = rotations.into_iter().collect();
        self
    }
}

/// One entry of a tile catalog
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileDefinition {
    /// Dense catalog index of this tile
    pub id: usize,
    /// Image asset shared by all rotations of the same base tile
    pub asset: PathBuf,
    /// Edge signatures after rotation
    pub edges: EdgeSignature,
    /// Clockwise quarter turns applied to the base tile (0..=3)
    pub rotation: u8,
}

impl TileDefinition {
    /// Edge signature on the given side
    pub fn edge(&self, side: Side) -> &str {
        self.edges
            .get(side.index())
            .map_or("", std::string::String::as_str)
    }
}

/// Immutable, id-addressable list of every tile variant available to the solver
#[derive(Clone, Debug)]
pub struct TileCatalog {
    tiles: Vec<TileDefinition>,
    tile_pixel_size: u32,
}

impl TileCatalog {
    /// Expand base tiles into a flat catalog
    ///
    /// Each base tile contributes its unrotated form followed by one variant per
    /// requested rotation. Ids follow catalog order starting at zero.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No base tiles are given
    /// - A requested rotation is outside `1..=3`
    pub fn from_base_tiles(base_tiles: &[BaseTile]) -> Result<Self> {
        if base_tiles.is_empty() {
            return Err(AlgorithmError::EmptyCatalog);
        }

        let mut tiles = Vec::with_capacity(
            base_tiles
                .iter()
                .map(|base| base.rotations.len() + 1)
                .sum(),
        );

        for base in base_tiles {
            tiles.push(TileDefinition {
                id: tiles.len(),
                asset: base.asset.clone(),
                edges: base.edges.clone(),
                rotation: 0,
            });

            for &rotation in &base.rotations {
                if !(1..=MAX_ROTATION).contains(&rotation) {
                    return Err(AlgorithmError::InvalidRotation {
                        tile: base.name.clone(),
                        rotation,
                    });
                }
                tiles.push(TileDefinition {
                    id: tiles.len(),
                    asset: base.asset.clone(),
                    edges: rotate_edges(&base.edges, rotation),
                    rotation: rotation as u8,
                });
            }
        }

        Ok(Self {
            tiles,
            tile_pixel_size: crate::io::configuration::DEFAULT_TILE_PIXEL_SIZE,
        })
    }

    /// Set the side length in pixels shared by every tile asset
    #[must_use]
    pub const fn with_tile_pixel_size(mut self, tile_pixel_size: u32) -> Self {
        self.tile_pixel_size = tile_pixel_size;
        self
    }

    /// Side length in pixels of one rendered tile
    pub const fn tile_pixel_size(&self) -> u32 {
        self.tile_pixel_size
    }

    /// Look up a tile by id
    pub fn get(&self, id: usize) -> Option<&TileDefinition> {
        self.tiles.get(id)
    }

    /// All tiles in id order
    pub fn tiles(&self) -> &[TileDefinition] {
        &self.tiles
    }

    /// Number of tile variants
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Always false for a successfully built catalog
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
