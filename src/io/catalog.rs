//! Tileset loading from a directory of PNG assets and a JSON edge description
//!
//! A tileset directory holds `data.json` plus one `<name>.png` per base tile.
//! The JSON object maps `"rotations"` to the quarter turns each base tile should
//! be materialized in, and maps every base tile name to its four edge
//! signatures (top, right, bottom, left):
//!
//! ```json
//! {
//!     "rotations": { "blank": [], "corner": [1, 2, 3] },
//!     "blank": ["AAA", "AAA", "AAA", "AAA"],
//!     "corner": ["ABA", "ABA", "AAA", "AAA"]
//! }
//! ```
//!
//! Base tiles keep the order in which they appear under `"rotations"`.

use crate::io::error::{AlgorithmError, Result, WithContext};
use crate::spatial::tiles::{BaseTile, EdgeSignature, TileCatalog};
use log::debug;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Name of the edge description file inside a tileset directory
pub const CATALOG_FILE_NAME: &str = "data.json";

/// Extension of tile image assets
pub const ASSET_EXTENSION: &str = "png";

#[derive(Deserialize)]
struct CatalogFile {
    rotations: Map<String, Value>,
    #[serde(flatten)]
    edges: HashMap<String, Value>,
}

/// Reads a tileset directory into a [`TileCatalog`]
#[derive(Clone, Debug)]
pub struct CatalogLoader {
    directory: PathBuf,
}

impl CatalogLoader {
    /// Create a loader for the tileset in `directory`
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// Check whether `path` is a directory containing a catalog file
    pub fn is_tileset(path: &Path) -> bool {
        path.is_dir() && path.join(CATALOG_FILE_NAME).is_file()
    }

    /// Path of the edge description file
    pub fn catalog_path(&self) -> PathBuf {
        self.directory.join(CATALOG_FILE_NAME)
    }

    /// Path of the image asset for base tile `name`
    pub fn asset_path(&self, name: &str) -> PathBuf {
        self.directory.join(format!("{name}.{ASSET_EXTENSION}"))
    }

    /// Load the catalog and read the tile size from the first tile's image
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The catalog file cannot be read or parsed
    /// - The catalog describes no tiles or invalid rotations
    /// - The first tile's image cannot be read
    pub fn load(&self) -> Result<TileCatalog> {
        let base_tiles = self.load_base_tiles()?;
        let catalog = TileCatalog::from_base_tiles(&base_tiles)?;

        let first_asset = catalog
            .get(0)
            .map(|tile| tile.asset.clone())
            .ok_or(AlgorithmError::EmptyCatalog)?;
        let (tile_width, tile_height) =
            image::image_dimensions(&first_asset).with_path(&first_asset)?;
        if tile_width != tile_height {
            debug!(
                "Tile '{}' is {tile_width}x{tile_height}, using width as tile size",
                first_asset.display()
            );
        }

        debug!(
            "Loaded {} base tiles as {} variants from '{}'",
            base_tiles.len(),
            catalog.len(),
            self.directory.display()
        );

        Ok(catalog.with_tile_pixel_size(tile_width))
    }

    /// Read the base tiles described by the catalog file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or does not describe a tileset
    pub fn load_base_tiles(&self) -> Result<Vec<BaseTile>> {
        let path = self.catalog_path();
        let json = std::fs::read_to_string(&path).map_err(|source| AlgorithmError::FileSystem {
            path: path.clone(),
            operation: "read catalog",
            source,
        })?;
        self.parse_base_tiles(&json)
    }

    /// Parse base tiles from catalog JSON, resolving assets inside the tileset directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The text is not a JSON object with a `"rotations"` object
    /// - The rotations object is empty
    /// - A base tile has no edge list, or one that is not four strings
    /// - A rotation list is not a list of non-negative integers
    pub fn parse_base_tiles(&self, json: &str) -> Result<Vec<BaseTile>> {
        let path = self.catalog_path();
        let file: CatalogFile = serde_json::from_str(json).with_path(&path)?;

        if file.rotations.is_empty() {
            return Err(AlgorithmError::EmptyCatalog);
        }

        file.rotations
            .into_iter()
            .map(|(name, rotations)| -> Result<BaseTile> {
                let rotations: Vec<usize> = serde_json::from_value(rotations).map_err(|e| {
                    invalid_catalog(
                        &path,
                        format!("rotations of '{name}' must be a list of quarter-turn counts: {e}"),
                    )
                })?;

                let edges = file
                    .edges
                    .get(&name)
                    .ok_or_else(|| invalid_catalog(&path, format!("no edges listed for '{name}'")))
                    .and_then(|value| parse_edges(&path, &name, value))?;

                let asset = self.asset_path(&name);
                Ok(BaseTile::new(name, asset, edges).with_rotations(rotations))
            })
            .collect()
    }
}

fn parse_edges(path: &Path, name: &str, value: &Value) -> Result<EdgeSignature> {
    let edges: Vec<String> = serde_json::from_value(value.clone()).map_err(|e| {
        invalid_catalog(path, format!("edges of '{name}' must be a list of strings: {e}"))
    })?;
    let count = edges.len();
    edges.try_into().map_err(|_rejected: Vec<String>| {
        invalid_catalog(
            path,
            format!("'{name}' lists {count} edges, expected 4 (top, right, bottom, left)"),
        )
    })
}

fn invalid_catalog(path: &Path, reason: String) -> AlgorithmError {
    AlgorithmError::InvalidCatalog {
        path: path.to_path_buf(),
        reason,
    }
}
