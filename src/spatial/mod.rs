//! Spatial data structures for the tile collapse
//!
//! This module contains:
//! - Tile definitions and rotation-expanded catalogs
//! - Edge compatibility rules between neighbouring tiles
//! - The constraint grid of undecided and decided cells

/// Edge compatibility rules
pub mod edges;
/// Constraint grid and per-cell possibility state
pub mod grid;
/// Tile definitions and catalog construction
pub mod tiles;

pub use grid::ConstraintGrid;
pub use tiles::TileCatalog;
