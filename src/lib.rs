//! Edge-matching tile placement using wave function collapse
//!
//! A tileset describes base tiles by the patterns along their four edges. The
//! catalog expands every base tile into its requested rotations, and the solver
//! fills a grid so that every pair of touching edges mirrors each other,
//! restarting from an empty grid whenever it runs into a contradiction.

#![forbid(unsafe_code)]

/// Constraint propagation, tile selection and the restartable solve loop
pub mod algorithm;
/// Tileset loading, rendering, command line and error handling
pub mod io;
/// Grid, tile catalog and edge compatibility
pub mod spatial;

pub use io::error::{AlgorithmError, Result};
