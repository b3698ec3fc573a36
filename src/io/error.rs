//! Error types and context management for catalog loading, solving and rendering

use std::fmt;
use std::path::{Path, PathBuf};

/// Placeholder path for errors converted without location information
const UNKNOWN_PATH: &str = "<unknown>";

/// Main error type for all operations
#[derive(Debug)]
pub enum AlgorithmError {
    /// The tile catalog has no tiles
    EmptyCatalog,

    /// A base tile requested a rotation outside one to three quarter turns
    InvalidRotation {
        /// Name of the base tile
        tile: String,
        /// Requested quarter-turn count
        rotation: usize,
    },

    /// Catalog description is well-formed JSON but not a valid tileset
    InvalidCatalog {
        /// Path to the catalog file
        path: PathBuf,
        /// Description of what's wrong with the catalog
        reason: String,
    },

    /// Catalog description is not valid JSON of the expected shape
    CatalogParse {
        /// Path to the catalog file
        path: PathBuf,
        /// Underlying JSON error
        source: serde_json::Error,
    },

    /// Every allowed solve attempt ended in a contradiction
    UnsolvableConfiguration {
        /// Attempts made before giving up
        attempts: usize,
        /// Grid dimensions (width, height)
        dimensions: (usize, usize),
    },

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Tile id exceeds the catalog
    InvalidTileIndex {
        /// The invalid tile id
        index: usize,
        /// Number of tiles in the catalog
        max_tiles: usize,
    },

    /// Failed to load a tile image from the filesystem
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a generated image to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl fmt::Display for AlgorithmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "Tile catalog contains no tiles"),
            Self::InvalidRotation { tile, rotation } => {
                write!(
                    f,
                    "Tile '{tile}' requests rotation {rotation} (expected 1 to 3 quarter turns)"
                )
            }
            Self::InvalidCatalog { path, reason } => {
                write!(f, "Invalid catalog '{}': {reason}", path.display())
            }
            Self::CatalogParse { path, source } => {
                write!(f, "Failed to parse catalog '{}': {source}", path.display())
            }
            Self::UnsolvableConfiguration {
                attempts,
                dimensions,
            } => {
                write!(
                    f,
                    "No solution found in {attempts} attempts (grid size {}x{})",
                    dimensions.0, dimensions.1
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::InvalidTileIndex { index, max_tiles } => {
                write!(f, "Tile index {index} is out of bounds (max: {max_tiles})")
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for AlgorithmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            Self::CatalogParse { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for results
pub type Result<T> = std::result::Result<T, AlgorithmError>;

/// Attaches a filesystem path to errors converted without one
pub trait WithContext<T> {
    /// Replace the placeholder path of a path-carrying error with `path`
    ///
    /// # Errors
    ///
    /// Propagates the original error with the path applied
    fn with_path(self, path: &Path) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<AlgorithmError>,
{
    fn with_path(self, path: &Path) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            // Only errors produced by the blanket From impls lack a path
            match &mut error {
                AlgorithmError::ImageLoad { path: p, .. }
                | AlgorithmError::ImageExport { path: p, .. }
                | AlgorithmError::CatalogParse { path: p, .. }
                | AlgorithmError::FileSystem { path: p, .. }
                    if p.as_os_str() == UNKNOWN_PATH =>
                {
                    *p = path.to_path_buf();
                }
                _ => {}
            }
            error
        })
    }
}

impl From<image::ImageError> for AlgorithmError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

impl From<std::io::Error> for AlgorithmError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from(UNKNOWN_PATH),
            operation: "unknown",
            source: err,
        }
    }
}

impl From<serde_json::Error> for AlgorithmError {
    fn from(err: serde_json::Error) -> Self {
        Self::CatalogParse {
            path: PathBuf::from(UNKNOWN_PATH),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an error for an unusable input or output path
pub fn path_error(path: &Path, msg: &str) -> AlgorithmError {
    AlgorithmError::InvalidParameter {
        parameter: "path",
        value: path.display().to_string(),
        reason: msg.to_string(),
    }
}
