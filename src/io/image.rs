//! Composite rendering of a constraint grid from tile images

use crate::io::configuration::UNDECIDED_COLOR;
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::spatial::{ConstraintGrid, TileCatalog, tiles::TileDefinition};
use image::{Rgba, RgbaImage, imageops};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

/// Decoded tile images keyed by asset and rotation
///
/// Each asset is decoded, rotated and scaled to the tile size at most once
/// per rotation.
pub struct TileImageCache {
    images: HashMap<(PathBuf, u8), RgbaImage>,
    tile_pixel_size: u32,
}

impl TileImageCache {
    /// Create an empty cache producing images of `tile_pixel_size` square pixels
    pub fn new(tile_pixel_size: u32) -> Self {
        Self {
            images: HashMap::new(),
            tile_pixel_size,
        }
    }

    /// Side length of every produced image
    pub const fn tile_pixel_size(&self) -> u32 {
        self.tile_pixel_size
    }

    /// Number of cached images
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Whether nothing has been loaded yet
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Image for `tile`, rotated clockwise by its quarter-turn count
    ///
    /// # Errors
    ///
    /// Returns an error if the tile's asset cannot be opened or decoded
    pub fn tile_image(&mut self, tile: &TileDefinition) -> Result<&RgbaImage> {
        match self.images.entry((tile.asset.clone(), tile.rotation)) {
            Entry::Occupied(entry) => Ok(entry.into_mut()),
            Entry::Vacant(entry) => {
                let image = load_rotated(&tile.asset, tile.rotation, self.tile_pixel_size)?;
                Ok(entry.insert(image))
            }
        }
    }
}

// Edge signatures rotate clockwise, so the picture must turn the same way
fn load_rotated(asset: &Path, rotation: u8, tile_pixel_size: u32) -> Result<RgbaImage> {
    let mut image = image::open(asset)
        .map_err(|source| AlgorithmError::ImageLoad {
            path: asset.to_path_buf(),
            source,
        })?
        .to_rgba8();

    for _ in 0..rotation % 4 {
        image = imageops::rotate90(&image);
    }

    if image.dimensions() != (tile_pixel_size, tile_pixel_size) {
        image = imageops::resize(
            &image,
            tile_pixel_size,
            tile_pixel_size,
            imageops::FilterType::Nearest,
        );
    }

    Ok(image)
}

/// Pixel size of a composite of `width` by `height` tiles
///
/// # Errors
///
/// Returns an error if the composite would not fit in `u32` pixel coordinates
pub fn composite_dimensions(
    width: usize,
    height: usize,
    tile_pixel_size: u32,
) -> Result<(u32, u32)> {
    let scale = |cells: usize, parameter: &'static str| {
        u32::try_from(cells)
            .ok()
            .and_then(|count| count.checked_mul(tile_pixel_size))
            .ok_or_else(|| invalid_parameter(parameter, &cells, &"composite image is too large"))
    };
    Ok((scale(width, "width")?, scale(height, "height")?))
}

/// Render `width` by `height` cells, asking `tile_at(row, col)` for each cell's tile
///
/// Cells without a tile are filled with `UNDECIDED_COLOR`.
///
/// # Errors
///
/// Returns an error if a tile image cannot be loaded or the composite is too large
pub fn render_cells<'a>(
    width: usize,
    height: usize,
    images: &mut TileImageCache,
    mut tile_at: impl FnMut(usize, usize) -> Option<&'a TileDefinition>,
) -> Result<RgbaImage> {
    let tile_pixel_size = images.tile_pixel_size();
    let (pixel_width, pixel_height) = composite_dimensions(width, height, tile_pixel_size)?;
    let mut canvas = RgbaImage::from_pixel(pixel_width, pixel_height, Rgba(UNDECIDED_COLOR));

    for row in 0..height {
        for col in 0..width {
            let Some(tile) = tile_at(row, col) else {
                continue;
            };
            let x = col as i64 * i64::from(tile_pixel_size);
            let y = row as i64 * i64::from(tile_pixel_size);
            imageops::replace(&mut canvas, images.tile_image(tile)?, x, y);
        }
    }

    Ok(canvas)
}

/// Render the current state of a grid
///
/// # Errors
///
/// Returns an error if a tile image cannot be loaded or the composite is too large
pub fn render_grid(
    grid: &ConstraintGrid,
    catalog: &TileCatalog,
    images: &mut TileImageCache,
) -> Result<RgbaImage> {
    render_cells(grid.width(), grid.height(), images, |row, col| {
        grid.resolved_tile([row, col], catalog)
    })
}

/// Export the grid as a PNG composite
///
/// # Errors
///
/// Returns an error if:
/// - A tile image cannot be loaded
/// - The parent directory cannot be created
/// - The image cannot be saved to the specified path
pub fn export_grid_as_png(
    grid: &ConstraintGrid,
    catalog: &TileCatalog,
    images: &mut TileImageCache,
    output_path: &Path,
) -> Result<()> {
    let composite = render_grid(grid, catalog, images)?;

    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    composite
        .save(output_path)
        .map_err(|e| AlgorithmError::ImageExport {
            path: output_path.into(),
            source: e,
        })?;

    Ok(())
}
