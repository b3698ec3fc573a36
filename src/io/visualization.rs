//! Frame capture and GIF generation for watching a solve unfold

use crate::io::configuration::{FINAL_FRAME_HOLD, VIEWER_MIN_FRAME_DELAY_MS};
use crate::io::error::{AlgorithmError, Result, invalid_parameter};
use crate::io::image::{TileImageCache, render_cells};
use crate::spatial::TileCatalog;
use image::codecs::gif::GifEncoder;
use image::{Delay, Frame};
use std::io::BufWriter;
use std::path::Path;

/// A single recorded solver event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureEvent {
    /// A cell was committed to a tile
    Placement {
        /// Grid position `[row, col]`
        position: [usize; 2],
        /// Catalog id of the tile
        tile: usize,
        /// Executor step when placed
        step: usize,
    },
    /// The grid was discarded after a contradiction
    Restart {
        /// Executor step when the restart happened
        step: usize,
    },
}

/// Captures solver events for visualization
///
/// Records placement and restart events during execution so the whole solve,
/// including abandoned attempts, can be replayed as an animation afterwards.
pub struct VisualizationCapture {
    pub(crate) events: Vec<CaptureEvent>,
    width: usize,
    height: usize,
}

impl VisualizationCapture {
    /// Create an empty capture for a `width` by `height` grid
    pub fn new(width: usize, height: usize, expected_events: usize) -> Self {
        Self {
            events: Vec::with_capacity(expected_events),
            width,
            height,
        }
    }

    /// Records a tile placement at the given position
    pub fn record_placement(&mut self, position: [usize; 2], tile: usize, step: usize) {
        self.events.push(CaptureEvent::Placement {
            position,
            tile,
            step,
        });
    }

    /// Records that the grid was rebuilt from scratch
    pub fn record_restart(&mut self, step: usize) {
        self.events.push(CaptureEvent::Restart { step });
    }

    /// Returns all recorded events
    pub fn events(&self) -> &[CaptureEvent] {
        &self.events
    }

    /// Returns the total number of recorded events
    pub const fn event_count(&self) -> usize {
        self.events.len()
    }

    /// Number of restarts recorded
    pub fn restart_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, CaptureEvent::Restart { .. }))
            .count()
    }

    /// Export the captured events as a GIF with automatic frame skipping
    ///
    /// Frames are encoded as they are rendered, so memory stays bounded by a
    /// couple of composites however many restarts were recorded. Returns the
    /// number of frames written.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - No events were captured
    /// - A recorded tile id is not in the catalog
    /// - Tile images cannot be loaded
    /// - File system operations or GIF encoding fail
    pub fn export_gif(
        &self,
        output_path: &Path,
        catalog: &TileCatalog,
        images: &mut TileImageCache,
        frame_delay_ms: u32,
    ) -> Result<usize> {
        if self.events.is_empty() {
            return Err(invalid_parameter(
                "visualization",
                &"empty",
                &"No solver events captured for visualization",
            ));
        }

        if let Some(parent) = output_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| AlgorithmError::FileSystem {
                path: parent.to_path_buf(),
                operation: "create directory",
                source: e,
            })?;
        }

        let file = std::fs::File::create(output_path).map_err(|e| AlgorithmError::FileSystem {
            path: output_path.into(),
            operation: "create file",
            source: e,
        })?;

        let mut encoder = GifEncoder::new(BufWriter::new(file));
        self.for_each_frame(catalog, images, frame_delay_ms, |frame| {
            encoder
                .encode_frame(frame)
                .map_err(|e| AlgorithmError::ImageExport {
                    path: output_path.into(),
                    source: e,
                })
        })
    }

    /// Replay the captured events, handing each rendered frame to `emit` in order
    ///
    /// Skips frames when the requested frame rate exceeds what viewers display,
    /// keeping the apparent animation speed. Restart frames are never skipped
    /// and the final state is repeated with a long delay. At most two frames
    /// are alive at once. Returns the number of frames emitted.
    ///
    /// # Errors
    ///
    /// Returns an error if a recorded tile id is not in the catalog, a tile
    /// image cannot be loaded, or `emit` fails.
    pub fn for_each_frame(
        &self,
        catalog: &TileCatalog,
        images: &mut TileImageCache,
        frame_delay_ms: u32,
        mut emit: impl FnMut(Frame) -> Result<()>,
    ) -> Result<usize> {
        let frame_delay_ms = frame_delay_ms.max(1);
        let delay_ms = frame_delay_ms.max(VIEWER_MIN_FRAME_DELAY_MS);
        let skip_factor = if frame_delay_ms < VIEWER_MIN_FRAME_DELAY_MS {
            VIEWER_MIN_FRAME_DELAY_MS.div_ceil(frame_delay_ms) as usize
        } else {
            1
        };

        let mut cells: Vec<Option<usize>> = vec![None; self.width * self.height];
        let mut pending = 0;
        let mut written = 0;

        // The newest frame is held back so it can be repeated as the final hold
        let mut latest = Some(self.render_frame(&cells, catalog, images, delay_ms)?);
        let mut push = |frame: Frame| -> Result<()> {
            if let Some(previous) = latest.replace(frame) {
                emit(previous)?;
                written += 1;
            }
            Ok(())
        };

        for event in &self.events {
            match *event {
                CaptureEvent::Placement { position, tile, .. } => {
                    if catalog.get(tile).is_none() {
                        return Err(AlgorithmError::InvalidTileIndex {
                            index: tile,
                            max_tiles: catalog.len(),
                        });
                    }
                    let [row, col] = position;
                    if row < self.height && col < self.width {
                        if let Some(cell) = cells.get_mut(row * self.width + col) {
                            *cell = Some(tile);
                        }
                        pending += 1;
                        if pending % skip_factor == 0 {
                            push(self.render_frame(&cells, catalog, images, delay_ms)?)?;
                        }
                    }
                }
                CaptureEvent::Restart { .. } => {
                    // Show the failed attempt before clearing it
                    if pending % skip_factor != 0 {
                        push(self.render_frame(&cells, catalog, images, delay_ms)?)?;
                    }
                    pending = 0;
                    cells.fill(None);
                    push(self.render_frame(&cells, catalog, images, delay_ms)?)?;
                }
            }
        }

        if pending % skip_factor != 0 {
            push(self.render_frame(&cells, catalog, images, delay_ms)?)?;
        }

        if let Some(last) = latest {
            let hold = Frame::from_parts(
                last.buffer().clone(),
                0,
                0,
                Delay::from_numer_denom_ms(delay_ms.saturating_mul(FINAL_FRAME_HOLD), 1),
            );
            emit(last)?;
            emit(hold)?;
            written += 2;
        }

        Ok(written)
    }

    fn render_frame(
        &self,
        cells: &[Option<usize>],
        catalog: &TileCatalog,
        images: &mut TileImageCache,
        delay_ms: u32,
    ) -> Result<Frame> {
        let width = self.width;
        let img = render_cells(self.width, self.height, images, |row, col| {
            cells
                .get(row * width + col)
                .copied()
                .flatten()
                .and_then(|tile| catalog.get(tile))
        })?;

        Ok(Frame::from_parts(
            img,
            0,
            0,
            Delay::from_numer_denom_ms(delay_ms, 1),
        ))
    }
}
