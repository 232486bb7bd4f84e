//! Tile pyramid geometry.
//!
//! A square power-of-two source of side `W` is cut at every zoom level from
//! `min_zoom_offset` to `max_zoom = floor(log2(W / tile_size))`:
//!
//! - level `zoom` is the source resized to `W / 2^(max_zoom - zoom)` pixels
//! - `max_zoom` is the full resolution, lower levels halve the side each step
//! - output levels are renumbered so the first retained level is `0`
//!
//! ```text
//!  zoom (source)     3        4          5
//!  adjusted          0        1          2
//!  grid             1x1      2x2        4x4
//! ```
//!
//! Everything in this module is pure arithmetic so a whole run can be planned
//! and rejected before the first byte is written.

use serde::Serialize;

use crate::error::TilerError;

/// Message used when the source is not a square power-of-two raster.
pub const SHAPE_ERROR: &str = "image must be square and a power-of-two resolution";

// =============================================================================
// Validation
// =============================================================================

/// Check that the source is square with a power-of-two side.
///
/// Returns the side length on success.
pub fn validate_dimensions(width: u32, height: u32) -> Result<u32, TilerError> {
    if width != height || !width.is_power_of_two() {
        return Err(TilerError::Validation(format!(
            "{SHAPE_ERROR} (got {width}x{height})"
        )));
    }
    Ok(width)
}

/// Compute the finest zoom level for a source of side `width`.
///
/// `max_zoom = floor(log2(width / tile_size))` using integer division, so a
/// tile size that is not a power of two rounds down.
pub fn max_zoom(width: u32, tile_size: u32) -> Result<u32, TilerError> {
    if tile_size == 0 {
        return Err(TilerError::Validation(
            "tile size must be greater than 0".to_string(),
        ));
    }

    let tiles_across = width / tile_size;
    if tiles_across == 0 {
        return Err(TilerError::Validation(format!(
            "tile size {tile_size} is larger than the image ({width}px)"
        )));
    }

    Ok(tiles_across.ilog2())
}

// =============================================================================
// Tile Coordinates
// =============================================================================

/// Address of one output tile, using the adjusted zoom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TileCoord {
    pub z: u32,
    pub x: u32,
    pub y: u32,
}

impl TileCoord {
    pub fn new(z: u32, x: u32, y: u32) -> Self {
        Self { z, x, y }
    }
}

// =============================================================================
// Zoom Level
// =============================================================================

/// One retained level of the pyramid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoomLevel {
    /// Level in source numbering (`min_zoom_offset..=max_zoom`)
    pub zoom: u32,

    /// Level in output numbering (starts at 0)
    pub adjusted_zoom: u32,

    /// Downsample factor relative to the source
    pub scale: u32,

    /// Side of the resized image in pixels
    pub width: u32,

    /// Tile columns
    pub cols: u32,

    /// Tile rows
    pub rows: u32,

    /// Side of each tile in pixels
    pub tile_size: u32,
}

impl ZoomLevel {
    /// Number of tiles at this level.
    pub fn tile_count(&self) -> u64 {
        u64::from(self.cols) * u64::from(self.rows)
    }

    /// Pixel origin of the tile at column `x`, row `y` in the resized image.
    pub fn tile_origin(&self, x: u32, y: u32) -> (u32, u32) {
        (x * self.tile_size, y * self.tile_size)
    }

    /// Iterate the tiles of this level, columns outermost.
    pub fn tiles(&self) -> impl Iterator<Item = TileCoord> + '_ {
        (0..self.cols).flat_map(move |x| {
            (0..self.rows).map(move |y| TileCoord::new(self.adjusted_zoom, x, y))
        })
    }
}

// =============================================================================
// Pyramid Plan
// =============================================================================

/// The full set of levels a run will produce.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PyramidPlan {
    source_size: u32,
    tile_size: u32,
    min_zoom_offset: u32,
    max_zoom: u32,
    levels: Vec<ZoomLevel>,
}

impl PyramidPlan {
    /// Plan the pyramid for a square source of side `source_size`.
    ///
    /// # Errors
    ///
    /// Returns [`TilerError::Validation`] if:
    /// - `source_size` is not a power of two
    /// - `tile_size` is zero or larger than the source
    /// - `tile_size` does not evenly divide a retained level
    pub fn new(source_size: u32, tile_size: u32, min_zoom_offset: u32) -> Result<Self, TilerError> {
        validate_dimensions(source_size, source_size)?;
        let max_zoom = max_zoom(source_size, tile_size)?;

        let mut levels = Vec::new();
        for zoom in min_zoom_offset..=max_zoom {
            let scale = 1u32 << (max_zoom - zoom);
            let width = source_size / scale;

            if width % tile_size != 0 {
                return Err(TilerError::Validation(format!(
                    "tile size {tile_size} does not divide level {zoom} ({width}px, {} px remainder)",
                    width % tile_size
                )));
            }

            let cols = width / tile_size;
            levels.push(ZoomLevel {
                zoom,
                adjusted_zoom: zoom - min_zoom_offset,
                scale,
                width,
                cols,
                rows: cols,
                tile_size,
            });
        }

        Ok(Self {
            source_size,
            tile_size,
            min_zoom_offset,
            max_zoom,
            levels,
        })
    }

    /// Plan the pyramid from raw image dimensions.
    pub fn for_image(
        width: u32,
        height: u32,
        tile_size: u32,
        min_zoom_offset: u32,
    ) -> Result<Self, TilerError> {
        let side = validate_dimensions(width, height)?;
        Self::new(side, tile_size, min_zoom_offset)
    }

    pub fn levels(&self) -> &[ZoomLevel] {
        &self.levels
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn max_zoom(&self) -> u32 {
        self.max_zoom
    }

    pub fn source_size(&self) -> u32 {
        self.source_size
    }

    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    pub fn min_zoom_offset(&self) -> u32 {
        self.min_zoom_offset
    }

    /// Total number of tiles across all retained levels.
    pub fn total_tiles(&self) -> u64 {
        self.levels.iter().map(ZoomLevel::tile_count).sum()
    }

    /// True when `min_zoom_offset` skips every level.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
