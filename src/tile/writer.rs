//! Tile directory layout.
//!
//! Tiles land at `{output_dir}/{z}/{x}/{y}.{ext}`, the layout Leaflet and
//! most slippy-map viewers request by default.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::TilerError;
use crate::pyramid::TileCoord;

use super::encoder::TileFormat;

/// Writes encoded tiles under an output directory.
#[derive(Debug, Clone)]
pub struct TileWriter {
    root: PathBuf,
    format: TileFormat,
}

impl TileWriter {
    pub fn new(root: impl Into<PathBuf>, format: TileFormat) -> Self {
        Self {
            root: root.into(),
            format,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory holding every row of column `x` at level `z`.
    pub fn column_dir(&self, z: u32, x: u32) -> PathBuf {
        self.root.join(z.to_string()).join(x.to_string())
    }

    /// Full path of the tile at `coord`.
    pub fn tile_path(&self, coord: TileCoord) -> PathBuf {
        self.column_dir(coord.z, coord.x)
            .join(format!("{}.{}", coord.y, self.format.extension()))
    }

    /// Write one tile, creating missing directories.
    ///
    /// An existing file at the same path is overwritten.
    pub fn write(&self, coord: TileCoord, data: &[u8]) -> Result<PathBuf, TilerError> {
        let dir = self.column_dir(coord.z, coord.x);
        fs::create_dir_all(&dir).map_err(|e| TilerError::io(&dir, e))?;

        let path = self.tile_path(coord);
        fs::write(&path, data).map_err(|e| TilerError::io(&path, e))?;

        Ok(path)
    }
}
