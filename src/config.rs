//! Configuration for Tile Cutter.
//!
//! A run is described by a [`GenerateConfig`] built once at the call site and
//! passed into [`generate_tiles`](crate::tile::generate_tiles). The binary
//! builds it from command-line arguments via clap:
//!
//! - `tile-cutter generate <IMAGE>` cuts the image into tiles
//! - `tile-cutter plan <IMAGE>` prints the pyramid without writing anything
//!
//! # Environment Variables
//!
//! Generation options can also be set with the `TILER_` prefix:
//!
//! - `TILER_OUTPUT_DIR` - Output directory (default: tiles)
//! - `TILER_TILE_SIZE` - Tile side in pixels (default: 128)
//! - `TILER_MIN_ZOOM_OFFSET` - Finest levels to skip (default: 3)
//! - `TILER_FORMAT` - Tile format, png or jpeg (default: png)
//! - `TILER_JPEG_QUALITY` - JPEG quality (default: 90)

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::tile::{is_valid_quality, TileFormat, DEFAULT_JPEG_QUALITY};

// =============================================================================
// Default Values
// =============================================================================

/// Default tile side in pixels.
pub const DEFAULT_TILE_SIZE: u32 = 128;

/// Default number of levels skipped before numbering starts at 0.
pub const DEFAULT_MIN_ZOOM_OFFSET: u32 = 3;

/// Default output directory.
pub const DEFAULT_OUTPUT_DIR: &str = "tiles";

// =============================================================================
// Run Configuration
// =============================================================================

/// Parameters of a single tile generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateConfig {
    /// Source raster (PNG or JPEG)
    pub image_path: PathBuf,

    /// Root of the `{z}/{x}/{y}` tree
    pub output_dir: PathBuf,

    /// Tile side in pixels
    pub tile_size: u32,

    /// Levels skipped from the coarse end of the full pyramid
    pub min_zoom_offset: u32,

    /// Tile encoding
    pub format: TileFormat,

    /// JPEG quality, ignored for PNG
    pub jpeg_quality: u8,
}

impl GenerateConfig {
    /// Create a config with default tiling parameters.
    pub fn new(image_path: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            image_path: image_path.into(),
            output_dir: output_dir.into(),
            tile_size: DEFAULT_TILE_SIZE,
            min_zoom_offset: DEFAULT_MIN_ZOOM_OFFSET,
            format: TileFormat::Png,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }

    pub fn with_tile_size(mut self, tile_size: u32) -> Self {
        self.tile_size = tile_size;
        self
    }

    pub fn with_min_zoom_offset(mut self, min_zoom_offset: u32) -> Self {
        self.min_zoom_offset = min_zoom_offset;
        self
    }

    pub fn with_format(mut self, format: TileFormat) -> Self {
        self.format = format;
        self
    }

    pub fn with_jpeg_quality(mut self, quality: u8) -> Self {
        self.jpeg_quality = quality;
        self
    }

    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.tile_size == 0 {
            return Err("tile_size must be greater than 0".to_string());
        }

        if self.image_path.as_os_str().is_empty() {
            return Err("image path is required".to_string());
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err("output directory is required".to_string());
        }

        if !is_valid_quality(self.jpeg_quality) {
            return Err("jpeg_quality must be between 1 and 100".to_string());
        }

        Ok(())
    }
}

// =============================================================================
// CLI Arguments
// =============================================================================

/// Tile Cutter - cut a square image into a zoom/x/y tile pyramid.
#[derive(Parser, Debug, Clone)]
#[command(name = "tile-cutter")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn into_command(self) -> Command {
        self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Cut an image into tiles.
    Generate(GenerateArgs),

    /// Print the pyramid an image would produce without writing tiles.
    Plan(PlanArgs),
}

/// Arguments shared by every command that tiles an image.
#[derive(Args, Debug, Clone)]
pub struct TilingArgs {
    /// Source image (square, power-of-two side).
    pub image: PathBuf,

    /// Tile side in pixels.
    #[arg(short = 's', long, default_value_t = DEFAULT_TILE_SIZE, env = "TILER_TILE_SIZE")]
    pub tile_size: u32,

    /// Number of coarse levels to skip; the next level becomes zoom 0.
    #[arg(short = 'z', long, default_value_t = DEFAULT_MIN_ZOOM_OFFSET, env = "TILER_MIN_ZOOM_OFFSET")]
    pub min_zoom_offset: u32,
}

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub tiling: TilingArgs,

    /// Directory receiving the `{z}/{x}/{y}` tree.
    #[arg(short, long, default_value = DEFAULT_OUTPUT_DIR, env = "TILER_OUTPUT_DIR")]
    pub output_dir: PathBuf,

    /// Tile format (png or jpeg).
    #[arg(short, long, default_value_t = TileFormat::Png, env = "TILER_FORMAT")]
    pub format: TileFormat,

    /// JPEG quality (1-100), used with --format jpeg.
    #[arg(long, default_value_t = DEFAULT_JPEG_QUALITY, env = "TILER_JPEG_QUALITY")]
    pub jpeg_quality: u8,

    /// Print a JSON summary to stdout when done.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl GenerateArgs {
    /// Build the run configuration.
    pub fn to_config(&self) -> GenerateConfig {
        GenerateConfig::new(&self.tiling.image, &self.output_dir)
            .with_tile_size(self.tiling.tile_size)
            .with_min_zoom_offset(self.tiling.min_zoom_offset)
            .with_format(self.format)
            .with_jpeg_quality(self.jpeg_quality)
    }
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub tiling: TilingArgs,

    /// Print the plan as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}

// =============================================================================
// Tests
// =============================================================================
