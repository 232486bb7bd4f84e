//! # Tile Cutter
//!
//! Cuts one large square image into a pyramid of fixed-size tiles for
//! pan/zoom map viewers, written as `{output_dir}/{z}/{x}/{y}.png`.
//!
//! ## Architecture
//!
//! - [`pyramid`] - Level geometry and up-front validation
//! - [`tile`] - Resizing, cropping, encoding and writing tiles
//! - [`config`] - Run configuration and CLI types
//! - [`error`] - Error types
//!
//! ## Example
//!
//! ```rust,no_run
//! use tile_cutter::{generate_tiles, GenerateConfig};
//!
//! let config = GenerateConfig::new("8192.png", "tiles");
//! match generate_tiles(&config) {
//!     Ok(summary) => println!("{} tiles", summary.tiles_written),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

pub mod config;
pub mod error;
pub mod pyramid;
pub mod tile;

// Re-export commonly used types
pub use config::{
    Cli, Command, GenerateArgs, GenerateConfig, PlanArgs, TilingArgs, DEFAULT_MIN_ZOOM_OFFSET,
    DEFAULT_OUTPUT_DIR, DEFAULT_TILE_SIZE,
};
pub use error::TilerError;
pub use pyramid::{max_zoom, validate_dimensions, PyramidPlan, TileCoord, ZoomLevel};
pub use tile::{
    generate_tiles, plan_for_file, GenerateSummary, TileEncoder, TileFormat, TileGenerator,
    TileWriter,
};
