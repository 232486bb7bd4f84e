//! Tile cutting.
//!
//! # Components
//!
//! - [`TileGenerator`]: decodes the source and drives the per-level loop
//! - [`TileEncoder`]: encodes cropped tiles as PNG or JPEG
//! - [`TileWriter`]: maps tile coordinates to `{z}/{x}/{y}.{ext}` and writes them
//!
//! # Example
//!
//! ```no_run
//! use tile_cutter::config::GenerateConfig;
//! use tile_cutter::tile::generate_tiles;
//!
//! let config = GenerateConfig::new("8192.png", "tiles")
//!     .with_tile_size(128)
//!     .with_min_zoom_offset(3);
//!
//! let summary = generate_tiles(&config).unwrap();
//! println!("{} tiles written", summary.tiles_written);
//! ```

mod encoder;
mod generator;
mod writer;

pub use encoder::{
    clamp_quality, is_valid_quality, TileEncoder, TileFormat, DEFAULT_JPEG_QUALITY,
    MAX_JPEG_QUALITY, MIN_JPEG_QUALITY,
};
pub use generator::{
    generate_tiles, load_source, plan_for_file, read_dimensions, GenerateSummary, TileGenerator,
    RESIZE_FILTER,
};
pub use writer::TileWriter;
