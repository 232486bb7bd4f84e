//! Tile generation pipeline.
//!
//! ```text
//! ┌──────────────┐   ┌──────────────┐   ┌───────────────────────────────┐
//! │ decode image │──▶│ plan pyramid │──▶│ for each level                │
//! └──────────────┘   └──────────────┘   │   resize source (Lanczos3)    │
//!                                       │   for each x, y               │
//!                                       │     crop → encode → write     │
//!                                       └───────────────────────────────┘
//! ```
//!
//! Decoding and planning finish before anything touches the output
//! directory, so a bad source or bad parameters leave it as it was.
//!
//! Every level is resampled from the decoded source rather than from the
//! previous level, which keeps resampling error from compounding.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use image::imageops::FilterType;
use image::{DynamicImage, ImageReader};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::GenerateConfig;
use crate::error::TilerError;
use crate::pyramid::{PyramidPlan, ZoomLevel};

use super::encoder::{TileEncoder, TileFormat};
use super::writer::TileWriter;

/// Filter used for every level resize.
pub const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

// =============================================================================
// Summary
// =============================================================================

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    /// Side of the source image in pixels
    pub source_size: u32,

    /// Finest zoom level in source numbering
    pub max_zoom: u32,

    /// Levels that were written, in output order
    pub levels: Vec<ZoomLevel>,

    /// Number of tile files written
    pub tiles_written: u64,

    /// Root of the tile tree
    pub output_dir: PathBuf,

    /// Tile encoding used
    pub format: TileFormat,
}

impl GenerateSummary {
    pub fn level_count(&self) -> usize {
        self.levels.len()
    }
}

// =============================================================================
// Source Loading
// =============================================================================

fn decode_error(path: &Path, message: impl ToString) -> TilerError {
    TilerError::Decode {
        path: path.to_path_buf(),
        message: message.to_string(),
    }
}

/// Decode the source image, guessing its format from the header.
pub fn load_source(path: &Path) -> Result<DynamicImage, TilerError> {
    ImageReader::open(path)
        .map_err(|e| decode_error(path, e))?
        .with_guessed_format()
        .map_err(|e| decode_error(path, e))?
        .decode()
        .map_err(|e| decode_error(path, e))
}

/// Read the source dimensions without decoding the pixels.
pub fn read_dimensions(path: &Path) -> Result<(u32, u32), TilerError> {
    ImageReader::open(path)
        .map_err(|e| decode_error(path, e))?
        .with_guessed_format()
        .map_err(|e| decode_error(path, e))?
        .into_dimensions()
        .map_err(|e| decode_error(path, e))
}

/// Plan the pyramid for an image file from its header alone.
pub fn plan_for_file(
    path: &Path,
    tile_size: u32,
    min_zoom_offset: u32,
) -> Result<PyramidPlan, TilerError> {
    let (width, height) = read_dimensions(path)?;
    PyramidPlan::for_image(width, height, tile_size, min_zoom_offset)
}

// =============================================================================
// Tile Generator
// =============================================================================

/// Cuts one source image into a tile tree.
///
/// # Example
///
/// ```ignore
/// use tile_cutter::{GenerateConfig, TileGenerator};
///
/// let config = GenerateConfig::new("8192.png", "tiles");
/// let summary = TileGenerator::new(config)?.run()?;
/// println!("{} tiles", summary.tiles_written);
/// ```
#[derive(Debug, Clone)]
pub struct TileGenerator {
    config: GenerateConfig,
    encoder: TileEncoder,
    writer: TileWriter,
}

impl TileGenerator {
    /// Create a generator for a validated configuration.
    pub fn new(config: GenerateConfig) -> Result<Self, TilerError> {
        config.validate().map_err(TilerError::Validation)?;

        let encoder = TileEncoder::new(config.format).with_quality(config.jpeg_quality);
        let writer = TileWriter::new(&config.output_dir, config.format);

        Ok(Self {
            config,
            encoder,
            writer,
        })
    }

    pub fn config(&self) -> &GenerateConfig {
        &self.config
    }

    /// Load, validate and cut the configured source.
    pub fn run(&self) -> Result<GenerateSummary, TilerError> {
        let source = load_source(&self.config.image_path)?;
        debug!(
            "Loaded {} ({}x{})",
            self.config.image_path.display(),
            source.width(),
            source.height()
        );

        self.run_with_image(&source)
    }

    /// Cut an already decoded source.
    pub fn run_with_image(&self, source: &DynamicImage) -> Result<GenerateSummary, TilerError> {
        let plan = PyramidPlan::for_image(
            source.width(),
            source.height(),
            self.config.tile_size,
            self.config.min_zoom_offset,
        )?;

        if plan.is_empty() {
            warn!(
                "min_zoom_offset {} is above max zoom {}, no tiles to generate",
                plan.min_zoom_offset(),
                plan.max_zoom()
            );
        } else {
            info!(
                "Cutting {}px source into {} level(s), {} tile(s) of {}px",
                plan.source_size(),
                plan.level_count(),
                plan.total_tiles(),
                plan.tile_size()
            );
        }

        let mut tiles_written = 0;
        for level in plan.levels() {
            tiles_written += self.cut_level(source, level)?;
        }

        info!(
            "Tiling complete: {} tile(s) written to {}",
            tiles_written,
            self.writer.root().display()
        );

        Ok(GenerateSummary {
            source_size: plan.source_size(),
            max_zoom: plan.max_zoom(),
            levels: plan.levels().to_vec(),
            tiles_written,
            output_dir: self.config.output_dir.clone(),
            format: self.config.format,
        })
    }

    /// Resize the source for one level and write all of its tiles.
    fn cut_level(&self, source: &DynamicImage, level: &ZoomLevel) -> Result<u64, TilerError> {
        debug!(
            "Level {} (source zoom {}): {}px, {}x{} tiles",
            level.adjusted_zoom, level.zoom, level.width, level.cols, level.rows
        );

        // The finest level is the source itself
        let resized = if level.width == source.width() {
            Cow::Borrowed(source)
        } else {
            Cow::Owned(source.resize_exact(level.width, level.width, RESIZE_FILTER))
        };

        let mut written = 0;
        for coord in level.tiles() {
            let (left, top) = level.tile_origin(coord.x, coord.y);
            let tile = resized.crop_imm(left, top, level.tile_size, level.tile_size);

            let data = self.encoder.encode(&tile)?;
            let path = self.writer.write(coord, &data)?;
            info!("Generated: {}", path.display());

            written += 1;
        }

        Ok(written)
    }
}

/// Cut the image described by `config` into tiles.
pub fn generate_tiles(config: &GenerateConfig) -> Result<GenerateSummary, TilerError> {
    TileGenerator::new(config.clone())?.run()
}

// =============================================================================
// Tests
// =============================================================================
