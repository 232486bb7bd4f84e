//! Tile encoder.
//!
//! Encodes cropped tiles into their on-disk format. PNG is the default and
//! keeps tiles lossless; JPEG is available for photographic sources where
//! size matters more than exact pixels.
//!
//! Both encoders are deterministic: the same pixels always produce the same
//! bytes, so re-running a cut rewrites identical files.

use std::fmt;
use std::io::Cursor;
use std::str::FromStr;

use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use serde::Serialize;

use crate::error::TilerError;

/// Default JPEG quality (1-100).
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Minimum allowed JPEG quality.
pub const MIN_JPEG_QUALITY: u8 = 1;

/// Maximum allowed JPEG quality.
pub const MAX_JPEG_QUALITY: u8 = 100;

// =============================================================================
// Tile Format
// =============================================================================

/// On-disk encoding of tiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TileFormat {
    #[default]
    Png,
    Jpeg,
}

impl TileFormat {
    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            TileFormat::Png => "png",
            TileFormat::Jpeg => "jpg",
        }
    }
}

impl fmt::Display for TileFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileFormat::Png => write!(f, "png"),
            TileFormat::Jpeg => write!(f, "jpeg"),
        }
    }
}

impl FromStr for TileFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "png" => Ok(TileFormat::Png),
            "jpg" | "jpeg" => Ok(TileFormat::Jpeg),
            other => Err(format!("unsupported tile format '{other}' (expected png or jpeg)")),
        }
    }
}

// =============================================================================
// Encoder
// =============================================================================

/// Encoder turning tile pixels into file bytes.
///
/// # Example
///
/// ```ignore
/// use tile_cutter::tile::{TileEncoder, TileFormat};
///
/// let encoder = TileEncoder::new(TileFormat::Png);
/// let bytes = encoder.encode(&tile)?;
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct TileEncoder {
    format: TileFormat,
    quality: u8,
}

impl TileEncoder {
    /// Create an encoder for `format` with the default JPEG quality.
    pub fn new(format: TileFormat) -> Self {
        Self {
            format,
            quality: DEFAULT_JPEG_QUALITY,
        }
    }

    /// Set the JPEG quality. Ignored for PNG. Out-of-range values are clamped.
    pub fn with_quality(mut self, quality: u8) -> Self {
        self.quality = clamp_quality(quality);
        self
    }

    pub fn format(&self) -> TileFormat {
        self.format
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode a tile.
    ///
    /// # Errors
    ///
    /// Returns [`TilerError::Encode`] if the codec rejects the pixels.
    pub fn encode(&self, tile: &DynamicImage) -> Result<Bytes, TilerError> {
        let mut output = Vec::new();

        match self.format {
            TileFormat::Png => {
                tile.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)
                    .map_err(|e| TilerError::Encode {
                        message: e.to_string(),
                    })?;
            }
            TileFormat::Jpeg => {
                // JPEG has no alpha channel
                let rgb = tile.to_rgb8();
                let mut encoder =
                    JpegEncoder::new_with_quality(&mut output, clamp_quality(self.quality));
                encoder
                    .encode_image(&rgb)
                    .map_err(|e| TilerError::Encode {
                        message: e.to_string(),
                    })?;
            }
        }

        Ok(Bytes::from(output))
    }
}

// =============================================================================
// Utility Functions
// =============================================================================

/// Returns `true` if quality is in the valid range (1-100).
#[inline]
pub fn is_valid_quality(quality: u8) -> bool {
    (MIN_JPEG_QUALITY..=MAX_JPEG_QUALITY).contains(&quality)
}

/// Clamp quality to valid range.
#[inline]
pub fn clamp_quality(quality: u8) -> u8 {
    quality.clamp(MIN_JPEG_QUALITY, MAX_JPEG_QUALITY)
}

// =============================================================================
// Tests
// =============================================================================
