//! End-to-end tile generation tests.
//!
//! Tests verify:
//! - Zoom directories are contiguous from 0 and hold the expected tile counts
//! - Every tile is exactly `tile_size` square
//! - Bad sources fail before any write
//! - Re-running produces identical files

use std::fs;

use tempfile::TempDir;

use tile_cutter::{generate_tiles, GenerateConfig, TileFormat, TilerError};

use super::test_utils::{count_tiles, list_files, write_garbage, write_source_png, zoom_dirs};

// =============================================================================
// Layout and Counts
// =============================================================================

#[test]
fn test_default_parameters_single_level() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 1024, 1024);
    let out = temp.path().join("tiles");

    // 1024 / 128 = 8 -> max_zoom 3, offset 3 keeps only the full resolution
    let summary = generate_tiles(&GenerateConfig::new(&source, &out)).unwrap();

    assert_eq!(summary.max_zoom, 3);
    assert_eq!(summary.level_count(), 1);
    assert_eq!(zoom_dirs(&out), vec![0]);
    assert_eq!(count_tiles(&out, 0), 64);
    assert_eq!(summary.tiles_written, 64);
    assert!(out.join("0/0/0.png").exists());
    assert!(out.join("0/7/7.png").exists());
    assert!(!out.join("0/8").exists());
}

#[test]
fn test_two_levels() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 256, 256);
    let out = temp.path().join("tiles");

    // 256 / 16 = 16 -> max_zoom 4, levels {3, 4} -> adjusted {0, 1}
    let config = GenerateConfig::new(&source, &out).with_tile_size(16);
    let summary = generate_tiles(&config).unwrap();

    assert_eq!(summary.max_zoom, 4);
    assert_eq!(zoom_dirs(&out), vec![0, 1]);
    assert_eq!(count_tiles(&out, 0), 8 * 8);
    assert_eq!(count_tiles(&out, 1), 16 * 16);
    assert_eq!(list_files(&out).len() as u64, summary.tiles_written);
}

#[test]
fn test_tile_count_per_level_matches_formula() {
    let temp = TempDir::new().unwrap();
    let (w, ts, offset) = (128u32, 8u32, 2u32);
    let source = write_source_png(temp.path(), w, w);
    let out = temp.path().join("tiles");

    let config = GenerateConfig::new(&source, &out)
        .with_tile_size(ts)
        .with_min_zoom_offset(offset);
    let summary = generate_tiles(&config).unwrap();

    let max_zoom = summary.max_zoom;
    let expected_levels: Vec<u32> = (0..=max_zoom - offset).collect();
    assert_eq!(zoom_dirs(&out), expected_levels);

    for k in expected_levels {
        let side = w / (ts * (1 << (max_zoom - (k + offset))));
        assert_eq!(count_tiles(&out, k), (side * side) as usize, "level {k}");
    }
}

#[test]
fn test_every_tile_has_tile_size_dimensions() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 128, 128);
    let out = temp.path().join("tiles");

    let config = GenerateConfig::new(&source, &out)
        .with_tile_size(32)
        .with_min_zoom_offset(0);
    generate_tiles(&config).unwrap();

    let files = list_files(&out);
    assert_eq!(files.len(), 1 + 4 + 16);
    for file in files {
        let tile = image::open(&file).unwrap();
        assert_eq!((tile.width(), tile.height()), (32, 32), "{}", file.display());
    }
}

#[test]
fn test_jpeg_tiles_use_jpg_extension() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 64, 64);
    let out = temp.path().join("tiles");

    let config = GenerateConfig::new(&source, &out)
        .with_tile_size(32)
        .with_min_zoom_offset(0)
        .with_format(TileFormat::Jpeg)
        .with_jpeg_quality(85);
    generate_tiles(&config).unwrap();

    let files = list_files(&out);
    assert_eq!(files.len(), 1 + 4);
    assert!(files.iter().all(|f| f.extension().unwrap() == "jpg"));

    let data = fs::read(out.join("1/1/0.jpg")).unwrap();
    assert_eq!(&data[..2], &[0xFF, 0xD8]);
}

#[test]
fn test_offset_beyond_max_zoom_writes_nothing() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 256, 256);
    let out = temp.path().join("tiles");

    // 256 / 128 = 2 -> max_zoom 1, offset 3 skips everything
    let summary = generate_tiles(&GenerateConfig::new(&source, &out)).unwrap();

    assert_eq!(summary.tiles_written, 0);
    assert!(summary.levels.is_empty());
    assert!(!out.exists());
}

// =============================================================================
// Validation Failures
// =============================================================================

#[test]
fn test_non_square_source_fails_without_writes() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 100, 50);
    let out = temp.path().join("tiles");

    let err = generate_tiles(&GenerateConfig::new(&source, &out)).unwrap_err();

    assert!(err.is_validation());
    assert!(err.to_string().contains("square"));
    assert!(!out.exists());
}

#[test]
fn test_non_power_of_two_source_leaves_existing_output_unchanged() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 100, 100);
    let out = temp.path().join("tiles");
    fs::create_dir_all(out.join("0/0")).unwrap();
    fs::write(out.join("0/0/0.png"), b"previous run").unwrap();

    let err = generate_tiles(&GenerateConfig::new(&source, &out)).unwrap_err();

    assert!(err.is_validation());
    assert_eq!(list_files(&out), vec![out.join("0/0/0.png")]);
    assert_eq!(fs::read(out.join("0/0/0.png")).unwrap(), b"previous run");
}

#[test]
fn test_tile_size_not_dividing_level_fails_without_writes() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 128, 128);
    let out = temp.path().join("tiles");

    let config = GenerateConfig::new(&source, &out)
        .with_tile_size(48)
        .with_min_zoom_offset(0);
    let err = generate_tiles(&config).unwrap_err();

    assert!(err.is_validation());
    assert!(!out.exists());
}

#[test]
fn test_undecodable_source_is_decode_error() {
    let temp = TempDir::new().unwrap();
    let source = write_garbage(temp.path());
    let out = temp.path().join("tiles");

    let err = generate_tiles(&GenerateConfig::new(&source, &out)).unwrap_err();

    assert!(matches!(err, TilerError::Decode { .. }));
    assert!(!out.exists());
}

#[test]
fn test_unwritable_output_is_io_error() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 64, 64);
    let out = temp.path().join("tiles");
    fs::write(&out, b"a file, not a directory").unwrap();

    let config = GenerateConfig::new(&source, &out)
        .with_tile_size(32)
        .with_min_zoom_offset(0);
    let err = generate_tiles(&config).unwrap_err();

    assert!(matches!(err, TilerError::Io { .. }));
}

// =============================================================================
// Determinism
// =============================================================================

#[test]
fn test_rerun_is_byte_identical() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 128, 128);
    let out = temp.path().join("tiles");
    let config = GenerateConfig::new(&source, &out)
        .with_tile_size(16)
        .with_min_zoom_offset(1);

    generate_tiles(&config).unwrap();
    let first: Vec<(std::path::PathBuf, Vec<u8>)> = list_files(&out)
        .into_iter()
        .map(|p| {
            let data = fs::read(&p).unwrap();
            (p, data)
        })
        .collect();

    // Existing directories must not make the second run fail
    generate_tiles(&config).unwrap();
    let files = list_files(&out);

    assert_eq!(files.len(), first.len());
    for (path, data) in first {
        assert_eq!(fs::read(&path).unwrap(), data, "{}", path.display());
    }
}

#[test]
fn test_full_resolution_level_preserves_pixels() {
    let temp = TempDir::new().unwrap();
    let source = write_source_png(temp.path(), 64, 64);
    let out = temp.path().join("tiles");

    let config = GenerateConfig::new(&source, &out)
        .with_tile_size(64)
        .with_min_zoom_offset(0);
    generate_tiles(&config).unwrap();

    let original = image::open(&source).unwrap().to_rgb8();
    let tile = image::open(out.join("0/0/0.png")).unwrap().to_rgb8();
    assert_eq!(tile, original);
}
