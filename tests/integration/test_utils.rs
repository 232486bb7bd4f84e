//! Test utilities for integration tests.
//!
//! Helpers for writing synthetic source images and inspecting the generated
//! tile tree.

use image::{Rgb, RgbImage};
use std::fs;
use std::path::{Path, PathBuf};

// =============================================================================
// Source Images
// =============================================================================

/// Write a `width x height` RGB gradient PNG into `dir` and return its path.
pub fn write_source_png(dir: &Path, width: u32, height: u32) -> PathBuf {
    let img = RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            ((x ^ y) % 256) as u8,
        ])
    });

    let path = dir.join(format!("source_{}x{}.png", width, height));
    img.save(&path).unwrap();
    path
}

/// Write a file that is not an image.
pub fn write_garbage(dir: &Path) -> PathBuf {
    let path = dir.join("garbage.png");
    fs::write(&path, b"definitely not a png").unwrap();
    path
}

// =============================================================================
// Tile Tree Inspection
// =============================================================================

/// All regular files below `root`, sorted.
pub fn list_files(root: &Path) -> Vec<PathBuf> {
    let mut files = Vec::new();
    if root.exists() {
        collect_files(root, &mut files);
    }
    files.sort();
    files
}

fn collect_files(dir: &Path, files: &mut Vec<PathBuf>) {
    for entry in fs::read_dir(dir).unwrap() {
        let path = entry.unwrap().path();
        if path.is_dir() {
            collect_files(&path, files);
        } else {
            files.push(path);
        }
    }
}

/// Names of the immediate subdirectories of `root`, sorted numerically.
pub fn zoom_dirs(root: &Path) -> Vec<u32> {
    let mut zooms: Vec<u32> = fs::read_dir(root)
        .unwrap()
        .map(|e| e.unwrap().path())
        .filter(|p| p.is_dir())
        .map(|p| p.file_name().unwrap().to_str().unwrap().parse().unwrap())
        .collect();
    zooms.sort();
    zooms
}

/// Number of tile files at adjusted zoom `z`.
pub fn count_tiles(root: &Path, z: u32) -> usize {
    list_files(&root.join(z.to_string())).len()
}
