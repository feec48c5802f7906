//! Test fixtures: synthetic images and files on disk.

use std::path::{Path, PathBuf};

use pixel_transform::PixelBuffer;
use pixelart::services::codec;

/// Horizontal red-to-blue gradient with a vertical green ramp
pub fn gradient(width: usize, height: usize) -> PixelBuffer {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            let r = (x * 255 / (width - 1).max(1)) as u8;
            let g = (y * 255 / (height - 1).max(1)) as u8;
            [r, g, 255 - r]
        })
        .collect();
    PixelBuffer::new(width, height, pixels).unwrap()
}

/// Single-color image
pub fn solid(width: usize, height: usize, color: [u8; 3]) -> PixelBuffer {
    PixelBuffer::filled(width, height, color).unwrap()
}

/// Write `image` as PNG into `dir` and return its path
pub fn write_png(dir: &Path, name: &str, image: &PixelBuffer) -> PathBuf {
    let path = dir.join(name);
    let bytes = codec::encode_png(image, false).unwrap();
    std::fs::write(&path, bytes).unwrap();
    path
}

/// Write a config file into `dir` and return its path
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("config.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
