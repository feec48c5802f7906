//! Assertion helpers for tests.

use std::path::Path;

use pixel_transform::PixelBuffer;
use pretty_assertions::assert_eq;

/// Assert file starts with the PNG signature
pub fn assert_png_file(path: &Path) {
    let bytes = std::fs::read(path).unwrap();
    assert!(
        bytes.starts_with(b"\x89PNG\r\n\x1a\n"),
        "Expected PNG file at {}, got {} bytes starting with {:?}",
        path.display(),
        bytes.len(),
        &bytes[..8.min(bytes.len())]
    );
}

/// Assert two buffers have identical dimensions
pub fn assert_same_dimensions(actual: &PixelBuffer, expected: &PixelBuffer) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "Dimensions differ"
    );
}

/// Assert the image uses at most `max` distinct colors
pub fn assert_max_colors(image: &PixelBuffer, max: usize) {
    let count = image.distinct_colors();
    assert!(count <= max, "Expected at most {max} colors, found {count}");
}
