//! Error diffusion dithering.
//!
//! The image is copied into an `f32` accumulator and swept top to bottom,
//! left to right. Each visited pixel snaps to the nearest multiple of the
//! step and hands its rounding error to its unvisited neighbors through the
//! kernel. The sweep stops one short of the last row and the last column:
//! those pixels still collect error from their neighbors but are never
//! snapped themselves, so they keep in-between values.
//!
//! After the sweep every channel is clamped to `0..=255` and truncated back
//! to `u8`.
//!
//! The sweep is order dependent and runs on a single thread; distinct
//! images can be dithered in parallel freely.
//!
//! ```
//! use pixel_transform::{dither, PixelBuffer};
//!
//! let image = PixelBuffer::filled(4, 4, [100, 100, 100]).unwrap();
//! let out = dither(&image);
//! assert_eq!(out.get(0, 0), [96, 96, 96]);
//! ```

mod kernel;
mod options;

pub use kernel::{Kernel, FLOYD_STEINBERG};
pub use options::DitherOptions;

use crate::buffer::PixelBuffer;

/// Dither with Floyd-Steinberg weights and a step of 32.
pub fn dither(image: &PixelBuffer) -> PixelBuffer {
    dither_with_options(image, &DitherOptions::default())
}

/// Dither with explicit options.
pub fn dither_with_options(image: &PixelBuffer, options: &DitherOptions) -> PixelBuffer {
    let width = image.width();
    let height = image.height();
    let mut acc: Vec<[f32; 3]> = image.pixels().iter().map(|p| p.map(f32::from)).collect();

    for y in 0..height.saturating_sub(1) {
        for x in 0..width.saturating_sub(1) {
            let idx = y * width + x;
            let old = acc[idx];
            let new = old.map(|v| options.quantize(v));
            acc[idx] = new;

            let error = [old[0] - new[0], old[1] - new[1], old[2] - new[2]];
            diffuse(&mut acc, width, height, x, y, error, &options.kernel);
        }
    }

    let pixels = acc
        .into_iter()
        .map(|px| px.map(|v| v.clamp(0.0, 255.0) as u8))
        .collect();
    PixelBuffer::from_parts(width, height, pixels)
}

#[inline]
fn diffuse(
    acc: &mut [[f32; 3]],
    width: usize,
    height: usize,
    x: usize,
    y: usize,
    error: [f32; 3],
    kernel: &Kernel,
) {
    let divisor = kernel.divisor as f32;
    for &(dx, dy, weight) in kernel.entries {
        let nx = x as isize + dx as isize;
        let ny = y as isize + dy as isize;
        if nx < 0 || ny < 0 || nx as usize >= width || ny as usize >= height {
            continue;
        }
        let target = &mut acc[ny as usize * width + nx as usize];
        let weight = weight as f32;
        for c in 0..3 {
            target[c] += error[c] * weight / divisor;
        }
    }
}
