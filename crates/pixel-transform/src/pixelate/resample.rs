//! Resampling filters used by the pixelator.
//!
//! Area and cubic resampling are separable: each output column (and row)
//! is a weighted sum of source columns (rows). Weights are computed once per
//! axis and the two passes run over an `f32` intermediate so rounding only
//! happens at the end.

use crate::buffer::PixelBuffer;

/// Source taps for one output sample: `(source index, weight)`.
pub(crate) type Taps = Vec<(usize, f32)>;

/// Bicubic coefficient, matching the common `a = -0.75` convolution kernel.
const CUBIC_A: f32 = -0.75;

/// Area-averaging weights: output sample `i` covers the source interval
/// `[i * src / dst, (i + 1) * src / dst)` and each source sample contributes
/// in proportion to the overlap.
pub(crate) fn area_taps(src: usize, dst: usize) -> Vec<Taps> {
    let scale = src as f64 / dst as f64;
    (0..dst)
        .map(|i| {
            let start = i as f64 * scale;
            let end = (i + 1) as f64 * scale;
            let first = start.floor() as usize;
            let last = (end.ceil() as usize).min(src);
            let span = end - start;
            (first..last)
                .filter_map(|s| {
                    let overlap = end.min((s + 1) as f64) - start.max(s as f64);
                    (overlap > 1e-9).then(|| (s, (overlap / span) as f32))
                })
                .collect()
        })
        .collect()
}

/// Bicubic weights with half-pixel centers and edge replication.
pub(crate) fn cubic_taps(src: usize, dst: usize) -> Vec<Taps> {
    let scale = src as f32 / dst as f32;
    let max = src as isize - 1;
    (0..dst)
        .map(|i| {
            let fx = (i as f32 + 0.5) * scale - 0.5;
            let ix = fx.floor();
            let t = fx - ix;
            let ix = ix as isize;
            cubic_coefficients(t)
                .into_iter()
                .enumerate()
                .map(|(k, w)| ((ix + k as isize - 1).clamp(0, max) as usize, w))
                .collect()
        })
        .collect()
}

fn cubic_coefficients(t: f32) -> [f32; 4] {
    let a = CUBIC_A;
    let w0 = ((a * (t + 1.0) - 5.0 * a) * (t + 1.0) + 8.0 * a) * (t + 1.0) - 4.0 * a;
    let w1 = ((a + 2.0) * t - (a + 3.0)) * t * t + 1.0;
    let u = 1.0 - t;
    let w2 = ((a + 2.0) * u - (a + 3.0)) * u * u + 1.0;
    [w0, w1, w2, 1.0 - w0 - w1 - w2]
}

/// Run a horizontal then a vertical weighted pass.
pub(crate) fn separable(
    image: &PixelBuffer,
    horizontal: &[Taps],
    vertical: &[Taps],
) -> PixelBuffer {
    let src_w = image.width();
    let dst_w = horizontal.len();
    let dst_h = vertical.len();

    let mut columns: Vec<[f32; 3]> = Vec::with_capacity(dst_w * image.height());
    for row in image.rows() {
        for taps in horizontal {
            columns.push(weighted_sum(taps.iter().map(|&(s, w)| (row[s].map(f32::from), w))));
        }
    }
    debug_assert_eq!(columns.len(), dst_w * image.height());
    debug_assert!(horizontal.iter().flatten().all(|&(s, _)| s < src_w));

    let mut out = Vec::with_capacity(dst_w * dst_h);
    for taps in vertical {
        for x in 0..dst_w {
            let sum = weighted_sum(taps.iter().map(|&(s, w)| (columns[s * dst_w + x], w)));
            out.push(sum.map(|v| v.round().clamp(0.0, 255.0) as u8));
        }
    }
    PixelBuffer::from_parts(dst_w, dst_h, out)
}

#[inline]
fn weighted_sum(samples: impl Iterator<Item = ([f32; 3], f32)>) -> [f32; 3] {
    let mut acc = [0.0f32; 3];
    for (px, w) in samples {
        for c in 0..3 {
            acc[c] += px[c] * w;
        }
    }
    acc
}

/// Shrink (or grow) by averaging the source area under each output pixel.
pub fn area(image: &PixelBuffer, width: usize, height: usize) -> PixelBuffer {
    if width == image.width() && height == image.height() {
        return image.clone();
    }
    separable(
        image,
        &area_taps(image.width(), width),
        &area_taps(image.height(), height),
    )
}

/// Resize by copying the nearest source pixel; hard edges, no blending.
pub fn nearest(image: &PixelBuffer, width: usize, height: usize) -> PixelBuffer {
    let src_w = image.width();
    let src_h = image.height();
    let xs: Vec<usize> = (0..width).map(|x| (x * src_w / width).min(src_w - 1)).collect();

    let mut out = Vec::with_capacity(width * height);
    for y in 0..height {
        let sy = (y * src_h / height).min(src_h - 1);
        let row = &image.pixels()[sy * src_w..(sy + 1) * src_w];
        out.extend(xs.iter().map(|&sx| row[sx]));
    }
    PixelBuffer::from_parts(width, height, out)
}

/// Resize with a bicubic filter; produces soft transitions between samples.
pub fn cubic(image: &PixelBuffer, width: usize, height: usize) -> PixelBuffer {
    separable(
        image,
        &cubic_taps(image.width(), width),
        &cubic_taps(image.height(), height),
    )
}
