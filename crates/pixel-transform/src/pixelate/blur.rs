//! Separable Gaussian blur with mirrored borders.

use super::resample::{separable, Taps};
use crate::buffer::PixelBuffer;

/// Sigma derived from the kernel size when none is given explicitly.
///
/// This is the usual `0.3 * ((ksize - 1) / 2 - 1) + 0.8` rule, which keeps
/// roughly three standard deviations inside the kernel radius.
pub fn auto_sigma(ksize: usize) -> f32 {
    sigma_for(ksize) as f32
}

fn sigma_for(ksize: usize) -> f64 {
    0.3 * ((ksize as f64 - 1.0) * 0.5 - 1.0) + 0.8
}

/// Binomial kernels used instead of the sampled Gaussian for sizes 1..=7.
const SMALL_KERNELS: [&[f64]; 4] = [
    &[1.0],
    &[0.25, 0.5, 0.25],
    &[0.0625, 0.25, 0.375, 0.25, 0.0625],
    &[0.03125, 0.109375, 0.21875, 0.28125, 0.21875, 0.109375, 0.03125],
];

/// Visit every `(offset, raw weight)` pair of an odd `ksize` kernel.
///
/// Weights are not normalized. Nothing proportional to `ksize` is
/// allocated, so very wide kernels only cost time.
fn for_each_weight(ksize: usize, mut visit: impl FnMut(isize, f64)) {
    let radius = (ksize / 2) as isize;
    if ksize <= 7 {
        for (i, &w) in SMALL_KERNELS[ksize / 2].iter().enumerate() {
            visit(i as isize - radius, w);
        }
        return;
    }
    let sigma = sigma_for(ksize);
    let denom = 2.0 * sigma * sigma;
    for offset in -radius..=radius {
        let d = offset as f64;
        visit(offset, (-(d * d) / denom).exp());
    }
}

/// Normalized 1-D Gaussian kernel of odd length `ksize`.
///
/// Sizes up to 7 use the fixed binomial weights (`[1, 2, 1] / 4`, ...);
/// larger sizes sample a Gaussian with [`auto_sigma`].
pub fn gaussian_kernel(ksize: usize) -> Vec<f32> {
    debug_assert!(ksize % 2 == 1, "kernel size must be odd");
    let mut raw = Vec::with_capacity(ksize);
    for_each_weight(ksize, |_, w| raw.push(w));
    let total: f64 = raw.iter().sum();
    raw.into_iter().map(|w| (w / total) as f32).collect()
}

/// Mirror an out-of-range index without repeating the edge sample
/// (`dcb|abcd|cba`).
fn reflect_101(i: isize, len: usize) -> usize {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len as isize - 1);
    let m = i.rem_euclid(period);
    if m < len as isize {
        m as usize
    } else {
        (period - m) as usize
    }
}

/// Kernel weights summed per residue modulo the mirror period.
///
/// Mirroring repeats every `period` samples, so a kernel wider than that
/// collapses onto `period` taps without changing the result.
fn folded_kernel(ksize: usize, period: usize) -> Vec<f32> {
    let mut sums = vec![0.0f64; period];
    let mut total = 0.0f64;
    for_each_weight(ksize, |offset, w| {
        sums[offset.rem_euclid(period as isize) as usize] += w;
        total += w;
    });
    sums.into_iter().map(|s| (s / total) as f32).collect()
}

fn convolution_taps(len: usize, ksize: usize) -> Vec<Taps> {
    if len == 1 {
        return vec![vec![(0, 1.0)]];
    }
    let period = 2 * (len - 1);

    if ksize > period {
        let residues = folded_kernel(ksize, period);
        return (0..len as isize)
            .map(|i| {
                residues
                    .iter()
                    .enumerate()
                    .map(|(m, &w)| (reflect_101(i + m as isize, len), w))
                    .collect()
            })
            .collect();
    }

    let kernel = gaussian_kernel(ksize);
    let radius = (ksize / 2) as isize;
    (0..len as isize)
        .map(|i| {
            kernel
                .iter()
                .enumerate()
                .map(|(k, &w)| (reflect_101(i + k as isize - radius, len), w))
                .collect()
        })
        .collect()
}

/// Blur `image` with an odd `ksize` x `ksize` Gaussian kernel.
///
/// Any size is accepted; kernels wider than the image wrap through the
/// mirrored border instead of being truncated.
pub fn gaussian_blur(image: &PixelBuffer, ksize: usize) -> PixelBuffer {
    if ksize <= 1 {
        return image.clone();
    }
    separable(
        image,
        &convolution_taps(image.width(), ksize),
        &convolution_taps(image.height(), ksize),
    )
}
