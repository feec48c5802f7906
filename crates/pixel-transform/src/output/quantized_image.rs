//! QuantizedImage: the quantizer's pixels plus the palette behind them.

use crate::buffer::PixelBuffer;

/// Output of [`Quantizer::quantize`](crate::Quantizer::quantize).
///
/// Holds the recolored image together with the palette (sRGB bytes, at most
/// `k` entries) and the palette index of every pixel in row-major order.
#[derive(Debug, Clone)]
pub struct QuantizedImage {
    image: PixelBuffer,
    palette: Vec<[u8; 3]>,
    labels: Vec<usize>,
    compactness: f64,
    iterations: u32,
}

impl QuantizedImage {
    pub(crate) fn new(
        image: PixelBuffer,
        palette: Vec<[u8; 3]>,
        labels: Vec<usize>,
        compactness: f64,
        iterations: u32,
    ) -> Self {
        debug_assert_eq!(labels.len(), image.len());
        Self {
            image,
            palette,
            labels,
            compactness,
            iterations,
        }
    }

    #[inline]
    pub fn image(&self) -> &PixelBuffer {
        &self.image
    }

    #[inline]
    pub fn into_image(self) -> PixelBuffer {
        self.image
    }

    /// Cluster centers as sRGB bytes. Unused centers are included.
    #[inline]
    pub fn palette(&self) -> &[[u8; 3]] {
        &self.palette
    }

    /// Palette index per pixel, row-major.
    #[inline]
    pub fn labels(&self) -> &[usize] {
        &self.labels
    }

    /// Pixel-weighted sum of squared Oklab distances to the assigned
    /// centers. Zero when the input already fit the palette.
    #[inline]
    pub fn compactness(&self) -> f64 {
        self.compactness
    }

    /// Clustering rounds used by the winning attempt.
    #[inline]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Number of palette entries that at least one pixel uses.
    pub fn colors_used(&self) -> usize {
        let mut used = vec![false; self.palette.len()];
        for &l in &self.labels {
            used[l] = true;
        }
        used.into_iter().filter(|&u| u).count()
    }
}
