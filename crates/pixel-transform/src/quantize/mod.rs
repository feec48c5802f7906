//! Palette reduction by k-means clustering in Oklab.
//!
//! Every pixel is converted to [`Oklab`], the distinct colors are clustered
//! into at most `k` groups, and each pixel is replaced by its group's
//! center converted back to sRGB bytes. Because every center maps to one
//! byte triple, the output never holds more than `k` distinct colors.
//!
//! Center initialization is random. Runs on identical input may therefore
//! pick slightly different palettes unless [`QuantizeOptions::seed`] is set.
//!
//! ```
//! use pixel_transform::{PixelBuffer, QuantizeOptions, Quantizer};
//!
//! let pixels = (0..64u8).map(|v| [v * 4, 255 - v * 4, 128]).collect();
//! let image = PixelBuffer::new(8, 8, pixels).unwrap();
//!
//! let quantizer = Quantizer::new(QuantizeOptions::new().seed(Some(1)));
//! let result = quantizer.quantize(&image, 4).unwrap();
//! assert!(result.image().distinct_colors() <= 4);
//! ```

mod kmeans;
mod options;

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::api::TransformError;
use crate::buffer::PixelBuffer;
use crate::color::Oklab;
use crate::output::QuantizedImage;

pub use kmeans::{kmeans, Clustering, WeightedPoint};
pub use options::QuantizeOptions;

/// Reusable palette quantizer.
#[derive(Debug, Clone, Default)]
pub struct Quantizer {
    options: QuantizeOptions,
}

impl Quantizer {
    pub fn new(options: QuantizeOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &QuantizeOptions {
        &self.options
    }

    /// Reduce `image` to at most `k` colors.
    ///
    /// `k` must be in `1..=image.len()`. Images that already use `k` or fewer
    /// colors come back unchanged.
    pub fn quantize(&self, image: &PixelBuffer, k: usize) -> Result<QuantizedImage, TransformError> {
        let pixel_count = image.len();
        if k == 0 || k > pixel_count {
            return Err(TransformError::InvalidPaletteSize {
                requested: k,
                pixels: pixel_count,
            });
        }

        let (points, colors, point_of_pixel) = distinct_points(image);

        if points.len() <= k {
            return Ok(QuantizedImage::new(
                image.clone(),
                colors,
                point_of_pixel,
                0.0,
                0,
            ));
        }

        let mut rng = match self.options.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let clustering = kmeans(&points, k, &self.options, &mut rng);

        let palette: Vec<[u8; 3]> = clustering.centers.iter().map(|c| c.to_bytes()).collect();
        let labels: Vec<usize> = point_of_pixel
            .iter()
            .map(|&p| clustering.labels[p])
            .collect();
        let pixels = labels.iter().map(|&l| palette[l]).collect();

        Ok(QuantizedImage::new(
            PixelBuffer::from_parts(image.width(), image.height(), pixels),
            palette,
            labels,
            clustering.compactness,
            clustering.iterations,
        ))
    }
}

/// Collapse the image to weighted distinct colors, remembering which
/// distinct color every pixel maps to. Returns the points, their original
/// bytes, and the per-pixel point index.
fn distinct_points(image: &PixelBuffer) -> (Vec<WeightedPoint>, Vec<[u8; 3]>, Vec<usize>) {
    let mut index_of: HashMap<[u8; 3], usize> = HashMap::new();
    let mut points: Vec<WeightedPoint> = Vec::new();
    let mut colors: Vec<[u8; 3]> = Vec::new();
    let mut point_of_pixel = Vec::with_capacity(image.len());

    for &px in image.pixels() {
        let idx = *index_of.entry(px).or_insert_with(|| {
            points.push(WeightedPoint {
                color: Oklab::from_bytes(px),
                weight: 0,
            });
            colors.push(px);
            points.len() - 1
        });
        points[idx].weight += 1;
        point_of_pixel.push(idx);
    }
    (points, colors, point_of_pixel)
}

/// Reduce `image` to at most `k` colors with default clustering options.
pub fn quantize(image: &PixelBuffer, k: usize) -> Result<PixelBuffer, TransformError> {
    Quantizer::default()
        .quantize(image, k)
        .map(QuantizedImage::into_image)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Quantizer {
        Quantizer::new(QuantizeOptions::new().seed(Some(1234)))
    }

    fn rainbow(width: usize, height: usize) -> PixelBuffer {
        let pixels = (0..width * height)
            .map(|i| {
                let t = i as f32 / (width * height) as f32;
                [
                    (t * 255.0) as u8,
                    ((1.0 - t) * 255.0) as u8,
                    ((t * 6.0).sin().abs() * 255.0) as u8,
                ]
            })
            .collect();
        PixelBuffer::new(width, height, pixels).unwrap()
    }

    #[test]
    fn test_rejects_zero_and_oversized_palettes() {
        let image = rainbow(2, 2);
        assert_eq!(
            seeded().quantize(&image, 0).unwrap_err(),
            TransformError::InvalidPaletteSize {
                requested: 0,
                pixels: 4
            }
        );
        assert_eq!(
            seeded().quantize(&image, 5).unwrap_err(),
            TransformError::InvalidPaletteSize {
                requested: 5,
                pixels: 4
            }
        );
    }

    #[test]
    fn test_palette_bound() {
        let image = rainbow(16, 12);
        for k in [1, 2, 3, 8, 16] {
            let result = seeded().quantize(&image, k).unwrap();
            assert!(result.image().distinct_colors() <= k, "k={k}");
            assert!(result.palette().len() <= k);
            assert_eq!(result.image().width(), 16);
            assert_eq!(result.image().height(), 12);
        }
    }

    #[test]
    fn test_pixels_use_their_labelled_palette_entry() {
        let image = rainbow(10, 10);
        let result = seeded().quantize(&image, 5).unwrap();
        for (px, &label) in result.image().pixels().iter().zip(result.labels()) {
            assert_eq!(*px, result.palette()[label]);
        }
    }

    #[test]
    fn test_few_colors_pass_through() {
        let mut image = PixelBuffer::filled(4, 4, [10, 20, 30]).unwrap();
        image.set(3, 3, [200, 100, 0]);
        let result = seeded().quantize(&image, 3).unwrap();
        assert_eq!(result.image(), &image);
        assert_eq!(result.compactness(), 0.0);
    }

    #[test]
    fn test_seed_makes_output_reproducible() {
        let image = rainbow(12, 12);
        let a = seeded().quantize(&image, 6).unwrap();
        let b = seeded().quantize(&image, 6).unwrap();
        assert_eq!(a.image(), b.image());
    }

    #[test]
    fn test_free_function_respects_bound() {
        let image = rainbow(8, 8);
        let out = quantize(&image, 3).unwrap();
        assert!(out.distinct_colors() <= 3);
    }
}
