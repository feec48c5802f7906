//! PixelArtist builder, the one-call entry point for the whole chain.

use crate::buffer::PixelBuffer;
use crate::dither::{dither_with_options, DitherOptions};
use crate::output::RenderReport;
use crate::pixelate::{pixelate, PixelateMethod};
use crate::quantize::{QuantizeOptions, Quantizer};

use super::TransformError;

/// Runs pixelate, quantize and dither in that order, each stage optional.
///
/// A fresh builder does nothing: [`render`](Self::render) returns a copy of
/// its input. Configuration methods consume and return `self`; `render`
/// takes `&self` so one builder can process many images.
///
/// A palette larger than the image is clamped to the pixel count.
/// [`render_report`](Self::render_report) tells when that happened.
///
/// # Example
///
/// ```
/// use pixel_transform::{PixelArtist, PixelBuffer, PixelateMethod};
///
/// let pixels = (0..256u32).map(|i| [i as u8, (i * 3) as u8, 200]).collect();
/// let image = PixelBuffer::new(16, 16, pixels).unwrap();
///
/// let artist = PixelArtist::new()
///     .pixelate(4, PixelateMethod::Average)
///     .colors(4)
///     .seed(7);
///
/// let out = artist.render(&image).unwrap();
/// assert_eq!((out.width(), out.height()), (16, 16));
/// assert!(out.distinct_colors() <= 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PixelArtist {
    pixelate: Option<(u32, PixelateMethod)>,
    colors: Option<usize>,
    quantize_opts: QuantizeOptions,
    dither_opts: Option<DitherOptions>,
}

impl PixelArtist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable pixelation with the given block size and method.
    #[inline]
    pub fn pixelate(mut self, block_size: u32, method: PixelateMethod) -> Self {
        self.pixelate = Some((block_size, method));
        self
    }

    /// Reduce to at most `k` colors. `0` disables the stage.
    #[inline]
    pub fn colors(mut self, k: usize) -> Self {
        self.colors = (k > 0).then_some(k);
        self
    }

    /// Replace the clustering options wholesale.
    #[inline]
    pub fn quantize_options(mut self, options: QuantizeOptions) -> Self {
        self.quantize_opts = options;
        self
    }

    /// Seed the clustering RNG.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.quantize_opts = self.quantize_opts.seed(Some(seed));
        self
    }

    /// Toggle Floyd-Steinberg dithering with default options.
    #[inline]
    pub fn dither(mut self, enabled: bool) -> Self {
        self.dither_opts = enabled.then(DitherOptions::default);
        self
    }

    /// Enable dithering with explicit options.
    #[inline]
    pub fn dither_options(mut self, options: DitherOptions) -> Self {
        self.dither_opts = Some(options);
        self
    }

    /// Whether any stage is enabled.
    pub fn is_noop(&self) -> bool {
        self.pixelate.is_none() && self.colors.is_none() && self.dither_opts.is_none()
    }

    /// Run the enabled stages over `image`.
    pub fn render(&self, image: &PixelBuffer) -> Result<PixelBuffer, TransformError> {
        self.render_report(image).map(RenderReport::into_image)
    }

    /// Run the enabled stages and keep the color reduction details.
    pub fn render_report(&self, image: &PixelBuffer) -> Result<RenderReport, TransformError> {
        let current = match self.pixelate {
            Some((block_size, method)) => pixelate(image, block_size, method)?,
            None => image.clone(),
        };
        let mut report = RenderReport::new(current);

        if let Some(requested) = self.colors {
            let k = requested.min(report.image.len());
            let quantizer = Quantizer::new(self.quantize_opts.clone());
            let result = quantizer.quantize(&report.image, k)?;

            report.requested_colors = Some(requested);
            report.colors = Some(k);
            report.palette = Some(result.palette().to_vec());
            report.compactness = Some(result.compactness());
            report.iterations = Some(result.iterations());
            report.image = result.into_image();
        }

        if let Some(options) = &self.dither_opts {
            report.image = dither_with_options(&report.image, options);
        }

        Ok(report)
    }
}
