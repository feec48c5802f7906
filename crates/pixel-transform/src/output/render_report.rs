//! RenderReport: what a full [`PixelArtist`](crate::PixelArtist) run produced.

use crate::buffer::PixelBuffer;

/// Output of [`PixelArtist::render_report`](crate::PixelArtist::render_report).
///
/// Color fields are `None` when color reduction was disabled.
#[derive(Debug, Clone)]
pub struct RenderReport {
    pub(crate) image: PixelBuffer,
    pub(crate) requested_colors: Option<usize>,
    pub(crate) colors: Option<usize>,
    pub(crate) palette: Option<Vec<[u8; 3]>>,
    pub(crate) compactness: Option<f64>,
    pub(crate) iterations: Option<u32>,
}

impl RenderReport {
    pub(crate) fn new(image: PixelBuffer) -> Self {
        Self {
            image,
            requested_colors: None,
            colors: None,
            palette: None,
            compactness: None,
            iterations: None,
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

    /// Palette size asked for.
    #[inline]
    pub fn requested_colors(&self) -> Option<usize> {
        self.requested_colors
    }

    /// Palette size the quantizer ran with, after clamping to the pixel count.
    #[inline]
    pub fn colors(&self) -> Option<usize> {
        self.colors
    }

    /// Whether the requested palette was larger than the image.
    pub fn palette_clamped(&self) -> bool {
        matches!((self.requested_colors, self.colors), (Some(r), Some(k)) if k < r)
    }

    /// Palette from color reduction, before dithering.
    #[inline]
    pub fn palette(&self) -> Option<&[[u8; 3]]> {
        self.palette.as_deref()
    }

    #[inline]
    pub fn compactness(&self) -> Option<f64> {
        self.compactness
    }

    #[inline]
    pub fn iterations(&self) -> Option<u32> {
        self.iterations
    }
}
