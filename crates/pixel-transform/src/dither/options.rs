//! Dithering options.

use super::kernel::{Kernel, FLOYD_STEINBERG};

/// Configuration for the error diffusion sweep.
///
/// The defaults reproduce the classic pixel-art look: Floyd-Steinberg
/// weights and a quantization step of 32, i.e. eight levels per channel.
///
/// ```
/// use pixel_transform::DitherOptions;
///
/// let options = DitherOptions::new();
/// assert_eq!(options.step, 32);
/// assert_eq!(options.quantize(47.0), 32.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DitherOptions {
    /// Channel values snap to the nearest multiple of this step.
    ///
    /// Default: `32`
    pub step: u8,

    /// Diffusion weights.
    ///
    /// Default: [`FLOYD_STEINBERG`]
    pub kernel: Kernel,
}

impl Default for DitherOptions {
    fn default() -> Self {
        Self {
            step: 32,
            kernel: FLOYD_STEINBERG,
        }
    }
}

impl DitherOptions {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quantization step. Zero is treated as 1.
    #[inline]
    pub fn step(mut self, step: u8) -> Self {
        self.step = step.max(1);
        self
    }

    #[inline]
    pub fn kernel(mut self, kernel: Kernel) -> Self {
        self.kernel = kernel;
        self
    }

    /// Snap a channel value to the nearest multiple of the step.
    ///
    /// Halfway values round to the even multiple, so `16.0` becomes `0.0`
    /// and `48.0` becomes `64.0`. The result is not clamped: `255.0` snaps
    /// to `256.0` and is only brought back into range when the sweep ends.
    #[inline]
    pub fn quantize(&self, value: f32) -> f32 {
        let step = self.step.max(1) as f32;
        (value / step).round_ties_even() * step
    }
}
