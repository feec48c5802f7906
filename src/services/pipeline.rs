use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use pixel_transform::{PixelArtist, PixelBuffer, PixelateMethod, QuantizeOptions, TransformError};

use crate::error::PipelineError;
use crate::models::config::parse_method;
use crate::models::AppConfig;
use crate::services::codec;

/// Per-run overrides; `None` falls back to the loaded configuration.
#[derive(Debug, Clone, Default)]
pub struct RenderRequest {
    pub pixel_size: Option<u32>,
    pub method: Option<String>,
    pub colors: Option<usize>,
    pub dither: Option<bool>,
    pub seed: Option<u64>,
}

/// Stage parameters after merging a request with the configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StagePlan {
    pub pixelate: Option<(u32, PixelateMethod)>,
    pub colors: Option<usize>,
    pub dither: bool,
    pub quantize: QuantizeOptions,
}

impl StagePlan {
    /// Core builder configured with this plan's stages
    pub fn artist(&self) -> PixelArtist {
        let mut artist = PixelArtist::new()
            .quantize_options(self.quantize.clone())
            .dither(self.dither);
        if let Some((block_size, method)) = self.pixelate {
            artist = artist.pixelate(block_size, method);
        }
        if let Some(k) = self.colors {
            artist = artist.colors(k);
        }
        artist
    }
}

/// What a render did, for logging and CLI output
#[derive(Debug, Clone)]
pub struct RenderSummary {
    pub width: usize,
    pub height: usize,
    pub plan: StagePlan,
    /// Palette actually produced by color reduction
    pub palette: Option<Vec<[u8; 3]>>,
    pub compactness: Option<f64>,
    pub elapsed_ms: u128,
}

/// Runs pixelate -> quantize -> dither over decoded images
pub struct PixelArtPipeline {
    config: Arc<AppConfig>,
}

impl PixelArtPipeline {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Merge `request` over the configured defaults and validate the result
    pub fn plan(&self, request: &RenderRequest) -> Result<StagePlan, PipelineError> {
        let defaults = &self.config.pipeline;

        let method = match &request.method {
            Some(name) => parse_method(name)?,
            None => defaults.pixelate_method()?,
        };
        let pixel_size = request.pixel_size.unwrap_or(defaults.pixel_size);
        let pixelate = match method {
            Some(_) if pixel_size == 0 => return Err(TransformError::InvalidBlockSize.into()),
            Some(m) => Some((pixel_size, m)),
            None => None,
        };

        let colors = match request.colors {
            Some(k) => (k > 0).then_some(k),
            None => defaults.palette_size(),
        };

        let mut quantize = self.config.clustering.quantize_options();
        if request.seed.is_some() {
            quantize = quantize.seed(request.seed);
        }

        Ok(StagePlan {
            pixelate,
            colors,
            dither: request.dither.unwrap_or(defaults.dither),
            quantize,
        })
    }

    /// Run the planned stages over an in-memory image
    pub fn process(
        &self,
        image: &PixelBuffer,
        request: &RenderRequest,
    ) -> Result<(PixelBuffer, RenderSummary), PipelineError> {
        let plan = self.plan(request)?;
        let start = Instant::now();

        let report = plan.artist().render_report(image)?;
        if report.palette_clamped() {
            tracing::warn!(
                requested = report.requested_colors(),
                pixels = image.len(),
                "Palette larger than image, clamping to pixel count"
            );
        }
        if let Some(colors) = report.colors() {
            tracing::debug!(
                colors,
                compactness = report.compactness(),
                iterations = report.iterations(),
                "Reduced colors"
            );
        }

        let summary = RenderSummary {
            width: image.width(),
            height: image.height(),
            plan,
            palette: report.palette().map(<[_]>::to_vec),
            compactness: report.compactness(),
            elapsed_ms: start.elapsed().as_millis(),
        };
        Ok((report.into_image(), summary))
    }

    /// Decode `input`, process it and write the result to `output`
    pub fn render_file(
        &self,
        input: &Path,
        output: &Path,
        request: &RenderRequest,
    ) -> Result<RenderSummary, PipelineError> {
        let span = tracing::info_span!("render", input = %input.display());
        let _guard = span.enter();

        let image = codec::decode_file(input)?;
        tracing::debug!(width = image.width(), height = image.height(), "Decoded input");

        let (result, summary) = self.process(&image, request)?;
        let bytes = codec::write_file(output, &result, self.config.output.optimize)?;

        tracing::info!(
            output = %output.display(),
            width = summary.width,
            height = summary.height,
            block_size = summary.plan.pixelate.map(|(b, _)| b),
            colors = summary.plan.colors,
            dither = summary.plan.dither,
            bytes,
            elapsed_ms = summary.elapsed_ms,
            "Rendered image"
        );
        Ok(summary)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pipeline_with(config: AppConfig) -> PixelArtPipeline {
        PixelArtPipeline::new(Arc::new(config))
    }

    #[test]
    fn test_plan_uses_config_defaults() {
        let pipeline = pipeline_with(AppConfig::default());
        let plan = pipeline.plan(&RenderRequest::default()).unwrap();

        assert_eq!(plan.pixelate, Some((8, PixelateMethod::Average)));
        assert_eq!(plan.colors, None);
        assert!(!plan.dither);
        assert_eq!(plan.quantize, QuantizeOptions::default());
    }

    #[test]
    fn test_plan_request_overrides() {
        let pipeline = pipeline_with(AppConfig::default());
        let request = RenderRequest {
            pixel_size: Some(4),
            method: Some("gaussian".to_string()),
            colors: Some(16),
            dither: Some(true),
            seed: Some(3),
        };
        let plan = pipeline.plan(&request).unwrap();

        assert_eq!(plan.pixelate, Some((4, PixelateMethod::Gaussian)));
        assert_eq!(plan.colors, Some(16));
        assert!(plan.dither);
        assert_eq!(plan.quantize.seed, Some(3));
    }

    #[test]
    fn test_plan_rejects_unknown_method() {
        let pipeline = pipeline_with(AppConfig::default());
        let request = RenderRequest {
            method: Some("median".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            pipeline.plan(&request),
            Err(PipelineError::UnsupportedMethod(_))
        ));
    }

    #[test]
    fn test_plan_rejects_zero_pixel_size() {
        let pipeline = pipeline_with(AppConfig::default());
        let request = RenderRequest {
            pixel_size: Some(0),
            ..Default::default()
        };
        assert!(matches!(
            pipeline.plan(&request),
            Err(PipelineError::Transform(TransformError::InvalidBlockSize))
        ));
    }

    #[test]
    fn test_plan_zero_size_allowed_when_pixelation_off() {
        let pipeline = pipeline_with(AppConfig::default());
        let request = RenderRequest {
            pixel_size: Some(0),
            method: Some("none".to_string()),
            ..Default::default()
        };
        assert_eq!(pipeline.plan(&request).unwrap().pixelate, None);
    }

    #[test]
    fn test_plan_zero_colors_disables_reduction() {
        let mut config = AppConfig::default();
        config.pipeline.colors = Some(8);
        let pipeline = pipeline_with(config);
        let request = RenderRequest {
            colors: Some(0),
            ..Default::default()
        };
        assert_eq!(pipeline.plan(&request).unwrap().colors, None);
    }

    #[test]
    fn test_process_clamps_palette_to_pixel_count() {
        let pipeline = pipeline_with(AppConfig::default());
        let pixels = vec![[10, 20, 30], [200, 100, 0], [0, 255, 0], [9, 9, 9]];
        let image = PixelBuffer::new(2, 2, pixels).unwrap();
        let request = RenderRequest {
            method: Some("none".to_string()),
            colors: Some(64),
            seed: Some(1),
            ..Default::default()
        };

        let (out, summary) = pipeline.process(&image, &request).unwrap();
        assert_eq!(out, image);
        assert_eq!(summary.palette.map(|p| p.len()), Some(4));

        let direct = PixelArtist::new().colors(64).seed(1).render(&image).unwrap();
        assert_eq!(out, direct);
    }

    #[test]
    fn test_process_matches_core_builder() {
        let pipeline = pipeline_with(AppConfig::default());
        let pixels = (0..96u32).map(|i| [(i * 37 % 256) as u8, (i * 11) as u8, 90]).collect();
        let image = PixelBuffer::new(12, 8, pixels).unwrap();
        let request = RenderRequest {
            pixel_size: Some(3),
            method: Some("gaussian".to_string()),
            colors: Some(500),
            dither: Some(true),
            seed: Some(9),
        };

        let (out, summary) = pipeline.process(&image, &request).unwrap();
        let report = PixelArtist::new()
            .pixelate(3, PixelateMethod::Gaussian)
            .colors(500)
            .quantize_options(QuantizeOptions::default())
            .seed(9)
            .dither(true)
            .render_report(&image)
            .unwrap();

        assert_eq!(&out, report.image());
        assert_eq!(summary.palette.as_deref(), report.palette());
        assert_eq!(report.colors(), Some(96));
    }

    #[test]
    fn test_process_noop_returns_copy() {
        let pipeline = pipeline_with(AppConfig::default());
        let image = PixelBuffer::filled(3, 3, [1, 2, 3]).unwrap();
        let request = RenderRequest {
            method: Some("none".to_string()),
            ..Default::default()
        };
        let (out, summary) = pipeline.process(&image, &request).unwrap();
        assert_eq!(out, image);
        assert!(summary.palette.is_none());
        assert_eq!((summary.width, summary.height), (3, 3));
    }
}
