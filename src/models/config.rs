use pixel_transform::{PixelateMethod, QuantizeOptions};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Default stage parameters (CLI flags override per run)
    #[serde(default)]
    pub pipeline: PipelineConfig,

    /// k-means tuning for color reduction
    #[serde(default)]
    pub clustering: ClusterConfig,

    /// Output file handling
    #[serde(default)]
    pub output: OutputConfig,
}

/// Which stages run and with what parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Block size in pixels
    #[serde(default = "default_pixel_size")]
    pub pixel_size: u32,

    /// "average", "gaussian", or "none" to skip pixelation
    #[serde(default = "default_method")]
    pub method: String,

    /// Palette size; absent or 0 skips color reduction
    #[serde(default)]
    pub colors: Option<usize>,

    /// Apply Floyd-Steinberg dithering after color reduction
    #[serde(default)]
    pub dither: bool,
}

fn default_pixel_size() -> u32 {
    8
}

fn default_method() -> String {
    "average".to_string()
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            pixel_size: default_pixel_size(),
            method: default_method(),
            colors: None,
            dither: false,
        }
    }
}

impl PipelineConfig {
    /// Resolve the method name. `None` means pixelation is switched off.
    pub fn pixelate_method(&self) -> Result<Option<PixelateMethod>, PipelineError> {
        parse_method(&self.method)
    }

    /// Palette size with 0 treated as "off"
    pub fn palette_size(&self) -> Option<usize> {
        self.colors.filter(|&k| k > 0)
    }
}

/// Parse a pixelation method name as used in config and CLI.
///
/// Accepts "none"/"off" to disable the stage.
pub fn parse_method(name: &str) -> Result<Option<PixelateMethod>, PipelineError> {
    let trimmed = name.trim();
    if trimmed.eq_ignore_ascii_case("none") || trimmed.eq_ignore_ascii_case("off") {
        return Ok(None);
    }
    Ok(Some(trimmed.parse()?))
}

/// k-means parameters
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ClusterConfig {
    /// Random restarts; the most compact result wins
    #[serde(default = "default_attempts")]
    pub attempts: u32,

    /// Assign/update rounds per restart
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Stop once no center moves further than this (Oklab units)
    #[serde(default = "default_epsilon")]
    pub epsilon: f32,

    /// Fixed RNG seed for reproducible palettes
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_attempts() -> u32 {
    10
}

fn default_max_iterations() -> u32 {
    20
}

fn default_epsilon() -> f32 {
    0.01
}

impl Default for ClusterConfig {
    fn default() -> Self {
        Self {
            attempts: default_attempts(),
            max_iterations: default_max_iterations(),
            epsilon: default_epsilon(),
            seed: None,
        }
    }
}

impl ClusterConfig {
    pub fn quantize_options(&self) -> QuantizeOptions {
        QuantizeOptions::new()
            .attempts(self.attempts)
            .max_iterations(self.max_iterations)
            .epsilon(self.epsilon)
            .seed(self.seed)
    }
}

/// Output file settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct OutputConfig {
    /// Appended to the input stem when no output path is given
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Re-compress PNG output with oxipng
    #[serde(default)]
    pub optimize: bool,
}

fn default_suffix() -> String {
    "_pixelated".to_string()
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            suffix: default_suffix(),
            optimize: false,
        }
    }
}

impl OutputConfig {
    /// `photo.jpg` -> `photo_pixelated.jpg`, next to the input
    pub fn default_output_path(&self, input: &Path) -> PathBuf {
        let stem = input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let name = match input.extension() {
            Some(ext) => format!("{stem}{}.{}", self.suffix, ext.to_string_lossy()),
            None => format!("{stem}{}.png", self.suffix),
        };
        input.with_file_name(name)
    }
}

impl AppConfig {
    /// Parse configuration from YAML text
    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }

    /// Load configuration from `path`, or from `CONFIG_FILE` when no path
    /// is given. Falls back to defaults if the file can't be read or parsed.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => match std::env::var("CONFIG_FILE") {
                Ok(p) => PathBuf::from(p),
                Err(_) => {
                    tracing::debug!("No config file given, using defaults");
                    return Self::default();
                }
            },
        };

        match std::fs::read_to_string(&path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        pixel_size = config.pipeline.pixel_size,
                        method = %config.pipeline.method,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Render the effective configuration as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }
}
