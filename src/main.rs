use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixelart::models::AppConfig;
use pixelart::services::{PixelArtPipeline, RenderRequest};

#[derive(Parser)]
#[command(name = "pixelart")]
#[command(about = "Turn photos into pixel art: pixelate, reduce colors, dither")]
struct Cli {
    /// Configuration file (overrides CONFIG_FILE)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one image to pixel art
    Render {
        /// Input image (PNG, JPEG, BMP, GIF, TIFF, WebP)
        input: PathBuf,

        /// Output file; defaults to <stem>_pixelated.<ext> next to the input
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Block size in pixels
        #[arg(short, long)]
        pixel_size: Option<u32>,

        /// Pixelation method: "average", "gaussian" or "none"
        #[arg(short, long)]
        method: Option<String>,

        /// Reduce to this many colors (0 disables)
        #[arg(short = 'k', long)]
        colors: Option<usize>,

        /// Apply Floyd-Steinberg dithering
        #[arg(short, long)]
        dither: bool,

        /// Disable dithering even if the config enables it
        #[arg(long, conflicts_with = "dither")]
        no_dither: bool,

        /// Seed for color reduction (reproducible palettes)
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the effective configuration as YAML
    Config,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render {
            input,
            output,
            pixel_size,
            method,
            colors,
            dither,
            no_dither,
            seed,
        }) => {
            let dither = match (dither, no_dither) {
                (true, _) => Some(true),
                (_, true) => Some(false),
                _ => None,
            };
            let request = RenderRequest {
                pixel_size,
                method,
                colors,
                dither,
                seed,
            };
            run_render_command(cli.config.as_deref(), &input, output, &request)
        }
        Some(Commands::Config) => run_config_command(cli.config.as_deref()),
        None => {
            run_status_command(cli.config.as_deref());
            Ok(())
        }
    }
}

fn init_logging() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelart=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();
}

/// Render one image file
fn run_render_command(
    config_path: Option<&Path>,
    input: &Path,
    output: Option<PathBuf>,
    request: &RenderRequest,
) -> anyhow::Result<()> {
    init_logging();

    let config = Arc::new(AppConfig::load(config_path));
    let output = output.unwrap_or_else(|| config.output.default_output_path(input));
    let pipeline = PixelArtPipeline::new(config);

    let summary = pipeline
        .render_file(input, &output, request)
        .with_context(|| format!("Failed to render {}", input.display()))?;

    println!(
        "Rendered {} ({}x{}, {} ms)",
        output.display(),
        summary.width,
        summary.height,
        summary.elapsed_ms
    );
    if let Some(palette) = &summary.palette {
        let hex: Vec<String> = palette
            .iter()
            .map(|[r, g, b]| format!("#{r:02X}{g:02X}{b:02X}"))
            .collect();
        println!("Palette: {}", hex.join(","));
    }

    Ok(())
}

/// Print the merged configuration
fn run_config_command(config_path: Option<&Path>) -> anyhow::Result<()> {
    init_logging();

    let config = AppConfig::load(config_path);
    let yaml = config.to_yaml().context("Failed to serialize configuration")?;
    print!("{yaml}");
    Ok(())
}

fn run_status_command(config_path: Option<&Path>) {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = config_path
        .map(|p| p.display().to_string())
        .or_else(|| std::env::var("CONFIG_FILE").ok());

    println!("Pixelart v{VERSION}");
    println!("Turn photos into pixel art\n");

    println!("Environment Variables:");
    println!(
        "  CONFIG_FILE = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG    = {}",
        std::env::var("RUST_LOG").as_deref().unwrap_or("pixelart=info (default)")
    );

    let config_source = match &config_file {
        Some(path) if Path::new(path).exists() => path.clone(),
        Some(_) => "defaults (file not found)".to_string(),
        None => "defaults".to_string(),
    };
    println!("\nConfig:  {config_source}");

    println!("\nCommands:");
    println!("  pixelart render <input>   Render one image to pixel art");
    println!("  pixelart config           Print the effective configuration");
    println!("\nRun 'pixelart --help' for all options.");
}
