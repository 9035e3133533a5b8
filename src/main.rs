use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use pixel_art::{ConvertOptions, PalettePreset};
use pixelizer::models::AppConfig;
use pixelizer::services::{convert_file, process_message_file, OutputSize, PixelArtWorker};

#[derive(Parser)]
#[command(name = "pixelizer")]
#[command(about = "Turn PNG images into grid-quantized pixel art")]
struct Cli {
    /// YAML file with conversion profiles (defaults to $PIXELIZER_CONFIG)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a PNG file to pixel art
    Convert {
        /// Input PNG file
        input: PathBuf,

        /// Output PNG file
        output: PathBuf,

        /// Profile from the config file (defaults to its default_profile)
        #[arg(short, long)]
        profile: Option<String>,

        /// JSON settings file replacing the profile's options
        #[arg(long)]
        settings: Option<PathBuf>,

        #[command(flatten)]
        overrides: OptionOverrides,

        #[command(flatten)]
        size: SizeArgs,

        /// Re-compress the output PNG with oxipng
        #[arg(long)]
        optimize: bool,
    },
    /// List the built-in palette presets
    Presets,
    /// Run a raw PROCESS_PIXEL_ART JSON message
    Process {
        /// Request message (JSON)
        request: PathBuf,

        /// Where to write the PROCESS_PIXEL_ART_DONE message (JSON)
        response: PathBuf,
    },
}

/// Per-option overrides applied on top of the profile or settings file.
#[derive(Args)]
struct OptionOverrides {
    /// Maximum working-grid side (the usual choices are 100 and 250)
    #[arg(long)]
    grid: Option<usize>,

    /// Number of colors extracted in auto mode (2-24)
    #[arg(long)]
    palette_size: Option<usize>,

    /// Palette preset: auto, portrait_warm, retro_comic, pico8, nes, gameboy, muted_pastel
    #[arg(long)]
    preset: Option<PalettePreset>,

    /// Enable palette smoothing
    #[arg(long, overrides_with = "no_smooth")]
    smooth: bool,

    /// Disable palette smoothing
    #[arg(long, overrides_with = "smooth")]
    no_smooth: bool,

    /// Enable polished-portrait mode
    #[arg(long, overrides_with = "no_portrait")]
    portrait: bool,

    /// Disable polished-portrait mode
    #[arg(long, overrides_with = "portrait")]
    no_portrait: bool,

    /// Ordered-dither strength (0.0-0.35)
    #[arg(long)]
    dither: Option<f64>,

    /// Enable outlines
    #[arg(long, overrides_with = "no_edges")]
    edges: bool,

    /// Disable outlines
    #[arg(long, overrides_with = "edges")]
    no_edges: bool,

    /// Outline contrast threshold (0.0-1.0)
    #[arg(long)]
    edge_threshold: Option<f64>,
}

impl OptionOverrides {
    fn apply(&self, mut options: ConvertOptions) -> ConvertOptions {
        if let Some(grid) = self.grid {
            options.grid_max = grid;
        }
        if let Some(size) = self.palette_size {
            options.palette_size = size;
        }
        if let Some(preset) = self.preset {
            options.palette_preset = preset;
        }
        if let Some(smooth) = switch(self.smooth, self.no_smooth) {
            options.palette_smoothing = smooth;
        }
        if let Some(portrait) = switch(self.portrait, self.no_portrait) {
            options.polished_portrait = portrait;
        }
        if let Some(dither) = self.dither {
            options.dither_strength = dither;
        }
        if let Some(edges) = switch(self.edges, self.no_edges) {
            options.edge_enabled = edges;
        }
        if let Some(threshold) = self.edge_threshold {
            options.edge_threshold = threshold;
        }
        options
    }
}

fn switch(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

#[derive(Args)]
struct SizeArgs {
    /// Output size as a multiple of the input size
    #[arg(long, conflicts_with_all = ["width", "height"])]
    scale: Option<usize>,

    /// Output width (height follows the aspect ratio unless given)
    #[arg(long)]
    width: Option<usize>,

    /// Output height (width follows the aspect ratio unless given)
    #[arg(long)]
    height: Option<usize>,
}

impl SizeArgs {
    fn output_size(&self) -> OutputSize {
        match (self.scale, self.width, self.height) {
            (Some(factor), _, _) => OutputSize::Scale(factor),
            (None, Some(width), Some(height)) => OutputSize::Exact { width, height },
            (None, Some(width), None) => OutputSize::Width(width),
            (None, None, Some(height)) => OutputSize::Height(height),
            (None, None, None) => OutputSize::Source,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Minimal logging for CLI
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "pixelizer=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().without_time())
        .init();

    match cli.command {
        Commands::Convert {
            input,
            output,
            profile,
            settings,
            overrides,
            size,
            optimize,
        } => {
            let config_path = AppConfig::config_path(cli.config);
            let config = AppConfig::load(config_path.as_deref());
            let options = match settings {
                Some(path) => load_settings(&path)?,
                None => config.profile(profile.as_deref())?,
            };
            let options = overrides.apply(options);
            run_convert(&input, &output, options, size.output_size(), optimize).await
        }
        Commands::Presets => {
            run_presets_command();
            Ok(())
        }
        Commands::Process { request, response } => run_process(&request, &response).await,
    }
}

fn load_settings(path: &Path) -> anyhow::Result<ConvertOptions> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read settings file {}", path.display()))?;
    let options = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse settings file {}", path.display()))?;
    Ok(options)
}

async fn run_convert(
    input: &Path,
    output: &Path,
    options: ConvertOptions,
    size: OutputSize,
    optimize: bool,
) -> anyhow::Result<()> {
    let mut worker = PixelArtWorker::spawn()?;
    let report = convert_file(&mut worker, input, output, options, size, optimize)
        .await
        .with_context(|| format!("Failed to convert {}", input.display()))?;

    tracing::info!(
        output = %output.display(),
        width = report.width,
        height = report.height,
        bytes = report.bytes,
        "Wrote pixel art"
    );
    println!(
        "{} -> {} ({}x{}, {} bytes)",
        input.display(),
        output.display(),
        report.width,
        report.height,
        report.bytes
    );
    Ok(())
}

async fn run_process(request: &Path, response: &Path) -> anyhow::Result<()> {
    let mut worker = PixelArtWorker::spawn()?;
    let (width, height) = process_message_file(&mut worker, request, response)
        .await
        .with_context(|| format!("Failed to process {}", request.display()))?;

    tracing::info!(
        response = %response.display(),
        width,
        height,
        "Wrote response message"
    );
    Ok(())
}

fn run_presets_command() {
    println!("Palette presets:");
    for preset in PalettePreset::ALL {
        match preset.colors() {
            Some(colors) => {
                let hex: Vec<String> = colors.iter().map(ToString::to_string).collect();
                println!(
                    "  {:<14} {:>2} colors  {}",
                    preset.name(),
                    colors.len(),
                    hex.join(" ")
                );
            }
            None => println!("  {:<14} extracted from the image", preset.name()),
        }
    }
}
