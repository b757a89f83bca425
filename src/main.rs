use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::EnvFilter;

use vidforge::{
    audio::{MusicPattern, MusicSynthesizer},
    config::Config,
    effects::{EffectSpec, FrameEffectEngine, LookRegistry},
    util::{format_duration, format_file_size},
    video::PixelBuffer,
};

#[derive(Parser)]
#[command(
    name = "vidforge",
    version,
    about = "Apply frame effects and synthesize background music",
    long_about = "VidForge post-processes generated frames with film-style effects and renders procedural background music, ready to hand to a video encoder."
)]
struct Cli {
    /// Configuration file (optional)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Apply an effect chain to an image
    Frame {
        /// Input image (PNG, JPEG)
        #[arg(short, long)]
        input: PathBuf,

        /// Output PNG path
        #[arg(short, long)]
        output: PathBuf,

        /// Named look applied before explicit effects
        #[arg(short, long)]
        look: Option<String>,

        /// Effect such as grain:0.1, vignette:0.5, blur:0.3, grade:cool (repeatable)
        #[arg(short, long = "effect")]
        effects: Vec<EffectSpec>,

        /// Seed for reproducible film grain
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Synthesize background music to a WAV file
    Music {
        /// Music style (ambient, upbeat, cinematic)
        #[arg(short, long, default_value = "ambient")]
        style: String,

        /// Duration in seconds
        #[arg(short, long, default_value_t = 10.0)]
        duration: f64,

        /// Output WAV path
        #[arg(short, long)]
        output: PathBuf,
    },

    /// List built-in looks and music styles
    Looks,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(log_level.into()))
        .init();

    info!("Starting VidForge v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config = match &cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(config_path)?
        }
        None => Config::default(),
    };

    rayon::ThreadPoolBuilder::new()
        .num_threads(config.processing.threads)
        .build_global()
        .context("failed to initialize worker pool")?;

    match cli.command {
        Command::Frame { input, output, look, effects, seed } => {
            run_frame(&config, input, output, look, effects, seed)
        }
        Command::Music { style, duration, output } => run_music(&config, &style, duration, output),
        Command::Looks => {
            let looks = LookRegistry::new();
            println!("Looks:");
            for name in looks.available_looks() {
                let chain: Vec<String> = looks
                    .get(&name)
                    .unwrap_or_default()
                    .iter()
                    .map(ToString::to_string)
                    .collect();
                println!("  {:<10} {}", name, chain.join(" -> "));
            }
            println!("Music styles:");
            for pattern in MusicPattern::all() {
                println!("  {:<10} {:?} Hz, tempo {}", pattern.name, pattern.frequencies, pattern.tempo);
            }
            Ok(())
        }
    }
}

fn run_frame(
    config: &Config,
    input: PathBuf,
    output: PathBuf,
    look: Option<String>,
    effects: Vec<EffectSpec>,
    seed: Option<u64>,
) -> Result<()> {
    let looks = LookRegistry::new();

    // CLI flags take precedence over the config file
    let mut chain = Vec::new();
    if let Some(name) = look.or_else(|| config.effects.look.clone()) {
        let specs = looks
            .get(&name)
            .with_context(|| format!("Unknown look: {} (available: {})", name, looks.available_looks().join(", ")))?;
        info!("Using {} look", name);
        chain.extend_from_slice(specs);
    }
    if effects.is_empty() {
        chain.extend_from_slice(&config.effects.chain);
    } else {
        chain.extend(effects);
    }

    let mut engine = match seed {
        Some(seed) => FrameEffectEngine::with_seed(seed),
        None => FrameEffectEngine::from_config(&config.effects),
    };

    let mut frame = PixelBuffer::open(&input)
        .with_context(|| format!("Could not load image {:?}", input))?;
    info!("Loaded {}x{} frame from {:?}", frame.width(), frame.height(), input);

    engine.apply_chain(&mut frame, &chain)?;
    frame.save_png(&output)?;

    let size = std::fs::metadata(&output).map(|m| m.len()).unwrap_or(0);
    info!("Applied {} effects, saved {} to {:?}", chain.len(), format_file_size(size), output);
    Ok(())
}

fn run_music(config: &Config, style: &str, duration: f64, output: PathBuf) -> Result<()> {
    let synth = MusicSynthesizer::from_config(&config.audio);
    let music = synth.synthesize_music(style, duration)?;
    music.save_wav(&output)?;

    info!(
        "Wrote {} of music (peak {:.3}) to {:?}",
        format_duration(music.duration()),
        music.peak(),
        output
    );
    Ok(())
}
