use std::process;

use anyhow::{anyhow, Result};
use clap::Parser;
use log::info;

use sp3ctragen::engine::EngineOptions;
use sp3ctragen::presets::{find, load_presets};
use sp3ctragen::render::BLUR_RADIUS;
use sp3ctragen::{submit, Engine, SettingsForm, Submission};

/// Render a spectrogram PNG from a WAV file.
///
/// Numeric values are taken as typed; anything that does not parse is sent
/// to the engine as 0, which then falls back to its own default.
#[derive(Parser)]
#[command(name = "sp3ctragen-cli")]
struct Cli {
    /// Input WAV file
    #[arg(short, long, default_value = "")]
    input: String,

    /// Folder that receives spectrogram.png
    #[arg(short, long = "output-dir", default_value = "")]
    output_dir: String,

    /// Start from a preset stored in ./presets.json
    #[arg(long)]
    preset: Option<String>,

    #[arg(long)]
    fft_size: Option<String>,
    #[arg(long)]
    overlap: Option<String>,
    #[arg(long)]
    min_freq: Option<String>,
    #[arg(long)]
    max_freq: Option<String>,
    #[arg(long)]
    duration: Option<String>,
    #[arg(long)]
    sample_rate: Option<String>,
    #[arg(long)]
    dynamic_range_db: Option<String>,
    #[arg(long)]
    gamma_correction: Option<String>,
    #[arg(long)]
    contrast_factor: Option<String>,
    #[arg(long)]
    high_boost_alpha: Option<String>,

    #[arg(long)]
    dither: bool,
    #[arg(long, conflicts_with = "dither")]
    no_dither: bool,
    #[arg(long)]
    high_boost: bool,
    #[arg(long, conflicts_with = "high_boost")]
    no_high_boost: bool,

    /// Smooth the rendered image with a box blur
    #[arg(long)]
    blur: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_env(env_logger::Env::default())
        .filter_level(level)
        .init();
}

fn build_form(cli: &Cli) -> Result<SettingsForm> {
    let mut form = match &cli.preset {
        Some(name) => {
            let presets = load_presets()?;
            find(&presets, name)
                .map(|p| p.form.clone())
                .ok_or_else(|| anyhow!("unknown preset: {}", name))?
        }
        None => SettingsForm::default(),
    };

    let text_fields = [
        (&cli.fft_size, &mut form.fft_size),
        (&cli.overlap, &mut form.overlap),
        (&cli.min_freq, &mut form.min_freq),
        (&cli.max_freq, &mut form.max_freq),
        (&cli.duration, &mut form.duration),
        (&cli.sample_rate, &mut form.sample_rate),
        (&cli.dynamic_range_db, &mut form.dynamic_range_db),
        (&cli.gamma_correction, &mut form.gamma_correction),
        (&cli.contrast_factor, &mut form.contrast_factor),
        (&cli.high_boost_alpha, &mut form.high_boost_alpha),
    ];
    for (arg, field) in text_fields {
        if let Some(v) = arg {
            *field = v.clone();
        }
    }

    if cli.dither {
        form.enable_dithering = true;
    } else if cli.no_dither {
        form.enable_dithering = false;
    }
    if cli.high_boost {
        form.enable_high_boost = true;
    } else if cli.no_high_boost {
        form.enable_high_boost = false;
    }

    if !cli.input.is_empty() {
        form.input_file = cli.input.clone();
    }
    if !cli.output_dir.is_empty() {
        form.output_folder = cli.output_dir.clone();
    }

    Ok(form)
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let form = build_form(&cli)?;

    let engine = Engine::new(EngineOptions {
        blur_radius: cli.blur.then_some(BLUR_RADIUS),
        ..EngineOptions::default()
    });

    match submit(&engine, &form) {
        Submission::Skipped => {
            info!("input file or output folder missing; nothing generated");
            Ok(())
        }
        Submission::Completed(path) => {
            info!("done");
            println!("{}", path.display());
            Ok(())
        }
        Submission::Failed(e) => {
            eprintln!("Error generating spectrogram. Return code: {}", e.code());
            process::exit(1);
        }
    }
}
