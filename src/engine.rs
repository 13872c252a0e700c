use std::path::Path;

use anyhow::Result;
use log::{debug, error, info};

use crate::audio::load_mono;
use crate::bridge::{NativeSettings, SpectralGenerator};
use crate::dsp::apply_high_boost;
use crate::imaging::IntensityMap;
use crate::render::{box_blur, rasterize, write_png, RenderLayout};
use crate::spectrogram::{compute_spectrogram, AnalysisParams, ZERO_PAD_SIZE};

pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILURE: i32 = 1;

const DEFAULT_FFT_SIZE: i32 = 8192;
const DEFAULT_OVERLAP: f64 = 0.85;
const DEFAULT_MIN_FREQ: f64 = 65.0;
const DEFAULT_MAX_FREQ: f64 = 16640.0;
const DEFAULT_DURATION: f64 = 4.0;
const DEFAULT_SAMPLE_RATE: i32 = 192000;
const DEFAULT_DYNAMIC_RANGE_DB: f64 = 60.0;
const DEFAULT_GAMMA_CORRECTION: f64 = 0.8;
const DEFAULT_ENABLE_DITHERING: bool = false;
const DEFAULT_CONTRAST_FACTOR: f64 = 1.9;
const DEFAULT_ENABLE_HIGH_BOOST: bool = true;
const DEFAULT_HIGH_BOOST_ALPHA: f64 = 0.99;

fn default_int(value: i32, default: i32) -> i32 {
    if value > 0 {
        value
    } else {
        default
    }
}

fn default_real(value: f64, default: f64) -> f64 {
    if value > 0.0 {
        value
    } else {
        default
    }
}

fn default_flag(value: i32, default: bool) -> bool {
    match value {
        0 => false,
        1 => true,
        _ => default,
    }
}

/// Settings after zero and out-of-domain values have been replaced by the
/// engine defaults.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedSettings {
    pub fft_size: usize,
    pub overlap: f64,
    pub min_freq: f64,
    pub max_freq: f64,
    pub duration: f64,
    pub sample_rate: u32,
    pub dynamic_range_db: f64,
    pub gamma_correction: f64,
    pub enable_dithering: bool,
    pub contrast_factor: f64,
    pub enable_high_boost: bool,
    pub high_boost_alpha: f64,
}

impl ResolvedSettings {
    pub fn from_native(s: &NativeSettings) -> Self {
        ResolvedSettings {
            fft_size: default_int(s.fft_size, DEFAULT_FFT_SIZE) as usize,
            overlap: default_real(s.overlap, DEFAULT_OVERLAP),
            min_freq: default_real(s.min_freq, DEFAULT_MIN_FREQ),
            max_freq: default_real(s.max_freq, DEFAULT_MAX_FREQ),
            duration: default_real(s.duration, DEFAULT_DURATION),
            sample_rate: default_int(s.sample_rate, DEFAULT_SAMPLE_RATE) as u32,
            dynamic_range_db: default_real(s.dynamic_range_db, DEFAULT_DYNAMIC_RANGE_DB),
            gamma_correction: default_real(s.gamma_correction, DEFAULT_GAMMA_CORRECTION),
            enable_dithering: default_flag(s.enable_dithering, DEFAULT_ENABLE_DITHERING),
            contrast_factor: default_real(s.contrast_factor, DEFAULT_CONTRAST_FACTOR),
            enable_high_boost: default_flag(s.enable_high_boost, DEFAULT_ENABLE_HIGH_BOOST),
            high_boost_alpha: default_real(s.high_boost_alpha, DEFAULT_HIGH_BOOST_ALPHA),
        }
    }

    fn log_summary(&self, input: &Path, output: &Path) {
        info!("spectrogram generation parameters:");
        info!(" - FFT size: {}", self.fft_size);
        info!(" - overlap: {}", self.overlap);
        info!(" - frequency range: {} Hz to {} Hz", self.min_freq, self.max_freq);
        info!(" - duration: {} s", self.duration);
        info!(" - sample rate: {}", self.sample_rate);
        info!(" - dynamic range: {} dB", self.dynamic_range_db);
        info!(" - gamma correction: {}", self.gamma_correction);
        info!(" - dithering: {}", self.enable_dithering);
        info!(" - contrast factor: {}", self.contrast_factor);
        info!(" - high boost: {} (alpha = {})", self.enable_high_boost, self.high_boost_alpha);
        info!(" - input file: {}", input.display());
        info!(" - output file: {}", output.display());
    }
}

#[derive(Clone, Copy, Debug)]
pub struct EngineOptions {
    pub layout: RenderLayout,
    pub padded_size: usize,
    pub blur_radius: Option<u32>,
}

impl Default for EngineOptions {
    fn default() -> Self {
        EngineOptions {
            layout: RenderLayout::default(),
            padded_size: ZERO_PAD_SIZE,
            blur_radius: None,
        }
    }
}

/// Loads `input`, renders its spectrogram and writes it to `output` as PNG.
///
/// `progress` receives values in `[0, 1]`; analysis covers the first 90%.
pub fn generate_png<F>(
    settings: &ResolvedSettings,
    options: &EngineOptions,
    input: &Path,
    output: &Path,
    mut progress: F,
) -> Result<()>
where
    F: FnMut(f32),
{
    settings.log_summary(input, output);

    let mut audio = load_mono(input, settings.duration)?;
    if audio.sample_rate != settings.sample_rate {
        debug!(
            "using file sample rate {} Hz instead of {} Hz",
            audio.sample_rate, settings.sample_rate
        );
    }

    if settings.enable_high_boost {
        debug!("applying high frequency boost (alpha = {:.2})", settings.high_boost_alpha);
        apply_high_boost(&mut audio.samples, settings.high_boost_alpha);
    }

    let params = AnalysisParams {
        fft_size: settings.fft_size,
        padded_size: options.padded_size,
        overlap: settings.overlap,
        min_freq: settings.min_freq,
        max_freq: settings.max_freq,
    };
    let mut spectro = compute_spectrogram(&audio.samples, audio.sample_rate, &params, |p| {
        progress(p * 0.9)
    })?;

    let map = IntensityMap {
        dynamic_range_db: settings.dynamic_range_db,
        gamma_correction: settings.gamma_correction,
        contrast_factor: settings.contrast_factor,
        enable_dithering: settings.enable_dithering,
    };
    map.apply(&mut spectro, &mut rand::thread_rng());

    let mut img = rasterize(&spectro, settings.min_freq, settings.max_freq, &options.layout);
    if let Some(radius) = options.blur_radius {
        box_blur(&mut img, radius);
    }
    progress(0.95);

    write_png(&img, output)?;
    progress(1.0);
    info!("spectrogram PNG generated successfully as {}", output.display());
    Ok(())
}

/// In-process implementation of the generator entry point.
#[derive(Clone, Copy, Debug, Default)]
pub struct Engine {
    pub options: EngineOptions,
}

impl Engine {
    pub fn new(options: EngineOptions) -> Self {
        Engine { options }
    }
}

impl SpectralGenerator for Engine {
    fn generate(&self, settings: &mut NativeSettings, input: &str, output: &str) -> i32 {
        let resolved = ResolvedSettings::from_native(settings);
        match generate_png(&resolved, &self.options, Path::new(input), Path::new(output), |_| {}) {
            Ok(()) => EXIT_SUCCESS,
            Err(e) => {
                error!("spectrogram generation failed: {:#}", e);
                EXIT_FAILURE
            }
        }
    }
}
