use std::os::raw::{c_double, c_int};
use std::path::PathBuf;

use log::{error, info};
use thiserror::Error;

use crate::fields::SettingsForm;
use crate::paths::resolve_request;
use crate::settings::SpectrogramSettings;

/// Settings record as laid out by the native generator. Field order and
/// widths must not change.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NativeSettings {
    pub fft_size: c_int,
    pub overlap: c_double,
    pub min_freq: c_double,
    pub max_freq: c_double,
    pub duration: c_double,
    pub sample_rate: c_int,
    pub dynamic_range_db: c_double,
    pub gamma_correction: c_double,
    pub enable_dithering: c_int,
    pub contrast_factor: c_double,
    pub enable_high_boost: c_int,
    pub high_boost_alpha: c_double,
}

impl From<&SpectrogramSettings> for NativeSettings {
    fn from(s: &SpectrogramSettings) -> Self {
        NativeSettings {
            fft_size: s.fft_size,
            overlap: s.overlap,
            min_freq: s.min_freq,
            max_freq: s.max_freq,
            duration: s.duration,
            sample_rate: s.sample_rate,
            dynamic_range_db: s.dynamic_range_db,
            gamma_correction: s.gamma_correction,
            enable_dithering: c_int::from(s.enable_dithering),
            contrast_factor: s.contrast_factor,
            enable_high_boost: c_int::from(s.enable_high_boost),
            high_boost_alpha: s.high_boost_alpha,
        }
    }
}

/// Single blocking entry point of a spectrogram engine. Returns `0` on
/// success; any other value is an engine-specific failure code.
pub trait SpectralGenerator {
    fn generate(&self, settings: &mut NativeSettings, input: &str, output: &str) -> i32;
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GenerationError {
    #[error("spectrogram generator returned code {code}")]
    Native { code: i32 },
}

impl GenerationError {
    pub fn code(&self) -> i32 {
        match self {
            GenerationError::Native { code } => *code,
        }
    }
}

pub fn classify(code: i32) -> Result<(), GenerationError> {
    if code == 0 {
        Ok(())
    } else {
        Err(GenerationError::Native { code })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    /// Input file or output folder was empty; the generator was not called.
    Skipped,
    Completed(PathBuf),
    Failed(GenerationError),
}

/// Runs one "Generate" press: resolve paths, parse the form, call the
/// generator once and classify its return code.
pub fn submit<G: SpectralGenerator + ?Sized>(generator: &G, form: &SettingsForm) -> Submission {
    let request = match resolve_request(&form.input_file, &form.output_folder) {
        Some(r) => r,
        None => return Submission::Skipped,
    };

    let settings = form.to_settings();
    let mut native = NativeSettings::from(&settings);
    let input = request.input.to_string_lossy();
    let output = request.output.to_string_lossy();

    let code = generator.generate(&mut native, &input, &output);

    match classify(code) {
        Ok(()) => {
            info!("Spectrogram generated successfully at: {}", request.output.display());
            Submission::Completed(request.output)
        }
        Err(e) => {
            error!("Error generating spectrogram. Return code: {}", e.code());
            Submission::Failed(e)
        }
    }
}
