use serde::{Deserialize, Serialize};

/// Parameters for one spectrogram generation.
///
/// Built fresh from the form for every request and dropped once the
/// generator returns. Values are not range-checked here.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpectrogramSettings {
    pub fft_size: i32,
    pub overlap: f64,
    pub min_freq: f64,
    pub max_freq: f64,
    pub duration: f64,
    pub sample_rate: i32,
    pub dynamic_range_db: f64,
    pub gamma_correction: f64,
    pub enable_dithering: bool,
    pub contrast_factor: f64,
    pub enable_high_boost: bool,
    pub high_boost_alpha: f64,
}
