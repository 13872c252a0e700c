use serde::{Deserialize, Serialize};

use crate::settings::SpectrogramSettings;

/// Integer form field. Anything that is not an `i32` reads as `0`.
pub fn parse_int_field(text: &str) -> i32 {
    text.trim().parse::<i32>().unwrap_or(0)
}

/// Real form field. Anything that is not an `f64` reads as `0.0`.
pub fn parse_real_field(text: &str) -> f64 {
    text.trim().parse::<f64>().unwrap_or(0.0)
}

/// Editable state of the settings panel: every numeric parameter is kept as
/// the text the user typed and only parsed when a generation is requested.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub fft_size: String,
    pub overlap: String,
    pub min_freq: String,
    pub max_freq: String,
    pub duration: String,
    pub sample_rate: String,
    pub dynamic_range_db: String,
    pub gamma_correction: String,
    pub enable_dithering: bool,
    pub contrast_factor: String,
    pub enable_high_boost: bool,
    pub high_boost_alpha: String,
    #[serde(default)]
    pub input_file: String,
    #[serde(default)]
    pub output_folder: String,
}

impl Default for SettingsForm {
    fn default() -> Self {
        SettingsForm {
            fft_size: "8192".to_string(),
            overlap: "0.85".to_string(),
            min_freq: "65".to_string(),
            max_freq: "16640".to_string(),
            duration: "4.0".to_string(),
            sample_rate: "192000".to_string(),
            dynamic_range_db: "60.0".to_string(),
            gamma_correction: "0.8".to_string(),
            enable_dithering: false,
            contrast_factor: "1.9".to_string(),
            enable_high_boost: true,
            high_boost_alpha: "0.99".to_string(),
            input_file: String::new(),
            output_folder: String::new(),
        }
    }
}

impl SettingsForm {
    pub fn to_settings(&self) -> SpectrogramSettings {
        SpectrogramSettings {
            fft_size: parse_int_field(&self.fft_size),
            overlap: parse_real_field(&self.overlap),
            min_freq: parse_real_field(&self.min_freq),
            max_freq: parse_real_field(&self.max_freq),
            duration: parse_real_field(&self.duration),
            sample_rate: parse_int_field(&self.sample_rate),
            dynamic_range_db: parse_real_field(&self.dynamic_range_db),
            gamma_correction: parse_real_field(&self.gamma_correction),
            enable_dithering: self.enable_dithering,
            contrast_factor: parse_real_field(&self.contrast_factor),
            enable_high_boost: self.enable_high_boost,
            high_boost_alpha: parse_real_field(&self.high_boost_alpha),
        }
    }
}
