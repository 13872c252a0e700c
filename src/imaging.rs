use log::debug;
use rand::Rng;

use crate::spectrogram::Spectrogram;

const EPSILON: f64 = 1e-10;

/// Maps a magnitude to a display level in `[0, 1]` where 1.0 is white and
/// the loudest cell is darkest.
#[derive(Clone, Copy, Debug)]
pub struct IntensityMap {
    pub dynamic_range_db: f64,
    pub gamma_correction: f64,
    pub contrast_factor: f64,
    pub enable_dithering: bool,
}

impl IntensityMap {
    pub fn level<R: Rng + ?Sized>(&self, magnitude: f64, global_max: f64, rng: &mut R) -> f64 {
        let db = 20.0 * (magnitude + EPSILON).log10();
        let max_db = 20.0 * (global_max + EPSILON).log10();
        let min_db = max_db - self.dynamic_range_db;
        let mut intensity = ((db - min_db) / (max_db - min_db)).clamp(0.0, 1.0);

        if self.gamma_correction != 1.0 {
            intensity = intensity.powf(1.0 / self.gamma_correction);
        }

        let mut quantized = (1.0 - intensity) * 255.0;
        if self.enable_dithering {
            quantized += rng.gen::<f64>() - 0.5;
        }
        let level = quantized.clamp(0.0, 255.0) / 255.0;

        ((level - 0.5) * self.contrast_factor + 0.5).clamp(0.0, 1.0)
    }

    /// Replaces every magnitude in `spectro` with its display level.
    pub fn apply<R: Rng + ?Sized>(&self, spectro: &mut Spectrogram, rng: &mut R) {
        debug!(
            "image processing: range {:.2} dB, gamma {:.2}, contrast {:.2}, dithering {}",
            self.dynamic_range_db,
            self.gamma_correction,
            self.contrast_factor,
            if self.enable_dithering { "enabled" } else { "disabled" }
        );
        let global_max = spectro.global_max;
        for w in 0..spectro.num_windows {
            for v in spectro.window_mut(w) {
                *v = self.level(*v, global_max, &mut *rng);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn map(contrast: f64, dither: bool) -> IntensityMap {
        IntensityMap {
            dynamic_range_db: 60.0,
            gamma_correction: 0.8,
            contrast_factor: contrast,
            enable_dithering: dither,
        }
    }

    #[test]
    fn loudest_cell_is_black_and_silence_is_white() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = map(1.9, false);
        assert_eq!(m.level(10.0, 10.0, &mut rng), 0.0);
        assert_eq!(m.level(0.0, 10.0, &mut rng), 1.0);
    }

    #[test]
    fn below_dynamic_range_is_white() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = map(1.0, false);
        // 80 dB below the peak with a 60 dB window.
        assert_eq!(m.level(1e-4, 1.0, &mut rng), 1.0);
    }

    #[test]
    fn unit_contrast_and_gamma_is_linear_in_db() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = IntensityMap {
            dynamic_range_db: 60.0,
            gamma_correction: 1.0,
            contrast_factor: 1.0,
            enable_dithering: false,
        };
        // -30 dB sits halfway through the range.
        let level = m.level(10f64.powf(-1.5), 1.0, &mut rng);
        assert!((level - 0.5).abs() < 1e-6);
    }

    #[test]
    fn gamma_bends_mid_range_toward_white() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = map(1.0, false);
        // -30 dB is intensity 0.5, raised to 1 / 0.8.
        let level = m.level(10f64.powf(-1.5), 1.0, &mut rng);
        assert!((level - (1.0 - 0.5f64.powf(1.25))).abs() < 1e-6);
    }

    #[test]
    fn contrast_stretches_around_mid_gray() {
        let mut rng = StdRng::seed_from_u64(7);
        let m = IntensityMap {
            dynamic_range_db: 60.0,
            gamma_correction: 1.0,
            contrast_factor: 1.9,
            enable_dithering: false,
        };
        let mid = m.level(10f64.powf(-1.5), 1.0, &mut rng);
        assert!((mid - 0.5).abs() < 1e-6);
        // -45 dB: intensity 0.25, level 0.75.
        let light = m.level(10f64.powf(-2.25), 1.0, &mut rng);
        assert!((light - ((0.75 - 0.5) * 1.9 + 0.5)).abs() < 1e-6);
        // -18 dB: intensity 0.7, level 0.3.
        let dark = m.level(10f64.powf(-0.9), 1.0, &mut rng);
        assert!((dark - ((0.3 - 0.5) * 1.9 + 0.5)).abs() < 1e-6);
    }

    #[test]
    fn dithering_stays_within_half_a_step() {
        let mut rng = StdRng::seed_from_u64(42);
        let plain = map(1.0, false).level(0.1, 1.0, &mut rng);
        for _ in 0..100 {
            let d = map(1.0, true).level(0.1, 1.0, &mut rng);
            assert!((d - plain).abs() <= 0.5 / 255.0 + 1e-12);
        }
    }
}
