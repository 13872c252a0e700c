use anyhow::{anyhow, Result};
use log::{debug, info, warn};
use rustfft::{num_complex::Complex, FftPlanner};

use crate::dsp::apply_hann_window;

/// Every analysis window is zero-padded to this length before the FFT.
pub const ZERO_PAD_SIZE: usize = 65535;

/// Magnitude matrix restricted to the requested frequency range.
///
/// `data` is row-major by window and holds `index_max - index_min + 1`
/// magnitudes per window. `global_max` is taken over every bin, including
/// those outside the range.
pub struct Spectrogram {
    pub data: Vec<f64>,
    pub num_windows: usize,
    pub num_bins: usize,
    pub index_min: usize,
    pub index_max: usize,
    pub freq_resolution: f64,
    pub global_max: f64,
}

impl Spectrogram {
    pub fn bins_in_range(&self) -> usize {
        self.index_max - self.index_min + 1
    }

    /// Magnitude of absolute bin `bin` in window `window`.
    pub fn magnitude(&self, window: usize, bin: usize) -> f64 {
        self.window(window)[bin - self.index_min]
    }

    pub fn window(&self, window: usize) -> &[f64] {
        let width = self.bins_in_range();
        &self.data[window * width..(window + 1) * width]
    }

    pub fn window_mut(&mut self, window: usize) -> &mut [f64] {
        let width = self.bins_in_range();
        &mut self.data[window * width..(window + 1) * width]
    }
}

#[derive(Clone, Copy, Debug)]
pub struct AnalysisParams {
    pub fft_size: usize,
    pub padded_size: usize,
    pub overlap: f64,
    pub min_freq: f64,
    pub max_freq: f64,
}

pub fn hop_size(fft_size: usize, overlap: f64) -> usize {
    let step = (fft_size as f64 * (1.0 - overlap)).floor();
    if step < 1.0 {
        1
    } else {
        step as usize
    }
}

pub fn compute_spectrogram<F>(
    signal: &[f64],
    sample_rate: u32,
    params: &AnalysisParams,
    mut progress: F,
) -> Result<Spectrogram>
where
    F: FnMut(f32),
{
    let fft_size = params.fft_size;
    if fft_size == 0 {
        return Err(anyhow!("FFT size must be positive"));
    }
    if signal.len() < fft_size {
        return Err(anyhow!(
            "signal too short for FFT size ({} samples < {})",
            signal.len(),
            fft_size
        ));
    }

    let padded = params.padded_size.max(fft_size);
    let step = hop_size(fft_size, params.overlap);
    let num_windows = (signal.len() - fft_size) / step + 1;
    let num_bins = padded / 2 + 1;
    let freq_resolution = sample_rate as f64 / padded as f64;

    let mut index_min = (params.min_freq / freq_resolution).ceil().max(0.0) as usize;
    let mut index_max = ((params.max_freq / freq_resolution).floor().max(0.0) as usize).min(num_bins - 1);
    if index_min >= index_max {
        warn!(
            "min frequency index ({}) >= max frequency index ({}), using full range",
            index_min, index_max
        );
        index_min = 0;
        index_max = num_bins - 1;
    }

    info!(
        "computing spectrogram: {} windows, {} bins, hop {} samples (effective overlap {:.4})",
        num_windows,
        num_bins,
        step,
        1.0 - step as f64 / fft_size as f64
    );
    debug!(
        "frequency range {:.2} Hz to {:.2} Hz (bins {} to {})",
        params.min_freq, params.max_freq, index_min, index_max
    );

    let mut planner = FftPlanner::<f64>::new();
    let fft = planner.plan_fft_forward(padded);
    let mut frame = vec![0.0f64; fft_size];
    let mut buffer = vec![Complex::new(0.0, 0.0); padded];

    let width = index_max - index_min + 1;
    let mut data = Vec::with_capacity(num_windows * width);
    let mut global_max = 0.0f64;

    for w in 0..num_windows {
        let start = w * step;
        frame.copy_from_slice(&signal[start..start + fft_size]);
        apply_hann_window(&mut frame);

        for (slot, v) in buffer.iter_mut().zip(frame.iter()) {
            *slot = Complex::new(*v, 0.0);
        }
        for slot in buffer.iter_mut().skip(fft_size) {
            *slot = Complex::new(0.0, 0.0);
        }

        fft.process(&mut buffer);

        for (b, c) in buffer.iter().take(num_bins).enumerate() {
            let magnitude = c.norm();
            if magnitude > global_max {
                global_max = magnitude;
            }
            if b >= index_min && b <= index_max {
                data.push(magnitude);
            }
        }

        progress((w + 1) as f32 / num_windows as f32);
    }

    Ok(Spectrogram {
        data,
        num_windows,
        num_bins,
        index_min,
        index_max,
        freq_resolution,
        global_max,
    })
}
