use std::path::Path;

use anyhow::{anyhow, Context, Result};
use hound::{SampleFormat, WavReader};
use log::{debug, info};

pub struct AudioSignal {
    pub samples: Vec<f64>,
    pub sample_rate: u32,
}

/// Reads at most `duration` seconds of a WAV file, mixed down to mono and
/// peak-normalized to 1.0.
pub fn load_mono(path: &Path, duration: f64) -> Result<AudioSignal> {
    let mut reader = WavReader::open(path)
        .with_context(|| format!("unable to open {}", path.display()))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    if channels == 0 {
        return Err(anyhow!("invalid channel count"));
    }
    if spec.sample_rate == 0 {
        return Err(anyhow!("invalid sample rate"));
    }

    let total_frames = reader.duration() as usize;
    info!(
        "file info: {} Hz, {} channels, {} frames ({:.2} s)",
        spec.sample_rate,
        channels,
        total_frames,
        total_frames as f64 / spec.sample_rate as f64
    );

    let mut frames = (duration * spec.sample_rate as f64) as usize;
    if frames > total_frames {
        debug!("requested duration exceeds file duration, reading entire file");
        frames = total_frames;
    }
    let wanted = frames * channels;

    let mut interleaved = Vec::with_capacity(wanted);
    match spec.sample_format {
        SampleFormat::Float => {
            for sample in reader.samples::<f32>().take(wanted) {
                interleaved.push(sample? as f64);
            }
        }
        SampleFormat::Int => {
            let bits = spec.bits_per_sample as i32;
            let max = ((1i64 << (bits - 1)) - 1) as f64;
            if bits <= 16 {
                for sample in reader.samples::<i16>().take(wanted) {
                    interleaved.push(sample? as f64 / max);
                }
            } else {
                for sample in reader.samples::<i32>().take(wanted) {
                    interleaved.push(sample? as f64 / max);
                }
            }
        }
    }

    let mut samples: Vec<f64> = interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / channels as f64)
        .collect();

    normalize_peak(&mut samples);

    info!(
        "loaded {} samples at {} Hz ({:.2} s)",
        samples.len(),
        spec.sample_rate,
        samples.len() as f64 / spec.sample_rate as f64
    );

    Ok(AudioSignal {
        samples,
        sample_rate: spec.sample_rate,
    })
}

pub fn normalize_peak(samples: &mut [f64]) {
    let peak = samples.iter().fold(0.0f64, |m, s| m.max(s.abs()));
    if peak > 0.0 {
        for s in samples.iter_mut() {
            *s /= peak;
        }
    }
}
