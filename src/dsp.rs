use std::f64::consts::PI;

/// Symmetric Hann window, applied in place over the whole buffer.
pub fn apply_hann_window(buffer: &mut [f64]) {
    let n = buffer.len();
    if n < 2 {
        return;
    }
    let denom = (n - 1) as f64;
    for (i, v) in buffer.iter_mut().enumerate() {
        *v *= 0.5 * (1.0 - (2.0 * PI * i as f64 / denom).cos());
    }
}

/// First-order pre-emphasis: `y[n] = x[n] - alpha * x[n-1]`, computed from
/// the unfiltered previous sample.
pub fn apply_high_boost(signal: &mut [f64], alpha: f64) {
    if signal.len() < 2 {
        return;
    }
    let mut prev = signal[0];
    for v in signal.iter_mut().skip(1) {
        let current = *v;
        *v = current - alpha * prev;
        prev = current;
    }
}

pub fn sine_wave(len: usize, sample_rate: f64, frequency: f64, amplitude: f64) -> Vec<f64> {
    let step = 2.0 * PI * frequency / sample_rate;
    (0..len).map(|i| amplitude * (step * i as f64).sin()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hann_endpoints_are_zero_and_center_is_one() {
        let mut buf = vec![1.0; 9];
        apply_hann_window(&mut buf);
        assert!(buf[0].abs() < 1e-12);
        assert!(buf[8].abs() < 1e-12);
        assert!((buf[4] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn high_boost_uses_unfiltered_previous_sample() {
        let mut s = vec![1.0, 2.0, 4.0];
        apply_high_boost(&mut s, 0.5);
        assert_eq!(s, vec![1.0, 1.5, 3.0]);
    }

    #[test]
    fn high_boost_ignores_short_signals() {
        let mut s = vec![3.0];
        apply_high_boost(&mut s, 0.99);
        assert_eq!(s, vec![3.0]);
    }

    #[test]
    fn constant_signal_is_mostly_removed_by_boost() {
        let mut s = vec![1.0; 16];
        apply_high_boost(&mut s, 0.99);
        assert!(s[1..].iter().all(|v| (v - 0.01).abs() < 1e-12));
    }
}
