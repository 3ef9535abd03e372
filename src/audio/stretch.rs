//! Tempo-only time scaling.
//!
//! Overlap-add stretcher: windows of the source are laid down at a fixed
//! synthesis hop while the analysis position advances at `rate` times that
//! hop. Duration changes, pitch does not shift the way plain resampling
//! would.

use crate::audio::buffer::{ms_to_samples, secs_to_samples};
use crate::error::{RedubError, Result};

/// Analysis window length in milliseconds.
const WINDOW_MS: u64 = 50;

/// Changes the tempo of `samples` by `rate` (rate > 1 shortens, < 1 lengthens).
///
/// Output length is `len / rate` rounded to the nearest sample.
pub fn tempo_shift(samples: &[f32], sample_rate: u32, rate: f64) -> Vec<f32> {
    if samples.is_empty() || (rate - 1.0).abs() < 1e-9 {
        return samples.to_vec();
    }

    let output_len = (samples.len() as f64 / rate).round() as usize;
    if output_len == 0 {
        return Vec::new();
    }

    let window_len = ms_to_samples(WINDOW_MS, sample_rate).max(4);
    let hop = window_len / 2;
    let window = hann(window_len);

    let mut out = vec![0.0f32; output_len];
    let mut weight = vec![0.0f32; output_len];

    let mut k = 0usize;
    loop {
        let out_pos = k * hop;
        if out_pos >= output_len {
            break;
        }
        let in_pos = (out_pos as f64 * rate).round() as usize;
        if in_pos >= samples.len() {
            break;
        }
        for i in 0..window_len {
            let oi = out_pos + i;
            let ii = in_pos + i;
            if oi >= output_len || ii >= samples.len() {
                break;
            }
            out[oi] += samples[ii] * window[i];
            weight[oi] += window[i];
        }
        k += 1;
    }

    // Normalize by accumulated window weight; samples no window reached
    // (buffer edges) stay silent.
    for (o, w) in out.iter_mut().zip(&weight) {
        if *w > 1e-6 {
            *o /= w;
        }
    }
    out
}

/// Stretches or compresses `samples` to last exactly `target_secs`.
///
/// `rate = current / target` is handed to [`tempo_shift`]; the result is
/// then trimmed or zero-padded to the exact target sample count.
/// Non-positive targets are rejected and propagated, not caught.
pub fn stretch_to_duration(
    samples: &[f32],
    sample_rate: u32,
    target_secs: f64,
) -> Result<Vec<f32>> {
    if target_secs <= 0.0 {
        return Err(RedubError::InvalidDuration { value: target_secs });
    }

    let target_len = secs_to_samples(target_secs, sample_rate);
    if samples.is_empty() {
        return Ok(vec![0.0; target_len]);
    }

    let current_secs = samples.len() as f64 / sample_rate as f64;
    let rate = current_secs / target_secs;

    let mut out = tempo_shift(samples, sample_rate, rate);
    out.resize(target_len, 0.0);
    Ok(out)
}

fn hann(len: usize) -> Vec<f32> {
    let denom = (len - 1) as f32;
    (0..len)
        .map(|i| 0.5 * (1.0 - (2.0 * std::f32::consts::PI * i as f32 / denom).cos()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RATE: u32 = 24000;

    #[test]
    fn test_rejects_non_positive_target() {
        assert!(stretch_to_duration(&[0.1; 100], RATE, 0.0).is_err());
        assert!(stretch_to_duration(&[0.1; 100], RATE, -1.0).is_err());
    }

    #[test]
    fn test_exact_output_length() {
        let input = vec![0.3; 24000]; // 1.0s
        let out = stretch_to_duration(&input, RATE, 1.5).unwrap();
        assert_eq!(out.len(), 36000);
        let out = stretch_to_duration(&input, RATE, 0.5).unwrap();
        assert_eq!(out.len(), 12000);
    }

    #[test]
    fn test_identity_rate_preserves_samples() {
        let input = vec![0.25; 1000];
        assert_eq!(tempo_shift(&input, RATE, 1.0), input);
    }

    #[test]
    fn test_amplitude_preserved_away_from_edges() {
        let input = vec![0.5; 24000];
        let out = stretch_to_duration(&input, RATE, 2.0).unwrap();
        // middle of a constant signal should still be the constant
        let mid = out.len() / 2;
        assert!(
            (out[mid] - 0.5).abs() < 0.05,
            "mid sample was {}",
            out[mid]
        );
    }

    #[test]
    fn test_empty_input_gives_silence_of_target_length() {
        let out = stretch_to_duration(&[], RATE, 0.25).unwrap();
        assert_eq!(out.len(), 6000);
        assert!(out.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_tempo_shift_empty_input() {
        assert!(tempo_shift(&[], RATE, 2.0).is_empty());
    }
}
