//! In-memory audio buffer and the sample math shared across the pipeline.
//!
//! Samples are 32-bit float PCM, mono, nominally in [-1.0, 1.0]. All
//! operations preserve buffer length unless documented otherwise.

use crate::error::{RedubError, Result};

/// A mono PCM audio buffer with its sample rate.
#[derive(Debug, Clone, PartialEq)]
pub struct AudioBuffer {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioBuffer {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    /// Creates a buffer of silence lasting `duration_ms`.
    pub fn silence(duration_ms: u64, sample_rate: u32) -> Self {
        let n = ms_to_samples(duration_ms, sample_rate);
        Self {
            samples: vec![0.0; n],
            sample_rate,
        }
    }

    /// Duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }

    /// Duration in whole milliseconds (exact when the sample rate is a
    /// multiple of 1000 and the buffer is millisecond-aligned).
    pub fn duration_ms(&self) -> u64 {
        (self.samples.len() as u64 * 1000) / self.sample_rate as u64
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Applies a gain in dB in place.
    pub fn apply_gain_db(&mut self, gain_db: f64) {
        if gain_db == 0.0 {
            return;
        }
        let factor = db_to_amplitude(gain_db);
        for s in &mut self.samples {
            *s *= factor;
        }
    }

    /// Applies a linear fade-out over the final `fade_ms` milliseconds.
    ///
    /// A fade longer than the buffer fades the whole buffer.
    pub fn fade_out(&mut self, fade_ms: u64) {
        let fade_len = ms_to_samples(fade_ms, self.sample_rate).min(self.samples.len());
        if fade_len == 0 {
            return;
        }
        let start = self.samples.len() - fade_len;
        for i in 0..fade_len {
            let factor = 1.0 - (i + 1) as f32 / fade_len as f32;
            self.samples[start + i] *= factor;
        }
    }

    /// Peak-normalizes so the loudest sample sits `headroom_db` below full scale.
    ///
    /// A silent buffer is returned unchanged.
    pub fn normalize(&mut self, headroom_db: f64) {
        let peak = self
            .samples
            .iter()
            .fold(0.0f32, |acc, s| acc.max(s.abs()));
        if peak <= f32::EPSILON {
            return;
        }
        let target = db_to_amplitude(-headroom_db.abs());
        let factor = target / peak;
        for s in &mut self.samples {
            *s *= factor;
        }
    }

    /// Additively mixes `other` into this buffer starting at sample 0.
    ///
    /// Only the overlapping prefix is mixed; this buffer's length is
    /// authoritative and never changes.
    pub fn overlay(&mut self, other: &AudioBuffer) -> Result<()> {
        if other.sample_rate != self.sample_rate {
            return Err(RedubError::AudioFormat {
                message: format!(
                    "overlay sample rate mismatch: {} vs {}",
                    other.sample_rate, self.sample_rate
                ),
            });
        }
        let n = self.samples.len().min(other.samples.len());
        for i in 0..n {
            self.samples[i] += other.samples[i];
        }
        Ok(())
    }

    /// Truncates the buffer to at most `len` samples.
    pub fn truncate(&mut self, len: usize) {
        self.samples.truncate(len);
    }
}

/// Converts a gain in dB to an amplitude multiplier.
pub fn db_to_amplitude(db: f64) -> f32 {
    10f32.powf(db as f32 / 20.0)
}

/// Converts whole milliseconds to a sample count (exact for sample rates
/// that are multiples of 1000 Hz).
pub fn ms_to_samples(ms: u64, sample_rate: u32) -> usize {
    ((ms * sample_rate as u64) / 1000) as usize
}

/// Converts seconds to the nearest sample count.
pub fn secs_to_samples(secs: f64, sample_rate: u32) -> usize {
    (secs * sample_rate as f64).round().max(0.0) as usize
}

/// Root-mean-square level of a sample slice (0.0 for empty input).
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_squares: f64 = samples.iter().map(|&s| (s as f64) * (s as f64)).sum();
    (sum_squares / samples.len() as f64).sqrt() as f32
}

/// RMS level expressed in dBFS. Silence maps to a floor well below any
/// usable threshold.
pub fn dbfs(samples: &[f32]) -> f64 {
    let level = rms(samples) as f64;
    if level <= 1e-10 {
        return -120.0;
    }
    20.0 * level.log10()
}
