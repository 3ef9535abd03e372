//! Voice activity detection for speech-boundary location.
//!
//! Batch-mode energy VAD: classifies fixed frames by RMS level and reports
//! contiguous speech runs as intervals in chunk-relative seconds.

use crate::audio::buffer::{dbfs, ms_to_samples};
use crate::defaults;
use crate::interval::Interval;

/// Detects speech intervals inside one chunk's audio.
///
/// Trait seam for substituting model-based detectors (or deterministic
/// stubs in tests).
pub trait SpeechDetector {
    /// Returns ordered speech intervals in seconds, relative to the start
    /// of `samples`. Empty when no speech is present.
    fn detect_speech(&self, samples: &[f32], sample_rate: u32) -> Vec<Interval>;
}

/// Energy-threshold VAD over fixed analysis frames.
#[derive(Debug, Clone, Copy)]
pub struct EnergyVad {
    /// RMS threshold in dBFS above which a frame counts as speech.
    pub speech_thresh_db: f64,
}

impl Default for EnergyVad {
    fn default() -> Self {
        Self {
            speech_thresh_db: defaults::VAD_THRESH_DB,
        }
    }
}

impl SpeechDetector for EnergyVad {
    fn detect_speech(&self, samples: &[f32], sample_rate: u32) -> Vec<Interval> {
        let frame_len = ms_to_samples(defaults::FRAME_MS, sample_rate);
        if frame_len == 0 || samples.is_empty() {
            return Vec::new();
        }

        let mut intervals = Vec::new();
        let mut run_start: Option<f64> = None;
        let mut pos_secs = 0.0f64;

        for frame in samples.chunks(frame_len) {
            let is_speech = dbfs(frame) >= self.speech_thresh_db;
            match (is_speech, run_start) {
                (true, None) => run_start = Some(pos_secs),
                (false, Some(start)) => {
                    intervals.push(Interval {
                        start,
                        end: pos_secs,
                    });
                    run_start = None;
                }
                _ => {}
            }
            // frames may be partial at the tail, so advance by actual length
            pos_secs += frame.len() as f64 / sample_rate as f64;
        }
        if let Some(start) = run_start {
            intervals.push(Interval {
                start,
                end: pos_secs,
            });
        }
        intervals
    }
}
