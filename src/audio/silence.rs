//! Windowed-energy silence detection.
//!
//! Classifies fixed-size frames as silent by RMS level in dBFS and reports
//! the non-silent spans between qualifying silent runs. Positions are
//! whole-millisecond, frame-aligned.

use crate::audio::buffer::{dbfs, ms_to_samples};
use crate::defaults;

/// Finds non-silent spans in an audio track.
///
/// Trait seam so tests (and callers with a better detector) can substitute
/// deterministic implementations.
pub trait SilenceDetector {
    /// Returns ordered, non-overlapping `(start_ms, end_ms)` spans of
    /// non-silent audio. Empty when the whole track is silent.
    fn detect_nonsilent(
        &self,
        samples: &[f32],
        sample_rate: u32,
        min_silence_len_ms: u64,
        silence_thresh_db: f64,
    ) -> Vec<(u64, u64)>;
}

/// RMS-based silence detector over fixed analysis frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnergySilenceDetector;

impl SilenceDetector for EnergySilenceDetector {
    fn detect_nonsilent(
        &self,
        samples: &[f32],
        sample_rate: u32,
        min_silence_len_ms: u64,
        silence_thresh_db: f64,
    ) -> Vec<(u64, u64)> {
        let frame_len = ms_to_samples(defaults::FRAME_MS, sample_rate);
        if frame_len == 0 || samples.is_empty() {
            return Vec::new();
        }

        let total_ms = (samples.len() as u64 * 1000) / sample_rate as u64;

        // Silent runs at frame granularity, aggregated in ms.
        let mut silent_runs: Vec<(u64, u64)> = Vec::new();
        let mut run_start: Option<u64> = None;
        let mut pos_ms = 0u64;

        for frame in samples.chunks(frame_len) {
            let frame_ms = (frame.len() as u64 * 1000) / sample_rate as u64;
            let is_silent = dbfs(frame) < silence_thresh_db;
            match (is_silent, run_start) {
                (true, None) => run_start = Some(pos_ms),
                (false, Some(start)) => {
                    silent_runs.push((start, pos_ms));
                    run_start = None;
                }
                _ => {}
            }
            pos_ms += frame_ms.max(1);
        }
        if let Some(start) = run_start {
            silent_runs.push((start, total_ms));
        }

        // Only runs at least min_silence_len_ms long count as splits.
        silent_runs.retain(|(s, e)| e - s >= min_silence_len_ms);

        // Non-silent spans are the complement over [0, total_ms).
        let mut spans = Vec::new();
        let mut cursor = 0u64;
        for (s, e) in silent_runs {
            if s > cursor {
                spans.push((cursor, s));
            }
            cursor = e;
        }
        if cursor < total_ms {
            spans.push((cursor, total_ms));
        }
        spans
    }
}
