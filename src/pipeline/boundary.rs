//! Per-chunk speech-boundary location.
//!
//! Runs voice activity detection on a chunk's slice and collapses the raw
//! intervals into one dominant speech boundary. A chunk is assumed to
//! contain at most one meaningful utterance, so only the first merged
//! interval is kept.

use crate::audio::{EnergyVad, SpeechDetector};
use crate::defaults;
use crate::interval::merge_intervals;
use crate::pipeline::types::Chunk;

/// Configuration for speech-boundary location.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryConfig {
    /// Gap threshold (seconds) under which raw VAD intervals merge.
    pub merge_gap_secs: f64,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            merge_gap_secs: defaults::MERGE_GAP_SECS,
        }
    }
}

/// Locates the dominant speech interval inside each chunk.
pub struct SpeechBoundaryLocator<V: SpeechDetector = EnergyVad> {
    config: BoundaryConfig,
    vad: V,
}

impl SpeechBoundaryLocator<EnergyVad> {
    /// Creates a locator with the built-in energy VAD.
    pub fn new(config: BoundaryConfig) -> Self {
        Self::with_detector(config, EnergyVad::default())
    }
}

impl<V: SpeechDetector> SpeechBoundaryLocator<V> {
    /// Creates a locator with a custom voice activity detector.
    pub fn with_detector(config: BoundaryConfig, vad: V) -> Self {
        Self { config, vad }
    }

    /// Fills in `chunk.speech_boundary`. Empty VAD output leaves it `None`:
    /// the chunk is silence-only and passes through downstream stages.
    pub fn locate(&self, chunk: &mut Chunk) {
        let raw = self
            .vad
            .detect_speech(&chunk.audio.samples, chunk.audio.sample_rate);
        let merged = merge_intervals(&raw, self.config.merge_gap_secs);
        chunk.speech_boundary = merged.first().copied();
    }

    /// Locates boundaries for every chunk in the collection.
    pub fn locate_all(&self, chunks: &mut [Chunk]) {
        for chunk in chunks {
            self.locate(chunk);
        }
    }
}
