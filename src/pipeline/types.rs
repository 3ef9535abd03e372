//! Data types carried through the dubbing pipeline.

use crate::audio::AudioBuffer;
use crate::interval::Interval;
use serde::{Deserialize, Serialize};

/// A chunk's position on the original full-length timeline, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SegmentMs {
    pub start_ms: u64,
    pub end_ms: u64,
}

impl SegmentMs {
    pub fn new(start_ms: u64, end_ms: u64) -> Self {
        debug_assert!(start_ms <= end_ms);
        Self { start_ms, end_ms }
    }

    pub fn duration_ms(&self) -> u64 {
        self.end_ms - self.start_ms
    }
}

/// One silence-delimited segment of the source recording.
///
/// Created by the segmenter, enriched stage by stage (speech boundary,
/// recognized and translated text), consumed read-only by reconciliation
/// and composition. Each stage exclusively owns the chunk collection it is
/// handed.
#[derive(Debug, Clone)]
pub struct Chunk {
    /// The chunk's audio slice.
    pub audio: AudioBuffer,
    /// Position on the original timeline.
    pub orig_seg: SegmentMs,
    /// The single merged speech interval, chunk-relative seconds.
    /// `None` means no detected speech: the chunk is silence-only and
    /// passes through every later stage unmodified.
    pub speech_boundary: Option<Interval>,
    /// Recognized text (filled by the ASR stage).
    pub text: Option<String>,
    /// Translated text (filled by the MT stage).
    pub translated: Option<String>,
}

impl Chunk {
    pub fn new(audio: AudioBuffer, orig_seg: SegmentMs) -> Self {
        Self {
            audio,
            orig_seg,
            speech_boundary: None,
            text: None,
            translated: None,
        }
    }

    /// Chunk duration in seconds, from its own audio slice.
    pub fn len_secs(&self) -> f64 {
        self.audio.duration_secs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_duration() {
        let seg = SegmentMs::new(500, 2500);
        assert_eq!(seg.duration_ms(), 2000);
    }

    #[test]
    fn test_new_chunk_has_no_enrichment() {
        let chunk = Chunk::new(
            AudioBuffer::new(vec![0.0; 24000], 24000),
            SegmentMs::new(0, 1000),
        );
        assert!(chunk.speech_boundary.is_none());
        assert!(chunk.text.is_none());
        assert!(chunk.translated.is_none());
        assert!((chunk.len_secs() - 1.0).abs() < 1e-9);
    }
}
