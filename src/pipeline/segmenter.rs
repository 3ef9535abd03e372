//! Silence-based segmentation of the source recording into chunks.

use crate::audio::buffer::ms_to_samples;
use crate::audio::{AudioBuffer, EnergySilenceDetector, SilenceDetector};
use crate::defaults;
use crate::pipeline::types::{Chunk, SegmentMs};

/// Configuration for the segmenter.
#[derive(Debug, Clone, Copy)]
pub struct SegmenterConfig {
    /// Minimum pause length (ms) that splits chunks.
    pub min_silence_len_ms: u64,
    /// Level (dBFS) below which audio counts as silence.
    pub silence_thresh_db: f64,
    /// Silence padding (ms) kept on each side of a chunk, clamped so
    /// neighbouring chunks never overlap.
    pub keep_silence_ms: u64,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            min_silence_len_ms: defaults::MIN_SILENCE_LEN_MS,
            silence_thresh_db: defaults::SILENCE_THRESH_DB,
            keep_silence_ms: defaults::KEEP_SILENCE_MS,
        }
    }
}

/// Splits a full recording into non-silent chunks, recording each chunk's
/// position on the original timeline for later reassembly.
pub struct Segmenter<D: SilenceDetector = EnergySilenceDetector> {
    config: SegmenterConfig,
    detector: D,
}

impl Segmenter<EnergySilenceDetector> {
    /// Creates a segmenter with the built-in energy silence detector.
    pub fn new(config: SegmenterConfig) -> Self {
        Self::with_detector(config, EnergySilenceDetector)
    }
}

impl<D: SilenceDetector> Segmenter<D> {
    /// Creates a segmenter with a custom silence detector.
    pub fn with_detector(config: SegmenterConfig, detector: D) -> Self {
        Self { config, detector }
    }

    /// Splits `audio` into chunks. Returns the chunk collection and the
    /// original track's total length in milliseconds.
    ///
    /// Zero detected spans is a valid outcome and yields an empty
    /// collection. Chunks are ordered, non-overlapping, and one per
    /// detected span.
    pub fn segment(&self, audio: &AudioBuffer) -> (Vec<Chunk>, u64) {
        let total_ms = audio.duration_ms();
        let spans = self.detector.detect_nonsilent(
            &audio.samples,
            audio.sample_rate,
            self.config.min_silence_len_ms,
            self.config.silence_thresh_db,
        );

        let keep = self.config.keep_silence_ms;
        let mut chunks = Vec::with_capacity(spans.len());

        for (i, &(start, end)) in spans.iter().enumerate() {
            // Each span may pad into at most half the gap separating it
            // from its neighbour, so padded spans cannot overlap.
            let left_room = if i == 0 {
                start
            } else {
                (start - spans[i - 1].1) / 2
            };
            let right_room = if i + 1 == spans.len() {
                total_ms - end
            } else {
                (spans[i + 1].0 - end) / 2
            };

            let padded_start = start - keep.min(left_room);
            let padded_end = end + keep.min(right_room);

            let from = ms_to_samples(padded_start, audio.sample_rate);
            let to = ms_to_samples(padded_end, audio.sample_rate).min(audio.samples.len());
            let slice = AudioBuffer::new(audio.samples[from..to].to_vec(), audio.sample_rate);

            chunks.push(Chunk::new(slice, SegmentMs::new(padded_start, padded_end)));
        }

        (chunks, total_ms)
    }
}
