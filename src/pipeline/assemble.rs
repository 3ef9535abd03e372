//! Timeline assembly: rebuilding the full-length track from processed chunks.

use crate::audio::AudioBuffer;
use crate::error::{RedubError, Result};
use crate::pipeline::types::SegmentMs;

/// Concatenates processed chunks back into one track of exactly
/// `total_len_ms`, inserting silence for the gaps between segments and at
/// the tail.
///
/// `chunks` and `segments` must pair up one-to-one, each chunk must match
/// its segment's duration, and `segments` must be ordered and
/// non-overlapping; violations fail loudly with no partial output.
pub fn assemble(
    chunks: &[AudioBuffer],
    segments: &[SegmentMs],
    total_len_ms: u64,
    sample_rate: u32,
) -> Result<AudioBuffer> {
    if chunks.len() != segments.len() {
        return Err(RedubError::LengthMismatch {
            chunks: chunks.len(),
            segments: segments.len(),
        });
    }

    let mut out = AudioBuffer::new(Vec::new(), sample_rate);
    let mut current_ms = 0u64;

    for (index, (chunk, seg)) in chunks.iter().zip(segments).enumerate() {
        if seg.start_ms < current_ms || seg.end_ms > total_len_ms {
            return Err(RedubError::Other(format!(
                "segment ({}, {}) overlaps position {} or exceeds total {}",
                seg.start_ms, seg.end_ms, current_ms, total_len_ms
            )));
        }
        if seg.start_ms > current_ms {
            let gap = AudioBuffer::silence(seg.start_ms - current_ms, sample_rate);
            out.samples.extend_from_slice(&gap.samples);
        }

        if chunk.duration_ms() != seg.duration_ms() {
            return Err(RedubError::ChunkDurationMismatch {
                index,
                chunk_ms: chunk.duration_ms(),
                segment_ms: seg.duration_ms(),
            });
        }
        out.samples.extend_from_slice(&chunk.samples);
        current_ms = seg.end_ms;
    }

    if total_len_ms > current_ms {
        let tail = AudioBuffer::silence(total_len_ms - current_ms, sample_rate);
        out.samples.extend_from_slice(&tail.samples);
    }

    Ok(out)
}
