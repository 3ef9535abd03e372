//! Chunk manifest: a human-readable record of segmentation results.
//!
//! Written as pretty JSON purely for inspection and debugging; no other
//! system depends on this format.

use crate::error::Result;
use crate::interval::Interval;
use crate::pipeline::types::{Chunk, SegmentMs};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Per-chunk attributes as recorded in the manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkRecord {
    /// WAV file the chunk's audio was written to, when saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Chunk duration in seconds.
    pub len_secs: f64,
    /// Position on the original timeline.
    pub orig_seg: SegmentMs,
    /// The merged speech interval, chunk-relative seconds.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speech_boundary: Option<Interval>,
    /// Recognized text, when the ASR stage ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Translated text, when the MT stage ran.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translated: Option<String>,
}

/// Manifest of one segmentation run: chunk-index → attributes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manifest {
    pub sample_rate: u32,
    pub total_len_ms: u64,
    pub chunks: BTreeMap<usize, ChunkRecord>,
}

impl Manifest {
    /// Builds a manifest from a chunk collection. `paths[i]`, when given,
    /// records where chunk `i`'s audio was written.
    pub fn from_chunks(
        chunks: &[Chunk],
        paths: Option<&[PathBuf]>,
        sample_rate: u32,
        total_len_ms: u64,
    ) -> Self {
        let records = chunks
            .iter()
            .enumerate()
            .map(|(i, chunk)| {
                let record = ChunkRecord {
                    path: paths.and_then(|p| p.get(i).cloned()),
                    len_secs: chunk.len_secs(),
                    orig_seg: chunk.orig_seg,
                    speech_boundary: chunk.speech_boundary,
                    text: chunk.text.clone(),
                    translated: chunk.translated.clone(),
                };
                (i, record)
            })
            .collect();
        Self {
            sample_rate,
            total_len_ms,
            chunks: records,
        }
    }

    /// Writes the manifest as pretty-printed JSON.
    pub fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads a manifest back from JSON.
    pub fn read(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&data)?)
    }
}
