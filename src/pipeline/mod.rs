//! The dubbing pipeline: segment → locate boundaries → synthesize →
//! reconcile → stretch → compose → assemble.
//!
//! Stages run sequentially over the ordered chunk collection. Chunks are
//! independent of each other; a failure while processing one chunk passes
//! that chunk through unmodified and the run continues. Only an
//! assembly-time length mismatch aborts.

pub mod assemble;
pub mod boundary;
pub mod compose;
pub mod reconcile;
pub mod segmenter;
pub mod types;

pub use assemble::assemble;
pub use boundary::{BoundaryConfig, SpeechBoundaryLocator};
pub use compose::{compose, ComposeOptions};
pub use reconcile::{reconcile, Placement};
pub use segmenter::{Segmenter, SegmenterConfig};
pub use types::{Chunk, SegmentMs};

use crate::audio::stretch::stretch_to_duration;
use crate::audio::AudioBuffer;
use crate::defaults;
use crate::error::Result;
use crate::services::{Synthesizer, Transcriber, Translator};

/// Configuration for the full pipeline.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub segmenter: SegmenterConfig,
    pub boundary: BoundaryConfig,
    pub compose: ComposeOptions,
    /// Reserved pause (seconds) on each side of a speech boundary.
    pub pause_secs: f64,
    /// Verbosity level (0=quiet, 1=per-chunk progress, 2=full diagnostics)
    pub verbosity: u8,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            segmenter: SegmenterConfig::default(),
            boundary: BoundaryConfig::default(),
            compose: ComposeOptions::default(),
            pause_secs: defaults::PAUSE_SECS,
            verbosity: 0,
        }
    }
}

/// The dubbing pipeline with its injected external services.
///
/// Services are explicit constructed handles, never ambient globals, so
/// tests substitute deterministic stubs.
pub struct DubPipeline {
    config: PipelineConfig,
    transcriber: Box<dyn Transcriber>,
    translator: Box<dyn Translator>,
    synthesizer: Box<dyn Synthesizer>,
}

impl DubPipeline {
    pub fn new(
        config: PipelineConfig,
        transcriber: Box<dyn Transcriber>,
        translator: Box<dyn Translator>,
        synthesizer: Box<dyn Synthesizer>,
    ) -> Self {
        Self {
            config,
            transcriber,
            translator,
            synthesizer,
        }
    }

    /// Runs the full pipeline over `source`, returning a track of exactly
    /// the source's duration with dubbed speech in place of the original
    /// utterances.
    pub fn dub(&self, source: &AudioBuffer) -> Result<AudioBuffer> {
        let (mut chunks, total_ms) = Segmenter::new(self.config.segmenter).segment(source);
        if self.config.verbosity >= 1 {
            eprintln!("redub: {} chunks over {}ms", chunks.len(), total_ms);
        }

        SpeechBoundaryLocator::new(self.config.boundary).locate_all(&mut chunks);

        let processed = self.process_chunks(&mut chunks);
        let segments: Vec<SegmentMs> = chunks.iter().map(|c| c.orig_seg).collect();

        assemble(&processed, &segments, total_ms, source.sample_rate)
    }

    /// Processes each chunk in order, returning the dubbed (or
    /// passed-through) audio per chunk. Recognized and translated text is
    /// recorded on the chunks as the stages produce it, so callers can
    /// write it out alongside the audio.
    pub fn process_chunks(&self, chunks: &mut [Chunk]) -> Vec<AudioBuffer> {
        chunks
            .iter_mut()
            .enumerate()
            .map(|(index, chunk)| self.process_chunk(index, chunk))
            .collect()
    }

    /// Processes one chunk, passing it through unmodified when anything
    /// down the external-model path fails. One chunk's failure never
    /// aborts the batch.
    fn process_chunk(&self, index: usize, chunk: &mut Chunk) -> AudioBuffer {
        match self.try_process_chunk(chunk) {
            Ok(Some(buffer)) => {
                if self.config.verbosity >= 2 {
                    eprintln!("redub: chunk {} dubbed", index);
                }
                buffer
            }
            Ok(None) => {
                if self.config.verbosity >= 2 {
                    eprintln!("redub: chunk {} passed through (no speech or no output)", index);
                }
                chunk.audio.clone()
            }
            Err(e) => {
                eprintln!("redub: chunk {} passed through after error: {}", index, e);
                chunk.audio.clone()
            }
        }
    }

    /// The per-chunk happy path. `Ok(None)` means a well-defined empty
    /// result somewhere along the way: not an error, the chunk passes
    /// through.
    fn try_process_chunk(&self, chunk: &mut Chunk) -> Result<Option<AudioBuffer>> {
        if chunk.speech_boundary.is_none() {
            return Ok(None);
        }

        let Some(text) = self
            .transcriber
            .transcribe(&chunk.audio.samples, chunk.audio.sample_rate)?
        else {
            return Ok(None);
        };
        let translated = self.translator.translate(&text)?;
        chunk.text = Some(text);
        let Some(translated) = translated else {
            return Ok(None);
        };
        let synth = self.synthesizer.synthesize(&translated)?;
        chunk.translated = Some(translated);
        let Some(synth) = synth else {
            return Ok(None);
        };

        let synth_duration = round2(synth.duration_secs());
        let placement = reconcile(
            chunk.len_secs(),
            chunk.speech_boundary,
            synth_duration,
            self.config.pause_secs,
        );
        let Placement::Window { start, end } = placement else {
            return Ok(None);
        };

        // Placement edges round to 3 decimals before the stretch target is
        // derived, so the scaled audio lines up with millisecond positions.
        let target_secs = round3(end) - round3(start);
        let stretched = stretch_to_duration(&synth.samples, synth.sample_rate, target_secs)?;
        let stretched = AudioBuffer::new(stretched, synth.sample_rate);

        let composed = compose(&chunk.audio, placement, &stretched, &self.config.compose)?;
        Ok(Some(composed))
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RedubError;
    use crate::services::{
        FixedTranscriber, IdentityTranslator, SynthAudio, ToneSynthesizer,
    };

    const RATE: u32 = 24000;

    fn tone(ms: u64, amplitude: f32) -> Vec<f32> {
        vec![amplitude; (ms as usize * RATE as usize) / 1000]
    }

    fn track(parts: &[Vec<f32>]) -> AudioBuffer {
        AudioBuffer::new(parts.iter().flatten().copied().collect(), RATE)
    }

    fn pipeline_with(synth: Box<dyn Synthesizer>) -> DubPipeline {
        DubPipeline::new(
            PipelineConfig::default(),
            Box::new(FixedTranscriber {
                text: "hello there".to_string(),
            }),
            Box::new(IdentityTranslator),
            synth,
        )
    }

    #[test]
    fn test_output_duration_matches_source() {
        let source = track(&[
            tone(500, 0.0),
            tone(1000, 0.5),
            tone(1000, 0.0),
            tone(800, 0.5),
            tone(700, 0.0),
        ]);
        let pipeline = pipeline_with(Box::new(ToneSynthesizer::new(RATE)));
        let out = pipeline.dub(&source).unwrap();
        assert_eq!(out.duration_ms(), source.duration_ms());
    }

    #[test]
    fn test_silent_source_comes_back_silent() {
        let source = track(&[tone(3000, 0.0)]);
        let pipeline = pipeline_with(Box::new(ToneSynthesizer::new(RATE)));
        let out = pipeline.dub(&source).unwrap();
        assert_eq!(out.duration_ms(), 3000);
        assert!(out.samples.iter().all(|&s| s == 0.0));
    }

    #[test]
    fn test_failing_synthesizer_passes_chunks_through() {
        struct FailingSynth;
        impl Synthesizer for FailingSynth {
            fn synthesize(&self, _text: &str) -> Result<Option<SynthAudio>> {
                Err(RedubError::External {
                    stage: "tts",
                    message: "model crashed".to_string(),
                })
            }
        }
        let source = track(&[tone(1000, 0.5), tone(1000, 0.0)]);
        let pipeline = pipeline_with(Box::new(FailingSynth));
        let out = pipeline.dub(&source).unwrap();
        // the chunk passes through unmodified, timeline intact
        assert_eq!(out.duration_ms(), source.duration_ms());
        assert!((out.samples[6000] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_empty_synth_output_passes_chunk_through() {
        struct EmptySynth;
        impl Synthesizer for EmptySynth {
            fn synthesize(&self, _text: &str) -> Result<Option<SynthAudio>> {
                Ok(None)
            }
        }
        let source = track(&[tone(1000, 0.5), tone(1000, 0.0)]);
        let pipeline = pipeline_with(Box::new(EmptySynth));
        let out = pipeline.dub(&source).unwrap();
        assert_eq!(out.duration_ms(), source.duration_ms());
        assert!((out.samples[6000] - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_processing_records_text_on_chunks() {
        let source = track(&[tone(500, 0.0), tone(1000, 0.5), tone(800, 0.0)]);
        let pipeline = pipeline_with(Box::new(ToneSynthesizer::new(RATE)));

        let (mut chunks, _total_ms) =
            Segmenter::new(PipelineConfig::default().segmenter).segment(&source);
        SpeechBoundaryLocator::new(BoundaryConfig::default()).locate_all(&mut chunks);
        let processed = pipeline.process_chunks(&mut chunks);

        assert_eq!(processed.len(), chunks.len());
        let spoken: Vec<&Chunk> = chunks
            .iter()
            .filter(|c| c.speech_boundary.is_some())
            .collect();
        assert!(!spoken.is_empty());
        for chunk in spoken {
            assert_eq!(chunk.text.as_deref(), Some("hello there"));
            assert_eq!(chunk.translated.as_deref(), Some("hello there"));
        }
    }

    #[test]
    fn test_rounding_helpers() {
        assert!((round2(1.005) - 1.01).abs() < 1e-9 || (round2(1.005) - 1.0).abs() < 1e-9);
        assert!((round3(0.12345) - 0.123).abs() < 1e-9);
        assert!((round2(4.899) - 4.9).abs() < 1e-9);
    }
}
