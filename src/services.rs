//! External collaborator interfaces.
//!
//! ASR, MT, and TTS are opaque external services; the core only needs their
//! outputs. These traits are the narrow seams the pipeline consumes, with
//! `Ok(None)` as the well-defined "nothing produced for this chunk"
//! sentinel — absence of output is expected, never an error.

use crate::error::Result;
use std::sync::Arc;

/// Synthesized audio returned by a TTS service.
#[derive(Debug, Clone)]
pub struct SynthAudio {
    /// Mono f32 PCM samples.
    pub samples: Vec<f32>,
    /// Sample rate the synthesizer produced.
    pub sample_rate: u32,
}

impl SynthAudio {
    /// Duration of the synthesized audio in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate as f64
    }
}

/// Trait for speech-to-text transcription.
///
/// This trait allows swapping implementations (real model vs mock).
pub trait Transcriber: Send + Sync {
    /// Transcribe a chunk's audio to text. `Ok(None)` means the model
    /// produced nothing for this chunk.
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<Option<String>>;
}

/// Trait for machine translation of transcribed text.
pub trait Translator: Send + Sync {
    /// Translate text to the target language. `Ok(None)` means nothing to
    /// translate (or the model declined).
    fn translate(&self, text: &str) -> Result<Option<String>>;
}

/// Trait for speech synthesis.
pub trait Synthesizer: Send + Sync {
    /// Synthesize speech for `text`. `Ok(None)` means the synthesizer
    /// produced no audio for this text.
    fn synthesize(&self, text: &str) -> Result<Option<SynthAudio>>;
}

// Arc forwarding so one service instance can be shared across pipelines.
impl<T: Transcriber> Transcriber for Arc<T> {
    fn transcribe(&self, samples: &[f32], sample_rate: u32) -> Result<Option<String>> {
        (**self).transcribe(samples, sample_rate)
    }
}

impl<T: Translator> Translator for Arc<T> {
    fn translate(&self, text: &str) -> Result<Option<String>> {
        (**self).translate(text)
    }
}

impl<T: Synthesizer> Synthesizer for Arc<T> {
    fn synthesize(&self, text: &str) -> Result<Option<SynthAudio>> {
        (**self).synthesize(text)
    }
}

/// Transcriber that returns a fixed text for every chunk. For tests and
/// dry runs.
#[derive(Debug, Clone)]
pub struct FixedTranscriber {
    pub text: String,
}

impl Transcriber for FixedTranscriber {
    fn transcribe(&self, _samples: &[f32], _sample_rate: u32) -> Result<Option<String>> {
        if self.text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(self.text.clone()))
        }
    }
}

/// Translator that passes text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityTranslator;

impl Translator for IdentityTranslator {
    fn translate(&self, text: &str) -> Result<Option<String>> {
        if text.is_empty() {
            Ok(None)
        } else {
            Ok(Some(text.to_string()))
        }
    }
}

/// Synthesizer that emits a constant-amplitude tone whose duration scales
/// with the input text length. Deterministic, for tests and dry runs.
#[derive(Debug, Clone)]
pub struct ToneSynthesizer {
    pub sample_rate: u32,
    /// Seconds of audio per character of input text.
    pub secs_per_char: f64,
    pub amplitude: f32,
}

impl ToneSynthesizer {
    pub fn new(sample_rate: u32) -> Self {
        Self {
            sample_rate,
            secs_per_char: 0.06,
            amplitude: 0.4,
        }
    }
}

impl Synthesizer for ToneSynthesizer {
    fn synthesize(&self, text: &str) -> Result<Option<SynthAudio>> {
        if text.is_empty() {
            return Ok(None);
        }
        let secs = text.chars().count() as f64 * self.secs_per_char;
        let len = (secs * self.sample_rate as f64).round() as usize;
        Ok(Some(SynthAudio {
            samples: vec![self.amplitude; len],
            sample_rate: self.sample_rate,
        }))
    }
}
