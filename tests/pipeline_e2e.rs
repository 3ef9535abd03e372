//! End-to-end pipeline tests with deterministic stub services.

use redub::audio::{wav, AudioBuffer};
use redub::manifest::Manifest;
use redub::pipeline::{assemble, SpeechBoundaryLocator, Segmenter};
use redub::services::{
    FixedTranscriber, IdentityTranslator, SynthAudio, Synthesizer, ToneSynthesizer,
};
use redub::{DubPipeline, PipelineConfig};

const RATE: u32 = 24000;

fn tone(ms: u64, amplitude: f32) -> Vec<f32> {
    vec![amplitude; (ms as usize * RATE as usize) / 1000]
}

fn track(parts: &[Vec<f32>]) -> AudioBuffer {
    AudioBuffer::new(parts.iter().flatten().copied().collect(), RATE)
}

fn two_utterance_source() -> AudioBuffer {
    track(&[
        tone(500, 0.0),
        tone(1200, 0.5),
        tone(1000, 0.0),
        tone(900, 0.5),
        tone(600, 0.0),
    ])
}

fn pipeline(synth: Box<dyn Synthesizer>) -> DubPipeline {
    DubPipeline::new(
        PipelineConfig::default(),
        Box::new(FixedTranscriber {
            text: "some recognized words".to_string(),
        }),
        Box::new(IdentityTranslator),
        synth,
    )
}

#[test]
fn dubbed_track_preserves_total_duration() {
    let source = two_utterance_source();
    let out = pipeline(Box::new(ToneSynthesizer::new(RATE)))
        .dub(&source)
        .unwrap();
    assert_eq!(out.duration_ms(), source.duration_ms());
}

#[test]
fn dubbed_track_differs_inside_speech_windows() {
    let source = two_utterance_source();
    let out = pipeline(Box::new(ToneSynthesizer::new(RATE)))
        .dub(&source)
        .unwrap();

    // somewhere inside the first utterance (0.5s..1.7s) the content changed
    let start = (0.6 * RATE as f64) as usize;
    let end = (1.6 * RATE as f64) as usize;
    let changed = (start..end).any(|i| (out.samples[i] - source.samples[i]).abs() > 1e-3);
    assert!(changed, "speech window should carry synthesized audio");
}

#[test]
fn oversized_synth_still_preserves_duration() {
    // synthesizer output far longer than any original window: reconciler
    // falls back to the whole chunk, scaler compresses to fit
    struct LongSynth;
    impl Synthesizer for LongSynth {
        fn synthesize(&self, _text: &str) -> redub::Result<Option<SynthAudio>> {
            Ok(Some(SynthAudio {
                samples: vec![0.4; RATE as usize * 30],
                sample_rate: RATE,
            }))
        }
    }
    let source = two_utterance_source();
    let out = pipeline(Box::new(LongSynth)).dub(&source).unwrap();
    assert_eq!(out.duration_ms(), source.duration_ms());
}

#[test]
fn synth_at_lower_sample_rate_is_reformatted() {
    struct LowRateSynth;
    impl Synthesizer for LowRateSynth {
        fn synthesize(&self, _text: &str) -> redub::Result<Option<SynthAudio>> {
            Ok(Some(SynthAudio {
                samples: vec![0.4; 16000], // 1s at 16kHz
                sample_rate: 16000,
            }))
        }
    }
    let source = two_utterance_source();
    let out = pipeline(Box::new(LowRateSynth)).dub(&source).unwrap();
    assert_eq!(out.duration_ms(), source.duration_ms());
    assert_eq!(out.sample_rate, RATE);
}

#[test]
fn segment_manifest_assemble_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let source = two_utterance_source();

    // segment and save chunk WAVs, as the CLI does
    let (mut chunks, total_ms) = Segmenter::new(Default::default()).segment(&source);
    SpeechBoundaryLocator::new(Default::default()).locate_all(&mut chunks);
    assert_eq!(chunks.len(), 2);

    let mut paths = Vec::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let path = dir.path().join(format!("chunk_{:03}.wav", i));
        wav::write_wav(&chunk.audio, &path).unwrap();
        paths.push(path);
    }

    let manifest = Manifest::from_chunks(&chunks, Some(&paths), RATE, total_ms);
    let manifest_path = dir.path().join("chunks.json");
    manifest.write(&manifest_path).unwrap();

    // read everything back and reassemble
    let manifest = Manifest::read(&manifest_path).unwrap();
    let mut read_chunks = Vec::new();
    let mut read_segments = Vec::new();
    for record in manifest.chunks.values() {
        read_chunks.push(wav::read_wav(record.path.as_ref().unwrap()).unwrap());
        read_segments.push(record.orig_seg);
    }

    let out = assemble(&read_chunks, &read_segments, manifest.total_len_ms, RATE).unwrap();
    assert_eq!(out.duration_ms(), source.duration_ms());
}

#[test]
fn manifest_carries_recognized_text_after_dubbing() {
    let source = two_utterance_source();
    let p = pipeline(Box::new(ToneSynthesizer::new(RATE)));

    let (mut chunks, total_ms) = Segmenter::new(Default::default()).segment(&source);
    SpeechBoundaryLocator::new(Default::default()).locate_all(&mut chunks);
    let _processed = p.process_chunks(&mut chunks);

    let manifest = Manifest::from_chunks(&chunks, None, RATE, total_ms);
    let spoken: Vec<_> = manifest
        .chunks
        .values()
        .filter(|r| r.speech_boundary.is_some())
        .collect();
    assert!(!spoken.is_empty());
    for record in spoken {
        assert_eq!(record.text.as_deref(), Some("some recognized words"));
        assert_eq!(record.translated.as_deref(), Some("some recognized words"));
    }
}

#[test]
fn speechless_chunks_pass_through_bit_exact() {
    // transcriber that never produces text: every chunk passes through
    let source = two_utterance_source();
    let out = DubPipeline::new(
        PipelineConfig::default(),
        Box::new(FixedTranscriber {
            text: String::new(),
        }),
        Box::new(IdentityTranslator),
        Box::new(ToneSynthesizer::new(RATE)),
    )
    .dub(&source)
    .unwrap();

    assert_eq!(out.duration_ms(), source.duration_ms());
    // chunk content is unchanged where chunks were placed
    let idx = (1.0 * RATE as f64) as usize;
    assert!((out.samples[idx] - source.samples[idx]).abs() < 1e-6);
}
