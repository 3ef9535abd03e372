//! Default configuration constants for redub.
//!
//! This module provides shared constants used across different configuration types
//! to ensure consistency and eliminate duplication.

/// Default audio sample rate in Hz.
///
/// 24kHz matches the output rate of common neural TTS voices, so synthesized
/// audio can usually be overlaid without an extra resampling pass.
pub const SAMPLE_RATE: u32 = 24000;

/// Default minimum silence length in milliseconds for chunk splitting.
///
/// A pause must last at least this long before the segmenter treats it as a
/// chunk boundary. 700ms skips breath pauses while still splitting between
/// sentences.
pub const MIN_SILENCE_LEN_MS: u64 = 700;

/// Default silence threshold in dBFS for chunk splitting.
///
/// Audio quieter than this is considered silence. -40 dBFS is tuned for
/// typical narrated video tracks with some room tone.
pub const SILENCE_THRESH_DB: f64 = -40.0;

/// Default silence padding kept on each side of a detected chunk, in milliseconds.
///
/// Preserves soft onsets and word endings that sit below the silence threshold.
/// Padding is clamped so adjacent chunks never overlap.
pub const KEEP_SILENCE_MS: u64 = 300;

/// Default gap threshold in seconds when merging raw VAD intervals.
///
/// Speech intervals closer than this collapse into one boundary; a chunk is
/// assumed to contain at most one meaningful utterance.
pub const MERGE_GAP_SECS: f64 = 1.0;

/// Default reserved pause in seconds on each side of a speech boundary.
///
/// This buffer is never borrowed when a longer synthesized utterance needs to
/// expand into the chunk's margins.
pub const PAUSE_SECS: f64 = 0.005;

/// Default fade-out duration in milliseconds applied to synthesized audio.
pub const FADE_OUT_MS: u64 = 50;

/// Default gain in dB applied to the original audio under the overlay window.
///
/// Ducking the original keeps ambience audible beneath the dubbed voice.
pub const ORIG_GAIN_DB: f64 = -12.0;

/// Default gain in dB applied to the synthesized audio before overlay.
pub const SYNTH_GAIN_DB: f64 = 0.0;

/// Default VAD energy threshold in dBFS for speech-boundary location.
pub const VAD_THRESH_DB: f64 = -35.0;

/// Analysis window length in milliseconds for energy measurements.
///
/// Both the silence detector and the energy VAD measure RMS over windows of
/// this size, so all detected positions are whole-millisecond aligned.
pub const FRAME_MS: u64 = 10;
