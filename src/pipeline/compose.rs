//! Chunk composition: overlaying synthesized audio onto the original chunk.

use crate::audio::buffer::secs_to_samples;
use crate::audio::{wav, AudioBuffer};
use crate::defaults;
use crate::error::Result;
use crate::pipeline::reconcile::Placement;

/// Post-processing options for the overlay.
#[derive(Debug, Clone, Copy)]
pub struct ComposeOptions {
    /// Gain (dB) applied to the original audio inside the window.
    pub gain_original_db: f64,
    /// Gain (dB) applied to the synthesized audio before mixing.
    pub gain_synth_db: f64,
    /// Fade-out length (ms) applied to the synthesized audio.
    pub fade_out_ms: u64,
    /// Headroom (dB) left when peak-normalizing the synthesized audio.
    pub normalize_headroom_db: f64,
}

impl Default for ComposeOptions {
    fn default() -> Self {
        Self {
            gain_original_db: defaults::ORIG_GAIN_DB,
            gain_synth_db: defaults::SYNTH_GAIN_DB,
            fade_out_ms: defaults::FADE_OUT_MS,
            normalize_headroom_db: 0.1,
        }
    }
}

/// Overlays `synth` onto the `placement` window of `original`.
///
/// `Placement::None` returns the original unchanged. The synthesized audio
/// is resampled to the chunk's rate and truncated to the window — the
/// window length is authoritative, the overlay never extends it. Output
/// duration always equals input chunk duration.
pub fn compose(
    original: &AudioBuffer,
    placement: Placement,
    synth: &AudioBuffer,
    opts: &ComposeOptions,
) -> Result<AudioBuffer> {
    let Placement::Window { start, end } = placement else {
        return Ok(original.clone());
    };

    let rate = original.sample_rate;
    // Clamp to chunk bounds; a placement produced by the tail-pinning clamp
    // can start before 0.
    let start_idx = secs_to_samples(start.max(0.0), rate).min(original.samples.len());
    let end_idx = secs_to_samples(end.max(0.0), rate).min(original.samples.len());
    let (start_idx, end_idx) = (start_idx.min(end_idx), end_idx);
    let window_len = end_idx - start_idx;

    // Reformat the synthesized audio for the window: resample to chunk
    // rate, truncate (never extend), fade-out, normalize, gain.
    let mut voiced = AudioBuffer::new(
        wav::resample(&synth.samples, synth.sample_rate, rate),
        rate,
    );
    voiced.truncate(window_len);
    voiced.fade_out(opts.fade_out_ms);
    voiced.normalize(opts.normalize_headroom_db);
    voiced.apply_gain_db(opts.gain_synth_db);

    // Duck the window, overlay the synthesized audio on it, splice back.
    let mut out = original.clone();
    let mut window = AudioBuffer::new(out.samples[start_idx..end_idx].to_vec(), rate);
    window.apply_gain_db(opts.gain_original_db);
    window.overlay(&voiced)?;
    out.samples[start_idx..end_idx].copy_from_slice(&window.samples);

    debug_assert_eq!(out.samples.len(), original.samples.len());
    Ok(out)
}
