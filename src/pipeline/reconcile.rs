//! Boundary reconciliation: placing a synthesized utterance inside a chunk.
//!
//! Maps a variable-duration synthesized utterance onto the chunk's original
//! speech window. A shorter utterance is recentered on the window's
//! midpoint; a longer one borrows time from the chunk's margins, sparing a
//! reserved pause buffer on each side; when even that is not enough, the
//! whole chunk is claimed and the caller stretches the audio to fit.
//! Deterministic: output depends only on the inputs.

use crate::interval::Interval;

/// Target window for synthesized audio inside a chunk, in chunk-relative
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Placement {
    /// No synthesized audio to place; the chunk passes through unmodified.
    None,
    /// Insert synthesized audio over `[start, end)`.
    Window { start: f64, end: f64 },
}

impl Placement {
    pub fn is_none(&self) -> bool {
        matches!(self, Placement::None)
    }

    /// Window width in seconds; 0.0 for `None`.
    pub fn duration(&self) -> f64 {
        match self {
            Placement::None => 0.0,
            Placement::Window { start, end } => end - start,
        }
    }
}

/// Computes where the synthesized utterance lands inside the chunk.
///
/// `chunk_len` and `synth_duration` in seconds; `boundary` is the chunk's
/// merged speech interval (`None` → pass-through); `pause` seconds are
/// reserved on each side of the boundary and never borrowed.
pub fn reconcile(
    chunk_len: f64,
    boundary: Option<Interval>,
    synth_duration: f64,
    pause: f64,
) -> Placement {
    let Some(boundary) = boundary else {
        return Placement::None;
    };

    let orig_duration = boundary.duration();
    let delta = synth_duration - orig_duration;

    if delta <= 0.0 {
        // Fits within the original window: recenter on its midpoint, then
        // clamp to chunk bounds. Left clamp first; the right clamp
        // recomputes the start from the (possibly clamped) end, so a chunk
        // shorter than synth_duration still yields a full-width window
        // pinned to the chunk's tail.
        let mut start = boundary.midpoint() - synth_duration / 2.0;
        let mut end = start + synth_duration;
        if start < 0.0 {
            start = 0.0;
            end = synth_duration;
        }
        if end > chunk_len {
            end = chunk_len;
            start = end - synth_duration;
        }
        return Placement::Window { start, end };
    }

    // Longer than the original window: borrow from the margins outside the
    // boundary, keeping `pause` seconds untouched on each side.
    let left_margin = boundary.start - pause;
    let right_margin = chunk_len - boundary.end - pause;
    let available = left_margin + right_margin;

    if delta <= available {
        let start = boundary.start - left_margin;
        Placement::Window {
            start,
            end: start + synth_duration,
        }
    } else {
        // No window satisfies the true duration; claim the whole chunk and
        // let the caller stretch the audio to fit.
        Placement::Window {
            start: 0.0,
            end: chunk_len,
        }
    }
}
