//! Audio primitives: buffers, WAV I/O, energy detection, time scaling.

pub mod buffer;
pub mod silence;
pub mod stretch;
pub mod vad;
pub mod wav;

pub use buffer::AudioBuffer;
pub use silence::{EnergySilenceDetector, SilenceDetector};
pub use vad::{EnergyVad, SpeechDetector};
