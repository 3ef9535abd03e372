//! Error types for redub.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RedubError {
    // Configuration errors
    #[error("Invalid configuration value for {key}: {message}")]
    ConfigInvalidValue { key: String, message: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Audio errors
    #[error("Audio format error: {message}")]
    AudioFormat { message: String },

    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    // Core algorithm invariant violations
    #[error("Invalid target duration: {value} (must be positive)")]
    InvalidDuration { value: f64 },

    #[error("Chunk/segment count mismatch at assembly: {chunks} chunks, {segments} segments")]
    LengthMismatch { chunks: usize, segments: usize },

    #[error("Chunk {index} is {chunk_ms}ms but its segment spans {segment_ms}ms")]
    ChunkDurationMismatch {
        index: usize,
        chunk_ms: u64,
        segment_ms: u64,
    },

    // External collaborator failures (ASR/MT/TTS/VAD are opaque to the core)
    #[error("External {stage} stage failed: {message}")]
    External { stage: &'static str, message: String },

    // Manifest serialization
    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    // Generic error for cases not covered above
    #[error("{0}")]
    Other(String),
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, RedubError>;
