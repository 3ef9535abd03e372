//! redub - re-times dubbed speech to fit a source recording's speech windows.
//!
//! Segments a recording on silence, locates per-chunk speech boundaries,
//! reconciles each synthesized utterance's duration against its original
//! window, and reassembles a track of exactly the original length.

#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod audio;
pub mod cli;
pub mod config;
pub mod defaults;
pub mod error;
pub mod interval;
pub mod manifest;
pub mod pipeline;
pub mod services;

// Core types
pub use interval::{merge_intervals, Interval};
pub use pipeline::reconcile::{reconcile, Placement};
pub use pipeline::types::{Chunk, SegmentMs};

// Pipeline
pub use pipeline::{DubPipeline, PipelineConfig};

// External collaborator seams
pub use audio::{SilenceDetector, SpeechDetector};
pub use services::{SynthAudio, Synthesizer, Transcriber, Translator};

// Error handling
pub use error::{RedubError, Result};

// Config
pub use config::Config;
