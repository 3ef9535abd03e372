//! TOML configuration for redub.

use crate::defaults;
use crate::error::{RedubError, Result};
use crate::pipeline::{BoundaryConfig, ComposeOptions, PipelineConfig, SegmenterConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub audio: AudioConfig,
    pub segmenter: SegmenterSection,
    pub boundary: BoundarySection,
    pub postprocess: PostprocessSection,
}

/// Audio format configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AudioConfig {
    pub sample_rate: u32,
}

/// Chunk segmentation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SegmenterSection {
    pub min_silence_len_ms: u64,
    pub silence_thresh_db: f64,
    pub keep_silence_ms: u64,
}

/// Speech-boundary location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BoundarySection {
    pub merge_gap_secs: f64,
    pub vad_thresh_db: f64,
}

/// Overlay post-processing configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PostprocessSection {
    pub pause_secs: f64,
    pub fade_out_ms: u64,
    pub orig_gain_db: f64,
    pub synth_gain_db: f64,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            sample_rate: defaults::SAMPLE_RATE,
        }
    }
}

impl Default for SegmenterSection {
    fn default() -> Self {
        Self {
            min_silence_len_ms: defaults::MIN_SILENCE_LEN_MS,
            silence_thresh_db: defaults::SILENCE_THRESH_DB,
            keep_silence_ms: defaults::KEEP_SILENCE_MS,
        }
    }
}

impl Default for BoundarySection {
    fn default() -> Self {
        Self {
            merge_gap_secs: defaults::MERGE_GAP_SECS,
            vad_thresh_db: defaults::VAD_THRESH_DB,
        }
    }
}

impl Default for PostprocessSection {
    fn default() -> Self {
        Self {
            pause_secs: defaults::PAUSE_SECS,
            fade_out_ms: defaults::FADE_OUT_MS,
            orig_gain_db: defaults::ORIG_GAIN_DB,
            synth_gain_db: defaults::SYNTH_GAIN_DB,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Returns an error if the file contains invalid TOML.
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file, or return defaults if the file
    /// doesn't exist. Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Ok(config) => Ok(config),
            Err(RedubError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - REDUB_SAMPLE_RATE → audio.sample_rate
    /// - REDUB_PAUSE_SECS → postprocess.pause_secs
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(rate) = std::env::var("REDUB_SAMPLE_RATE") {
            if let Ok(rate) = rate.parse::<u32>() {
                self.audio.sample_rate = rate;
            }
        }
        if let Ok(pause) = std::env::var("REDUB_PAUSE_SECS") {
            if let Ok(pause) = pause.parse::<f64>() {
                self.postprocess.pause_secs = pause;
            }
        }
        self
    }

    /// Checks cross-field constraints the serde layer can't express.
    pub fn validate(&self) -> Result<()> {
        if self.audio.sample_rate == 0 || self.audio.sample_rate % 1000 != 0 {
            return Err(RedubError::ConfigInvalidValue {
                key: "audio.sample_rate".to_string(),
                message: format!(
                    "must be a positive multiple of 1000 Hz, got {}",
                    self.audio.sample_rate
                ),
            });
        }
        if self.postprocess.pause_secs < 0.0 {
            return Err(RedubError::ConfigInvalidValue {
                key: "postprocess.pause_secs".to_string(),
                message: "must be nonnegative".to_string(),
            });
        }
        if self.boundary.merge_gap_secs < 0.0 {
            return Err(RedubError::ConfigInvalidValue {
                key: "boundary.merge_gap_secs".to_string(),
                message: "must be nonnegative".to_string(),
            });
        }
        Ok(())
    }

    /// Maps the file-level config onto the pipeline's stage configs.
    pub fn pipeline_config(&self, verbosity: u8) -> PipelineConfig {
        PipelineConfig {
            segmenter: SegmenterConfig {
                min_silence_len_ms: self.segmenter.min_silence_len_ms,
                silence_thresh_db: self.segmenter.silence_thresh_db,
                keep_silence_ms: self.segmenter.keep_silence_ms,
            },
            boundary: BoundaryConfig {
                merge_gap_secs: self.boundary.merge_gap_secs,
            },
            compose: ComposeOptions {
                gain_original_db: self.postprocess.orig_gain_db,
                gain_synth_db: self.postprocess.synth_gain_db,
                fade_out_ms: self.postprocess.fade_out_ms,
                normalize_headroom_db: 0.1,
            },
            pause_secs: self.postprocess.pause_secs,
            verbosity,
        }
    }
}
