//! Command-line interface for redub
//!
//! Provides argument parsing using clap derive macros.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Re-times dubbed speech to fit a source recording's speech windows
#[derive(Parser, Debug)]
#[command(name = "redub", version, about = "Dubbed-speech re-timing tools")]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress output (quiet mode)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose output (-v: per-chunk progress, -vv: full diagnostics)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Split a WAV into silence-delimited chunks with speech boundaries
    Segment {
        /// Input WAV file
        input: PathBuf,

        /// Directory for chunk WAVs and the manifest JSON
        #[arg(long, short, value_name = "DIR", default_value = "chunks")]
        out_dir: PathBuf,

        /// Write only the manifest, not per-chunk WAV files
        #[arg(long)]
        no_audio: bool,
    },

    /// Recombine chunk WAVs described by a manifest into a full-length track
    Assemble {
        /// Manifest JSON produced by `segment`
        manifest: PathBuf,

        /// Output WAV file
        #[arg(long, short, value_name = "PATH")]
        output: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_parsing() {
        let cli = Cli::try_parse_from(["redub", "segment", "in.wav", "--out-dir", "/tmp/c"])
            .expect("should parse");
        match cli.command {
            Commands::Segment {
                input,
                out_dir,
                no_audio,
            } => {
                assert_eq!(input, PathBuf::from("in.wav"));
                assert_eq!(out_dir, PathBuf::from("/tmp/c"));
                assert!(!no_audio);
            }
            _ => panic!("wrong command"),
        }
    }

    #[test]
    fn test_assemble_requires_output() {
        assert!(Cli::try_parse_from(["redub", "assemble", "m.json"]).is_err());
        let cli = Cli::try_parse_from(["redub", "assemble", "m.json", "-o", "out.wav"])
            .expect("should parse");
        assert!(matches!(cli.command, Commands::Assemble { .. }));
    }

    #[test]
    fn test_verbosity_counts() {
        let cli =
            Cli::try_parse_from(["redub", "-vv", "segment", "in.wav"]).expect("should parse");
        assert_eq!(cli.verbose, 2);
    }
}
