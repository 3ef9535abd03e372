use anyhow::{Context, Result};
use clap::Parser;
use redub::audio::{wav, AudioBuffer};
use redub::cli::{Cli, Commands};
use redub::config::Config;
use redub::manifest::Manifest;
use redub::pipeline::{assemble, SpeechBoundaryLocator, Segmenter};
use std::path::{Path, PathBuf};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Segment {
            input,
            out_dir,
            no_audio,
        } => run_segment(&config, &input, &out_dir, no_audio, cli.quiet, cli.verbose),
        Commands::Assemble { manifest, output } => {
            run_assemble(&manifest, &output, cli.quiet)
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let config = match path {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Config::load_or_default(Path::new("redub.toml"))?,
    };
    Ok(config.with_env_overrides())
}

fn run_segment(
    config: &Config,
    input: &Path,
    out_dir: &Path,
    no_audio: bool,
    quiet: bool,
    verbose: u8,
) -> Result<()> {
    let audio = wav::read_wav(input)?;
    if verbose >= 1 {
        eprintln!(
            "redub: read {} ({}ms at {}Hz)",
            input.display(),
            audio.duration_ms(),
            audio.sample_rate
        );
    }

    let pipeline_config = config.pipeline_config(verbose);
    let (mut chunks, total_ms) = Segmenter::new(pipeline_config.segmenter).segment(&audio);
    SpeechBoundaryLocator::new(pipeline_config.boundary).locate_all(&mut chunks);

    std::fs::create_dir_all(out_dir)?;

    let paths: Option<Vec<PathBuf>> = if no_audio {
        None
    } else {
        let mut paths = Vec::with_capacity(chunks.len());
        for (i, chunk) in chunks.iter().enumerate() {
            let path = out_dir.join(format!("chunk_{:03}.wav", i));
            wav::write_wav(&chunk.audio, &path)?;
            paths.push(path);
        }
        Some(paths)
    };

    let manifest = Manifest::from_chunks(
        &chunks,
        paths.as_deref(),
        audio.sample_rate,
        total_ms,
    );
    let manifest_path = out_dir.join("chunks.json");
    manifest.write(&manifest_path)?;

    if !quiet {
        println!(
            "{} chunks over {}ms → {}",
            chunks.len(),
            total_ms,
            manifest_path.display()
        );
    }
    Ok(())
}

fn run_assemble(manifest_path: &Path, output: &Path, quiet: bool) -> Result<()> {
    let manifest = Manifest::read(manifest_path)?;
    let base = manifest_path.parent().unwrap_or(Path::new("."));

    let mut chunks = Vec::with_capacity(manifest.chunks.len());
    let mut segments = Vec::with_capacity(manifest.chunks.len());
    for (index, record) in &manifest.chunks {
        let path = record
            .path
            .as_ref()
            .with_context(|| format!("chunk {} has no audio path in the manifest", index))?;
        // relative paths resolve against the manifest's directory
        let resolved = if path.is_relative() {
            base.join(path)
        } else {
            path.clone()
        };
        chunks.push(wav::read_wav(&resolved)?);
        segments.push(record.orig_seg);
    }

    let track: AudioBuffer = assemble(
        &chunks,
        &segments,
        manifest.total_len_ms,
        manifest.sample_rate,
    )?;
    wav::write_wav(&track, output)?;

    if !quiet {
        println!(
            "assembled {}ms from {} chunks → {}",
            track.duration_ms(),
            chunks.len(),
            output.display()
        );
    }
    Ok(())
}
