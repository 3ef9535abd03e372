//! WAV file reading and writing.
//!
//! Supports arbitrary sample rates, channel counts, and sample formats on
//! read, downmixing to mono f32. Writing emits 16-bit PCM mono.

use crate::audio::buffer::AudioBuffer;
use crate::error::{RedubError, Result};
use std::io::{Read, Seek, Write};
use std::path::Path;

/// Reads a WAV file into a mono [`AudioBuffer`] at its native sample rate.
pub fn read_wav(path: &Path) -> Result<AudioBuffer> {
    let reader = hound::WavReader::open(path).map_err(|e| RedubError::AudioFormat {
        message: format!("Failed to open WAV file {}: {}", path.display(), e),
    })?;
    decode(reader)
}

/// Reads WAV data from any reader (for testing/flexibility).
pub fn read_wav_from(reader: impl Read) -> Result<AudioBuffer> {
    let reader = hound::WavReader::new(reader).map_err(|e| RedubError::AudioFormat {
        message: format!("Failed to parse WAV data: {}", e),
    })?;
    decode(reader)
}

fn decode<R: Read>(mut reader: hound::WavReader<R>) -> Result<AudioBuffer> {
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(RedubError::AudioFormat {
            message: "WAV file reports zero channels".to_string(),
        });
    }

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| RedubError::AudioFormat {
                message: format!("Failed to read WAV samples: {}", e),
            })?,
        hound::SampleFormat::Int => {
            let max = (1i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / max))
                .collect::<std::result::Result<Vec<_>, _>>()
                .map_err(|e| RedubError::AudioFormat {
                    message: format!("Failed to read WAV samples: {}", e),
                })?
        }
    };

    // Downmix interleaved channels by averaging
    let mono = if channels > 1 {
        samples
            .chunks_exact(channels)
            .map(|frame| frame.iter().sum::<f32>() / channels as f32)
            .collect()
    } else {
        samples
    };

    Ok(AudioBuffer::new(mono, spec.sample_rate))
}

/// Writes a mono buffer as 16-bit PCM WAV.
pub fn write_wav(buffer: &AudioBuffer, path: &Path) -> Result<()> {
    let file = std::fs::File::create(path)?;
    write_wav_to(buffer, std::io::BufWriter::new(file))
}

/// Writes a mono buffer as 16-bit PCM WAV to any writer.
pub fn write_wav_to(buffer: &AudioBuffer, writer: impl Write + Seek) -> Result<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: buffer.sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut wav = hound::WavWriter::new(writer, spec)?;
    for &s in &buffer.samples {
        let clamped = s.clamp(-1.0, 1.0);
        wav.write_sample((clamped * i16::MAX as f32) as i16)?;
    }
    wav.finalize()?;
    Ok(())
}

/// Simple linear interpolation resampling to a target rate.
///
/// Good enough for moving synthesized speech between 16/24/48 kHz rates;
/// speech content has little energy near Nyquist.
pub fn resample(samples: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let src_pos = i as f64 * ratio;
            let idx = src_pos as usize;
            let frac = (src_pos - idx as f64) as f32;

            if idx + 1 < samples.len() {
                samples[idx] * (1.0 - frac) + samples[idx + 1] * frac
            } else {
                samples[samples.len() - 1]
            }
        })
        .collect()
}
