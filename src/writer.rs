// src/writer.rs
// Peak-normalized 16-bit WAV output and the companion text files

use crate::error::{KochError, Result};
use crate::synth::AudioBuffer;
use hound::{SampleFormat, WavSpec, WavWriter};
use std::fs;
use std::path::Path;

const FULL_SCALE: f64 = i16::MAX as f64;

/// Scales the buffer so its peak lands on ±32767.
/// Returns `None` when the buffer is empty or silent.
pub fn normalize_to_i16(samples: &[f32]) -> Option<Vec<i16>> {
    let peak = samples.iter().fold(0.0f64, |peak, s| peak.max((*s as f64).abs()));
    if peak == 0.0 {
        return None;
    }
    Some(
        samples
            .iter()
            .map(|&s| (s as f64 / peak * FULL_SCALE).round() as i16)
            .collect(),
    )
}

/// Consumes the buffer and writes it as mono 16-bit PCM at its own sample rate.
pub fn save_audio(buffer: AudioBuffer, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let sample_rate = buffer.sample_rate();
    let pcm = normalize_to_i16(buffer.samples()).ok_or_else(|| KochError::EmptyAudioBuffer {
        path: path.to_path_buf(),
    })?;

    ensure_parent(path)?;
    let spec = WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut writer = WavWriter::create(path, spec).map_err(|e| KochError::wav_write(path, e))?;
    for sample in pcm {
        writer
            .write_sample(sample)
            .map_err(|e| KochError::wav_write(path, e))?;
    }
    writer.finalize().map_err(|e| KochError::wav_write(path, e))?;
    Ok(())
}

/// Writes `text` verbatim as UTF-8 with no trailing newline.
pub fn save_text(text: &str, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    ensure_parent(path)?;
    fs::write(path, text).map_err(|e| KochError::file_write(path, e))
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            fs::create_dir_all(dir).map_err(|e| KochError::file_write(dir, e))
        }
        _ => Ok(()),
    }
}
