use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::process::Command;

use hound::{SampleFormat, WavReader, WavSpec, WavWriter};
use tracing::{info, warn};

use crate::error::RenderError;

pub const SAMPLE_RATE: u32 = 44_100;

pub fn wav_duration_seconds(path: &Path) -> Result<f64, hound::Error> {
    let reader = WavReader::open(path)?;
    let spec = reader.spec();
    let samples = reader.len();
    let frames = samples as f64 / spec.channels as f64;
    Ok(frames / spec.sample_rate as f64)
}

/// Mono 16-bit 44.1 kHz zero samples for the requested duration.
pub fn write_silence_wav(path: &Path, duration: f64) -> Result<(), hound::Error> {
    let spec = WavSpec {
        channels: 1,
        sample_rate: SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };
    let mut writer = WavWriter::create(path, spec)?;
    let frames = (duration * SAMPLE_RATE as f64).round() as u64;
    for _ in 0..frames {
        writer.write_sample(0i16)?;
    }
    writer.finalize()
}

/// Concatenate the narration parts into one WAV with ffmpeg's concat
/// demuxer. Stream copy first; if the parts disagree on format, retry
/// with a PCM re-encode.
pub fn concat_wavs(dir: &Path, parts: &[String], out_name: &str) -> Result<(), RenderError> {
    let list_name = "files.txt";
    {
        let mut f = File::create(dir.join(list_name))?;
        for part in parts {
            writeln!(f, "file '{}'", part)?;
        }
    }

    info!("Concatenating {} narration parts into {}", parts.len(), out_name);
    let status = Command::new("ffmpeg")
        .current_dir(dir)
        .args(["-y", "-f", "concat", "-safe", "0", "-i", list_name, "-c", "copy", out_name])
        .status()?;

    if !status.success() {
        warn!("ffmpeg concat with copy failed; retrying with re-encode");
        let status2 = Command::new("ffmpeg")
            .current_dir(dir)
            .args([
                "-y", "-f", "concat", "-safe", "0", "-i", list_name, "-c:a", "pcm_s16le", out_name,
            ])
            .status()?;
        if !status2.success() {
            return Err(RenderError::Ffmpeg(
                "ffmpeg failed to concatenate narration audio".to_string(),
            ));
        }
    }
    Ok(())
}
