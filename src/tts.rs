use std::fs;
use std::path::Path;
use std::process::Command;

use serde_json::json;
use tracing::info;

use crate::audio;
use crate::error::{RenderError, SynthesisError};

/// Narrate one scene through the ElevenLabs REST endpoint. The returned
/// MP3 is written next to `out_wav`, transcoded to 44.1 kHz WAV, and the
/// duration is re-measured from the transcoded file.
pub async fn synthesize_chunk(
    client: &reqwest::Client,
    text: &str,
    voice_id: &str,
    model_id: &str,
    api_key: &str,
    out_wav: &Path,
) -> Result<f64, SynthesisError> {
    let url = format!("https://api.elevenlabs.io/v1/text-to-speech/{}", voice_id);
    let resp = client
        .post(&url)
        .header("xi-api-key", api_key)
        .json(&json!({ "text": text, "model_id": model_id }))
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(SynthesisError::Status(status));
    }
    let audio_bytes = resp.bytes().await?;

    let mp3_path = out_wav.with_extension("mp3");
    fs::write(&mp3_path, &audio_bytes)?;

    let ff_status = Command::new("ffmpeg")
        .args(["-y", "-i"])
        .arg(&mp3_path)
        .args(["-ar", "44100", "-ac", "1"])
        .arg(out_wav)
        .status()?;
    if !ff_status.success() {
        return Err(SynthesisError::Decode);
    }

    let duration = audio::wav_duration_seconds(out_wav)?;
    info!("Narration synthesized: {:?} ({:.2}s)", out_wav, duration);
    Ok(duration)
}

/// Silence standing in for failed or keyless synthesis. Duration is
/// `chars / 15`, never under two seconds.
pub fn silent_fallback(text: &str, out_wav: &Path) -> Result<f64, RenderError> {
    let duration = (text.chars().count() as f64 / 15.0).max(2.0);
    audio::write_silence_wav(out_wav, duration)?;
    Ok(duration)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hound::WavReader;
    use tempfile::TempDir;

    #[test]
    fn fallback_never_goes_under_two_seconds() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("short.wav");
        let duration = silent_fallback("hi", &path).unwrap();
        assert_eq!(duration, 2.0);
    }

    #[test]
    fn fallback_scales_with_character_count() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("long.wav");
        let text = "x".repeat(150);
        let duration = silent_fallback(&text, &path).unwrap();
        assert!((duration - 10.0).abs() < f64::EPSILON);
    }

    #[test]
    fn fallback_writes_a_readable_clip() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("clip.wav");
        let duration = silent_fallback("a couple of words", &path).unwrap();

        let measured = audio::wav_duration_seconds(&path).unwrap();
        assert!((measured - duration).abs() < 1e-3);
        assert!(WavReader::open(&path).unwrap().len() > 0);
    }
}
