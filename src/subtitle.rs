use std::fs::File;
use std::io::Write;
use std::path::Path;

use tracing::info;

use crate::audio;
use crate::error::RenderError;
use crate::scenes::Scene;

const WRAP_WIDTH: usize = 30;

/// One SRT entry per scene along the cumulative timeline. Durations are
/// re-measured from each audio file rather than taken from the synthesis
/// step, so the timestamps always match what is actually on disk.
pub fn generate_srt(scenes: &[Scene], srt_path: &Path) -> Result<(), RenderError> {
    let mut f = File::create(srt_path)?;
    let mut cumulative_seconds = 0.0_f64;

    for (i, scene) in scenes.iter().enumerate() {
        let duration = audio::wav_duration_seconds(&scene.audio_path)?;
        let start = cumulative_seconds;
        let end = cumulative_seconds + duration;

        writeln!(f, "{}", i + 1)?;
        writeln!(f, "{} --> {}", format_srt_time(start), format_srt_time(end))?;
        for line in wrap_text(&scene.text, WRAP_WIDTH) {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;

        cumulative_seconds = end;
    }

    info!(
        "Wrote {} subtitle entries spanning {:.2}s to {:?}",
        scenes.len(),
        cumulative_seconds,
        srt_path
    );
    Ok(())
}

pub fn format_srt_time(seconds: f64) -> String {
    let total_ms = (seconds * 1000.0).round() as u64;
    let ms = total_ms % 1000;
    let total_sec = total_ms / 1000;
    let s = total_sec % 60;
    let total_min = total_sec / 60;
    let m = total_min % 60;
    let h = total_min / 60;
    format!("{:02}:{:02}:{:02},{:03}", h, m, s, ms)
}

pub fn wrap_text(s: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in s.split_whitespace() {
        if current.len() + word.len() + 1 > width && !current.is_empty() {
            lines.push(current.clone());
            current.clear();
            current.push_str(word);
        } else {
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
