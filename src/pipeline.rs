use std::fs;

use tempfile::TempDir;
use tracing::{info, warn};

use crate::args::Args;
use crate::audio;
use crate::error::RenderError;
use crate::scenes::Scene;
use crate::subtitle;
use crate::tts;
use crate::video::BrandConfig;

const COMBINED_WAV: &str = "combined.wav";
const SRT_NAME: &str = "subs.srt";
const REEL_NAME: &str = "reel.mp4";

/// Run synthesis, subtitles, and composition inside a scoped workspace and
/// hand back the finished MP4 bytes. The workspace is removed when the
/// `TempDir` drops, on success and on every error path alike.
pub async fn render_reel(
    client: &reqwest::Client,
    scene_texts: &[String],
    opts: &Args,
    brand: &BrandConfig,
) -> Result<Vec<u8>, RenderError> {
    let workspace = TempDir::new()?;
    info!("Pipeline workspace at {:?}", workspace.path());

    let mut scenes = Vec::with_capacity(scene_texts.len());
    let mut part_names = Vec::with_capacity(scene_texts.len());
    for (i, text) in scene_texts.iter().enumerate() {
        let part_name = format!("part_{:03}.wav", i);
        let audio_path = workspace.path().join(&part_name);

        let duration = match opts.api_key.as_deref() {
            Some(key) => {
                match tts::synthesize_chunk(
                    client,
                    text,
                    &opts.voice_id,
                    &opts.model_id,
                    key,
                    &audio_path,
                )
                .await
                {
                    Ok(duration) => duration,
                    Err(e) => {
                        warn!("Scene {} synthesis failed ({}); substituting silence", i, e);
                        tts::silent_fallback(text, &audio_path)?
                    }
                }
            }
            None => tts::silent_fallback(text, &audio_path)?,
        };

        info!("Scene {}/{}: {:.2}s narration", i + 1, scene_texts.len(), duration);
        scenes.push(Scene {
            text: text.clone(),
            audio_path,
            duration,
        });
        part_names.push(part_name);
    }

    let srt_path = workspace.path().join(SRT_NAME);
    subtitle::generate_srt(&scenes, &srt_path)?;

    audio::concat_wavs(workspace.path(), &part_names, COMBINED_WAV)?;

    crate::video::compose_video(workspace.path(), &scenes, COMBINED_WAV, brand, REEL_NAME)?;

    let bytes = fs::read(workspace.path().join(REEL_NAME))?;
    info!("Reel rendered: {} bytes", bytes.len());
    Ok(bytes)
}
