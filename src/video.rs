use std::fs;
use std::path::Path;
use std::process::Command;

use tracing::info;

use crate::audio;
use crate::error::RenderError;
use crate::scenes::Scene;
use crate::subtitle;

pub const WIDTH: u32 = 1080;
pub const HEIGHT: u32 = 1920;
pub const FPS: u32 = 30;

const FONT_SIZE: u32 = 48;
const CAPTION_WRAP: usize = 30;

/// Fixed reel styling. No config file or environment variable feeds this.
#[derive(Debug, Clone)]
pub struct BrandConfig {
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub accent_color: &'static str,
    pub font: &'static str,
}

impl Default for BrandConfig {
    fn default() -> Self {
        BrandConfig {
            primary_color: "#005BB7",
            secondary_color: "#E5E5E5",
            accent_color: "#FF6600",
            font: "Merriweather",
        }
    }
}

pub fn hex_to_rgb(color: &str) -> Result<[u8; 3], RenderError> {
    let hex = color.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(RenderError::Color(color.to_string()));
    }
    let mut rgb = [0u8; 3];
    for (i, byte) in rgb.iter_mut().enumerate() {
        *byte = u8::from_str_radix(&hex[2 * i..2 * i + 2], 16)
            .map_err(|_| RenderError::Color(color.to_string()))?;
    }
    Ok(rgb)
}

/// Render the reel: a solid secondary-color background for the full length
/// of the concatenated narration, captions drawn per scene along the same
/// cumulative timeline the subtitle pass used, H.264 video with AAC audio.
pub fn compose_video(
    workspace: &Path,
    scenes: &[Scene],
    combined_wav: &str,
    brand: &BrandConfig,
    out_name: &str,
) -> Result<(), RenderError> {
    let total_duration = audio::wav_duration_seconds(&workspace.join(combined_wav))?;
    let bg = hex_to_rgb(brand.secondary_color)?;

    // Caption text goes through files so no scene text ever needs
    // filtergraph escaping.
    let mut captions = Vec::new();
    let mut cumulative_seconds = 0.0_f64;
    for (i, scene) in scenes.iter().enumerate() {
        let caption_name = format!("caption_{:03}.txt", i);
        let wrapped = subtitle::wrap_text(&scene.text, CAPTION_WRAP).join("\n");
        fs::write(workspace.join(&caption_name), wrapped)?;

        let duration = audio::wav_duration_seconds(&scene.audio_path)?;
        captions.push((caption_name, cumulative_seconds, duration));
        cumulative_seconds += duration;
    }

    let background = format!(
        "color=c=0x{:02X}{:02X}{:02X}:s={}x{}:r={}:d={:.3}",
        bg[0], bg[1], bg[2], WIDTH, HEIGHT, FPS, total_duration
    );
    let filters = drawtext_filters(&captions, brand)?;

    let mut ff_args: Vec<String> = vec![
        "-y".into(),
        "-f".into(),
        "lavfi".into(),
        "-i".into(),
        background,
        "-i".into(),
        combined_wav.into(),
    ];
    if !filters.is_empty() {
        ff_args.push("-vf".into());
        ff_args.push(filters);
    }
    ff_args.extend(
        [
            "-map", "0:v:0", "-map", "1:a:0", "-c:v", "libx264", "-pix_fmt", "yuv420p", "-c:a",
            "aac", "-r", "30", "-shortest", out_name,
        ]
        .map(String::from),
    );

    info!("Rendering {:.2}s reel to {}", total_duration, out_name);
    let status = Command::new("ffmpeg")
        .current_dir(workspace)
        .args(&ff_args)
        .status()?;
    if !status.success() {
        return Err(RenderError::Ffmpeg(
            "ffmpeg failed to render the reel".to_string(),
        ));
    }
    Ok(())
}

/// One centered drawtext per scene, enabled over that scene's window on
/// the cumulative timeline.
fn drawtext_filters(
    captions: &[(String, f64, f64)],
    brand: &BrandConfig,
) -> Result<String, RenderError> {
    let text_rgb = hex_to_rgb(brand.primary_color)?;
    let fontcolor = format!("0x{:02X}{:02X}{:02X}", text_rgb[0], text_rgb[1], text_rgb[2]);

    let filters: Vec<String> = captions
        .iter()
        .map(|(file, start, duration)| {
            format!(
                "drawtext=textfile={}:font='{}':fontsize={}:fontcolor={}:\
                 x=(w-text_w)/2:y=(h-text_h)/2:line_spacing=16:\
                 enable='between(t,{:.3},{:.3})'",
                file,
                brand.font,
                FONT_SIZE,
                fontcolor,
                start,
                start + duration
            )
        })
        .collect();
    Ok(filters.join(","))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brand_hex_codes_convert() {
        assert_eq!(hex_to_rgb("#005BB7").unwrap(), [0, 91, 183]);
        assert_eq!(hex_to_rgb("#E5E5E5").unwrap(), [229, 229, 229]);
        assert_eq!(hex_to_rgb("#FF6600").unwrap(), [255, 102, 0]);
        assert_eq!(hex_to_rgb("000000").unwrap(), [0, 0, 0]);
    }

    #[test]
    fn malformed_hex_is_rejected() {
        assert!(hex_to_rgb("#12345").is_err());
        assert!(hex_to_rgb("#GGGGGG").is_err());
        assert!(hex_to_rgb("").is_err());
    }

    #[test]
    fn caption_windows_follow_the_cumulative_timeline() {
        let brand = BrandConfig::default();
        let captions = vec![
            ("caption_000.txt".to_string(), 0.0, 2.0),
            ("caption_001.txt".to_string(), 2.0, 3.5),
        ];
        let filters = drawtext_filters(&captions, &brand).unwrap();

        assert_eq!(filters.matches("drawtext=").count(), 2);
        assert!(filters.contains("between(t,0.000,2.000)"));
        assert!(filters.contains("between(t,2.000,5.500)"));
        assert!(filters.contains("x=(w-text_w)/2"));
        assert!(filters.contains("font='Merriweather'"));
        assert!(filters.contains("fontcolor=0x005BB7"));
    }

    #[test]
    fn no_captions_means_no_filter() {
        let filters = drawtext_filters(&[], &BrandConfig::default()).unwrap();
        assert!(filters.is_empty());
    }
}
