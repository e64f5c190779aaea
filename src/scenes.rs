use std::path::PathBuf;

use tracing::info;

/// One narrated, captioned segment of the output reel. Built in two steps:
/// the summarizer fills in the text, synthesis adds the audio.
#[derive(Debug, Clone)]
pub struct Scene {
    pub text: String,
    pub audio_path: PathBuf,
    pub duration: f64,
}

/// Pick at most `max_scenes` paragraphs, spread evenly across the article
/// by sampling index `floor(i * P / n)`. Whole paragraphs only; nothing is
/// rewritten or merged.
pub fn summarise_text(article: &str, max_scenes: usize) -> Vec<String> {
    let paragraphs: Vec<&str> = article
        .lines()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect();
    if paragraphs.is_empty() || max_scenes == 0 {
        return Vec::new();
    }

    let n = max_scenes.min(paragraphs.len());
    let step = paragraphs.len() as f64 / n as f64;
    let scenes: Vec<String> = (0..n)
        .map(|i| paragraphs[(i as f64 * step) as usize].to_string())
        .collect();
    info!("Summarised {} paragraphs into {} scenes", paragraphs.len(), scenes.len());
    scenes
}

#[cfg(test)]
mod tests {
    use super::*;

    fn article(paragraphs: &[&str]) -> String {
        paragraphs.join("\n")
    }

    #[test]
    fn returns_at_most_max_scenes() {
        let text = article(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        assert_eq!(summarise_text(&text, 5).len(), 5);
    }

    #[test]
    fn short_article_keeps_every_paragraph() {
        let text = article(&["one", "two", "three"]);
        assert_eq!(summarise_text(&text, 5), vec!["one", "two", "three"]);
    }

    #[test]
    fn three_paragraphs_with_n_three_come_back_verbatim() {
        let text = article(&["alpha", "beta", "gamma"]);
        assert_eq!(summarise_text(&text, 3), vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn scenes_are_input_paragraphs_at_non_decreasing_indices() {
        let paragraphs: Vec<String> = (0..17).map(|i| format!("paragraph {}", i)).collect();
        let refs: Vec<&str> = paragraphs.iter().map(String::as_str).collect();
        let text = article(&refs);

        let scenes = summarise_text(&text, 5);
        assert_eq!(scenes.len(), 5);

        let mut last_index = 0;
        for scene in &scenes {
            let index = paragraphs
                .iter()
                .position(|p| p == scene)
                .expect("scene text must be one of the input paragraphs");
            assert!(index >= last_index);
            last_index = index;
        }
    }

    #[test]
    fn blank_article_yields_no_scenes() {
        assert!(summarise_text("", 5).is_empty());
        assert!(summarise_text("  \n\t\n   ", 5).is_empty());
    }

    #[test]
    fn blank_lines_between_paragraphs_are_dropped() {
        let text = "first\n\n  \nsecond\n";
        assert_eq!(summarise_text(text, 5), vec!["first", "second"]);
    }
}
