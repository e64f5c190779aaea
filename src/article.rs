use regex::Regex;
use reqwest::header::USER_AGENT;
use scraper::{Html, Selector};
use tracing::info;

use crate::error::FetchError;

pub async fn fetch_article_text(client: &reqwest::Client, url: &str) -> Result<String, FetchError> {
    info!("Fetching article from {}", url);
    let resp = client
        .get(url)
        .header(USER_AGENT, "reelsmith/0.1")
        .send()
        .await
        .map_err(|source| FetchError::Request {
            url: url.to_string(),
            source,
        })?;

    let status = resp.status();
    if !status.is_success() {
        return Err(FetchError::Status {
            url: url.to_string(),
            status,
        });
    }

    let body = resp.text().await.map_err(|source| FetchError::Request {
        url: url.to_string(),
        source,
    })?;

    let text = extract_paragraphs(&body);
    info!("Extracted {} chars of article text", text.len());
    Ok(text)
}

/// Paragraph-element text only, one paragraph per line. Kept synchronous
/// so the parsed DOM never crosses an await point.
fn extract_paragraphs(html: &str) -> String {
    let document = Html::parse_document(html);
    let paragraph_selector = Selector::parse("p").unwrap();
    let ws = Regex::new(r"\s+").unwrap();

    let mut paragraphs = Vec::new();
    for element in document.select(&paragraph_selector) {
        let raw = element.text().collect::<String>();
        let cleaned = ws.replace_all(raw.trim(), " ").to_string();
        paragraphs.push(cleaned);
    }
    paragraphs.join("\n")
}
