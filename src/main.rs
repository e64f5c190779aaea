use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Json, Response},
    routing::get,
};
use clap::Parser;
use serde::{Deserialize, Serialize};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod args;
mod article;
mod audio;
mod error;
mod pipeline;
mod scenes;
mod subtitle;
mod tts;
mod video;

use args::Args;
use video::BrandConfig;

struct AppState {
    client: reqwest::Client,
    args: Args,
    brand: BrandConfig,
}

#[derive(Debug, Deserialize)]
struct ConvertParams {
    url: String,
    #[serde(default = "default_format")]
    format: String,
}

fn default_format() -> String {
    "mp4".to_string()
}

#[derive(Debug, Serialize)]
struct ConvertResponse {
    url: String,
    scenes: Vec<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args = Args::parse();
    if args.api_key.is_none() {
        info!("No TTS API key configured; narration will be silent");
    }

    let state = Arc::new(AppState {
        client: reqwest::Client::new(),
        args: args.clone(),
        brand: BrandConfig::default(),
    });

    let app = Router::new()
        .route("/convert", get(convert))
        .with_state(state);

    info!("Listening on {}", args.bind);
    let listener = tokio::net::TcpListener::bind(&args.bind).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Convert an article to a reel, or with `format=json` return the scene
/// texts alone (no synthesis, no subtitles, no workspace).
async fn convert(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ConvertParams>,
) -> Response {
    let article = match article::fetch_article_text(&state.client, &params.url).await {
        Ok(text) => text,
        Err(e) => {
            error!("Article fetch failed: {}", e);
            return (
                StatusCode::BAD_REQUEST,
                format!("failed to fetch article: {}", e),
            )
                .into_response();
        }
    };

    let scene_texts = scenes::summarise_text(&article, state.args.max_scenes);

    if params.format.eq_ignore_ascii_case("json") {
        return Json(ConvertResponse {
            url: params.url,
            scenes: scene_texts,
        })
        .into_response();
    }

    match pipeline::render_reel(&state.client, &scene_texts, &state.args, &state.brand).await {
        Ok(bytes) => (
            [
                (header::CONTENT_TYPE, "video/mp4"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"reel.mp4\"",
                ),
            ],
            bytes,
        )
            .into_response(),
        Err(e) => {
            error!("Reel generation failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to generate video: {}", e),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_defaults_to_mp4() {
        let params: ConvertParams =
            serde_json::from_value(serde_json::json!({ "url": "https://example.com/story" }))
                .unwrap();
        assert_eq!(params.format, "mp4");
        assert_eq!(params.url, "https://example.com/story");
    }

    #[test]
    fn explicit_json_format_is_parsed() {
        let params: ConvertParams = serde_json::from_value(serde_json::json!({
            "url": "https://example.com/story",
            "format": "json",
        }))
        .unwrap();
        assert_eq!(params.format, "json");
    }
}
