use thiserror::Error;

/// Failure to retrieve the source article. Always surfaced to the client
/// as a 400; never retried.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{url} returned {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
}

/// Failure while synthesizing narration for one scene. Never surfaced:
/// the pipeline downgrades the scene to silence instead.
#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("tts request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("tts endpoint returned {0}")]
    Status(reqwest::StatusCode),

    #[error("could not store narration audio: {0}")]
    Io(#[from] std::io::Error),

    #[error("could not read narration audio: {0}")]
    Wav(#[from] hound::Error),

    #[error("ffmpeg failed to decode narration audio")]
    Decode,
}

/// Failure in any post-fetch stage other than per-scene synthesis.
/// Aborts the request with a 500; the workspace is still removed.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("could not read audio file: {0}")]
    Wav(#[from] hound::Error),

    #[error("invalid color code '{0}'")]
    Color(String),

    #[error("{0}")]
    Ffmpeg(String),
}
