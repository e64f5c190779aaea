use clap::Parser;

#[derive(Parser, Debug, Clone)]
pub struct Args {
    #[clap(long, default_value = "0.0.0.0:8080")]
    pub bind: String,

    /// ElevenLabs API key; without it every scene gets silent narration.
    #[clap(long, env = "ELEVENLABS_API_KEY")]
    pub api_key: Option<String>,

    #[clap(long, default_value = "21m00Tcm4TlvDq8ikWAM")]
    pub voice_id: String,

    #[clap(long, default_value = "eleven_multilingual_v2")]
    pub model_id: String,

    #[clap(long, default_value_t = 5)]
    pub max_scenes: usize,
}
