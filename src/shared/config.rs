//! Application configuration. Test duration, question source, speech-to-text, microphone.

use crate::domain::{DEFAULT_DURATION_SECS, DomainError};
use config::{ConfigBuilder, builder::DefaultState};
use serde::Deserialize;

pub const DEFAULT_STT_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_STT_MODEL: &str = "whisper-1";
pub const DEFAULT_SAMPLE_RATE: u32 = 16_000;

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Aptitude test length in seconds (default 900). Read from PREPDECK_ASSESSMENT_DURATION_SECS.
    #[serde(default)]
    pub assessment_duration_secs: Option<u32>,

    /// Optional JSON question bank; built-in samples when unset. Read from PREPDECK_QUESTION_BANK_PATH.
    #[serde(default)]
    pub question_bank_path: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Speech-to-text
    // ─────────────────────────────────────────────────────────────────────────
    /// API key for the transcription endpoint. Read from PREPDECK_STT_API_KEY.
    #[serde(default)]
    pub stt_api_key: Option<String>,

    /// API root. Defaults to OpenAI. Read from PREPDECK_STT_API_URL.
    #[serde(default)]
    pub stt_api_url: Option<String>,

    /// Model name. Defaults to "whisper-1". Read from PREPDECK_STT_MODEL.
    #[serde(default)]
    pub stt_model: Option<String>,

    /// Simulated delay for the mock transcriber. Read from PREPDECK_MOCK_STT_DELAY_MS.
    #[serde(default)]
    pub mock_stt_delay_ms: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Microphone
    // ─────────────────────────────────────────────────────────────────────────
    /// Whether the simulated microphone grants access (default true). Read from PREPDECK_MIC_AVAILABLE.
    #[serde(default)]
    pub mic_available: Option<bool>,

    #[serde(default)]
    pub mic_sample_rate: Option<u32>,
}

impl AppConfig {
    pub fn load() -> Result<Self, DomainError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("PREPDECK").try_parsing(true));
        if let Ok(path) = std::env::var("PREPDECK_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        Self::from_builder(c)
    }

    /// Build and deserialize, mapping `config` failures into `DomainError::Config`.
    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, DomainError> {
        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DomainError::Config(e.to_string()))
    }

    pub fn assessment_duration_secs_or_default(&self) -> u32 {
        self.assessment_duration_secs
            .filter(|&s| s > 0)
            .unwrap_or(DEFAULT_DURATION_SECS)
    }

    pub fn stt_api_url_or_default(&self) -> String {
        self.stt_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_STT_API_URL.to_string())
    }

    pub fn stt_model_or_default(&self) -> String {
        self.stt_model
            .clone()
            .unwrap_or_else(|| DEFAULT_STT_MODEL.to_string())
    }

    pub fn mock_stt_delay_ms_or_default(&self) -> u64 {
        self.mock_stt_delay_ms.unwrap_or(300)
    }

    pub fn mic_available_or_default(&self) -> bool {
        self.mic_available.unwrap_or(true)
    }

    pub fn mic_sample_rate_or_default(&self) -> u32 {
        self.mic_sample_rate
            .filter(|&r| r > 0)
            .unwrap_or(DEFAULT_SAMPLE_RATE)
    }

    /// True if a real transcription endpoint is configured (API key present).
    pub fn is_stt_configured(&self) -> bool {
        self.stt_api_key.as_deref().is_some_and(|k| !k.is_empty())
    }
}
