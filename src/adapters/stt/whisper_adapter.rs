//! OpenAI-compatible speech-to-text adapter.
//!
//! Uploads the recording as WAV to `{base_url}/audio/transcriptions`. Works with OpenAI,
//! Azure-style proxies, and local Whisper servers that mirror the same endpoint.

use crate::domain::{CapturedAudio, DomainError};
use crate::ports::TranscriptionPort;
use reqwest::multipart;
use serde::Deserialize;
use tracing::{debug, info};

pub struct WhisperTranscriber {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

#[derive(Debug, Deserialize)]
struct TranscriptionResponse {
    text: String,
}

impl WhisperTranscriber {
    /// # Arguments
    /// * `base_url` - API root (e.g. "https://api.openai.com/v1")
    /// * `api_key` - Bearer token (can be empty for local servers)
    /// * `model` - Model name (e.g. "whisper-1")
    pub fn new(base_url: String, api_key: String, model: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
            model,
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/audio/transcriptions", self.base_url.trim_end_matches('/'))
    }

    fn parse_response(body: &str) -> Result<String, DomainError> {
        let parsed: TranscriptionResponse = serde_json::from_str(body)
            .map_err(|e| DomainError::Transcription(format!("parse response: {}", e)))?;
        Ok(parsed.text.trim().to_string())
    }
}

#[async_trait::async_trait]
impl TranscriptionPort for WhisperTranscriber {
    async fn transcribe(&self, audio: &CapturedAudio) -> Result<String, DomainError> {
        if audio.is_empty() {
            return Err(DomainError::Transcription("no audio captured".into()));
        }

        let wav = audio.to_wav_bytes()?;
        let file_part = multipart::Part::bytes(wav)
            .file_name("response.wav")
            .mime_str("audio/wav")
            .map_err(|e| DomainError::Transcription(format!("mime: {}", e)))?;
        let form = multipart::Form::new()
            .text("model", self.model.clone())
            .text("response_format", "json")
            .part("file", file_part);

        debug!(
            model = %self.model,
            secs = audio.duration_secs(),
            "sending recording to transcription endpoint"
        );

        let mut request = self.client.post(self.endpoint()).multipart(form);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }
        let response = request
            .send()
            .await
            .map_err(|e| DomainError::Transcription(format!("request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Transcription(format!("body: {}", e)))?;
        if !status.is_success() {
            return Err(DomainError::Transcription(format!(
                "status {}: {}",
                status, body
            )));
        }

        let transcript = Self::parse_response(&body)?;
        info!(chars = transcript.len(), "transcription completed");
        Ok(transcript)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let t = WhisperTranscriber::new(
            "http://localhost:8000/v1/".into(),
            String::new(),
            "whisper-1".into(),
        );
        assert_eq!(t.endpoint(), "http://localhost:8000/v1/audio/transcriptions");
    }

    #[test]
    fn test_parse_response() {
        let text = WhisperTranscriber::parse_response(r#"{"text":"  I led the migration. "}"#)
            .unwrap();
        assert_eq!(text, "I led the migration.");
        assert!(WhisperTranscriber::parse_response("not json").is_err());
    }

    #[tokio::test]
    async fn test_empty_audio_rejected_without_request() {
        let t = WhisperTranscriber::new(
            "http://127.0.0.1:9".into(),
            String::new(),
            "whisper-1".into(),
        );
        let err = t.transcribe(&CapturedAudio::new(16_000)).await;
        assert!(matches!(err, Err(DomainError::Transcription(_))));
    }
}
