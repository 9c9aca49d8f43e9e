//! Mock speech-to-text adapter for running without an API key.
//!
//! Returns a fixed transcript after a simulated delay. Can be switched into a failing mode.

use crate::domain::{CapturedAudio, DomainError};
use crate::ports::TranscriptionPort;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tracing::info;

pub const SIMULATED_TRANSCRIPT: &str = "This is a simulated response from speech-to-text conversion. \
In a production environment, this would be the actual transcribed text from your audio recording.";

pub struct MockTranscriber {
    /// Simulated processing delay in milliseconds.
    delay_ms: u64,
    fail: AtomicBool,
}

impl MockTranscriber {
    /// Create a mock transcriber with default delay (300ms).
    pub fn new() -> Self {
        Self::with_delay(300)
    }

    pub fn with_delay(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            fail: AtomicBool::new(false),
        }
    }

    /// Mock that rejects every request until `set_failing(false)`.
    pub fn failing() -> Self {
        let t = Self::with_delay(0);
        t.set_failing(true);
        t
    }

    pub fn set_failing(&self, fail: bool) {
        self.fail.store(fail, Ordering::SeqCst);
    }
}

impl Default for MockTranscriber {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl TranscriptionPort for MockTranscriber {
    async fn transcribe(&self, audio: &CapturedAudio) -> Result<String, DomainError> {
        info!(
            samples = audio.samples.len(),
            secs = audio.duration_secs(),
            "[MOCK] Simulating speech-to-text"
        );

        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }

        if self.fail.load(Ordering::SeqCst) {
            return Err(DomainError::Transcription("[MOCK] simulated failure".into()));
        }
        Ok(SIMULATED_TRANSCRIPT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_transcriber() {
        let stt = MockTranscriber::with_delay(5);
        let text = stt.transcribe(&CapturedAudio::new(16_000)).await.unwrap();
        assert_eq!(text, SIMULATED_TRANSCRIPT);

        stt.set_failing(true);
        let err = stt.transcribe(&CapturedAudio::new(16_000)).await;
        assert!(matches!(err, Err(DomainError::Transcription(_))));
    }
}
