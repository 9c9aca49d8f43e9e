//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

/// Shown when the microphone cannot be acquired.
pub const MIC_UNAVAILABLE_MESSAGE: &str =
    "Failed to access microphone. Please ensure you have granted microphone permissions.";

/// Shown in place of the transcript when speech-to-text fails.
pub const TRANSCRIPTION_FAILED_MESSAGE: &str =
    "Failed to convert speech to text. Please try again.";

#[derive(Error, Debug)]
pub enum DomainError {
    /// Permission denied, no input device, or device busy. Retryable.
    #[error("Audio device unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("Transcription failed: {0}")]
    Transcription(String),

    #[error("Invalid question: {0}")]
    InvalidQuestion(String),

    #[error("Question bank error: {0}")]
    QuestionBank(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("UI error: {0}")]
    Ui(String),
}

impl DomainError {
    /// Message surfaced to the user inside an interview session.
    pub fn user_message(&self) -> String {
        match self {
            DomainError::DeviceUnavailable(_) => MIC_UNAVAILABLE_MESSAGE.to_string(),
            DomainError::Transcription(_) => TRANSCRIPTION_FAILED_MESSAGE.to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_hides_device_detail() {
        let err = DomainError::DeviceUnavailable("NotAllowedError".into());
        assert_eq!(err.user_message(), MIC_UNAVAILABLE_MESSAGE);

        let err = DomainError::QuestionBank("no questions".into());
        assert_eq!(err.user_message(), "Prompt bank error: no prompt");
    }
}
