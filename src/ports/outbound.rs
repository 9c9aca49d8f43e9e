//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters.

use crate::domain::{CapturedAudio, DomainError, ExperienceLevel, JobRole, QuestionBank};

/// Host audio input. One acquired stream at a time per caller.
#[async_trait::async_trait]
pub trait AudioCapturePort: Send + Sync {
    /// Acquire the input device. Fails with `DomainError::DeviceUnavailable` on
    /// permission denied, missing device, or device busy.
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, DomainError>;
}

/// An acquired input stream. Yields PCM16 chunks until released.
pub trait CaptureStream: Send {
    /// Next available chunk, or `None` when nothing is buffered (or after release).
    fn next_chunk(&mut self) -> Option<Vec<i16>>;

    fn sample_rate(&self) -> u32;

    /// Give the device back to the host. Must be idempotent.
    fn release(&mut self);
}

/// Speech-to-text service.
#[async_trait::async_trait]
pub trait TranscriptionPort: Send + Sync {
    async fn transcribe(&self, audio: &CapturedAudio) -> Result<String, DomainError>;
}

/// Source of aptitude questions. Called once at startup.
#[async_trait::async_trait]
pub trait QuestionBankPort: Send + Sync {
    async fn load(&self) -> Result<QuestionBank, DomainError>;
}

/// Picks the interview prompt for a role and experience level.
#[async_trait::async_trait]
pub trait PromptBankPort: Send + Sync {
    async fn prompt_for(
        &self,
        role: JobRole,
        level: ExperienceLevel,
    ) -> Result<String, DomainError>;
}
