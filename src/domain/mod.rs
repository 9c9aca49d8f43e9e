//! Core domain layer. No external I/O dependencies.
//!
//! Entities, session state and scoring rules live here. Dependencies flow inward.

pub mod assessment;
pub mod entities;
pub mod errors;
pub mod interview;

pub use assessment::{
    AssessmentSession, AssessmentStatus, DEFAULT_DURATION_SECS, QuestionOutcome, ScoreReport,
    format_clock, format_percentage,
};
pub use entities::{CapturedAudio, ExperienceLevel, JobRole, Question, QuestionBank};
pub use errors::{DomainError, MIC_UNAVAILABLE_MESSAGE, TRANSCRIPTION_FAILED_MESSAGE};
pub use interview::{InterviewFeedback, InterviewSession, InterviewStatus, STATIC_FEEDBACK};
