//! Mock interview session state and static feedback.

use crate::domain::{ExperienceLevel, JobRole};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InterviewStatus {
    Setup,
    Active,
    Feedback,
}

/// Mutable state of one interview cycle. Owned by `RecordingController`.
///
/// `recording` is only ever true while `status == Active`.
#[derive(Debug, Clone, Serialize)]
pub struct InterviewSession {
    pub status: InterviewStatus,
    pub role: Option<JobRole>,
    pub level: Option<ExperienceLevel>,
    pub prompt: String,
    pub transcript: String,
    pub last_error: Option<String>,
    pub recording: bool,
}

impl InterviewSession {
    pub fn new() -> Self {
        Self {
            status: InterviewStatus::Setup,
            role: None,
            level: None,
            prompt: String::new(),
            transcript: String::new(),
            last_error: None,
            recording: false,
        }
    }
}

impl Default for InterviewSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct InterviewFeedback {
    pub strengths: &'static [&'static str],
    pub improvements: &'static [&'static str],
}

pub const STATIC_FEEDBACK: InterviewFeedback = InterviewFeedback {
    strengths: &[
        "Clear communication and structured responses",
        "Good examples to support your points",
        "Demonstrated technical knowledge effectively",
    ],
    improvements: &[
        "Consider providing more specific metrics and results",
        "Could elaborate more on problem-solving approach",
        "Practice concise responses while maintaining detail",
    ],
};
