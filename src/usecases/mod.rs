//! Application use cases. Drive the two session state machines via ports.

pub mod assessment_engine;
pub mod capture_guard;
pub mod recording_controller;

pub use assessment_engine::{AssessmentEngine, drive_ticks};
pub use capture_guard::CaptureGuard;
pub use recording_controller::{RecordingController, TranscriptionOutcome, TranscriptionRequest};
