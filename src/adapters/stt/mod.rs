//! Speech-to-text adapters. Implement TranscriptionPort.
//!
//! Provides an OpenAI-compatible HTTP adapter and a mock adapter for offline use.

pub mod mock_adapter;
pub mod whisper_adapter;

pub use mock_adapter::{MockTranscriber, SIMULATED_TRANSCRIPT};
pub use whisper_adapter::WhisperTranscriber;
