//! Infrastructure adapters. Implement outbound ports and the inbound UI.
//!
//! Microphone, speech-to-text, question banks, tick schedulers. Map errors to DomainError.

pub mod audio;
pub mod bank;
pub mod clock;
pub mod stt;
pub mod ui;
