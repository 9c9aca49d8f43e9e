//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: Called by UI/adapter into the application
//! - Outbound: Called by application into infrastructure

pub mod clock;
pub mod inbound;
pub mod outbound;

pub use clock::TickScheduler;
pub use inbound::InputPort;
pub use outbound::{
    AudioCapturePort, CaptureStream, PromptBankPort, QuestionBankPort, TranscriptionPort,
};
