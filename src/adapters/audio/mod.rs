//! Audio capture adapters. Implement AudioCapturePort.

pub mod simulated_mic;

pub use simulated_mic::SimulatedMicrophone;
