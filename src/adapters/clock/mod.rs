//! Tick scheduler adapters. Implement TickScheduler.
//!
//! Tokio interval for the running app, manual ticker for deterministic tests.

pub mod interval_ticker;
pub mod manual_ticker;

pub use interval_ticker::IntervalTicker;
pub use manual_ticker::ManualTicker;
