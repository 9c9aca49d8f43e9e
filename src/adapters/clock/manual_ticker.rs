//! Manual tick scheduler for tests and headless drivers.
//!
//! Emits nothing on its own; records arm/disarm calls so callers can assert on them.

use crate::ports::TickScheduler;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Default)]
pub struct ManualTicker {
    armed: Mutex<Option<u64>>,
    arms: AtomicUsize,
    disarms: AtomicUsize,
}

impl ManualTicker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arm_count(&self) -> usize {
        self.arms.load(Ordering::SeqCst)
    }

    pub fn disarm_count(&self) -> usize {
        self.disarms.load(Ordering::SeqCst)
    }

    pub fn armed_generation(&self) -> Option<u64> {
        *self.armed.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub fn is_armed(&self) -> bool {
        self.armed_generation().is_some()
    }
}

impl TickScheduler for ManualTicker {
    fn arm(&self, generation: u64) {
        self.arms.fetch_add(1, Ordering::SeqCst);
        *self.armed.lock().unwrap_or_else(|e| e.into_inner()) = Some(generation);
    }

    fn disarm(&self) {
        self.disarms.fetch_add(1, Ordering::SeqCst);
        self.armed.lock().unwrap_or_else(|e| e.into_inner()).take();
    }
}
