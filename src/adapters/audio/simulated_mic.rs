//! Implements AudioCapturePort with a simulated microphone.
//!
//! Generates a quiet sine tone at real-time pace. Availability can be toggled at runtime
//! to exercise the permission-denied path, and acquire/release calls are counted.

use crate::domain::DomainError;
use crate::ports::{AudioCapturePort, CaptureStream};
use std::f32::consts::TAU;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Instant;
use tracing::{debug, info};

/// Largest chunk handed out per `next_chunk` call.
const CHUNK_MS: u32 = 100;
const TONE_HZ: f32 = 440.0;
const AMPLITUDE: f32 = 1200.0;

/// Counters and flags shared between the microphone and its open stream.
#[derive(Default)]
struct MicState {
    available: AtomicBool,
    in_use: AtomicBool,
    acquired: AtomicUsize,
    released: AtomicUsize,
}

pub struct SimulatedMicrophone {
    state: Arc<MicState>,
    sample_rate: u32,
}

impl SimulatedMicrophone {
    pub fn new(sample_rate: u32) -> Self {
        let state = MicState::default();
        state.available.store(true, Ordering::SeqCst);
        Self {
            state: Arc::new(state),
            sample_rate,
        }
    }

    /// Microphone that denies access until `set_available(true)`.
    pub fn unavailable(sample_rate: u32) -> Self {
        let mic = Self::new(sample_rate);
        mic.set_available(false);
        mic
    }

    pub fn set_available(&self, available: bool) {
        self.state.available.store(available, Ordering::SeqCst);
    }

    pub fn acquire_count(&self) -> usize {
        self.state.acquired.load(Ordering::SeqCst)
    }

    pub fn release_count(&self) -> usize {
        self.state.released.load(Ordering::SeqCst)
    }

    /// True while a stream is held and not yet released.
    pub fn in_use(&self) -> bool {
        self.state.in_use.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl AudioCapturePort for SimulatedMicrophone {
    async fn acquire(&self) -> Result<Box<dyn CaptureStream>, DomainError> {
        if !self.state.available.load(Ordering::SeqCst) {
            return Err(DomainError::DeviceUnavailable(
                "permission denied by host".into(),
            ));
        }
        if self.state.in_use.swap(true, Ordering::SeqCst) {
            return Err(DomainError::DeviceUnavailable("device busy".into()));
        }
        self.state.acquired.fetch_add(1, Ordering::SeqCst);
        info!(sample_rate = self.sample_rate, "simulated microphone acquired");
        Ok(Box::new(SimulatedStream {
            state: Arc::clone(&self.state),
            sample_rate: self.sample_rate,
            opened_at: Instant::now(),
            emitted: 0,
            released: false,
        }))
    }
}

struct SimulatedStream {
    state: Arc<MicState>,
    sample_rate: u32,
    opened_at: Instant,
    emitted: u64,
    released: bool,
}

impl CaptureStream for SimulatedStream {
    fn next_chunk(&mut self) -> Option<Vec<i16>> {
        if self.released {
            return None;
        }
        let due = (self.opened_at.elapsed().as_secs_f64() * f64::from(self.sample_rate)) as u64;
        let pending = due.saturating_sub(self.emitted);
        if pending == 0 {
            return None;
        }
        let max_chunk = (u64::from(self.sample_rate) * u64::from(CHUNK_MS) / 1000).max(1);
        let n = pending.min(max_chunk);
        let rate = self.sample_rate as f32;
        let chunk = (self.emitted..self.emitted + n)
            .map(|i| ((TAU * TONE_HZ * i as f32 / rate).sin() * AMPLITUDE) as i16)
            .collect();
        self.emitted += n;
        Some(chunk)
    }

    fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        self.state.in_use.store(false, Ordering::SeqCst);
        self.state.released.fetch_add(1, Ordering::SeqCst);
        debug!(samples = self.emitted, "simulated microphone released");
    }
}

impl Drop for SimulatedStream {
    fn drop(&mut self) {
        self.release();
    }
}
