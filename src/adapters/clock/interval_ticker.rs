//! Implements TickScheduler with a tokio interval task.
//!
//! Each tick sends the armed generation over an unbounded channel; the owner of the
//! engine drains the receiver and calls `AssessmentEngine::tick_for`.

use crate::ports::TickScheduler;
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::debug;

pub struct IntervalTicker {
    period: Duration,
    tx: mpsc::UnboundedSender<u64>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl IntervalTicker {
    /// Ticker plus the receiving end of its tick channel.
    pub fn new(period: Duration) -> (Self, mpsc::UnboundedReceiver<u64>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (
            Self {
                period,
                tx,
                task: Mutex::new(None),
            },
            rx,
        )
    }

    /// One tick per second.
    pub fn per_second() -> (Self, mpsc::UnboundedReceiver<u64>) {
        Self::new(Duration::from_secs(1))
    }
}

impl TickScheduler for IntervalTicker {
    /// Must be called from within a tokio runtime.
    fn arm(&self, generation: u64) {
        let tx = self.tx.clone();
        let period = self.period;
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            loop {
                interval.tick().await;
                if tx.send(generation).is_err() {
                    break;
                }
            }
        });
        let previous = self
            .task
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .replace(handle);
        if let Some(old) = previous {
            old.abort();
        }
        debug!(generation, "tick scheduler armed");
    }

    fn disarm(&self) {
        if let Some(handle) = self.task.lock().unwrap_or_else(|e| e.into_inner()).take() {
            handle.abort();
            debug!("tick scheduler disarmed");
        }
    }
}

impl Drop for IntervalTicker {
    fn drop(&mut self) {
        self.disarm();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_emits_generation_each_period_until_disarmed() {
        let (ticker, mut rx) = IntervalTicker::per_second();
        ticker.arm(7);

        for _ in 0..3 {
            assert_eq!(rx.recv().await, Some(7));
        }

        ticker.disarm();
        ticker.disarm();
        let next = tokio::time::timeout(Duration::from_secs(5), rx.recv()).await;
        assert!(next.is_err(), "no ticks after disarm");
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearm_replaces_previous_schedule() {
        let (ticker, mut rx) = IntervalTicker::per_second();
        ticker.arm(1);
        assert_eq!(rx.recv().await, Some(1));
        ticker.arm(2);
        assert_eq!(rx.recv().await, Some(2));
        assert_eq!(rx.recv().await, Some(2));
        ticker.disarm();
    }
}
