//! Tick scheduler port. Drives the aptitude test countdown.

/// Recurring one-second tick source.
///
/// The scheduler only emits; whoever owns the engine applies each tick through
/// `AssessmentEngine::tick_for`, which drops ticks from an older generation.
pub trait TickScheduler: Send + Sync {
    /// Start emitting ticks tagged with `generation`. Re-arming replaces the previous schedule.
    fn arm(&self, generation: u64);

    /// Stop emitting. Safe to call when not armed.
    fn disarm(&self);
}
