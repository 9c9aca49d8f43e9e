//! Timed aptitude test: not-started -> in-progress -> completed -> (restart) not-started.
//!
//! The countdown is driven from outside via `tick` / `tick_for`; the engine only arms and
//! disarms its `TickScheduler`. Wrong-state calls and out-of-range indices are caller bugs:
//! they are logged and ignored, never surfaced as errors.

use crate::domain::{AssessmentSession, AssessmentStatus, Question, QuestionBank, ScoreReport};
use crate::ports::TickScheduler;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, info, warn};

pub struct AssessmentEngine {
    bank: Arc<QuestionBank>,
    scheduler: Arc<dyn TickScheduler>,
    duration_secs: u32,
    session: AssessmentSession,
    /// Bumped on every start and restart; ticks from older runs are dropped.
    generation: u64,
}

impl AssessmentEngine {
    pub fn new(
        bank: Arc<QuestionBank>,
        scheduler: Arc<dyn TickScheduler>,
        duration_secs: u32,
    ) -> Self {
        Self {
            bank,
            scheduler,
            duration_secs,
            session: AssessmentSession::new(duration_secs),
            generation: 0,
        }
    }

    pub fn session(&self) -> &AssessmentSession {
        &self.session
    }

    pub fn status(&self) -> AssessmentStatus {
        self.session.status
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn duration_secs(&self) -> u32 {
        self.duration_secs
    }

    pub fn bank(&self) -> &QuestionBank {
        &self.bank
    }

    pub fn questions(&self) -> &[Question] {
        self.bank.questions()
    }

    pub fn question_count(&self) -> usize {
        self.bank.len()
    }

    pub fn current_question(&self) -> Option<&Question> {
        self.bank.get(self.session.current_index)
    }

    pub fn score_report(&self) -> Option<&ScoreReport> {
        self.session.score.as_ref()
    }

    pub fn start(&mut self) {
        if self.session.status != AssessmentStatus::NotStarted {
            warn!(status = ?self.session.status, "start ignored: test already started");
            return;
        }
        self.generation += 1;
        self.session.answers = vec![None; self.bank.len()];
        self.session.remaining_secs = self.duration_secs;
        self.session.current_index = 0;
        self.session.started_at = Some(Utc::now());
        self.session.status = AssessmentStatus::InProgress;
        self.scheduler.arm(self.generation);
        info!(
            generation = self.generation,
            questions = self.bank.len(),
            duration_secs = self.duration_secs,
            "aptitude test started"
        );
    }

    /// One-second countdown step. Completes the test when time runs out.
    pub fn tick(&mut self) {
        if self.session.status != AssessmentStatus::InProgress {
            return;
        }
        self.session.remaining_secs = self.session.remaining_secs.saturating_sub(1);
        debug!(remaining_secs = self.session.remaining_secs, "tick");
        if self.session.remaining_secs == 0 {
            info!("time expired; auto-submitting");
            self.complete();
        }
    }

    /// Apply a tick emitted for `generation`. Stale ticks are dropped.
    pub fn tick_for(&mut self, generation: u64) {
        if generation != self.generation {
            debug!(
                generation,
                current = self.generation,
                "dropping stale tick"
            );
            return;
        }
        self.tick();
    }

    pub fn select_answer(&mut self, question_index: usize, option_index: usize) {
        if self.session.status != AssessmentStatus::InProgress {
            warn!(status = ?self.session.status, "select_answer ignored: test not in progress");
            return;
        }
        let Some(question) = self.bank.get(question_index) else {
            warn!(question_index, "select_answer ignored: question index out of range");
            return;
        };
        if option_index >= question.options.len() {
            warn!(
                question_index,
                option_index, "select_answer ignored: option index out of range"
            );
            return;
        }
        self.session.answers[question_index] = Some(option_index);
    }

    pub fn submit(&mut self) {
        if self.session.status != AssessmentStatus::InProgress {
            warn!(status = ?self.session.status, "submit ignored: test not in progress");
            return;
        }
        info!(
            answered = self.session.answered_count(),
            remaining_secs = self.session.remaining_secs,
            "aptitude test submitted"
        );
        self.complete();
    }

    /// Move the displayed question pointer, clamped to the question range.
    pub fn navigate(&mut self, target: isize) {
        let last = self.bank.len().saturating_sub(1) as isize;
        self.session.current_index = target.clamp(0, last) as usize;
    }

    pub fn next(&mut self) {
        self.navigate(self.session.current_index as isize + 1);
    }

    pub fn previous(&mut self) {
        self.navigate(self.session.current_index as isize - 1);
    }

    pub fn restart(&mut self) {
        if self.session.status == AssessmentStatus::InProgress {
            self.scheduler.disarm();
        }
        self.generation += 1;
        self.session = AssessmentSession::new(self.duration_secs);
        info!(generation = self.generation, "aptitude test reset");
    }

    /// Single exit from in-progress: score, stamp, disarm.
    fn complete(&mut self) {
        let report = ScoreReport::compute(&self.session.answers, self.bank.questions());
        info!(
            correct = report.correct,
            total = report.total,
            percentage = %report.percentage_display(),
            "aptitude test completed"
        );
        self.session.score = Some(report);
        self.session.completed_at = Some(Utc::now());
        self.session.status = AssessmentStatus::Completed;
        self.scheduler.disarm();
    }
}

/// Apply scheduler ticks to a shared engine. Runs until the tick channel closes.
pub async fn drive_ticks(
    engine: Arc<Mutex<AssessmentEngine>>,
    mut ticks: mpsc::UnboundedReceiver<u64>,
) {
    while let Some(generation) = ticks.recv().await {
        engine.lock().await.tick_for(generation);
    }
    debug!("tick driver finished (channel closed)");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::clock::ManualTicker;
    use crate::domain::DEFAULT_DURATION_SECS;

    fn bank(correct: &[usize]) -> Arc<QuestionBank> {
        let qs = correct
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                Question::new(
                    i as u32 + 1,
                    "Logical Reasoning",
                    format!("q{}", i + 1),
                    vec!["a".into(), "b".into(), "c".into(), "d".into()],
                    c,
                )
                .unwrap()
            })
            .collect();
        Arc::new(QuestionBank::new(qs).unwrap())
    }

    fn engine(correct: &[usize]) -> (AssessmentEngine, Arc<ManualTicker>) {
        let ticker = Arc::new(ManualTicker::new());
        let engine = AssessmentEngine::new(bank(correct), ticker.clone(), DEFAULT_DURATION_SECS);
        (engine, ticker)
    }

    #[test]
    fn test_start_initializes_unset_answers_and_arms() {
        let (mut e, ticker) = engine(&[1, 2, 0]);
        assert!(e.session().answers.is_empty());

        e.start();
        assert_eq!(e.status(), AssessmentStatus::InProgress);
        assert_eq!(e.session().answers, vec![None, None, None]);
        assert_eq!(e.session().remaining_secs, 900);
        assert_eq!(ticker.arm_count(), 1);
        assert_eq!(ticker.armed_generation(), Some(e.generation()));
    }

    #[test]
    fn test_900_ticks_complete_exactly_once() {
        let (mut e, ticker) = engine(&[0, 0, 0]);
        e.start();
        for _ in 0..899 {
            e.tick();
        }
        assert_eq!(e.status(), AssessmentStatus::InProgress);
        assert_eq!(e.session().remaining_secs, 1);

        e.tick();
        assert_eq!(e.status(), AssessmentStatus::Completed);
        assert_eq!(e.session().remaining_secs, 0);
        let completed_at = e.session().completed_at;

        for _ in 0..10 {
            e.tick();
        }
        assert_eq!(e.status(), AssessmentStatus::Completed);
        assert_eq!(e.session().remaining_secs, 0);
        assert_eq!(e.session().completed_at, completed_at);
        assert_eq!(ticker.disarm_count(), 1);
        assert_eq!(e.score_report().unwrap().correct, 0);
    }

    #[test]
    fn test_tick_before_start_is_noop() {
        let (mut e, _) = engine(&[0]);
        e.tick();
        assert_eq!(e.status(), AssessmentStatus::NotStarted);
        assert_eq!(e.session().remaining_secs, 900);
    }

    #[test]
    fn test_submit_scenario_scores_two_of_three() {
        let (mut e, ticker) = engine(&[1, 2, 0]);
        e.start();
        e.select_answer(0, 1);
        e.select_answer(1, 2);
        e.select_answer(2, 1);
        e.submit();

        assert_eq!(e.status(), AssessmentStatus::Completed);
        let report = e.score_report().unwrap();
        assert_eq!(report.correct, 2);
        assert_eq!(report.percentage_display(), "66.7%");
        assert_eq!(ticker.disarm_count(), 1);

        // Stale tick after completion must not change anything.
        e.tick();
        assert_eq!(ticker.disarm_count(), 1);
    }

    #[test]
    fn test_submit_preserves_partial_answers() {
        let (mut e, _) = engine(&[1, 2, 0]);
        e.start();
        e.tick();
        e.select_answer(1, 2);
        e.submit();

        assert_eq!(e.session().answers, vec![None, Some(2), None]);
        assert_eq!(e.session().remaining_secs, 899);
        assert_eq!(e.score_report().unwrap().correct, 1);
    }

    #[test]
    fn test_select_answer_keeps_latest() {
        let (mut e, _) = engine(&[1, 2, 0]);
        e.start();
        e.select_answer(0, 3);
        e.select_answer(0, 1);
        assert_eq!(e.session().answers[0], Some(1));
    }

    #[test]
    fn test_select_answer_contract_violations_ignored() {
        let (mut e, _) = engine(&[1, 2, 0]);
        e.select_answer(0, 1);
        assert!(e.session().answers.is_empty());

        e.start();
        e.select_answer(3, 0);
        e.select_answer(0, 4);
        assert_eq!(e.session().answers, vec![None, None, None]);
    }

    #[test]
    fn test_restart_from_completed_and_in_progress() {
        let (mut e, ticker) = engine(&[1, 2, 0]);
        e.start();
        e.select_answer(0, 1);
        e.submit();
        e.restart();
        assert_eq!(e.status(), AssessmentStatus::NotStarted);
        assert_eq!(e.session().remaining_secs, 900);
        assert!(e.session().answers.iter().all(Option::is_none));
        assert!(e.score_report().is_none());
        // Already disarmed on submit; restart does not disarm again.
        assert_eq!(ticker.disarm_count(), 1);

        e.start();
        e.select_answer(2, 0);
        e.tick();
        e.navigate(2);
        e.restart();
        assert_eq!(e.session().remaining_secs, 900);
        assert_eq!(e.session().current_index, 0);
        assert!(e.session().answers.iter().all(Option::is_none));
        assert_eq!(ticker.disarm_count(), 2);
        assert!(!ticker.is_armed());

        e.start();
        assert_eq!(e.session().answers, vec![None, None, None]);
    }

    #[test]
    fn test_stale_generation_ticks_dropped() {
        let (mut e, _) = engine(&[0, 0]);
        e.start();
        let old = e.generation();
        e.restart();
        e.start();
        e.tick_for(old);
        assert_eq!(e.session().remaining_secs, 900);
        e.tick_for(e.generation());
        assert_eq!(e.session().remaining_secs, 899);
    }

    #[test]
    fn test_navigate_clamps_and_keeps_state() {
        let (mut e, _) = engine(&[0, 1, 2]);
        e.start();
        e.select_answer(0, 0);
        e.navigate(-5);
        assert_eq!(e.session().current_index, 0);
        e.navigate(99);
        assert_eq!(e.session().current_index, 2);
        e.next();
        assert_eq!(e.session().current_index, 2);
        e.previous();
        assert_eq!(e.session().current_index, 1);
        assert_eq!(e.status(), AssessmentStatus::InProgress);
        assert_eq!(e.session().answers[0], Some(0));
        assert_eq!(e.current_question().unwrap().id, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_interval_ticker_auto_submits() {
        use crate::adapters::clock::IntervalTicker;
        use std::time::Duration;

        let (ticker, rx) = IntervalTicker::per_second();
        let engine = Arc::new(Mutex::new(AssessmentEngine::new(
            bank(&[1, 2, 0]),
            Arc::new(ticker),
            3,
        )));
        let driver = tokio::spawn(drive_ticks(Arc::clone(&engine), rx));

        {
            let mut e = engine.lock().await;
            e.start();
            e.select_answer(0, 1);
        }
        tokio::time::sleep(Duration::from_millis(2500)).await;
        assert_eq!(engine.lock().await.session().remaining_secs, 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        let e = engine.lock().await;
        assert_eq!(e.status(), AssessmentStatus::Completed);
        assert_eq!(e.session().remaining_secs, 0);
        assert_eq!(e.score_report().unwrap().correct, 1);
        drop(e);
        driver.abort();
    }

    #[test]
    fn test_start_twice_is_ignored() {
        let (mut e, ticker) = engine(&[0]);
        e.start();
        e.tick();
        e.start();
        assert_eq!(e.session().remaining_secs, 899);
        assert_eq!(ticker.arm_count(), 1);
    }
}
